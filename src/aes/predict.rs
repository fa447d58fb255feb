//! Predicted Hamming codes for each AES round transform.
//!
//! Each `predict_*` function computes what `encode_state` should return
//! *after* the matching state transform runs, without itself touching the
//! state bytes. `verify::compare_and_correct` then recomputes the real code
//! post-transform and reconciles the two, catching (and where possible
//! correcting) any single-bit fault introduced while the transform ran.
//!
//! The forward predictors mirror the reference implementation's
//! `predictAddKey`/`predictSub`/`predictShift`/`predictMixCols`. The inverse
//! predictors have no counterpart there - the reference decrypt path never
//! seeded its fault-detection state at all - and are derived here from the
//! same construction applied to the inverse transforms.

use super::gf::multiply;
use super::hamming::{hamming_encode, H_RD};
use super::state::State;

pub(crate) type HamState = State;

/// Coefficient rows of the forward MixColumns matrix.
const MIX_COEFF: [[u8; 4]; 4] = [
    [0x02, 0x03, 0x01, 0x01],
    [0x01, 0x02, 0x03, 0x01],
    [0x01, 0x01, 0x02, 0x03],
    [0x03, 0x01, 0x01, 0x02],
];

/// Coefficient rows of the InvMixColumns matrix.
const INV_MIX_COEFF: [[u8; 4]; 4] = [
    [0x0e, 0x0b, 0x0d, 0x09],
    [0x09, 0x0e, 0x0b, 0x0d],
    [0x0d, 0x09, 0x0e, 0x0b],
    [0x0b, 0x0d, 0x09, 0x0e],
];

pub(crate) fn encode_state(state: &State) -> HamState {
    let mut ham = [[0u8; 4]; 4];
    for (ham_row, state_row) in ham.iter_mut().zip(state.iter()) {
        for (h, s) in ham_row.iter_mut().zip(state_row.iter()) {
            *h = hamming_encode(*s);
        }
    }
    ham
}

pub(crate) fn predict_add_key(round: usize, round_key: &[u8], pcode: &mut HamState) {
    for i in 0..4 {
        for j in 0..4 {
            pcode[j][i] ^= hamming_encode(round_key[round * 16 + i * 4 + j]);
        }
    }
}

pub(crate) fn predict_sub(state: &State, pcode: &mut HamState) {
    for row in 0..4 {
        for col in 0..4 {
            pcode[row][col] = H_RD[state[row][col] as usize];
        }
    }
}

pub(crate) fn predict_inv_sub(state: &State, pcode: &mut HamState) {
    for row in 0..4 {
        for col in 0..4 {
            pcode[row][col] = hamming_encode(super::sbox::INV_S_BOX[state[row][col] as usize]);
        }
    }
}

pub(crate) fn predict_shift(pcode: &mut HamState) {
    let temp = pcode[1][0];
    pcode[1][0] = pcode[1][1];
    pcode[1][1] = pcode[1][2];
    pcode[1][2] = pcode[1][3];
    pcode[1][3] = temp;

    let temp = pcode[2][0];
    pcode[2][0] = pcode[2][2];
    pcode[2][2] = temp;
    let temp = pcode[2][1];
    pcode[2][1] = pcode[2][3];
    pcode[2][3] = temp;

    let temp = pcode[3][0];
    pcode[3][0] = pcode[3][3];
    pcode[3][3] = pcode[3][2];
    pcode[3][2] = pcode[3][1];
    pcode[3][1] = temp;
}

pub(crate) fn predict_inv_shift(pcode: &mut HamState) {
    let temp = pcode[1][3];
    pcode[1][3] = pcode[1][2];
    pcode[1][2] = pcode[1][1];
    pcode[1][1] = pcode[1][0];
    pcode[1][0] = temp;

    let temp = pcode[2][0];
    pcode[2][0] = pcode[2][2];
    pcode[2][2] = temp;
    let temp = pcode[2][1];
    pcode[2][1] = pcode[2][3];
    pcode[2][3] = temp;

    let temp = pcode[3][0];
    pcode[3][0] = pcode[3][1];
    pcode[3][1] = pcode[3][2];
    pcode[3][2] = pcode[3][3];
    pcode[3][3] = temp;
}

pub(crate) fn predict_mix_cols(state: &State, pcode: &mut HamState) {
    for col in 0..4 {
        for row in 0..4 {
            let mut code = 0u8;
            for k in 0..4 {
                code ^= hamming_encode(multiply(state[k][col], MIX_COEFF[row][k]));
            }
            pcode[row][col] = code;
        }
    }
}

pub(crate) fn predict_inv_mix_cols(state: &State, pcode: &mut HamState) {
    for col in 0..4 {
        for row in 0..4 {
            let mut code = 0u8;
            for k in 0..4 {
                code ^= hamming_encode(multiply(state[k][col], INV_MIX_COEFF[row][k]));
            }
            pcode[row][col] = code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::state::{add_round_key, mix_columns, shift_rows, sub_bytes};

    fn sample_state() -> State {
        [
            [0x32, 0x88, 0x31, 0xe0],
            [0x43, 0x5a, 0x31, 0x37],
            [0xf6, 0x30, 0x98, 0x07],
            [0xa8, 0x8d, 0xa2, 0x34],
        ]
    }

    #[test]
    fn sub_bytes_matches_prediction() {
        let state = sample_state();
        let mut pcode = encode_state(&state);
        predict_sub(&state, &mut pcode);

        let mut transformed = state;
        sub_bytes(&mut transformed);
        assert_eq!(encode_state(&transformed), pcode);
    }

    #[test]
    fn shift_rows_matches_prediction() {
        let state = sample_state();
        let mut pcode = encode_state(&state);
        predict_shift(&mut pcode);

        let mut transformed = state;
        shift_rows(&mut transformed);
        assert_eq!(encode_state(&transformed), pcode);
    }

    #[test]
    fn mix_columns_matches_prediction() {
        let state = sample_state();
        let mut pcode = encode_state(&state);
        predict_mix_cols(&state, &mut pcode);

        let mut transformed = state;
        mix_columns(&mut transformed);
        assert_eq!(encode_state(&transformed), pcode);
    }

    #[test]
    fn add_round_key_matches_prediction() {
        let state = sample_state();
        let round_key = [0x2bu8; 16];
        let mut pcode = encode_state(&state);
        predict_add_key(0, &round_key, &mut pcode);

        let mut transformed = state;
        add_round_key(0, &mut transformed, &round_key);
        assert_eq!(encode_state(&transformed), pcode);
    }
}
