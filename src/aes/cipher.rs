//! Single-block encryption and decryption, instrumented with the Hamming
//! fault-detection and correction overlay on every round transform.
//!
//! The encrypt path mirrors the reference `Cipher`/`AddRoundKey`/`SubBytes`/
//! `ShiftRows`/`MixColumns` instrumentation exactly. The reference decrypt
//! path (`InvCipher`) never seeded its predicted-code matrix before running
//! and never instrumented `InvSubBytes`/`InvShiftRows`/`InvMixColumns` at
//! all, so a corrupted ciphertext block decrypted to garbage silently. Here
//! `decrypt_block` seeds `pcode` from the ciphertext's own Hamming encoding
//! and every inverse transform is checked the same way the forward ones are.

use super::context::CipherContext;
use super::hamming::correct_byte;
use super::predict::{
    encode_state, predict_add_key, predict_inv_mix_cols, predict_inv_shift, predict_inv_sub,
    predict_mix_cols, predict_shift, predict_sub, HamState,
};
use super::state::{
    add_round_key, block_to_state, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns,
    shift_rows, state_to_block, sub_bytes, State,
};

/// A fault survived correction and the block could not be reconciled.
pub(crate) struct Uncorrectable;

fn compare_and_correct(
    state: &mut State,
    pcode: &HamState,
    mode: super::hamming::CorrectorMode,
    corrections: &mut u64,
) -> Result<(), Uncorrectable> {
    let observed = encode_state(state);
    if observed == *pcode {
        return Ok(());
    }

    log::debug!("hamming codes disagree before correction");
    for row in 0..4 {
        for col in 0..4 {
            if observed[row][col] != pcode[row][col] {
                *corrections += 1;
                if let Some(fixed) =
                    correct_byte(state[row][col], observed[row][col], pcode[row][col], mode)
                {
                    state[row][col] = fixed;
                }
            }
        }
    }

    if encode_state(state) != *pcode {
        log::warn!("uncorrectable fault: hamming codes still disagree after correction");
        return Err(Uncorrectable);
    }
    Ok(())
}

pub(crate) fn encrypt_block(ctx: &mut CipherContext, block: &[u8; 16]) -> Result<[u8; 16], Uncorrectable> {
    let nr = ctx.nr();
    let mode = ctx.mode();
    let mut state = block_to_state(block);
    let mut pcode = encode_state(&state);

    predict_add_key(0, ctx.round_key(), &mut pcode);
    add_round_key(0, &mut state, ctx.round_key());
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    for round in 1..nr {
        predict_sub(&state, &mut pcode);
        sub_bytes(&mut state);
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

        predict_shift(&mut pcode);
        shift_rows(&mut state);
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

        predict_mix_cols(&state, &mut pcode);
        mix_columns(&mut state);
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

        predict_add_key(round, ctx.round_key(), &mut pcode);
        add_round_key(round, &mut state, ctx.round_key());
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;
    }

    predict_sub(&state, &mut pcode);
    sub_bytes(&mut state);
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    predict_shift(&mut pcode);
    shift_rows(&mut state);
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    predict_add_key(nr, ctx.round_key(), &mut pcode);
    add_round_key(nr, &mut state, ctx.round_key());
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    Ok(state_to_block(&state))
}

pub(crate) fn decrypt_block(ctx: &mut CipherContext, block: &[u8; 16]) -> Result<[u8; 16], Uncorrectable> {
    let nr = ctx.nr();
    let mode = ctx.mode();
    let mut state = block_to_state(block);
    let mut pcode = encode_state(&state);

    predict_add_key(nr, ctx.round_key(), &mut pcode);
    add_round_key(nr, &mut state, ctx.round_key());
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    for round in (1..nr).rev() {
        predict_inv_shift(&mut pcode);
        inv_shift_rows(&mut state);
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

        predict_inv_sub(&state, &mut pcode);
        inv_sub_bytes(&mut state);
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

        predict_add_key(round, ctx.round_key(), &mut pcode);
        add_round_key(round, &mut state, ctx.round_key());
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

        predict_inv_mix_cols(&state, &mut pcode);
        inv_mix_columns(&mut state);
        compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;
    }

    predict_inv_shift(&mut pcode);
    inv_shift_rows(&mut state);
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    predict_inv_sub(&state, &mut pcode);
    inv_sub_bytes(&mut state);
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    predict_add_key(0, ctx.round_key(), &mut pcode);
    add_round_key(0, &mut state, ctx.round_key());
    compare_and_correct(&mut state, &pcode, mode, ctx.corrections_mut())?;

    Ok(state_to_block(&state))
}
