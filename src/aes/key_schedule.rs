//! Key expansion: turns a 16/24/32-byte cipher key into the full sequence of
//! round keys, packed into one contiguous buffer.

use super::sbox::{RCON, S_BOX};

const NB: usize = 4;

/// Expand `key` into `Nb*(nr+1)*4` bytes of round-key material. The returned
/// buffer is always 240 bytes (the AES-256 worst case); callers only read
/// the first `16*(nr+1)` bytes.
pub(crate) fn expand_key(key: &[u8], nk: usize, nr: usize) -> [u8; 240] {
    let mut expanded_key = [0u8; 240];
    let mut temp = [0u8; 4];

    for i in 0..nk {
        expanded_key[i * 4..(i + 1) * 4].copy_from_slice(&key[i * 4..(i + 1) * 4]);
    }

    let mut i = nk;
    while i < NB * (nr + 1) {
        temp.copy_from_slice(&expanded_key[(i - 1) * 4..i * 4]);

        if i % nk == 0 {
            let k = temp[0];
            temp.rotate_left(1);
            temp[3] = k;
            for byte in temp.iter_mut() {
                *byte = S_BOX[*byte as usize];
            }
            temp[0] ^= RCON[i / nk];
        } else if nk > 6 && i % nk == 4 {
            for byte in temp.iter_mut() {
                *byte = S_BOX[*byte as usize];
            }
        }

        for j in 0..4 {
            expanded_key[i * 4 + j] = expanded_key[(i - nk) * 4 + j] ^ temp[j];
        }
        i += 1;
    }
    expanded_key
}

/// Map a key length in bytes to `(Nk, Nr)`. Caller is expected to have
/// already validated the length.
pub(crate) fn key_parameters(key_len: usize) -> (usize, usize) {
    match key_len / 4 {
        4 => (4, 10),
        6 => (6, 12),
        8 => (8, 14),
        _ => unreachable!("key length validated before calling key_parameters"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aes128_first_round_key_is_the_key_itself() {
        let key: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let expanded = expand_key(&key, 4, 10);
        assert_eq!(&expanded[0..16], &key);
    }

    #[test]
    fn aes128_known_round_key_vector() {
        // FIPS-197 Appendix A.1: key 000102030405060708090a0b0c0d0e0f
        // word w[4] = 0xd6aa74fd.
        let key: [u8; 16] = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let expanded = expand_key(&key, 4, 10);
        assert_eq!(&expanded[16..20], &[0xd6, 0xaa, 0x74, 0xfd]);
    }
}
