//! CTR mode: a counter block is enciphered to produce a keystream, XORed
//! with the data. Encryption and decryption are the same operation. Any
//! buffer length is accepted, including lengths not a multiple of the block
//! size; the counter is advanced big-endian with carry propagating from the
//! last byte toward the first.

use super::cipher::encrypt_block;
use super::context::{CipherContext, AES_BLOCK_SIZE};
use super::error::AesError;

fn increment_counter(counter: &mut [u8; AES_BLOCK_SIZE]) {
    for byte in counter.iter_mut().rev() {
        if *byte == 0xFF {
            *byte = 0;
            continue;
        }
        *byte += 1;
        break;
    }
}

impl CipherContext {
    /// XOR `buf` in place with the keystream generated from the context's
    /// current counter, advancing the counter by one block for every 16
    /// bytes (or fraction thereof) consumed.
    pub fn ctr_apply(&mut self, buf: &mut [u8]) -> Result<(), AesError> {
        if buf.is_empty() {
            return Ok(());
        }
        let mut counter = self.take_iv()?;
        let mut blocks_completed = 0;
        for (block_index, chunk) in buf.chunks_mut(AES_BLOCK_SIZE).enumerate() {
            let keystream = encrypt_block(self, &counter).map_err(|_| AesError::UncorrectableFault {
                block_index,
                blocks_completed,
            })?;
            for (b, k) in chunk.iter_mut().zip(keystream.iter()) {
                *b ^= k;
            }
            increment_counter(&mut counter);
            blocks_completed += 1;
        }
        self.store_iv(counter);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c];
    const COUNTER: [u8; 16] = [0; 16];

    #[test]
    fn ctr_round_trip_is_symmetric() {
        let plaintext = b"stream ciphers don't need padding at all".to_vec();

        let mut ctx = CipherContext::with_iv(&KEY, &COUNTER).unwrap();
        let mut buf = plaintext.clone();
        ctx.ctr_apply(&mut buf).unwrap();
        assert_ne!(buf, plaintext);

        let mut ctx = CipherContext::with_iv(&KEY, &COUNTER).unwrap();
        ctx.ctr_apply(&mut buf).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn counter_carries_across_byte_boundary() {
        let mut counter: [u8; 16] = [0; 16];
        counter[15] = 0xFF;
        increment_counter(&mut counter);
        assert_eq!(counter[15], 0x00);
        assert_eq!(counter[14], 0x01);
    }

    #[test]
    fn counter_wraps_at_all_ones() {
        let mut counter = [0xFFu8; 16];
        increment_counter(&mut counter);
        assert_eq!(counter, [0u8; 16]);
    }

    #[test]
    fn handles_partial_final_block() {
        let mut ctx = CipherContext::with_iv(&KEY, &COUNTER).unwrap();
        let mut buf = vec![0xAAu8; 20]; // one full block + 4 bytes
        let original = buf.clone();
        ctx.ctr_apply(&mut buf).unwrap();
        assert_ne!(buf, original);

        let mut ctx = CipherContext::with_iv(&KEY, &COUNTER).unwrap();
        ctx.ctr_apply(&mut buf).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn continuation_across_calls_matches_counter_advance() {
        let mut whole = vec![0x5Au8; 32];
        let mut ctx_whole = CipherContext::with_iv(&KEY, &COUNTER).unwrap();
        ctx_whole.ctr_apply(&mut whole).unwrap();

        let mut split = vec![0x5Au8; 32];
        let mut ctx_split = CipherContext::with_iv(&KEY, &COUNTER).unwrap();
        ctx_split.ctr_apply(&mut split[0..16]).unwrap();
        ctx_split.ctr_apply(&mut split[16..32]).unwrap();

        assert_eq!(whole, split);
    }
}
