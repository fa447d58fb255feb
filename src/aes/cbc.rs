//! CBC mode: each plaintext block is XORed with the previous ciphertext
//! block (or the IV, for the first) before encryption. The context's stored
//! IV is updated after each call so a multi-call message can be streamed in
//! chunks.

use super::cipher::{decrypt_block, encrypt_block};
use super::context::{CipherContext, AES_BLOCK_SIZE};
use super::error::AesError;

fn xor_block(a: &mut [u8; AES_BLOCK_SIZE], b: &[u8; AES_BLOCK_SIZE]) {
    for (x, y) in a.iter_mut().zip(b.iter()) {
        *x ^= y;
    }
}

impl CipherContext {
    /// Encrypt `buf` in place under CBC chaining, starting from the
    /// context's current IV. `buf.len()` must be a multiple of the block
    /// size.
    pub fn cbc_encrypt(&mut self, buf: &mut [u8]) -> Result<(), AesError> {
        if buf.len() % AES_BLOCK_SIZE != 0 {
            return Err(AesError::InvalidLength {
                expected_multiple_of: AES_BLOCK_SIZE,
                actual: buf.len(),
            });
        }
        let mut iv = self.take_iv()?;
        let mut blocks_completed = 0;
        for (block_index, chunk) in buf.chunks_mut(AES_BLOCK_SIZE).enumerate() {
            let mut block = [0u8; AES_BLOCK_SIZE];
            block.copy_from_slice(chunk);
            xor_block(&mut block, &iv);
            let ct = encrypt_block(self, &block).map_err(|_| AesError::UncorrectableFault {
                block_index,
                blocks_completed,
            })?;
            chunk.copy_from_slice(&ct);
            iv = ct;
            blocks_completed += 1;
        }
        self.store_iv(iv);
        Ok(())
    }

    /// Decrypt `buf` in place under CBC chaining, starting from the
    /// context's current IV.
    pub fn cbc_decrypt(&mut self, buf: &mut [u8]) -> Result<(), AesError> {
        if buf.len() % AES_BLOCK_SIZE != 0 {
            return Err(AesError::InvalidLength {
                expected_multiple_of: AES_BLOCK_SIZE,
                actual: buf.len(),
            });
        }
        let mut iv = self.take_iv()?;
        let mut blocks_completed = 0;
        for (block_index, chunk) in buf.chunks_mut(AES_BLOCK_SIZE).enumerate() {
            let mut ct_block = [0u8; AES_BLOCK_SIZE];
            ct_block.copy_from_slice(chunk);
            let mut pt = decrypt_block(self, &ct_block).map_err(|_| AesError::UncorrectableFault {
                block_index,
                blocks_completed,
            })?;
            xor_block(&mut pt, &iv);
            chunk.copy_from_slice(&pt);
            iv = ct_block;
            blocks_completed += 1;
        }
        self.store_iv(iv);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 16] = [0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c];
    const IV: [u8; 16] = [0; 16];

    #[test]
    fn cbc_round_trip() {
        let mut ctx = CipherContext::with_iv(&KEY, &IV).unwrap();
        let plaintext = b"the quick brown \
fox jumps over!!".to_vec();
        let mut buf = plaintext.clone();
        ctx.cbc_encrypt(&mut buf).unwrap();
        assert_ne!(buf, plaintext);

        let mut ctx = CipherContext::with_iv(&KEY, &IV).unwrap();
        ctx.cbc_decrypt(&mut buf).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn identical_plaintext_blocks_produce_different_ciphertext() {
        let mut ctx = CipherContext::with_iv(&KEY, &IV).unwrap();
        let mut buf = [0x41u8; 32];
        ctx.cbc_encrypt(&mut buf).unwrap();
        assert_ne!(&buf[0..16], &buf[16..32]);
    }

    #[test]
    fn requires_iv() {
        let mut ctx = CipherContext::new(&KEY).unwrap();
        let mut buf = [0u8; 16];
        let err = ctx.cbc_encrypt(&mut buf).unwrap_err();
        assert_eq!(err, AesError::IvNotInitialized);
    }

    #[test]
    fn streaming_across_calls_matches_single_call() {
        let mut buf_whole = [0x10u8; 48];
        let mut ctx_whole = CipherContext::with_iv(&KEY, &IV).unwrap();
        ctx_whole.cbc_encrypt(&mut buf_whole).unwrap();

        let mut buf_split = [0x10u8; 48];
        let mut ctx_split = CipherContext::with_iv(&KEY, &IV).unwrap();
        ctx_split.cbc_encrypt(&mut buf_split[0..16]).unwrap();
        ctx_split.cbc_encrypt(&mut buf_split[16..48]).unwrap();

        assert_eq!(buf_whole, buf_split);
    }
}
