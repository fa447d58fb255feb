//! ECB mode: each block enciphered independently. No chaining state, so no
//! IV is required - callers should prefer CBC or CTR for anything beyond a
//! single block, since ECB leaks repeated plaintext structure.

use super::cipher::{decrypt_block, encrypt_block};
use super::context::{CipherContext, AES_BLOCK_SIZE};
use super::error::AesError;

impl CipherContext {
    /// Encrypt every 16-byte block of `buf` in place. `buf.len()` must be a
    /// multiple of the block size; padding is the caller's responsibility.
    pub fn ecb_encrypt(&mut self, buf: &mut [u8]) -> Result<(), AesError> {
        if buf.len() % AES_BLOCK_SIZE != 0 {
            return Err(AesError::InvalidLength {
                expected_multiple_of: AES_BLOCK_SIZE,
                actual: buf.len(),
            });
        }
        for (block_index, chunk) in buf.chunks_mut(AES_BLOCK_SIZE).enumerate() {
            let mut block = [0u8; AES_BLOCK_SIZE];
            block.copy_from_slice(chunk);
            let out = encrypt_block(self, &block).map_err(|_| AesError::UncorrectableFault {
                block_index,
                blocks_completed: block_index,
            })?;
            chunk.copy_from_slice(&out);
        }
        Ok(())
    }

    /// Decrypt every 16-byte block of `buf` in place.
    pub fn ecb_decrypt(&mut self, buf: &mut [u8]) -> Result<(), AesError> {
        if buf.len() % AES_BLOCK_SIZE != 0 {
            return Err(AesError::InvalidLength {
                expected_multiple_of: AES_BLOCK_SIZE,
                actual: buf.len(),
            });
        }
        for (block_index, chunk) in buf.chunks_mut(AES_BLOCK_SIZE).enumerate() {
            let mut block = [0u8; AES_BLOCK_SIZE];
            block.copy_from_slice(chunk);
            let out = decrypt_block(self, &block).map_err(|_| AesError::UncorrectableFault {
                block_index,
                blocks_completed: block_index,
            })?;
            chunk.copy_from_slice(&out);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ecb_round_trip_multiple_blocks() {
        let key: [u8; 16] = [0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c];
        let mut ctx = CipherContext::new(&key).unwrap();
        let mut buf = b"0123456789abcdefFEDCBA9876543210".to_vec();
        let plaintext = buf.clone();

        ctx.ecb_encrypt(&mut buf).unwrap();
        assert_ne!(buf, plaintext);

        ctx.ecb_decrypt(&mut buf).unwrap();
        assert_eq!(buf, plaintext);
    }

    #[test]
    fn rejects_partial_block() {
        let key = [0u8; 16];
        let mut ctx = CipherContext::new(&key).unwrap();
        let mut buf = vec![0u8; 17];
        let err = ctx.ecb_encrypt(&mut buf).unwrap_err();
        assert_eq!(err, AesError::InvalidLength { expected_multiple_of: 16, actual: 17 });
    }

    #[test]
    fn empty_buffer_is_a_noop() {
        let key = [0u8; 16];
        let mut ctx = CipherContext::new(&key).unwrap();
        let mut buf: Vec<u8> = Vec::new();
        ctx.ecb_encrypt(&mut buf).unwrap();
        assert!(buf.is_empty());
    }
}
