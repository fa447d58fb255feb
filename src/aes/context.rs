//! Keyed cipher context: round keys, chaining state, and fault-correction
//! bookkeeping for one AES key.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::AesError;
use super::hamming::CorrectorMode;
use super::key_schedule::{expand_key, key_parameters};

pub const AES_BLOCK_SIZE: usize = 16;
pub const AES_128_KEY_SIZE: usize = 16;
pub const AES_192_KEY_SIZE: usize = 24;
pub const AES_256_KEY_SIZE: usize = 32;

fn validate_key_len(key_len: usize) -> Result<(), AesError> {
    match key_len {
        AES_128_KEY_SIZE | AES_192_KEY_SIZE | AES_256_KEY_SIZE => Ok(()),
        other => Err(AesError::InvalidKeyLength(other)),
    }
}

/// A keyed AES context carrying the expanded round keys, the active
/// fault-correction policy, and whatever chaining state (IV or counter) the
/// mode driver in use needs. Round-key and chaining material is wiped on
/// drop.
#[derive(ZeroizeOnDrop)]
pub struct CipherContext {
    #[zeroize(skip)]
    nk: usize,
    #[zeroize(skip)]
    nr: usize,
    round_key: [u8; 240],
    iv: Option<[u8; 16]>,
    #[zeroize(skip)]
    mode: CorrectorMode,
    #[zeroize(skip)]
    corrections: u64,
}

impl CipherContext {
    /// Build a context for ECB use (or as the basis for CBC/CTR via
    /// [`CipherContext::with_iv`]). The corrector defaults to
    /// [`CorrectorMode::Literal`], matching the reference implementation's
    /// actual (if confusingly commented) syndrome test.
    pub fn new(key: &[u8]) -> Result<Self, AesError> {
        validate_key_len(key.len())?;
        let (nk, nr) = key_parameters(key.len());
        Ok(CipherContext {
            nk,
            nr,
            round_key: expand_key(key, nk, nr),
            iv: None,
            mode: CorrectorMode::default(),
            corrections: 0,
        })
    }

    /// Build a context with an initial IV or counter block already set, for
    /// CBC or CTR use.
    pub fn with_iv(key: &[u8], iv: &[u8; 16]) -> Result<Self, AesError> {
        let mut ctx = Self::new(key)?;
        ctx.iv = Some(*iv);
        Ok(ctx)
    }

    /// Override the corrector's syndrome-test reading.
    pub fn with_corrector_mode(mut self, mode: CorrectorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the IV/counter block, e.g. to resume a CTR stream or start a
    /// fresh CBC message under the same key.
    pub fn set_iv(&mut self, iv: &[u8; 16]) {
        self.iv = Some(*iv);
    }

    /// Number of single-bit faults the overlay has corrected so far on this
    /// context, across every block processed.
    pub fn corrections_made(&self) -> u64 {
        self.corrections
    }

    pub(crate) fn nr(&self) -> usize {
        self.nr
    }

    pub(crate) fn mode(&self) -> CorrectorMode {
        self.mode
    }

    pub(crate) fn round_key(&self) -> &[u8] {
        &self.round_key[..16 * (self.nr + 1)]
    }

    pub(crate) fn corrections_mut(&mut self) -> &mut u64 {
        &mut self.corrections
    }

    pub(crate) fn take_iv(&self) -> Result<[u8; 16], AesError> {
        self.iv.ok_or(AesError::IvNotInitialized)
    }

    pub(crate) fn store_iv(&mut self, iv: [u8; 16]) {
        self.iv = Some(iv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_key_length() {
        let err = CipherContext::new(&[0u8; 10]).unwrap_err();
        assert_eq!(err, AesError::InvalidKeyLength(10));
    }

    #[test]
    fn accepts_every_standard_key_length() {
        assert!(CipherContext::new(&[0u8; 16]).is_ok());
        assert!(CipherContext::new(&[0u8; 24]).is_ok());
        assert!(CipherContext::new(&[0u8; 32]).is_ok());
    }

    #[test]
    fn corrections_start_at_zero() {
        let ctx = CipherContext::new(&[0u8; 16]).unwrap();
        assert_eq!(ctx.corrections_made(), 0);
    }
}
