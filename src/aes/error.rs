//! Error type shared by every mode of operation.
//!
//! The reference implementation this crate is descended from calls `exit(2)`
//! when the fault-correction pass can't reconcile a block - acceptable in a
//! standalone C demo, not in a library other programs link against. Here an
//! uncorrectable fault is reported to the caller instead, with enough
//! context (which block, how many had already completed) to let them decide
//! whether to retry, abort, or surface it further up.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesError {
    /// The supplied key wasn't 16, 24, or 32 bytes.
    InvalidKeyLength(usize),
    /// A buffer's length wasn't a multiple of the block size, where the mode
    /// requires full blocks (ECB, CBC).
    InvalidLength { expected_multiple_of: usize, actual: usize },
    /// A mode that chains on an IV or counter was used before one was set.
    IvNotInitialized,
    /// The Hamming-code overlay detected a fault it could not correct.
    UncorrectableFault { block_index: usize, blocks_completed: usize },
}

impl fmt::Display for AesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AesError::InvalidKeyLength(len) => write!(
                f,
                "invalid AES key length: expected 16, 24, or 32 bytes, got {len}"
            ),
            AesError::InvalidLength { expected_multiple_of, actual } => write!(
                f,
                "buffer length {actual} is not a multiple of {expected_multiple_of}"
            ),
            AesError::IvNotInitialized => {
                write!(f, "no IV or counter has been set on this context")
            }
            AesError::UncorrectableFault { block_index, blocks_completed } => write!(
                f,
                "uncorrectable fault detected in block {block_index} ({blocks_completed} blocks completed before it)"
            ),
        }
    }
}

impl std::error::Error for AesError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncorrectable_fault_carries_position() {
        let err = AesError::UncorrectableFault { block_index: 3, blocks_completed: 3 };
        assert!(err.to_string().contains("block 3"));
    }
}
