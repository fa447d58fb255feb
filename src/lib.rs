//! A software AES-128/192/256 implementation (ECB, CBC, CTR) augmented with
//! a per-round Hamming-code parity overlay: every round transform's output
//! is checked against an independently predicted Hamming code, and a
//! detected single-bit fault is corrected in place before the cipher
//! continues.
//!
//! ```
//! use hamming_aes::aes::CipherContext;
//!
//! let key: [u8; 16] = [
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
//!     0xee, 0xff,
//! ];
//! let mut ctx = CipherContext::new(&key).expect("valid key length");
//! let mut buf = *b"0123456789abcdef";
//! ctx.ecb_encrypt(&mut buf).unwrap();
//! ctx.ecb_decrypt(&mut buf).unwrap();
//! assert_eq!(&buf, b"0123456789abcdef");
//! ```

pub mod aes;
