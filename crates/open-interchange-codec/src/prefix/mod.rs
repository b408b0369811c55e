//! Length prefix strategies for variable-length fields.
//!
//! A prefixer encodes the field's payload length into a small
//! fixed-width prefix ahead of the payload bytes. Fixed-length fields
//! use the zero-width [`NullPrefixer`]; variable-length fields carry one
//! to three length digits in ASCII or BCD, or a big-endian binary count.

mod ascii;
mod bcd;
mod binary;

pub use ascii::AsciiPrefixer;
pub use bcd::BcdPrefixer;
pub use binary::BinaryPrefixer;

use crate::Result;

/// Strategy encoding and decoding an explicit length prefix.
pub trait Prefixer: Send + Sync {
    /// Fixed prefix width in bytes. Zero means the field carries no
    /// explicit length on the wire.
    fn packed_length(&self) -> usize;

    /// Encode `len` into the first `packed_length()` bytes of `dest`.
    fn encode_length(&self, len: usize, dest: &mut [u8]) -> Result<()>;

    /// Decode the length at `offset`. Returns `None` when this prefixer
    /// carries no usable length and the caller must fall back to the
    /// field's configured maximum.
    fn decode_length(&self, src: &[u8], offset: usize) -> Result<Option<usize>>;
}

/// Prefixer for fixed-length fields with no explicit length prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPrefixer;

impl Prefixer for NullPrefixer {
    fn packed_length(&self) -> usize {
        0
    }

    fn encode_length(&self, _len: usize, _dest: &mut [u8]) -> Result<()> {
        Ok(())
    }

    fn decode_length(&self, _src: &[u8], _offset: usize) -> Result<Option<usize>> {
        Ok(None)
    }
}
