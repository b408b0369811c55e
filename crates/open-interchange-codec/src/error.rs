//! Codec error types.

use thiserror::Error;

/// Errors raised by the padding, interpretation, and prefixing codecs.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Value is longer than the length the codec was asked to fit it into.
    #[error("data too long: {length} characters exceed maximum {max}")]
    DataTooLong { length: usize, max: usize },

    /// Source or destination buffer is smaller than the codec requires.
    #[error("buffer too short: need {needed} bytes, have {available}")]
    BufferTooShort { needed: usize, available: usize },

    /// Length does not fit in the configured prefix width.
    #[error("length {length} exceeds prefix capacity {max}")]
    PrefixTooSmall { length: usize, max: usize },

    /// Malformed input for the codec (non-digit BCD, invalid hex, ...).
    #[error("invalid data: {0}")]
    InvalidData(String),
}
