//! Field packaging error types.

use open_interchange_codec::CodecError;
use thiserror::Error;

/// Errors raised while packing or unpacking a message field.
///
/// Buffer-based pack and unpack translate every underlying failure into
/// [`FieldError::Packing`] or [`FieldError::Unpacking`], carrying the
/// packager type, the field key, and the original cause. Stream-based
/// unpack propagates I/O and codec failures as raised.
#[derive(Error, Debug)]
pub enum FieldError {
    /// A pack operation failed. Carries the failing packager type, the
    /// field key (or `"unknown"` when the key itself could not be
    /// resolved), and the underlying cause.
    #[error("{packager}: problem packing field {field}")]
    Packing {
        packager: &'static str,
        field: String,
        #[source]
        source: Box<FieldError>,
    },

    /// An unpack operation failed. Same diagnostics as
    /// [`FieldError::Packing`].
    #[error("{packager}: problem unpacking field {field}")]
    Unpacking {
        packager: &'static str,
        field: String,
        #[source]
        source: Box<FieldError>,
    },

    /// A padding, interpretation, or prefix codec rejected the data.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// I/O failure while reading packed bytes from a stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The component could not supply or accept a value.
    #[error("component value error: {0}")]
    Value(String),

    /// The component's diagnostic key could not be resolved.
    #[error("field key unavailable")]
    KeyUnavailable,
}

/// Result type for field packaging operations.
pub type Result<T> = std::result::Result<T, FieldError>;
