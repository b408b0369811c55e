//! Field-level byte codecs for interchange (ISO 8583 style) messages.
//!
//! This crate provides the three pluggable strategy families a field
//! packager composes to move one field between its text value and its
//! wire bytes:
//!
//! - **Padding**: normalizing a value to its nominal length
//!   ([`NullPadder`](padding::NullPadder), [`LeftPadder`](padding::LeftPadder),
//!   [`RightPadder`](padding::RightPadder))
//! - **Interpretation**: converting characters to raw bytes
//!   ([`LiteralInterpreter`](interpret::LiteralInterpreter),
//!   [`BcdInterpreter`](interpret::BcdInterpreter),
//!   [`BinaryInterpreter`](interpret::BinaryInterpreter))
//! - **Length prefixing**: encoding an explicit length ahead of the payload
//!   ([`NullPrefixer`](prefix::NullPrefixer), [`AsciiPrefixer`](prefix::AsciiPrefixer),
//!   [`BcdPrefixer`](prefix::BcdPrefixer), [`BinaryPrefixer`](prefix::BinaryPrefixer))
//!
//! All strategies are stateless: the provided implementations are
//! const-constructible singletons that can be shared freely across threads.
//!
//! # Example
//!
//! ```rust
//! use open_interchange_codec::interpret::{BcdInterpreter, Interpreter};
//!
//! let bcd = BcdInterpreter::LEFT_PADDED;
//! let mut buf = vec![0u8; bcd.packed_length(5)];
//! bcd.interpret("12345", &mut buf, 0).unwrap();
//! assert_eq!(buf, [0x01, 0x23, 0x45]);
//!
//! let digits = bcd.uninterpret(&buf, 0, 5).unwrap();
//! assert_eq!(digits, "12345");
//! ```

pub mod error;
pub mod interpret;
pub mod padding;
pub mod prefix;

// Re-export commonly used types at crate root
pub use error::CodecError;
pub use interpret::{
    pack_bcd, unpack_bcd, BcdInterpreter, BinaryInterpreter, Interpreter, LiteralInterpreter,
};
pub use padding::{LeftPadder, NullPadder, Padder, RightPadder, SPACE_PADDER, ZERO_PADDER};
pub use prefix::{AsciiPrefixer, BcdPrefixer, BinaryPrefixer, NullPrefixer, Prefixer};

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Bounds check for windowed buffer access.
pub(crate) fn ensure_available(buf_len: usize, offset: usize, needed: usize) -> Result<()> {
    let available = buf_len.saturating_sub(offset);
    if available < needed {
        return Err(CodecError::BufferTooShort { needed, available });
    }
    Ok(())
}
