//! Literal (one byte per character) interpretation.

use crate::ensure_available;
use crate::error::CodecError;
use crate::Result;

use super::Interpreter;

/// Interprets a value as Latin-1 text, one byte per character.
///
/// Characters above U+00FF have no single-byte representation and are
/// rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralInterpreter;

impl Interpreter for LiteralInterpreter {
    fn packed_length(&self, nchars: usize) -> usize {
        nchars
    }

    fn interpret(&self, value: &str, dest: &mut [u8], offset: usize) -> Result<()> {
        let nchars = value.chars().count();
        ensure_available(dest.len(), offset, nchars)?;
        for (i, ch) in value.chars().enumerate() {
            if ch as u32 > 0xFF {
                return Err(CodecError::InvalidData(format!(
                    "character '{}' (U+{:04X}) cannot be encoded as a single byte",
                    ch, ch as u32
                )));
            }
            dest[offset + i] = ch as u8;
        }
        Ok(())
    }

    fn uninterpret(&self, src: &[u8], offset: usize, nchars: usize) -> Result<String> {
        ensure_available(src.len(), offset, nchars)?;
        Ok(src[offset..offset + nchars]
            .iter()
            .map(|&b| char::from(b))
            .collect())
    }
}
