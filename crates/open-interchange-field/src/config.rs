//! Declarative field definitions.
//!
//! A message-template registry describes each field's packaging in data
//! (length, padding, interpretation, length prefix) and builds the
//! corresponding [`FieldPackager`] from it:
//!
//! ```rust
//! use open_interchange_field::FieldConfig;
//!
//! let json = r#"{
//!     "length": 10,
//!     "description": "card acceptor terminal id",
//!     "prefix": { "kind": "ascii", "digits": 2 }
//! }"#;
//! let config: FieldConfig = serde_json::from_str(json).unwrap();
//! let packager = config.build();
//! assert_eq!(packager.max_packed_length(), 12);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use open_interchange_codec::interpret::{
    BcdInterpreter, BinaryInterpreter, Interpreter, LiteralInterpreter,
};
use open_interchange_codec::padding::{LeftPadder, NullPadder, Padder, RightPadder};
use open_interchange_codec::prefix::{
    AsciiPrefixer, BcdPrefixer, BinaryPrefixer, NullPrefixer, Prefixer,
};

use crate::packager::FieldPackager;

/// Padding choice for a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PaddingConfig {
    /// Value is carried as-is.
    #[default]
    None,
    /// Left-pad with a fill character, zero by default.
    Left {
        #[serde(default = "default_zero")]
        fill: char,
    },
    /// Right-pad with a fill character, space by default.
    Right {
        #[serde(default = "default_space")]
        fill: char,
    },
}

/// Interpretation choice for a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum InterpreterConfig {
    /// One byte per character.
    #[default]
    Literal,
    /// Packed BCD digits; `left_padded` controls the pad nibble side for
    /// odd digit counts.
    Bcd {
        #[serde(default = "default_true")]
        left_padded: bool,
    },
    /// Hex string, two characters per byte.
    Binary,
}

/// Length prefix choice for a field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PrefixConfig {
    /// Fixed-length field, no length on the wire.
    #[default]
    None,
    /// ASCII decimal length digits.
    Ascii { digits: usize },
    /// Packed BCD length digits.
    Bcd { digits: usize },
    /// Big-endian binary length bytes.
    Binary { width: usize },
}

/// Declarative description of one field's packaging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Nominal maximum length in characters (hex digits for binary
    /// fields).
    pub length: usize,
    /// Human-readable field description.
    #[serde(default)]
    pub description: String,
    /// Padding applied before interpretation.
    #[serde(default)]
    pub padding: PaddingConfig,
    /// Character-to-byte interpretation.
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    /// Length prefix ahead of the payload.
    #[serde(default)]
    pub prefix: PrefixConfig,
}

impl FieldConfig {
    /// Build the packager this definition describes.
    pub fn build(&self) -> FieldPackager {
        let padder: Arc<dyn Padder> = match self.padding {
            PaddingConfig::None => Arc::new(NullPadder),
            PaddingConfig::Left { fill } => Arc::new(LeftPadder::new(fill)),
            PaddingConfig::Right { fill } => Arc::new(RightPadder::new(fill)),
        };
        let interpreter: Arc<dyn Interpreter> = match self.interpreter {
            InterpreterConfig::Literal => Arc::new(LiteralInterpreter),
            InterpreterConfig::Bcd { left_padded } => {
                if left_padded {
                    Arc::new(BcdInterpreter::LEFT_PADDED)
                } else {
                    Arc::new(BcdInterpreter::RIGHT_PADDED)
                }
            }
            InterpreterConfig::Binary => Arc::new(BinaryInterpreter),
        };
        let prefixer: Arc<dyn Prefixer> = match self.prefix {
            PrefixConfig::None => Arc::new(NullPrefixer),
            PrefixConfig::Ascii { digits } => Arc::new(AsciiPrefixer::new(digits)),
            PrefixConfig::Bcd { digits } => Arc::new(BcdPrefixer::new(digits)),
            PrefixConfig::Binary { width } => Arc::new(BinaryPrefixer::new(width)),
        };
        FieldPackager::with_strategies(
            self.length,
            self.description.clone(),
            padder,
            interpreter,
            prefixer,
        )
    }
}

fn default_zero() -> char {
    '0'
}

fn default_space() -> char {
    ' '
}

fn default_true() -> bool {
    true
}
