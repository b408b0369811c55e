//! Field packaging for interchange (ISO 8583 style) messages.
//!
//! This crate packages a single data field of a structured financial
//! message into its wire byte sequence and reverses that transformation
//! on receipt. The surrounding framework (field-to-number mapping,
//! bitmap construction, full-message assembly, transport I/O) calls into
//! this core and supplies the value holder.
//!
//! # Architecture
//!
//! ```text
//! Component ──value──> FieldPackager ──bytes──> message buffer
//!                         ├─ Padder        (nominal-length normalization)
//!                         ├─ Interpreter   (characters <-> raw bytes)
//!                         └─ Prefixer      (explicit length prefix)
//! ```
//!
//! The three strategies come from [`open_interchange_codec`] and are
//! independently pluggable; [`FieldConfig`] builds a packager from a
//! declarative definition.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use open_interchange_codec::prefix::AsciiPrefixer;
//! use open_interchange_field::{Component, Field, FieldPackager};
//!
//! let packager = FieldPackager::builder()
//!     .length(10)
//!     .description("merchant name")
//!     .prefixer(Arc::new(AsciiPrefixer::LL))
//!     .build();
//!
//! let field = Field::new(43, "HI");
//! let raw = packager.pack(&field).unwrap();
//! assert_eq!(raw, b"02HI");
//!
//! let mut decoded = Field::empty(43);
//! let consumed = packager.unpack(&mut decoded, &raw, 0).unwrap();
//! assert_eq!(consumed, 4);
//! assert_eq!(decoded.value().unwrap(), "HI");
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod packager;

pub use component::{Component, Field};
pub use config::{FieldConfig, InterpreterConfig, PaddingConfig, PrefixConfig};
pub use error::{FieldError, Result};
pub use packager::{FieldPackager, FieldPackagerBuilder};
