//! The field packaging orchestrator.
//!
//! [`FieldPackager`] composes a [`Padder`], an [`Interpreter`], and a
//! [`Prefixer`] into the pack/unpack contract for one message field:
//!
//! ```text
//! pack:    value --pad--> padded --interpret--> payload bytes
//! wire:    [ length prefix | interpreted payload ]
//! unpack:  prefix --decode--> length --uninterpret--> value
//! ```
//!
//! The prefix width is fixed per prefixer; a zero-width prefixer means a
//! fixed-length field whose length comes from configuration instead of
//! the wire.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use tracing::trace;

use open_interchange_codec::interpret::{Interpreter, LiteralInterpreter};
use open_interchange_codec::padding::{NullPadder, Padder};
use open_interchange_codec::prefix::{NullPrefixer, Prefixer};

use crate::component::Component;
use crate::error::{FieldError, Result};

/// Operation label carried in wrapped failure diagnostics.
#[derive(Debug, Clone, Copy)]
enum Operation {
    Packing,
    Unpacking,
}

/// Packs and unpacks one message field by composing a padder, an
/// interpreter, and a length prefixer.
///
/// A configured packager holds no per-call state: one instance serves
/// every message of its field and may be invoked concurrently for
/// distinct components. Configuration is expected to finish before the
/// first pack or unpack; the `&mut self` setters make that the only
/// possibility for a shared instance.
#[derive(Clone)]
pub struct FieldPackager {
    max_length: usize,
    description: String,
    padder: Arc<dyn Padder>,
    interpreter: Arc<dyn Interpreter>,
    prefixer: Arc<dyn Prefixer>,
}

impl Default for FieldPackager {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldPackager {
    /// Create an unconfigured packager: no padding, literal
    /// interpretation, no length prefix, maximum length zero.
    pub fn new() -> Self {
        Self {
            max_length: 0,
            description: String::new(),
            padder: Arc::new(NullPadder),
            interpreter: Arc::new(LiteralInterpreter),
            prefixer: Arc::new(NullPrefixer),
        }
    }

    /// Create a fully configured packager.
    pub fn with_strategies(
        max_length: usize,
        description: impl Into<String>,
        padder: Arc<dyn Padder>,
        interpreter: Arc<dyn Interpreter>,
        prefixer: Arc<dyn Prefixer>,
    ) -> Self {
        Self {
            max_length,
            description: description.into(),
            padder,
            interpreter,
            prefixer,
        }
    }

    /// Start building a packager.
    pub fn builder() -> FieldPackagerBuilder {
        FieldPackagerBuilder::new()
    }

    /// The configured nominal maximum length in characters.
    pub fn length(&self) -> usize {
        self.max_length
    }

    /// Set the nominal maximum length.
    pub fn set_length(&mut self, max_length: usize) {
        self.max_length = max_length;
    }

    /// Human-readable field description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the field description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Set the padder used during packing.
    pub fn set_padder(&mut self, padder: Arc<dyn Padder>) {
        self.padder = padder;
    }

    /// Set the interpreter used in packing and unpacking.
    pub fn set_interpreter(&mut self, interpreter: Arc<dyn Interpreter>) {
        self.interpreter = interpreter;
    }

    /// Set the length prefixer used in packing and unpacking.
    pub fn set_prefixer(&mut self, prefixer: Arc<dyn Prefixer>) {
        self.prefixer = prefixer;
    }

    /// Pack the component's value into a freshly allocated byte buffer.
    ///
    /// The buffer is sized from the padded value, not the configured
    /// length: the prefix width plus the interpreted byte count of the
    /// padded value. Any failure from the component, padder, prefixer, or
    /// interpreter surfaces as [`FieldError::Packing`] with the field key
    /// and the original cause; no partial buffer escapes.
    pub fn pack(&self, component: &dyn Component) -> Result<Vec<u8>> {
        match self.try_pack(component) {
            Ok(raw) => {
                trace!(
                    field = %field_key(component),
                    bytes = raw.len(),
                    "packed field"
                );
                Ok(raw)
            }
            Err(e) => Err(self.wrap(Operation::Packing, component, e)),
        }
    }

    fn try_pack(&self, component: &dyn Component) -> Result<Vec<u8>> {
        let value = component.value()?;
        let padded = self.padder.pad(&value, self.max_length)?;
        let nchars = padded.chars().count();
        let prefix_len = self.prefixer.packed_length();
        let mut raw = vec![0u8; prefix_len + self.interpreter.packed_length(nchars)];
        self.prefixer.encode_length(nchars, &mut raw)?;
        self.interpreter.interpret(&padded, &mut raw, prefix_len)?;
        Ok(raw)
    }

    /// Unpack the field at `offset` in `raw` into the component.
    ///
    /// Returns the number of bytes consumed: the prefix width plus the
    /// interpreted byte count of the decoded length. The decoded value
    /// keeps any padding characters; stripping them is the caller's
    /// convention. Failures surface as [`FieldError::Unpacking`].
    pub fn unpack(
        &self,
        component: &mut dyn Component,
        raw: &[u8],
        offset: usize,
    ) -> Result<usize> {
        match self.try_unpack(component, raw, offset) {
            Ok(consumed) => {
                trace!(
                    field = %field_key(&*component),
                    consumed,
                    "unpacked field"
                );
                Ok(consumed)
            }
            Err(e) => Err(self.wrap(Operation::Unpacking, &*component, e)),
        }
    }

    fn try_unpack(
        &self,
        component: &mut dyn Component,
        raw: &[u8],
        offset: usize,
    ) -> Result<usize> {
        // A prefixer with no usable length reports None; the configured
        // maximum length stands in for it.
        let len = self
            .prefixer
            .decode_length(raw, offset)?
            .unwrap_or(self.max_length);
        let prefix_len = self.prefixer.packed_length();
        let value = self.interpreter.uninterpret(raw, offset + prefix_len, len)?;
        component.set_value(value)?;
        Ok(prefix_len + self.interpreter.packed_length(len))
    }

    /// Unpack the field from a reader, advancing its cursor past the
    /// consumed bytes.
    ///
    /// Unlike the buffer form, failures are not wrapped with field
    /// diagnostics: I/O errors surface as [`FieldError::Io`] and codec
    /// errors propagate as raised, so the two remain distinguishable at
    /// the call site.
    pub fn unpack_stream<R: Read>(
        &self,
        component: &mut dyn Component,
        input: &mut R,
    ) -> Result<()> {
        let prefix_len = self.prefixer.packed_length();
        let len = if prefix_len == 0 {
            self.max_length
        } else {
            let prefix = read_bytes(input, prefix_len)?;
            self.prefixer
                .decode_length(&prefix, 0)?
                .unwrap_or(self.max_length)
        };
        let payload = read_bytes(input, self.interpreter.packed_length(len))?;
        let value = self.interpreter.uninterpret(&payload, 0, len)?;
        component.set_value(value)
    }

    /// Widest buffer this field can occupy: the prefix width plus the
    /// interpreted byte count of a maximum-length value.
    ///
    /// Callers use this to pre-size message buffers before any field is
    /// packed; it needs no component and has no side effects.
    pub fn max_packed_length(&self) -> usize {
        self.prefixer.packed_length() + self.interpreter.packed_length(self.max_length)
    }

    fn wrap(&self, op: Operation, component: &dyn Component, cause: FieldError) -> FieldError {
        let packager = std::any::type_name::<Self>();
        let field = field_key(component);
        let source = Box::new(cause);
        match op {
            Operation::Packing => FieldError::Packing {
                packager,
                field,
                source,
            },
            Operation::Unpacking => FieldError::Unpacking {
                packager,
                field,
                source,
            },
        }
    }
}

impl fmt::Debug for FieldPackager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPackager")
            .field("max_length", &self.max_length)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Best-effort field key for diagnostics. A failing key lookup is
/// swallowed and reported as "unknown".
fn field_key(component: &dyn Component) -> String {
    component
        .key()
        .unwrap_or_else(|_| String::from("unknown"))
}

/// Read exactly `count` bytes from `input`.
fn read_bytes<R: Read>(input: &mut R, count: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = vec![0u8; count];
    input.read_exact(&mut buf)?;
    Ok(buf)
}

/// Builder separating the configuration phase from operational use.
///
/// ```rust
/// use std::sync::Arc;
/// use open_interchange_codec::prefix::AsciiPrefixer;
/// use open_interchange_field::FieldPackager;
///
/// let packager = FieldPackager::builder()
///     .length(10)
///     .description("card acceptor terminal id")
///     .prefixer(Arc::new(AsciiPrefixer::LL))
///     .build();
/// assert_eq!(packager.max_packed_length(), 12);
/// ```
#[derive(Clone)]
pub struct FieldPackagerBuilder {
    inner: FieldPackager,
}

impl FieldPackagerBuilder {
    fn new() -> Self {
        Self {
            inner: FieldPackager::new(),
        }
    }

    /// Set the nominal maximum length.
    pub fn length(mut self, max_length: usize) -> Self {
        self.inner.max_length = max_length;
        self
    }

    /// Set the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    /// Set the padder.
    pub fn padder(mut self, padder: Arc<dyn Padder>) -> Self {
        self.inner.padder = padder;
        self
    }

    /// Set the interpreter.
    pub fn interpreter(mut self, interpreter: Arc<dyn Interpreter>) -> Self {
        self.inner.interpreter = interpreter;
        self
    }

    /// Set the length prefixer.
    pub fn prefixer(mut self, prefixer: Arc<dyn Prefixer>) -> Self {
        self.inner.prefixer = prefixer;
        self
    }

    /// Finish configuration.
    pub fn build(self) -> FieldPackager {
        self.inner
    }
}
