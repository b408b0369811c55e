//! Field value holders.

use crate::error::Result;

/// A value holder the packager reads from when packing and populates
/// when unpacking.
///
/// The key is used only for diagnostics. Resolving it may itself fail;
/// the packager tolerates that and substitutes `"unknown"` in error
/// messages.
pub trait Component {
    /// The logical field value to pack.
    fn value(&self) -> Result<String>;

    /// Store the decoded field value.
    fn set_value(&mut self, value: String) -> Result<()>;

    /// Diagnostic identifier for this field, usually its field number.
    fn key(&self) -> Result<String>;
}

/// Plain field holding a string value, keyed by its field number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    number: u32,
    value: String,
}

impl Field {
    /// Create a field with a number and value.
    pub fn new(number: u32, value: impl Into<String>) -> Self {
        Self {
            number,
            value: value.into(),
        }
    }

    /// Create an empty field to unpack into.
    pub fn empty(number: u32) -> Self {
        Self {
            number,
            value: String::new(),
        }
    }

    /// The field number.
    pub fn number(&self) -> u32 {
        self.number
    }
}

impl Component for Field {
    fn value(&self) -> Result<String> {
        Ok(self.value.clone())
    }

    fn set_value(&mut self, value: String) -> Result<()> {
        self.value = value;
        Ok(())
    }

    fn key(&self) -> Result<String> {
        Ok(self.number.to_string())
    }
}
