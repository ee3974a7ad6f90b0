use crate::{KeelError, Result};
use std::{
    fmt::{self, Display},
    ops::Deref,
};

/// A string stored encrypted in the database and kept in clear text in memory.
///
/// The encryption happens in [`crate::EncryptedStringTypeConverter`] while the value crosses the
/// wire boundary, the in-memory value is never encrypted.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncryptedString(String);

impl EncryptedString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for EncryptedString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for EncryptedString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EncryptedString {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl Display for EncryptedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialized XML document.
///
/// Only the outer shape is checked (a single element enclosed in angle brackets), the content is
/// stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct XmlDocument(String);

impl XmlDocument {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if !trimmed.starts_with('<') || !trimmed.ends_with('>') {
            return Err(KeelError::conversion(
                "XmlDocument",
                format!("`{}` is not an xml document", crate::truncate_long!(trimmed)),
            )
            .into());
        }
        Ok(Self(value))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
