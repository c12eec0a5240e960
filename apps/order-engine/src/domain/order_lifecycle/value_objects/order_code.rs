//! Externally visible order codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-shareable order code, e.g. `ORD-9F3A2C41`.
///
/// Generated once at order acceptance and never reused. The random segment
/// comes from a UUID v4, so codes are collision-resistant while staying short
/// enough to read over the phone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCode(String);

impl OrderCode {
    /// Prefix carried by every generated code.
    pub const PREFIX: &'static str = "ORD-";

    /// Length of the random segment.
    const TOKEN_LEN: usize = 8;

    /// Generate a fresh order code.
    #[must_use]
    pub fn generate() -> Self {
        let token: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(Self::TOKEN_LEN)
            .collect::<String>()
            .to_uppercase();
        Self(format!("{}{token}", Self::PREFIX))
    }

    /// Wrap an existing code (e.g. from a lookup request).
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the code string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderCode {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for OrderCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}
