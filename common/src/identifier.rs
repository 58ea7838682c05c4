//! Username validation.
//!
//! A `ResourceIdentifier` is the trimmed, non-empty text a user typed into the
//! roast form. Nothing else is checked locally: whether the account exists is
//! for the roast service to decide.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reasons a raw username is rejected before any navigation happens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The input was empty or contained only whitespace.
    #[error("Please enter a GitHub username")]
    EmptyIdentifier,
}

/// A validated username naming the subject of a roast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceIdentifier(String);

impl ResourceIdentifier {
    /// Trims `raw` and accepts it if anything is left.
    pub fn validate(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-function form of [`ResourceIdentifier::validate`].
pub fn validate(raw: &str) -> Result<ResourceIdentifier, ValidationError> {
    ResourceIdentifier::validate(raw)
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResourceIdentifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)
    }
}

impl From<ResourceIdentifier> for String {
    fn from(value: ResourceIdentifier) -> Self {
        value.0
    }
}
