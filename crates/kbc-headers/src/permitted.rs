//! Permitted character set and substitute validation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{HeaderError, Result};

/// Characters allowed by Keboola Connection storage column names.
pub const DEFAULT_PERMITTED_CHARS: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";

/// Set of characters that may appear unescaped in a normalized header.
///
/// Serialized as a single string holding every permitted character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PermittedChars {
    chars: BTreeSet<char>,
}

impl PermittedChars {
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn is_permitted(&self, value: &str) -> bool {
        value.chars().all(|ch| self.contains(ch))
    }

    /// Checks that a configured substitute only introduces permitted characters.
    ///
    /// `option` names the configuration key in the error.
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::ForbiddenSubstitute`] naming the first offending
    /// character.
    pub fn validate(&self, option: &'static str, value: &str) -> Result<()> {
        match value.chars().find(|ch| !self.contains(*ch)) {
            None => Ok(()),
            Some(character) => Err(HeaderError::ForbiddenSubstitute {
                option,
                value: value.to_string(),
                character,
            }),
        }
    }
}

impl Default for PermittedChars {
    fn default() -> Self {
        Self::new(DEFAULT_PERMITTED_CHARS)
    }
}

impl From<&str> for PermittedChars {
    fn from(chars: &str) -> Self {
        Self::new(chars)
    }
}

impl From<String> for PermittedChars {
    fn from(chars: String) -> Self {
        Self::new(&chars)
    }
}

impl From<PermittedChars> for String {
    fn from(permitted: PermittedChars) -> Self {
        permitted.chars.into_iter().collect()
    }
}
