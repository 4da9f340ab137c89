//! Error types for header normalization.

use thiserror::Error;

/// Errors raised while configuring a header normalizer or character encoder.
///
/// Every variant is a configuration failure detected at construction time.
/// A successfully built normalizer never fails on input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Encoder name outside the supported set.
    #[error("encoder type '{name}' is not supported (expected one of: unicode, utf8)")]
    UnsupportedEncoder { name: String },

    /// Strategy name outside the supported set.
    #[error("strategy '{name}' is not supported (expected one of: DEFAULT, ENCODER, DICT)")]
    UnsupportedStrategy { name: String },

    /// A configured substitute contains a character outside the permitted set.
    #[error("{option} '{value}' contains character '{character}' which is not permitted")]
    ForbiddenSubstitute {
        option: &'static str,
        value: String,
        character: char,
    },

    /// Option given that the selected strategy does not accept.
    #[error("option '{option}' is not supported by strategy {strategy}")]
    UnsupportedOption {
        option: &'static str,
        strategy: &'static str,
    },

    /// Option the selected strategy cannot be built without.
    #[error("strategy {strategy} requires option '{option}'")]
    MissingOption {
        option: &'static str,
        strategy: &'static str,
    },
}

impl HeaderError {
    /// Returns true for errors that reject a normalizer or encoder configuration.
    ///
    /// All current variants fall in this category.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEncoder { .. }
                | Self::UnsupportedStrategy { .. }
                | Self::ForbiddenSubstitute { .. }
                | Self::UnsupportedOption { .. }
                | Self::MissingOption { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, HeaderError>;
