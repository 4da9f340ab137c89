//! Forbidden-character substitution (the DEFAULT strategy).

use super::{ColumnNormalizer, DEFAULT_FORBIDDEN_SUB, NormalizerBase};
use crate::error::Result;
use crate::permitted::PermittedChars;

/// Replaces every forbidden character with a substitute string.
///
/// Whitespace is substituted first, then each character outside the
/// permitted set is replaced by `forbidden_sub` (empty by default, which
/// deletes it). `email@domain.com` becomes `emaildomaincom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstituteNormalizer {
    pub(super) base: NormalizerBase,
    forbidden_sub: String,
}

impl SubstituteNormalizer {
    /// # Errors
    ///
    /// Fails when `forbidden_sub` or `whitespace_sub` contain characters
    /// outside `permitted`.
    pub fn new(
        permitted: PermittedChars,
        forbidden_sub: impl Into<String>,
        whitespace_sub: impl Into<String>,
    ) -> Result<Self> {
        let base = NormalizerBase::new(permitted, whitespace_sub.into())?;
        let forbidden_sub = forbidden_sub.into();
        base.permitted.validate("forbidden_sub", &forbidden_sub)?;
        Ok(Self {
            base,
            forbidden_sub,
        })
    }

    pub fn forbidden_sub(&self) -> &str {
        &self.forbidden_sub
    }

    fn replace_forbidden(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            if self.base.permitted.contains(ch) {
                out.push(ch);
            } else {
                out.push_str(&self.forbidden_sub);
            }
        }
        out
    }
}

impl Default for SubstituteNormalizer {
    fn default() -> Self {
        Self {
            base: NormalizerBase::default(),
            forbidden_sub: DEFAULT_FORBIDDEN_SUB.to_string(),
        }
    }
}

impl ColumnNormalizer for SubstituteNormalizer {
    fn normalize_column(&self, column: &str) -> String {
        let column = self.base.replace_whitespace(column);
        self.replace_forbidden(&column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletes_forbidden_characters_by_default() {
        let normalizer = SubstituteNormalizer::default();
        assert_eq!(normalizer.normalize_column("email@domain.com"), "emaildomaincom");
        assert_eq!(normalizer.normalize_column("&*D"), "D");
        assert_eq!(normalizer.normalize_column("příjmení"), "pjmen");
    }

    #[test]
    fn substitutes_forbidden_characters() {
        let normalizer = SubstituteNormalizer::new(PermittedChars::default(), "_", "_").unwrap();
        assert_eq!(normalizer.normalize_column("email@domain.com"), "email_domain_com");
        assert_eq!(normalizer.normalize_column("#%^"), "___");
    }

    #[test]
    fn whitespace_is_replaced_before_forbidden_check() {
        // The whitespace substitute is permitted, so it survives the second pass.
        let normalizer = SubstituteNormalizer::new(PermittedChars::default(), "", "_w_").unwrap();
        assert_eq!(normalizer.normalize_column("n ame!"), "n_w_ame");
    }

    #[test]
    fn rejects_forbidden_substitute() {
        let err = SubstituteNormalizer::new(PermittedChars::default(), "#", "_").unwrap_err();
        assert!(err.is_invalid_configuration());
    }
}
