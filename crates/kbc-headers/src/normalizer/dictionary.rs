//! Dictionary replacement (the DICT strategy).

use super::{ColumnNormalizer, NormalizerBase};
use crate::config::ReplaceDict;
use crate::error::Result;
use crate::permitted::PermittedChars;

/// Replaces substrings using a user supplied dictionary, e.g. `{"#": "hsh"}`.
///
/// Entries are applied one after another in dictionary order, each a global
/// literal replacement over the output of the previous one. Whitespace is
/// substituted afterwards, so replacement values containing spaces are
/// normalized too. Characters without an entry are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryNormalizer {
    pub(super) base: NormalizerBase,
    replace_dict: ReplaceDict,
}

impl DictionaryNormalizer {
    /// # Errors
    ///
    /// Fails when a dictionary value or `whitespace_sub` contains characters
    /// outside `permitted`. Keys are not checked.
    pub fn new(
        replace_dict: ReplaceDict,
        permitted: PermittedChars,
        whitespace_sub: impl Into<String>,
    ) -> Result<Self> {
        let base = NormalizerBase::new(permitted, whitespace_sub.into())?;
        for value in replace_dict.values() {
            base.permitted.validate("replace_dict", value)?;
        }
        Ok(Self { base, replace_dict })
    }

    pub fn replace_dict(&self) -> &ReplaceDict {
        &self.replace_dict
    }

    fn replace_using_dict(&self, value: &str) -> String {
        self.replace_dict
            .iter()
            .fold(value.to_string(), |acc, (key, replacement)| {
                acc.replace(key, replacement)
            })
    }
}

impl ColumnNormalizer for DictionaryNormalizer {
    fn normalize_column(&self, column: &str) -> String {
        let column = self.replace_using_dict(column);
        self.base.replace_whitespace(&column)
    }
}
