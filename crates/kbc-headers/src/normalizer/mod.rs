//! Header normalizers.
//!
//! Each strategy implements [`ColumnNormalizer`], which turns one raw column
//! name into a cleaned one. The provided
//! [`normalize_headers`](ColumnNormalizer::normalize_headers) method applies
//! it to a whole header and names columns that came out empty
//! (`empty_1`, `empty_2`, ...).
//!
//! - [`SubstituteNormalizer`]: forbidden characters become a substitute string
//! - [`EncodeNormalizer`]: forbidden characters become their delimited encoding
//! - [`DictionaryNormalizer`]: user supplied replacements

mod dictionary;
mod encode;
mod substitute;

pub use dictionary::DictionaryNormalizer;
pub use encode::EncodeNormalizer;
pub use substitute::SubstituteNormalizer;

use crate::config::NormalizerStrategy;
use crate::error::Result;
use crate::permitted::PermittedChars;

pub const DEFAULT_WHITESPACE_SUB: &str = "_";
pub const DEFAULT_FORBIDDEN_SUB: &str = "";
pub const DEFAULT_ENCODE_DELIMITER: &str = "_";

/// Prefix given to columns whose normalized name is empty.
pub const EMPTY_COLUMN_PREFIX: &str = "empty_";

/// Normalization of a single column name.
pub trait ColumnNormalizer {
    /// Normalizes one column name. The result may be empty.
    fn normalize_column(&self, column: &str) -> String;

    /// Normalizes every column of a header, preserving order and length.
    ///
    /// Columns that normalize to an empty string are renamed to
    /// `empty_<n>`, numbered from 1 within this call.
    fn normalize_headers<S: AsRef<str>>(&self, headers: &[S]) -> Vec<String>
    where
        Self: Sized,
    {
        let (normalized, _) = headers.iter().fold(
            (Vec::with_capacity(headers.len()), 1usize),
            |(mut normalized, next_empty_id), column| {
                let column = self.normalize_column(column.as_ref());
                let (column, next_empty_id) = name_empty_column(column, next_empty_id);
                normalized.push(column);
                (normalized, next_empty_id)
            },
        );
        normalized
    }
}

/// Names an empty column and returns the id for the next empty column.
fn name_empty_column(column: String, empty_id: usize) -> (String, usize) {
    if column.is_empty() {
        tracing::trace!(empty_id, "Naming empty column");
        (format!("{EMPTY_COLUMN_PREFIX}{empty_id}"), empty_id + 1)
    } else {
        (column, empty_id)
    }
}

/// Unicode whitespace plus the ASCII information separators (U+001C..U+001F).
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// State shared by every strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalizerBase {
    permitted: PermittedChars,
    whitespace_sub: String,
}

impl NormalizerBase {
    fn new(permitted: PermittedChars, whitespace_sub: String) -> Result<Self> {
        permitted.validate("whitespace_sub", &whitespace_sub)?;
        Ok(Self {
            permitted,
            whitespace_sub,
        })
    }

    /// Replaces each whitespace run with the substitute; edges are trimmed.
    fn replace_whitespace(&self, value: &str) -> String {
        value
            .split(is_separator)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(&self.whitespace_sub)
    }
}

impl Default for NormalizerBase {
    fn default() -> Self {
        Self {
            permitted: PermittedChars::default(),
            whitespace_sub: DEFAULT_WHITESPACE_SUB.to_string(),
        }
    }
}

/// A configured normalizer of any strategy.
///
/// Built by [`get_normalizer`](crate::get_normalizer). Holds no per-call
/// state, so one instance can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderNormalizer {
    Substitute(SubstituteNormalizer),
    Encode(EncodeNormalizer),
    Dictionary(DictionaryNormalizer),
}

impl HeaderNormalizer {
    pub fn strategy(&self) -> NormalizerStrategy {
        match self {
            HeaderNormalizer::Substitute(_) => NormalizerStrategy::Default,
            HeaderNormalizer::Encode(_) => NormalizerStrategy::Encoder,
            HeaderNormalizer::Dictionary(_) => NormalizerStrategy::Dict,
        }
    }

    pub fn permitted_chars(&self) -> &PermittedChars {
        &self.base().permitted
    }

    pub fn whitespace_sub(&self) -> &str {
        &self.base().whitespace_sub
    }

    fn base(&self) -> &NormalizerBase {
        match self {
            HeaderNormalizer::Substitute(n) => &n.base,
            HeaderNormalizer::Encode(n) => &n.base,
            HeaderNormalizer::Dictionary(n) => &n.base,
        }
    }
}

impl ColumnNormalizer for HeaderNormalizer {
    fn normalize_column(&self, column: &str) -> String {
        match self {
            HeaderNormalizer::Substitute(n) => n.normalize_column(column),
            HeaderNormalizer::Encode(n) => n.normalize_column(column),
            HeaderNormalizer::Dictionary(n) => n.normalize_column(column),
        }
    }
}

impl From<SubstituteNormalizer> for HeaderNormalizer {
    fn from(normalizer: SubstituteNormalizer) -> Self {
        HeaderNormalizer::Substitute(normalizer)
    }
}

impl From<EncodeNormalizer> for HeaderNormalizer {
    fn from(normalizer: EncodeNormalizer) -> Self {
        HeaderNormalizer::Encode(normalizer)
    }
}

impl From<DictionaryNormalizer> for HeaderNormalizer {
    fn from(normalizer: DictionaryNormalizer) -> Self {
        HeaderNormalizer::Dictionary(normalizer)
    }
}
