//! Normalizer selection and keyword configuration.
//!
//! [`NormalizerConfig`] is the keyword bag handed to
//! [`get_normalizer`](crate::get_normalizer). Every field is optional; unset
//! fields fall back to the strategy defaults. The struct deserializes from
//! component configuration JSON and rejects unknown keys.

use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoder::EncoderKind;
use crate::error::{HeaderError, Result};
use crate::permitted::PermittedChars;

/// Header normalization strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NormalizerStrategy {
    /// Replace forbidden characters with a substitute string.
    #[default]
    Default,
    /// Replace forbidden characters with their delimited encoding.
    Encoder,
    /// Replace characters using a user supplied dictionary.
    Dict,
}

impl NormalizerStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizerStrategy::Default => "DEFAULT",
            NormalizerStrategy::Encoder => "ENCODER",
            NormalizerStrategy::Dict => "DICT",
        }
    }
}

impl fmt::Display for NormalizerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizerStrategy {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DEFAULT" => Ok(NormalizerStrategy::Default),
            "ENCODER" => Ok(NormalizerStrategy::Encoder),
            "DICT" => Ok(NormalizerStrategy::Dict),
            _ => Err(HeaderError::UnsupportedStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// Ordered mapping of search string to replacement.
///
/// Entries are applied in insertion order, which is also the key order of
/// the JSON object it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceDict {
    entries: Vec<(String, String)>,
}

impl ReplaceDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry. Re-inserting a key updates its value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ReplaceDict
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = ReplaceDict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

impl Serialize for ReplaceDict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ReplaceDictVisitor;

impl<'de> Visitor<'de> for ReplaceDictVisitor {
    type Value = ReplaceDict;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of strings to replacement strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<ReplaceDict, A::Error> {
        let mut dict = ReplaceDict::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            dict.insert(key, value);
        }
        Ok(dict)
    }
}

impl<'de> Deserialize<'de> for ReplaceDict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(ReplaceDictVisitor)
    }
}

/// Keyword configuration for [`get_normalizer`](crate::get_normalizer).
///
/// Options shared by all strategies: `permitted_chars`, `whitespace_sub`.
/// `forbidden_sub` belongs to DEFAULT, `char_encoder` and `encode_delimiter`
/// to ENCODER, `replace_dict` to DICT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_chars: Option<PermittedChars>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitespace_sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forbidden_sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_encoder: Option<EncoderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_dict: Option<ReplaceDict>,
}

impl NormalizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_permitted_chars(mut self, chars: impl Into<PermittedChars>) -> Self {
        self.permitted_chars = Some(chars.into());
        self
    }

    #[must_use]
    pub fn with_whitespace_sub(mut self, sub: impl Into<String>) -> Self {
        self.whitespace_sub = Some(sub.into());
        self
    }

    #[must_use]
    pub fn with_forbidden_sub(mut self, sub: impl Into<String>) -> Self {
        self.forbidden_sub = Some(sub.into());
        self
    }

    #[must_use]
    pub fn with_char_encoder(mut self, kind: EncoderKind) -> Self {
        self.char_encoder = Some(kind);
        self
    }

    #[must_use]
    pub fn with_encode_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.encode_delimiter = Some(delimiter.into());
        self
    }

    #[must_use]
    pub fn with_replace_dict(mut self, dict: ReplaceDict) -> Self {
        self.replace_dict = Some(dict);
        self
    }

    /// Names of the options that are set, in declaration order.
    pub(crate) fn set_options(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.permitted_chars.is_some() {
            set.push("permitted_chars");
        }
        if self.whitespace_sub.is_some() {
            set.push("whitespace_sub");
        }
        if self.forbidden_sub.is_some() {
            set.push("forbidden_sub");
        }
        if self.char_encoder.is_some() {
            set.push("char_encoder");
        }
        if self.encode_delimiter.is_some() {
            set.push("encode_delimiter");
        }
        if self.replace_dict.is_some() {
            set.push("replace_dict");
        }
        set
    }
}
