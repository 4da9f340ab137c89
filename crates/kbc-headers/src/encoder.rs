//! Alphanumeric encoding of single characters.
//!
//! A [`CharEncoder`] turns one character into either its Unicode code point
//! or its UTF-8 byte sequence. The encode strategy uses it to replace
//! forbidden characters with a representation that can be mapped back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HeaderError, Result};

/// Supported character encodings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderKind {
    /// Numeric Unicode code point, rendered in decimal (`#` -> `35`).
    #[default]
    Unicode,
    /// UTF-8 byte sequence, rendered as lowercase hex (`š` -> `c5a1`).
    Utf8,
}

impl EncoderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderKind::Unicode => "unicode",
            EncoderKind::Utf8 => "utf8",
        }
    }
}

impl fmt::Display for EncoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncoderKind {
    type Err = HeaderError;

    /// Exact, case-sensitive match against the supported names.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unicode" => Ok(EncoderKind::Unicode),
            "utf8" => Ok(EncoderKind::Utf8),
            _ => Err(HeaderError::UnsupportedEncoder {
                name: s.to_string(),
            }),
        }
    }
}

/// An encoded character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedChar {
    CodePoint(u32),
    Bytes(Vec<u8>),
}

impl fmt::Display for EncodedChar {
    /// Renders the value using only ASCII alphanumerics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodedChar::CodePoint(cp) => write!(f, "{cp}"),
            EncodedChar::Bytes(bytes) => f.write_str(&hex::encode(bytes)),
        }
    }
}

/// Encodes characters with a fixed [`EncoderKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEncoder {
    kind: EncoderKind,
}

impl CharEncoder {
    /// Builds an encoder from its name (`"unicode"` or `"utf8"`).
    ///
    /// # Errors
    ///
    /// Returns [`HeaderError::UnsupportedEncoder`] for any other name.
    pub fn new(name: &str) -> Result<Self> {
        name.parse().map(Self::from_kind)
    }

    pub fn from_kind(kind: EncoderKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> EncoderKind {
        self.kind
    }

    pub fn encode(&self, character: char) -> EncodedChar {
        match self.kind {
            EncoderKind::Unicode => EncodedChar::CodePoint(u32::from(character)),
            EncoderKind::Utf8 => {
                let mut buf = [0u8; 4];
                EncodedChar::Bytes(character.encode_utf8(&mut buf).as_bytes().to_vec())
            }
        }
    }

    /// Reverses [`EncodedChar`]'s rendering back into the original character.
    ///
    /// Returns `None` when the token is not a valid rendering for this kind.
    pub fn decode(&self, token: &str) -> Option<char> {
        match self.kind {
            EncoderKind::Unicode => {
                if !token.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                token.parse::<u32>().ok().and_then(char::from_u32)
            }
            EncoderKind::Utf8 => {
                let bytes = hex::decode(token).ok()?;
                let decoded = std::str::from_utf8(&bytes).ok()?;
                let mut chars = decoded.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(ch),
                    _ => None,
                }
            }
        }
    }
}
