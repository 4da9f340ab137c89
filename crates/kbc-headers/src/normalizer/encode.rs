//! Forbidden-character encoding (the ENCODER strategy).

use super::{ColumnNormalizer, DEFAULT_ENCODE_DELIMITER, NormalizerBase};
use crate::encoder::{CharEncoder, EncoderKind};
use crate::error::Result;
use crate::permitted::PermittedChars;

/// Replaces forbidden characters with their encoding wrapped in a delimiter.
///
/// With the default unicode encoder `a#` becomes `a_35_`, with utf8 `š`
/// becomes `_c5a1_`. Unlike substitution the mapping can be reversed with
/// [`decode_header`](Self::decode_header).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeNormalizer {
    pub(super) base: NormalizerBase,
    encoder: CharEncoder,
    delimiter: String,
}

impl EncodeNormalizer {
    /// # Errors
    ///
    /// Fails when `delimiter` or `whitespace_sub` contain characters outside
    /// `permitted`.
    pub fn new(
        kind: EncoderKind,
        delimiter: impl Into<String>,
        permitted: PermittedChars,
        whitespace_sub: impl Into<String>,
    ) -> Result<Self> {
        let base = NormalizerBase::new(permitted, whitespace_sub.into())?;
        let delimiter = delimiter.into();
        base.permitted.validate("encode_delimiter", &delimiter)?;
        Ok(Self {
            base,
            encoder: CharEncoder::from_kind(kind),
            delimiter,
        })
    }

    pub fn encoder(&self) -> CharEncoder {
        self.encoder
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    fn encode_forbidden(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        for ch in value.chars() {
            if self.base.permitted.contains(ch) {
                out.push(ch);
            } else {
                out.push_str(&self.delimiter);
                out.push_str(&self.encoder.encode(ch).to_string());
                out.push_str(&self.delimiter);
            }
        }
        out
    }

    /// Restores the characters encoded by this normalizer.
    ///
    /// Every `delimiter token delimiter` group whose token decodes to a
    /// forbidden character under the configured encoder is replaced by that
    /// character; anything else is copied through, so a group such as `_49_`
    /// written by hand stays as is. Whitespace substitution is not reversed.
    /// With an empty delimiter the groups cannot be located and the input
    /// is returned as is.
    ///
    /// The format is ambiguous when the raw header already contains the
    /// delimiter: `a_1#` encodes to `a_1_35_`, which is also the encoding of
    /// `a\u{1}35_`, and decodes to the latter.
    pub fn decode_header(&self, encoded: &str) -> String {
        if self.delimiter.is_empty() {
            tracing::warn!("Cannot decode header encoded with an empty delimiter");
            return encoded.to_string();
        }

        let delim_len = self.delimiter.len();
        let mut out = String::with_capacity(encoded.len());
        let mut rest = encoded;

        while let Some(start) = rest.find(&self.delimiter) {
            let after = &rest[start + delim_len..];
            let decoded = after.find(&self.delimiter).and_then(|end| {
                self.encoder
                    .decode(&after[..end])
                    .filter(|&ch| !self.base.permitted.contains(ch))
                    .map(|ch| (ch, &after[end + delim_len..]))
            });

            match decoded {
                Some((ch, remainder)) => {
                    out.push_str(&rest[..start]);
                    out.push(ch);
                    rest = remainder;
                }
                None => {
                    // Not an encoded group; keep the delimiter and rescan after it.
                    out.push_str(&rest[..start + delim_len]);
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl Default for EncodeNormalizer {
    fn default() -> Self {
        Self {
            base: NormalizerBase::default(),
            encoder: CharEncoder::from_kind(EncoderKind::default()),
            delimiter: DEFAULT_ENCODE_DELIMITER.to_string(),
        }
    }
}

impl ColumnNormalizer for EncodeNormalizer {
    fn normalize_column(&self, column: &str) -> String {
        let column = self.base.replace_whitespace(column);
        self.encode_forbidden(&column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_code_points_between_delimiters() {
        let normalizer = EncodeNormalizer::default();
        assert_eq!(normalizer.normalize_column("dactor#fd"), "dactor_35_fd");
        assert_eq!(normalizer.normalize_column("48DHBb#@"), "48DHBb_35__64_");
    }

    #[test]
    fn utf8_encodes_hex_bytes() {
        let normalizer = EncodeNormalizer::new(
            EncoderKind::Utf8,
            "_",
            PermittedChars::default(),
            "_",
        )
        .unwrap();
        assert_eq!(normalizer.normalize_column("daň"), "da_c588_");
    }

    #[test]
    fn delimiter_must_be_permitted() {
        let err = EncodeNormalizer::new(
            EncoderKind::Unicode,
            "|",
            PermittedChars::default(),
            "_",
        )
        .unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn decode_skips_groups_that_are_not_encodings() {
        let normalizer = EncodeNormalizer::default();
        assert_eq!(normalizer.decode_header("a_b_35_"), "a_b#");
        assert_eq!(normalizer.decode_header("no_groups"), "no_groups");
        assert_eq!(normalizer.decode_header("_35__64_"), "#@");
    }

    #[test]
    fn decode_keeps_groups_of_permitted_characters() {
        let normalizer = EncodeNormalizer::default();
        for column in ["x_95_", "col_49_", "_35"] {
            let encoded = normalizer.normalize_column(column);
            assert_eq!(normalizer.decode_header(&encoded), column);
        }
        assert_eq!(normalizer.decode_header("col_49__35_"), "col_49_#");
    }

    #[test]
    fn delimiter_in_raw_header_is_ambiguous() {
        let normalizer = EncodeNormalizer::default();
        assert_eq!(normalizer.normalize_column("a_1#"), "a_1_35_");
        assert_eq!(normalizer.normalize_column("a\u{1}35_"), "a_1_35_");
        assert_eq!(normalizer.decode_header("a_1_35_"), "a\u{1}35_");
    }

    #[test]
    fn decode_with_empty_delimiter_is_identity() {
        let normalizer =
            EncodeNormalizer::new(EncoderKind::Unicode, "", PermittedChars::default(), "_")
                .unwrap();
        let encoded = normalizer.normalize_column("a#");
        assert_eq!(encoded, "a35");
        assert_eq!(normalizer.decode_header(&encoded), "a35");
    }
}
