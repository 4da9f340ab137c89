//! Property tests for header normalization.

use kbc_headers::{
    ColumnNormalizer, EncodeNormalizer, EncoderKind, NormalizerConfig, NormalizerStrategy,
    PermittedChars, get_normalizer,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn output_matches_input_length_and_order(
        headers in proptest::collection::vec(".{0,12}", 0..16)
    ) {
        let normalizer = get_normalizer(NormalizerStrategy::Default, NormalizerConfig::new()).unwrap();
        let out = normalizer.normalize_headers(&headers);
        prop_assert_eq!(out.len(), headers.len());

        // Non-empty results are exactly the per-column normalization.
        for (raw, normalized) in headers.iter().zip(&out) {
            let column = normalizer.normalize_column(raw);
            if !column.is_empty() {
                prop_assert_eq!(&column, normalized);
            }
        }
    }

    #[test]
    fn output_contains_only_permitted_characters(
        headers in proptest::collection::vec(".{0,12}", 1..8)
    ) {
        let permitted = PermittedChars::default();
        for strategy in [NormalizerStrategy::Default, NormalizerStrategy::Encoder] {
            let normalizer = get_normalizer(strategy, NormalizerConfig::new()).unwrap();
            for column in normalizer.normalize_headers(&headers) {
                prop_assert!(permitted.is_permitted(&column), "{} produced {:?}", strategy, column);
            }
        }
    }

    #[test]
    fn substitute_is_idempotent(headers in proptest::collection::vec(".{1,12}", 1..8)) {
        let normalizer = get_normalizer(
            NormalizerStrategy::Default,
            NormalizerConfig::new().with_forbidden_sub("_"),
        )
        .unwrap();
        let once = normalizer.normalize_headers(&headers);
        let twice = normalizer.normalize_headers(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn unicode_encoding_round_trips(column in "[a-zA-Z0-9#@%&*.()éšř€-]{1,16}") {
        let normalizer = EncodeNormalizer::default();
        let encoded = normalizer.normalize_column(&column);
        prop_assert_eq!(normalizer.decode_header(&encoded), column);
    }

    #[test]
    fn unicode_round_trip_keeps_delimiters_of_raw_header(
        column in "[a-zA-Z_#@%&*.()éšř€-]{1,16}"
    ) {
        let normalizer = EncodeNormalizer::default();
        let encoded = normalizer.normalize_column(&column);
        prop_assert_eq!(normalizer.decode_header(&encoded), column);
    }

    #[test]
    fn permitted_only_header_without_codes_decodes_to_itself(column in "[a-zA-Z_]{1,16}") {
        let normalizer = EncodeNormalizer::default();
        let encoded = normalizer.normalize_column(&column);
        prop_assert_eq!(&encoded, &column);
        prop_assert_eq!(normalizer.decode_header(&encoded), column);
    }

    #[test]
    fn utf8_encoding_round_trips(column in "[a-zA-Z0-9#@%&*.()éšř€-]{1,16}") {
        let normalizer = EncodeNormalizer::new(
            EncoderKind::Utf8,
            "_",
            PermittedChars::default(),
            "_",
        )
        .unwrap();
        let encoded = normalizer.normalize_column(&column);
        prop_assert_eq!(normalizer.decode_header(&encoded), column);
    }
}
