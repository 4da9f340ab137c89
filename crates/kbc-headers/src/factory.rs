//! Normalizer construction from a strategy and keyword configuration.

use crate::config::{NormalizerConfig, NormalizerStrategy};
use crate::error::{HeaderError, Result};
use crate::normalizer::{
    DEFAULT_ENCODE_DELIMITER, DEFAULT_FORBIDDEN_SUB, DEFAULT_WHITESPACE_SUB,
    DictionaryNormalizer, EncodeNormalizer, HeaderNormalizer, SubstituteNormalizer,
};

const COMMON_OPTIONS: &[&str] = &["permitted_chars", "whitespace_sub"];

fn strategy_options(strategy: NormalizerStrategy) -> &'static [&'static str] {
    match strategy {
        NormalizerStrategy::Default => &["forbidden_sub"],
        NormalizerStrategy::Encoder => &["char_encoder", "encode_delimiter"],
        NormalizerStrategy::Dict => &["replace_dict"],
    }
}

/// Builds a header normalizer for the given strategy.
///
/// - `DEFAULT`: substitute forbidden characters (`forbidden_sub`, default `""`)
/// - `ENCODER`: encode forbidden characters (`char_encoder`, default
///   unicode; `encode_delimiter`, default `"_"`), e.g. `a#` -> `a_35_`
/// - `DICT`: replace characters using `replace_dict`, e.g. `{"#": "hsh"}`
///
/// All strategies accept `permitted_chars` and `whitespace_sub`.
///
/// # Errors
///
/// Returns an invalid-configuration [`HeaderError`] when an option does not
/// belong to the strategy, `replace_dict` is missing for `DICT`, or a
/// configured substitute contains characters that are not permitted.
///
/// # Example
///
/// ```
/// use kbc_headers::{ColumnNormalizer, NormalizerConfig, NormalizerStrategy, get_normalizer};
///
/// let config = NormalizerConfig::new().with_forbidden_sub("_");
/// let normalizer = get_normalizer(NormalizerStrategy::Default, config).unwrap();
/// assert_eq!(
///     normalizer.normalize_headers(&["email@domain.com"]),
///     vec!["email_domain_com"]
/// );
/// ```
pub fn get_normalizer(
    strategy: NormalizerStrategy,
    config: NormalizerConfig,
) -> Result<HeaderNormalizer> {
    check_options(strategy, &config)?;

    let NormalizerConfig {
        permitted_chars,
        whitespace_sub,
        forbidden_sub,
        char_encoder,
        encode_delimiter,
        replace_dict,
    } = config;
    let permitted = permitted_chars.unwrap_or_default();
    let whitespace_sub = whitespace_sub.unwrap_or_else(|| DEFAULT_WHITESPACE_SUB.to_string());

    let normalizer = match strategy {
        NormalizerStrategy::Default => SubstituteNormalizer::new(
            permitted,
            forbidden_sub.unwrap_or_else(|| DEFAULT_FORBIDDEN_SUB.to_string()),
            whitespace_sub,
        )?
        .into(),
        NormalizerStrategy::Encoder => EncodeNormalizer::new(
            char_encoder.unwrap_or_default(),
            encode_delimiter.unwrap_or_else(|| DEFAULT_ENCODE_DELIMITER.to_string()),
            permitted,
            whitespace_sub,
        )?
        .into(),
        NormalizerStrategy::Dict => {
            let replace_dict = replace_dict.ok_or(HeaderError::MissingOption {
                option: "replace_dict",
                strategy: strategy.as_str(),
            })?;
            DictionaryNormalizer::new(replace_dict, permitted, whitespace_sub)?.into()
        }
    };

    tracing::debug!(strategy = %strategy, "Built header normalizer");
    Ok(normalizer)
}

/// Same as [`get_normalizer`] with the strategy given by name.
///
/// # Errors
///
/// Returns [`HeaderError::UnsupportedStrategy`] for names other than
/// `DEFAULT`, `ENCODER` and `DICT`, then anything [`get_normalizer`] rejects.
pub fn get_normalizer_by_name(strategy: &str, config: NormalizerConfig) -> Result<HeaderNormalizer> {
    get_normalizer(strategy.parse()?, config)
}

fn check_options(strategy: NormalizerStrategy, config: &NormalizerConfig) -> Result<()> {
    let accepted = strategy_options(strategy);
    match config
        .set_options()
        .into_iter()
        .find(|option| !COMMON_OPTIONS.contains(option) && !accepted.contains(option))
    {
        Some(option) => Err(HeaderError::UnsupportedOption {
            option,
            strategy: strategy.as_str(),
        }),
        None => Ok(()),
    }
}
