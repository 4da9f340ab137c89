//! Column header normalization for Keboola Connection storage.
//!
//! Storage column names may only contain alphanumeric characters and
//! underscores. This crate maps arbitrary header text into that space using
//! one of three interchangeable strategies:
//!
//! - **DEFAULT**: forbidden characters are replaced by a substitute (deleted by default)
//! - **ENCODER**: forbidden characters are replaced by their delimited code point
//!   or UTF-8 bytes, which can be decoded back
//! - **DICT**: characters are replaced using a user supplied dictionary
//!
//! Every strategy first collapses whitespace runs into a substitute and names
//! columns that end up empty `empty_1`, `empty_2`, ...
//!
//! # Example
//!
//! ```
//! use kbc_headers::{ColumnNormalizer, NormalizerConfig, NormalizerStrategy, get_normalizer};
//!
//! let normalizer = get_normalizer(NormalizerStrategy::Encoder, NormalizerConfig::new())?;
//! let header = normalizer.normalize_headers(&["dactor#fd", "ag e", "#"]);
//! assert_eq!(header, vec!["dactor_35_fd", "ag_e", "_35_"]);
//! # Ok::<(), kbc_headers::HeaderError>(())
//! ```

pub mod config;
pub mod encoder;
pub mod error;
pub mod normalizer;
pub mod permitted;

mod factory;

pub use config::{NormalizerConfig, NormalizerStrategy, ReplaceDict};
pub use encoder::{CharEncoder, EncodedChar, EncoderKind};
pub use error::{HeaderError, Result};
pub use factory::{get_normalizer, get_normalizer_by_name};
pub use normalizer::{
    ColumnNormalizer, DictionaryNormalizer, EncodeNormalizer, HeaderNormalizer,
    SubstituteNormalizer,
};
pub use permitted::{DEFAULT_PERMITTED_CHARS, PermittedChars};
