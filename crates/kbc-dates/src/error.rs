//! Error types for date helpers.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The date parser could not interpret the text.
    #[error("unable to parse date '{value}'")]
    Unparseable { value: String },

    /// Period end lies before its start.
    #[error("start_date cannot exceed end_date ({start} > {end})")]
    StartAfterEnd { start: String, end: String },

    /// A `last_period` date in the backfill state is not `YYYY-MM-DD`.
    #[error("invalid date '{value}' in backfill state: {source}")]
    InvalidState {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The strftime format string contains an invalid specifier.
    #[error("invalid date format '{format}'")]
    InvalidFormat { format: String },

    /// Date arithmetic left the representable range.
    #[error("date out of range")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, DateError>;
