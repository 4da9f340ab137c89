//! Splitting a date range into bounded periods.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{DateError, Result};

/// Format used for period boundaries and backfill state.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A period with formatted boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatePeriod {
    pub start_date: String,
    pub end_date: String,
}

impl DatePeriod {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

/// Checks that a strftime format string has no invalid specifiers.
pub(crate) fn validate_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DateError::InvalidFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum ChunkPlan {
    /// The whole range fits into one period.
    Whole,
    /// Zero interval: one single-day period per whole day in the range.
    Daily { days: i64 },
    /// Equal-length periods sharing their boundaries.
    Split { parts: i32, step: TimeDelta },
}

/// Iterator over the periods of a date range. See [`date_chunks`].
#[derive(Debug, Clone)]
pub struct DateChunks<'a, Tz: TimeZone> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
    format: &'a str,
    plan: ChunkPlan,
    index: i64,
}

/// Lazily splits `[start, end]` into periods of at most `interval_days` days.
///
/// - If the range spans at most `interval_days` whole days, one period
///   `[start, end]` is produced.
/// - With `interval_days == 0`, one single-day period per whole day of the
///   range is produced, starting at `start` (the end day is not included).
/// - Otherwise the range is divided into `ceil(days / interval_days)` equal
///   parts; consecutive periods share a boundary.
///
/// # Errors
///
/// Returns [`DateError::InvalidFormat`] when `format` is not a valid
/// strftime string.
pub fn date_chunks<'a, Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    interval_days: u32,
    format: &'a str,
) -> Result<DateChunks<'a, Tz>> {
    validate_format(format)?;

    let span = end.clone() - start.clone();
    let days = floor_days(span);
    let interval = i64::from(interval_days);

    let plan = if days <= interval {
        ChunkPlan::Whole
    } else if interval == 0 {
        ChunkPlan::Daily { days }
    } else {
        let parts = i32::try_from((days + interval - 1) / interval).unwrap_or(i32::MAX);
        ChunkPlan::Split {
            parts,
            step: span / parts,
        }
    };

    tracing::debug!(days, interval_days, ?plan, "Splitting date range");

    Ok(DateChunks {
        start: start.clone(),
        end: end.clone(),
        format,
        plan,
        index: 0,
    })
}

/// Eager form of [`date_chunks`].
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use kbc_dates::{DatePeriod, split_dates_to_chunks};
///
/// let start = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2018, 1, 4, 0, 0, 0).unwrap();
/// let periods = split_dates_to_chunks(&start, &end, 2, "%Y-%m-%d").unwrap();
/// assert_eq!(
///     periods,
///     vec![
///         DatePeriod::new("2018-01-01", "2018-01-02"),
///         DatePeriod::new("2018-01-02", "2018-01-04"),
///     ]
/// );
/// ```
///
/// # Errors
///
/// Returns [`DateError::InvalidFormat`] when `format` is not a valid
/// strftime string.
pub fn split_dates_to_chunks<Tz: TimeZone>(
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
    interval_days: u32,
    format: &str,
) -> Result<Vec<DatePeriod>>
where
    Tz::Offset: fmt::Display,
{
    Ok(date_chunks(start, end, interval_days, format)?.collect())
}

/// Whole days in `span`, rounded towards negative infinity.
fn floor_days(span: TimeDelta) -> i64 {
    let days = span.num_days();
    if TimeDelta::try_days(days).is_some_and(|whole| span < whole) {
        days - 1
    } else {
        days
    }
}

impl<Tz: TimeZone> DateChunks<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    fn period(&self, from: &DateTime<Tz>, to: &DateTime<Tz>) -> DatePeriod {
        DatePeriod {
            start_date: from.format(self.format).to_string(),
            end_date: to.format(self.format).to_string(),
        }
    }

    fn offset(&self, delta: Option<TimeDelta>) -> DateTime<Tz> {
        delta
            .and_then(|delta| self.start.clone().checked_add_signed(delta))
            .unwrap_or_else(|| self.end.clone())
    }

    fn remaining(&self) -> usize {
        let total = match self.plan {
            ChunkPlan::Whole => 1,
            ChunkPlan::Daily { days } => days,
            ChunkPlan::Split { parts, .. } => i64::from(parts),
        };
        usize::try_from(total - self.index).unwrap_or(0)
    }
}

impl<Tz: TimeZone> Iterator for DateChunks<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    type Item = DatePeriod;

    fn next(&mut self) -> Option<DatePeriod> {
        if self.remaining() == 0 {
            return None;
        }
        let i = self.index;
        self.index += 1;

        let period = match self.plan {
            ChunkPlan::Whole => self.period(&self.start, &self.end),
            ChunkPlan::Daily { .. } => {
                let day = self.offset(TimeDelta::try_days(i));
                self.period(&day, &day)
            }
            ChunkPlan::Split { parts, step } => {
                // Stays within i32 because i < parts.
                let i = i32::try_from(i).unwrap_or(parts);
                let from = self.offset(step.checked_mul(i));
                let to = if i + 1 == parts {
                    self.end.clone()
                } else {
                    self.offset(step.checked_mul(i + 1))
                };
                self.period(&from, &to)
            }
        };
        Some(period)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<Tz: TimeZone> ExactSizeIterator for DateChunks<'_, Tz> where Tz::Offset: fmt::Display {}
