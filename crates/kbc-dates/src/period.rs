//! Reporting periods and backfill iteration.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::chunks::{DEFAULT_DATE_FORMAT, DatePeriod, validate_format};
use crate::error::{DateError, Result};
use crate::parser::{DateParser, RelativeDateParser};

/// State persisted between backfill runs.
///
/// Serializes as `{"last_period": {"start_date": "...", "end_date": "..."}}`;
/// an empty object means no previous run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackfillState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_period: Option<DatePeriod>,
}

impl BackfillState {
    /// Records a finished period in [`DEFAULT_DATE_FORMAT`].
    pub fn from_period<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self {
            last_period: Some(DatePeriod {
                start_date: start.format(DEFAULT_DATE_FORMAT).to_string(),
                end_date: end.format(DEFAULT_DATE_FORMAT).to_string(),
            }),
        }
    }
}

/// Period helpers bound to a date parser.
///
/// The reference time defaults to the wall clock; [`DateUtils::with_now`]
/// pins it.
#[derive(Debug, Clone, Default)]
pub struct DateUtils<P = RelativeDateParser> {
    parser: P,
    now: Option<DateTime<Utc>>,
}

impl DateUtils {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DateParser> DateUtils<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser, now: None }
    }

    /// Pins the reference time used for relative phrases and clamping.
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    fn parse_at(&self, text: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        self.parser
            .parse_relative_to(text, now)
            .ok_or_else(|| DateError::Unparseable {
                value: text.to_string(),
            })
    }

    /// Parses both ends of a period.
    ///
    /// # Errors
    ///
    /// [`DateError::Unparseable`] when either side is not understood,
    /// [`DateError::StartAfterEnd`] when the end lies before the start.
    pub fn get_date_period_converted(
        &self,
        period_from: &str,
        period_to: &str,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let now = self.now();
        let start = self.parse_at(period_from, now)?;
        let end = self.parse_at(period_to, now)?;
        if end < start {
            return Err(DateError::StartAfterEnd {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok((start, end))
    }

    /// Like [`get_date_period_converted`](Self::get_date_period_converted)
    /// with both ends rendered through the strftime `format`.
    ///
    /// # Errors
    ///
    /// Additionally fails with [`DateError::InvalidFormat`].
    pub fn get_date_period_formatted(
        &self,
        period_from: &str,
        period_to: &str,
        format: &str,
    ) -> Result<(String, String)> {
        validate_format(format)?;
        let (start, end) = self.get_date_period_converted(period_from, period_to)?;
        Ok((
            start.format(format).to_string(),
            end.format(format).to_string(),
        ))
    }

    /// Next period of a backfill run.
    ///
    /// Without a `last_period` both ends come from the parser. Otherwise the
    /// window starts at the previous end and keeps the previous length, with a
    /// single-day period counting as one day. A window reaching past today is
    /// clamped to the reference time.
    ///
    /// # Errors
    ///
    /// [`DateError::InvalidState`] for state dates that are not `YYYY-MM-DD`,
    /// [`DateError::Unparseable`] for unparseable period text.
    pub fn get_backfill_period(
        &self,
        period_from: &str,
        period_to: &str,
        last_state: Option<&BackfillState>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let now = self.now();
        let Some(last) = last_state.and_then(|state| state.last_period.as_ref()) else {
            let start = self.parse_at(period_from, now)?;
            let end = self.parse_at(period_to, now)?;
            return Ok((start, end));
        };

        let last_start = parse_state_date(&last.start_date)?;
        let last_end = parse_state_date(&last.end_date)?;

        let mut diff = last_end - last_start;
        if diff.num_days() == 0 {
            diff = TimeDelta::days(1);
        }

        let next_end = last_end
            .checked_add_signed(diff)
            .ok_or(DateError::OutOfRange)?;
        let end = if next_end.date_naive() > now.date_naive() {
            now
        } else {
            next_end
        };

        tracing::debug!(
            start = %last_end,
            end = %end,
            clamped = end == now,
            "Computed backfill period"
        );

        Ok((last_end, end))
    }

    /// Parses `text` relative to `to_date` (default: now) and returns the
    /// result in timezone `tz`. `to_date` may be in any zone.
    ///
    /// # Errors
    ///
    /// [`DateError::Unparseable`] when the text is not understood.
    pub fn get_past_date<Ref: TimeZone, Tz: TimeZone>(
        &self,
        text: &str,
        to_date: Option<&DateTime<Ref>>,
        tz: &Tz,
    ) -> Result<DateTime<Tz>> {
        let reference = to_date.map_or_else(|| self.now(), |date| date.with_timezone(&Utc));
        let parsed = self.parse_at(text, reference)?;
        Ok(parsed.with_timezone(tz))
    }
}

fn parse_state_date(value: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, DEFAULT_DATE_FORMAT)
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|source| DateError::InvalidState {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_dates_must_be_iso() {
        let err = parse_state_date("01/02/2018").unwrap_err();
        assert!(matches!(err, DateError::InvalidState { ref value, .. } if value == "01/02/2018"));
    }

    #[test]
    fn empty_state_serializes_to_empty_object() {
        let json = serde_json::to_string(&BackfillState::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
