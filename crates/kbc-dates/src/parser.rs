//! Absolute and relative date parsing.
//!
//! [`DateParser`] is the seam for natural-language date engines. The
//! built-in [`RelativeDateParser`] covers the phrases component
//! configurations use in practice: ISO dates, `today`, `yesterday`,
//! `5 days ago`, `in 2 weeks`.

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// Parses date text into an absolute UTC instant.
pub trait DateParser {
    /// Parses `text`, resolving relative phrases against `now`.
    ///
    /// Returns `None` when the text is not understood.
    fn parse_relative_to(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>>;

    /// Parses `text` relative to the current time.
    fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        self.parse_relative_to(text, Utc::now())
    }
}

/// Date parser for ISO dates and simple English relative phrases.
///
/// Accepted input (case-insensitive for keywords):
///
/// - RFC 3339 timestamps (`2021-01-01T10:00:00+02:00`)
/// - `YYYY-MM-DD`, `YYYY/MM/DD`, `DD.MM.YYYY` (midnight UTC)
/// - `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS[.f]]` (UTC)
/// - `now`, `today`, `yesterday`, `tomorrow`
/// - `N <unit> ago`, `in N <unit>` with `N` a number, `a` or `an` and
///   unit one of second, minute, hour, day, week, month, year (plural allowed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeDateParser;

impl RelativeDateParser {
    pub fn new() -> Self {
        Self
    }
}

impl DateParser for RelativeDateParser {
    fn parse_relative_to(&self, text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        try_parse_absolute(trimmed).or_else(|| try_parse_relative(trimmed, now))
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

fn try_parse_absolute(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_time(NaiveTime::MIN).and_utc());
        }
    }

    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn parse(word: &str) -> Option<Self> {
        let singular = word.strip_suffix('s').unwrap_or(word);
        match singular {
            "second" | "sec" => Some(Unit::Second),
            "minute" | "min" => Some(Unit::Minute),
            "hour" => Some(Unit::Hour),
            "day" => Some(Unit::Day),
            "week" => Some(Unit::Week),
            "month" => Some(Unit::Month),
            "year" => Some(Unit::Year),
            _ => None,
        }
    }
}

fn parse_amount(word: &str) -> Option<i64> {
    match word {
        "a" | "an" => Some(1),
        _ => word.parse::<u32>().ok().map(i64::from),
    }
}

fn try_parse_relative(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let lower = value.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    match words.as_slice() {
        ["now"] | ["today"] => Some(now),
        ["yesterday"] => shift(now, -1, Unit::Day),
        ["tomorrow"] => shift(now, 1, Unit::Day),
        [amount, unit, "ago"] => shift(now, -parse_amount(amount)?, Unit::parse(unit)?),
        ["in", amount, unit] => shift(now, parse_amount(amount)?, Unit::parse(unit)?),
        _ => None,
    }
}

/// Moves `now` by `amount` units; calendar units keep the day of month where possible.
fn shift(now: DateTime<Utc>, amount: i64, unit: Unit) -> Option<DateTime<Utc>> {
    let delta = match unit {
        Unit::Second => TimeDelta::try_seconds(amount),
        Unit::Minute => TimeDelta::try_minutes(amount),
        Unit::Hour => TimeDelta::try_hours(amount),
        Unit::Day => TimeDelta::try_days(amount),
        Unit::Week => TimeDelta::try_weeks(amount),
        Unit::Month | Unit::Year => {
            let per_unit = if unit == Unit::Year { 12 } else { 1 };
            let months = Months::new(u32::try_from(amount.unsigned_abs() * per_unit).ok()?);
            return if amount < 0 {
                now.checked_sub_months(months)
            } else {
                now.checked_add_months(months)
            };
        }
    }?;
    now.checked_add_signed(delta)
}
