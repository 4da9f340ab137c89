//! Tests for period resolution and backfill iteration.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use kbc_dates::{BackfillState, DateError, DateParser, DatePeriod, DateUtils};

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn utils() -> DateUtils {
    DateUtils::new().with_now(utc(2018, 1, 10, 12))
}

fn state(start: &str, end: &str) -> BackfillState {
    BackfillState {
        last_period: Some(DatePeriod::new(start, end)),
    }
}

#[test]
fn converts_absolute_and_relative_period() {
    let (start, end) = utils()
        .get_date_period_converted("2018-01-01", "yesterday")
        .unwrap();
    assert_eq!(start, utc(2018, 1, 1, 0));
    assert_eq!(end, utc(2018, 1, 9, 12));
}

#[test]
fn formats_period() {
    let period = utils()
        .get_date_period_formatted("5 days ago", "today", "%Y-%m-%d")
        .unwrap();
    assert_eq!(period, ("2018-01-05".to_string(), "2018-01-10".to_string()));
}

#[test]
fn start_after_end_is_rejected() {
    let err = utils()
        .get_date_period_converted("2018-01-05", "2018-01-01")
        .unwrap_err();
    assert!(matches!(err, DateError::StartAfterEnd { .. }));
    assert!(err.to_string().starts_with("start_date cannot exceed end_date"));
}

#[test]
fn unparseable_text_is_reported() {
    let err = utils()
        .get_date_period_converted("last full moon", "today")
        .unwrap_err();
    assert_eq!(
        err,
        DateError::Unparseable {
            value: "last full moon".to_string()
        }
    );
}

#[test]
fn invalid_format_is_rejected() {
    let err = utils()
        .get_date_period_formatted("2018-01-01", "2018-01-02", "%Y-%")
        .unwrap_err();
    assert!(matches!(err, DateError::InvalidFormat { .. }));
}

#[test]
fn backfill_without_state_uses_configured_period() {
    let (start, end) = utils()
        .get_backfill_period("2018-01-01", "2018-01-03", None)
        .unwrap();
    assert_eq!((start, end), (utc(2018, 1, 1, 0), utc(2018, 1, 3, 0)));

    let empty = BackfillState::default();
    let (start, _) = utils()
        .get_backfill_period("2018-01-01", "2018-01-03", Some(&empty))
        .unwrap();
    assert_eq!(start, utc(2018, 1, 1, 0));
}

#[test]
fn backfill_continues_from_last_period() {
    let (start, end) = utils()
        .get_backfill_period("2018-01-01", "2018-01-03", Some(&state("2018-01-01", "2018-01-03")))
        .unwrap();
    assert_eq!((start, end), (utc(2018, 1, 3, 0), utc(2018, 1, 5, 0)));
}

#[test]
fn single_day_period_advances_one_day() {
    let (start, end) = utils()
        .get_backfill_period("", "", Some(&state("2018-01-05", "2018-01-05")))
        .unwrap();
    assert_eq!((start, end), (utc(2018, 1, 5, 0), utc(2018, 1, 6, 0)));
}

#[test]
fn backfill_ending_today_is_not_clamped() {
    let (_, end) = utils()
        .get_backfill_period("", "", Some(&state("2018-01-06", "2018-01-08")))
        .unwrap();
    assert_eq!(end, utc(2018, 1, 10, 0));
}

#[test]
fn backfill_past_today_is_clamped_to_now() {
    let (start, end) = utils()
        .get_backfill_period("", "", Some(&state("2018-01-07", "2018-01-10")))
        .unwrap();
    assert_eq!((start, end), (utc(2018, 1, 10, 0), utc(2018, 1, 10, 12)));
}

#[test]
fn invalid_state_date_is_reported() {
    let err = utils()
        .get_backfill_period("", "", Some(&state("2018-01-01", "tomorrow")))
        .unwrap_err();
    assert!(matches!(err, DateError::InvalidState { ref value, .. } if value == "tomorrow"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn backfill_state_round_trips_through_json() {
    let state = BackfillState::from_period(&utc(2018, 1, 3, 0), &utc(2018, 1, 5, 7));
    insta::assert_json_snapshot!(state, @r#"
    {
      "last_period": {
        "start_date": "2018-01-03",
        "end_date": "2018-01-05"
      }
    }
    "#);

    let loaded: BackfillState = serde_json::from_str(
        r#"{"last_period": {"start_date": "2018-01-03", "end_date": "2018-01-05"}}"#,
    )
    .unwrap();
    assert_eq!(loaded, state);

    let empty: BackfillState = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.last_period, None);
}

#[test]
fn past_date_is_relative_to_given_date() {
    let tz = FixedOffset::east_opt(3600).unwrap();
    let to_date = utc(2021, 3, 31, 12);
    let date = utils()
        .get_past_date("3 days ago", Some(&to_date), &tz)
        .unwrap();
    assert_eq!(date, tz.with_ymd_and_hms(2021, 3, 28, 13, 0, 0).unwrap());
}

#[test]
fn past_date_reference_zone_is_independent_of_output_zone() {
    let reference_tz = FixedOffset::west_opt(5 * 3600).unwrap();
    let to_date = reference_tz.with_ymd_and_hms(2021, 3, 31, 22, 0, 0).unwrap();
    let date = utils()
        .get_past_date("yesterday", Some(&to_date), &Utc)
        .unwrap();
    assert_eq!(date, utc(2021, 3, 31, 3));
}

#[test]
fn past_date_defaults_to_now() {
    let date = utils().get_past_date::<Utc, Utc>("yesterday", None, &Utc).unwrap();
    assert_eq!(date, utc(2018, 1, 9, 12));
}

struct FixedParser(DateTime<Utc>);

impl DateParser for FixedParser {
    fn parse_relative_to(&self, _text: &str, _now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Some(self.0)
    }
}

#[test]
fn custom_parser_is_used() {
    let utils = DateUtils::with_parser(FixedParser(utc(2000, 1, 1, 0)));
    let (start, end) = utils.get_date_period_converted("anything", "else").unwrap();
    assert_eq!(start, end);
    assert_eq!(utils.parser().0, utc(2000, 1, 1, 0));
}
