//! Date helpers for Keboola components.
//!
//! - [`DateUtils`] resolves configured periods (`"5 days ago"`, `"today"`,
//!   ISO dates) and iterates backfill windows across runs.
//! - [`split_dates_to_chunks`] and [`date_chunks`] break a range into
//!   bounded periods for paginated extraction.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use kbc_dates::DateUtils;
//!
//! let utils = DateUtils::new().with_now(Utc.with_ymd_and_hms(2021, 3, 31, 0, 0, 0).unwrap());
//! let (start, end) = utils
//!     .get_date_period_formatted("3 days ago", "today", "%Y-%m-%d")
//!     .unwrap();
//! assert_eq!((start.as_str(), end.as_str()), ("2021-03-28", "2021-03-31"));
//! ```

pub mod chunks;
pub mod error;
pub mod parser;
pub mod period;

pub use chunks::{DEFAULT_DATE_FORMAT, DateChunks, DatePeriod, date_chunks, split_dates_to_chunks};
pub use error::{DateError, Result};
pub use parser::{DateParser, RelativeDateParser};
pub use period::{BackfillState, DateUtils};
