//! Shared helpers for Keboola Connection components.
//!
//! Component configuration frequently carries lists as a single comma
//! separated string (`"name, age, email"`). The helpers here turn such values
//! into lists of trimmed strings.

pub mod csv_values;
pub mod error;

pub use csv_values::{comma_separated_value_to_list, comma_separated_values_to_list};
pub use error::{CommonError, Result};
