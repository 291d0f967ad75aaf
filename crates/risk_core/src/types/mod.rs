//! Calendar and error types.
//!
//! - `time`: caller-supplied [`Date`] with day-count helpers
//! - `error`: [`DateError`]

pub mod error;
pub mod time;

pub use error::DateError;
pub use time::{Date, DAYS_PER_YEAR};
