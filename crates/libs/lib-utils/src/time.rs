//! # Time Utilities
//!
//! Clock helpers built on chrono. Due dates are calendar dates, so most callers want
//! [`today_utc`].

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    now_utc().date_naive()
}
