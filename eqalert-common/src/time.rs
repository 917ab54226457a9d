//! Timestamp utilities
//!
//! The report cache stores wall-clock times in the compact
//! `YYYYMMDDHHMMSS` layout, so everything here works on local naive time.

use chrono::{Local, NaiveDateTime};

use crate::{Error, Result};

/// Layout of persisted cache timestamps
pub const STAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Get current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render a timestamp as `YYYYMMDDHHMMSS`
pub fn format_stamp(time: &NaiveDateTime) -> String {
    time.format(STAMP_FORMAT).to_string()
}

/// Parse a `YYYYMMDDHHMMSS` timestamp
pub fn parse_stamp(stamp: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(stamp.trim(), STAMP_FORMAT)
        .map_err(|e| Error::Parse(format!("invalid timestamp '{}': {}", stamp, e)))
}
