//! Local wall-clock timestamps for record prefixes.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};

/// Current local date and time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Renders as `YYYY.MM.DD-hh:mm:ss:mmm ` (milliseconds in a 4-wide field).
#[derive(Clone, Copy, Debug)]
pub struct Timestamp(pub NaiveDateTime);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Leap seconds report more than 999 ms.
        let millis = (self.0.nanosecond() / 1_000_000).min(999);
        write!(f, "{}:{millis:03} ", self.0.format("%Y.%m.%d-%H:%M:%S"))
    }
}
