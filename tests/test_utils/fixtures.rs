//! Fixtures returning `(SharedBuf, Facility)` pairs so facilities can be
//! exercised without touching `stderr`.

#![allow(dead_code)]

use rstest::fixture;
use srclog::{Facility, FacilityOptions, LogLevel};

use super::shared_buffer::SharedBuf;

/// An uninitialised facility writing to a fresh buffer.
#[fixture]
pub fn blank_facility() -> (SharedBuf, Facility) {
    let buffer = SharedBuf::default();
    let facility = Facility::with_writer(buffer.clone());
    (buffer, facility)
}

/// A facility initialised with `options`.
pub fn facility_with(options: FacilityOptions) -> (SharedBuf, Facility) {
    let (buffer, facility) = blank_facility();
    facility.init_with(options).expect("init facility");
    (buffer, facility)
}

/// A thread-safe facility at `INFO` with `NET` registered at `DEBUG`.
#[fixture]
pub fn net_facility() -> (SharedBuf, Facility) {
    let (buffer, facility) = facility_with(FacilityOptions::new(LogLevel::Info, true));
    facility.register("NET", LogLevel::Debug).expect("register NET");
    (buffer, facility)
}
