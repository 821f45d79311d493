//! Process-wide facility handle.
//!
//! The free functions mirror the methods of [`Facility`] on a single lazily
//! created instance writing to `stderr`. The call-site macros and both
//! bridges route through [`facility()`].

use once_cell::sync::Lazy;

use crate::error::FacilityError;
use crate::facility::{Facility, FacilityOptions};
use crate::level::LogLevel;
use crate::registry::{Registration, SourceDescriptor, SourceDump};

static FACILITY: Lazy<Facility> = Lazy::new(Facility::new);

/// The process-wide facility. Uninitialised until [`init`] succeeds.
pub fn facility() -> &'static Facility {
    &FACILITY
}

/// Initialise the process-wide facility. Succeeds once per process.
pub fn init(global_level: LogLevel, thread_safe: bool) -> Result<(), FacilityError> {
    FACILITY.init(global_level, thread_safe)
}

/// [`init`] with explicit [`FacilityOptions`].
pub fn init_with(options: FacilityOptions) -> Result<(), FacilityError> {
    FACILITY.init_with(options)
}

/// Replace the global threshold.
pub fn set_global_level(level: LogLevel) -> Result<(), FacilityError> {
    FACILITY.set_global_level(level)
}

/// Register `name` at `level`, overwriting any earlier threshold.
pub fn register(name: &str, level: LogLevel) -> Result<Registration, FacilityError> {
    FACILITY.register(name, level)
}

/// Register descriptors in order; earlier ones stay if a later one fails.
pub fn register_many<'a, I>(descriptors: I) -> Result<(), FacilityError>
where
    I: IntoIterator<Item = &'a SourceDescriptor>,
{
    FACILITY.register_many(descriptors)
}

/// Remove `name`, returning its threshold if it was registered.
pub fn unregister(name: &str) -> Option<LogLevel> {
    FACILITY.unregister(name)
}

/// Clear every source. The facility cannot be initialised again.
pub fn teardown() -> Result<(), FacilityError> {
    FACILITY.teardown()
}

/// Whether a record from `source` at `level` would be emitted now.
pub fn will_be_printed(source: &str, level: LogLevel) -> bool {
    FACILITY.will_be_printed(source, level)
}

/// Threshold of `source`, or [`LogLevel::Invalid`] if unregistered.
pub fn get_source_level(source: &str) -> LogLevel {
    FACILITY.get_source_level(source)
}

/// Global threshold, or [`LogLevel::Invalid`] before [`init`].
pub fn get_global_level() -> LogLevel {
    FACILITY.get_global_level()
}

/// Snapshot of the process-wide registry. Dropping it releases the copy.
pub fn dump_sources() -> Result<SourceDump, FacilityError> {
    FACILITY.dump_sources()
}

/// Parse a level name, returning [`LogLevel::Invalid`] for unknown text.
pub fn level_from_str(name: &str) -> LogLevel {
    LogLevel::from_name(name)
}

/// Name of the level with rank `rank`, or `"INVALID"` when out of range.
pub fn level_to_str(rank: u8) -> &'static str {
    LogLevel::name_for_rank(rank)
}
