//! Compatibility bridge for the Rust `log` crate.
//!
//! `FacilityLogAdapter` implements `log::Log` and forwards records into a
//! [`Facility`]. A record's target becomes its source name, with `::`
//! normalised to `.`, so `log::info!(target: "NET", ...)` is filtered
//! exactly like `srclog_info!("NET", ...)`. Records with the facility's own
//! diagnostic target are dropped.

use std::sync::OnceLock;

use log::{Metadata, Record};
use once_cell::sync::Lazy;

use crate::facility::{Facility, is_internal_target};
use crate::level::LogLevel;
use crate::log_record::{CallSite, source_from_target};
use crate::manager;

/// Adapter implementing the Rust `log::Log` trait.
#[derive(Clone, Copy, Debug)]
pub struct FacilityLogAdapter {
    facility: &'static Facility,
}

impl FacilityLogAdapter {
    pub fn new(facility: &'static Facility) -> Self {
        Self { facility }
    }

    /// Adapter for the process-wide facility.
    pub fn global() -> Self {
        Self::new(manager::facility())
    }
}

fn map_log_level(level: log::Level) -> LogLevel {
    match level {
        log::Level::Trace => LogLevel::Trace,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Info => LogLevel::Info,
        log::Level::Warn => LogLevel::Warning,
        log::Level::Error => LogLevel::Error,
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        map_log_level(level)
    }
}

impl log::Log for FacilityLogAdapter {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !is_internal_target(metadata.target())
            && self
                .facility
                .will_be_printed(&source_from_target(metadata.target()), metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        if is_internal_target(record.target()) {
            return;
        }
        let source = source_from_target(record.target());
        let site = CallSite::new(
            &source,
            record.file().unwrap_or_default(),
            record.line().unwrap_or(0),
            record.module_path().unwrap_or_default(),
        );
        self.facility
            .log_message(&site, record.level().into(), *record.args());
    }

    fn flush(&self) {}
}

static GLOBAL_ADAPTER: Lazy<FacilityLogAdapter> = Lazy::new(FacilityLogAdapter::global);
static INSTALL_RESULT: OnceLock<bool> = OnceLock::new();

/// Install the process-wide facility as the global Rust logger.
///
/// Returns `true` on success. When a different global logger is already set,
/// installation fails and `false` is returned. Subsequent calls return the
/// cached outcome.
pub fn install_global_logger() -> bool {
    *INSTALL_RESULT.get_or_init(|| {
        if log::set_logger(&*GLOBAL_ADAPTER).is_err() {
            return false;
        }
        log::set_max_level(log::LevelFilter::Trace);
        true
    })
}
