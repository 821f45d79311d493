//! Embeddable logging facility with per-source thresholds.
//!
//! Callers tag every record with a source name and a [`LogLevel`]. A record
//! is emitted only when its level clears both the facility's global level
//! and the threshold registered for its source; unregistered sources are
//! never emitted. Allowed records are rendered with a fixed-width prefix
//! followed by the message, or by a hexdump for raw buffers, and written
//! synchronously to the facility's output stream.
//!
//! ```rust,ignore
//! use srclog::{LogLevel, srclog_info, srclog_raw};
//!
//! srclog::init(LogLevel::Info, true)?;
//! srclog::register("NET", LogLevel::Debug)?;
//! srclog_info!("NET", "connected to {}", peer);
//! srclog_raw!("NET", &packet);
//! ```

pub mod config;
pub mod error;
pub mod facility;
pub mod filter;
pub mod formatter;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
pub mod log_record;
pub mod logging_macros;
pub mod manager;
pub mod registry;
#[cfg(test)]
mod test_utils;
#[cfg(feature = "tracing-compat")]
pub mod tracing_compat;

pub use config::{ConfigBuilder, ConfigError, FacilityConfig};
pub use error::FacilityError;
pub use facility::{Facility, FacilityOptions, INTERNAL_TARGET};
pub use filter::{SourceFilter, TwoLevelFilter, Verdict};
pub use formatter::{FormatOptions, RecordFormatter, compose_hexdump_line, compose_prefix};
pub use level::{LogLevel, ParseLevelError};
#[cfg(feature = "log-compat")]
pub use log_compat::{FacilityLogAdapter, install_global_logger};
pub use log_record::{CallSite, Payload, RawBytes, Record};
pub use manager::{
    dump_sources, facility, get_global_level, get_source_level, init, init_with, register,
    register_many, set_global_level, teardown, unregister, will_be_printed,
};
pub use registry::{
    Registration, SOURCE_NAME_MAX_LEN, SourceDescriptor, SourceDump, SourceRegistry,
};
#[cfg(feature = "tracing-compat")]
pub use tracing_compat::{FacilityLayer, init_tracing};
