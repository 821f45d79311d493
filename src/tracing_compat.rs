//! Bridge from `tracing` events into a [`Facility`].
//!
//! [`FacilityLayer`] is a `tracing-subscriber` layer. Each event's target
//! becomes its source name (`::` normalised to `.`), its level is mapped onto
//! [`LogLevel`], and its `message` field, followed by any other fields as
//! `key=value`, becomes the record text. Spans are ignored.
//!
//! Events forwarded from the `log` crate by a `tracing_log::LogTracer` are
//! normalised first, so they keep their original target, file and line and
//! the `log.*` bookkeeping fields are not rendered.
//!
//! ```rust,ignore
//! srclog::init(LogLevel::Info, true)?;
//! srclog::register("app.net", LogLevel::Debug)?;
//! srclog::tracing_compat::init_tracing()?;
//!
//! tracing::warn!(target: "app::net", peer = %addr, "connection reset");
//! ```

use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{Event, Level, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::layer::{Context, Layer};

use crate::facility::{Facility, is_internal_target};
use crate::level::LogLevel;
use crate::log_record::{CallSite, source_from_target};
use crate::manager;

/// Layer forwarding `tracing` events to a facility.
#[derive(Clone, Copy, Debug)]
pub struct FacilityLayer {
    facility: &'static Facility,
}

impl FacilityLayer {
    pub fn new(facility: &'static Facility) -> Self {
        Self { facility }
    }

    /// Layer for the process-wide facility.
    pub fn global() -> Self {
        Self::new(manager::facility())
    }
}

impl Default for FacilityLayer {
    fn default() -> Self {
        Self::global()
    }
}

fn map_tracing_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warning,
        Level::ERROR => LogLevel::Error,
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        map_tracing_level(level)
    }
}

impl<S: Subscriber> Layer<S> for FacilityLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let normalized = event.normalized_metadata();
        let metadata = normalized.as_ref().unwrap_or_else(|| event.metadata());
        if is_internal_target(metadata.target()) {
            return;
        }
        let source = source_from_target(metadata.target());
        let level = LogLevel::from(*metadata.level());
        if !self.facility.will_be_printed(&source, level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let site = CallSite::new(
            &source,
            metadata.file().unwrap_or_default(),
            metadata.line().unwrap_or(0),
            metadata.module_path().unwrap_or_default(),
        );
        self.facility
            .log_message(&site, level, format_args!("{}", visitor.finish()));
    }
}

/// Collects the `message` field and renders the rest as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: String,
}

impl MessageVisitor {
    fn push_field(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", field.name(), value);
    }

    fn finish(self) -> String {
        match (self.message, self.fields.is_empty()) {
            (Some(message), true) => message,
            (Some(message), false) => format!("{message} {}", self.fields),
            (None, _) => self.fields,
        }
    }
}

/// Fields added by `tracing_log` to carry the original `log` metadata.
fn is_log_field(field: &Field) -> bool {
    field.name().starts_with("log.")
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if is_log_field(field) {
            return;
        }
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.push_field(field, format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if is_log_field(field) {
            return;
        }
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.push_field(field, format_args!("{value}"));
        }
    }
}

/// Install a subscriber that forwards every event to the process-wide
/// facility.
///
/// Only the subscriber is installed; `log` records are not captured. Pair
/// it with `tracing_log::LogTracer` to forward them, or use
/// the `log` bridge in `log_compat` instead.
///
/// Fails when a global default subscriber is already set.
pub fn init_tracing() -> Result<(), SetGlobalDefaultError> {
    use tracing_subscriber::layer::SubscriberExt;

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(FacilityLayer::global()),
    )
}
