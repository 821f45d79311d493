//! Facility context: global threshold, source registry and output stream.
//!
//! A [`Facility`] starts uninitialised. [`Facility::init`] moves it to the
//! initialised state exactly once; every registry and emission call before
//! that is a silent no-op or an error. [`Facility::teardown`] clears the
//! registry but leaves the facility initialised, so it cannot be initialised
//! again.
//!
//! Two locks are involved. The state lock guards the initialised flag, the
//! guard mode, the format options, the global level and the registry. The
//! writer lock guards the output stream and is only ever taken while the
//! state lock is held or after it was released, never the other way round.
//! Diagnostics about the facility itself are logged with neither lock held.

use std::fmt;
use std::io::{self, Write};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::error::FacilityError;
use crate::filter::{SourceFilter, TwoLevelFilter, Verdict};
use crate::formatter::{FormatOptions, RecordFormatter};
use crate::level::LogLevel;
use crate::log_record::{CallSite, Record};
use crate::registry::{Registration, SourceDescriptor, SourceDump, SourceRegistry};

/// `log` target used for diagnostics about the facility itself.
///
/// The `log` and `tracing` bridges drop records with this target.
pub const INTERNAL_TARGET: &str = "srclog::internal";

/// Whether `target` names the facility's own diagnostics.
pub fn is_internal_target(target: &str) -> bool {
    target == INTERNAL_TARGET
}

/// Settings applied by [`Facility::init_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FacilityOptions {
    /// Floor below which nothing is emitted.
    pub global_level: LogLevel,
    /// Hold the state lock across decision, formatting and write.
    pub thread_safe: bool,
    /// Optional prefix parts.
    pub format: FormatOptions,
}

impl FacilityOptions {
    pub fn new(global_level: LogLevel, thread_safe: bool) -> Self {
        Self {
            global_level,
            thread_safe,
            format: FormatOptions::default(),
        }
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }
}

impl Default for FacilityOptions {
    fn default() -> Self {
        Self::new(LogLevel::Info, true)
    }
}

struct State {
    initialised: bool,
    thread_safe: bool,
    global_level: LogLevel,
    formatter: RecordFormatter,
    registry: SourceRegistry,
}

impl State {
    fn new() -> Self {
        Self {
            initialised: false,
            thread_safe: false,
            global_level: LogLevel::Invalid,
            formatter: RecordFormatter::default(),
            registry: SourceRegistry::new(),
        }
    }

    fn ensure_initialised(&self) -> Result<(), FacilityError> {
        if self.initialised {
            Ok(())
        } else {
            Err(FacilityError::NotInitialised)
        }
    }

    fn filter(&self) -> TwoLevelFilter<'_> {
        TwoLevelFilter::new(self.global_level, &self.registry)
    }

    fn admits(&self, source: &str, level: LogLevel) -> bool {
        self.initialised && self.filter().should_log(source, level)
    }
}

/// A logging facility context.
///
/// Most programs use the process-wide instance from
/// [`manager::facility`](crate::manager::facility); separate instances are
/// useful for libraries and tests that need their own output stream.
pub struct Facility {
    state: Mutex<State>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Facility")
            .field("initialised", &state.initialised)
            .field("thread_safe", &state.thread_safe)
            .field("global_level", &state.global_level)
            .field("sources", &state.registry.len())
            .finish_non_exhaustive()
    }
}

impl Default for Facility {
    fn default() -> Self {
        Self::new()
    }
}

impl Facility {
    /// Create an uninitialised facility writing to `stderr`.
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Create an uninitialised facility writing to `writer`.
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            state: Mutex::new(State::new()),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Replace the output stream. Records already written are unaffected.
    pub fn set_writer<W>(&self, writer: W)
    where
        W: Write + Send + 'static,
    {
        let mut previous = std::mem::replace(&mut *self.writer.lock(), Box::new(writer));
        let flushed = previous.flush();
        drop(previous);
        if let Err(err) = flushed {
            warn!(target: INTERNAL_TARGET, "failed to flush replaced log writer: {err}");
        }
    }

    /// Initialise with `global_level` and default format options.
    pub fn init(&self, global_level: LogLevel, thread_safe: bool) -> Result<(), FacilityError> {
        self.init_with(FacilityOptions::new(global_level, thread_safe))
    }

    /// Initialise the facility. Succeeds once per facility.
    pub fn init_with(&self, options: FacilityOptions) -> Result<(), FacilityError> {
        let mut state = self.state.lock();
        if state.initialised {
            return Err(FacilityError::AlreadyInitialised);
        }
        if !options.global_level.is_threshold() {
            return Err(FacilityError::InvalidLevel(options.global_level));
        }
        state.global_level = options.global_level;
        state.thread_safe = options.thread_safe;
        state.formatter = RecordFormatter::new(options.format);
        state.initialised = true;
        drop(state);
        debug!(
            target: INTERNAL_TARGET,
            "facility initialised: level={} thread_safe={}",
            options.global_level,
            options.thread_safe
        );
        Ok(())
    }

    pub fn is_initialised(&self) -> bool {
        self.state.lock().initialised
    }

    pub fn is_thread_safe(&self) -> bool {
        self.state.lock().thread_safe
    }

    /// Replace the global threshold.
    pub fn set_global_level(&self, level: LogLevel) -> Result<(), FacilityError> {
        if !level.is_threshold() {
            return Err(FacilityError::InvalidLevel(level));
        }
        let mut state = self.state.lock();
        state.ensure_initialised()?;
        state.global_level = level;
        Ok(())
    }

    /// Register `name` with threshold `level`, overwriting any previous one.
    pub fn register(&self, name: &str, level: LogLevel) -> Result<Registration, FacilityError> {
        let mut state = self.state.lock();
        state.ensure_initialised()?;
        state.registry.register(name, level)
    }

    /// Register every descriptor in order under a single lock.
    ///
    /// Stops at the first failing descriptor; the ones before it stay
    /// registered.
    pub fn register_many<'a, I>(&self, descriptors: I) -> Result<(), FacilityError>
    where
        I: IntoIterator<Item = &'a SourceDescriptor>,
    {
        let mut state = self.state.lock();
        state.ensure_initialised()?;
        state.registry.register_many(descriptors)
    }

    /// Remove `name`. Absent names and an uninitialised facility are ignored.
    pub fn unregister(&self, name: &str) -> Option<LogLevel> {
        let mut state = self.state.lock();
        if !state.initialised {
            return None;
        }
        state.registry.unregister(name)
    }

    /// Clear the registry and stop holding the lock across emission.
    ///
    /// The facility stays initialised. Calling this before `init` or more
    /// than once succeeds without effect.
    pub fn teardown(&self) -> Result<(), FacilityError> {
        let mut state = self.state.lock();
        if !state.initialised {
            return Ok(());
        }
        let dropped = state.registry.len();
        state.registry.clear();
        state.thread_safe = false;
        drop(state);

        let flushed = self.writer.lock().flush();
        if let Err(err) = flushed {
            warn!(target: INTERNAL_TARGET, "failed to flush log writer on teardown: {err}");
        }
        debug!(target: INTERNAL_TARGET, "facility torn down: {dropped} sources dropped");
        Ok(())
    }

    /// Whether a record from `source` at `level` would be emitted now.
    pub fn will_be_printed(&self, source: &str, level: LogLevel) -> bool {
        self.state.lock().admits(source, level)
    }

    /// Detailed filter outcome, or `None` while uninitialised.
    pub fn verdict(&self, source: &str, level: LogLevel) -> Option<Verdict> {
        let state = self.state.lock();
        state
            .initialised
            .then(|| state.filter().evaluate(source, level))
    }

    /// Threshold registered for `source`, or [`LogLevel::Invalid`].
    pub fn get_source_level(&self, source: &str) -> LogLevel {
        let state = self.state.lock();
        if !state.initialised {
            return LogLevel::Invalid;
        }
        state.registry.lookup(source)
    }

    /// Current global threshold, or [`LogLevel::Invalid`] while uninitialised.
    pub fn get_global_level(&self) -> LogLevel {
        let state = self.state.lock();
        if state.initialised {
            state.global_level
        } else {
            LogLevel::Invalid
        }
    }

    /// Owned snapshot of the registry and the global level.
    pub fn dump_sources(&self) -> Result<SourceDump, FacilityError> {
        let state = self.state.lock();
        state.ensure_initialised()?;
        Ok(SourceDump {
            global_level: state.global_level,
            sources: state.registry.snapshot()?,
        })
    }

    /// Emit a formatted message from `site` at `level` if the filter allows.
    pub fn log_message(&self, site: &CallSite<'_>, level: LogLevel, args: fmt::Arguments<'_>) {
        self.emit(&Record::message(*site, level, args));
    }

    /// Emit a hexdump of `buffer` from `site` at [`LogLevel::Raw`].
    ///
    /// `None` renders a `NULL` marker line in place of the dump.
    pub fn log_raw(&self, site: &CallSite<'_>, buffer: Option<&[u8]>) {
        self.emit(&Record::raw(*site, buffer));
    }

    fn emit(&self, record: &Record<'_>) {
        let state = self.state.lock();
        if !state.admits(record.site.source, record.level) {
            return;
        }
        let formatter = state.formatter;
        let result = if state.thread_safe {
            let result = self.write_record(&formatter.format(record));
            drop(state);
            result
        } else {
            drop(state);
            self.write_record(&formatter.format(record))
        };
        // No facility lock may be held here.
        if let Err(err) = result {
            warn!(target: INTERNAL_TARGET, "failed to write log record: {err}");
        }
    }

    fn write_record(&self, text: &str) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }
}
