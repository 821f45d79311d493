//! Two-gate filtering of (source, level) pairs.
//!
//! Defines [`SourceFilter`] and the facility's [`TwoLevelFilter`]: a record
//! passes only when its level clears the global threshold *and* its source
//! is registered with a threshold the level also clears. Registration is an
//! allow-list, not an override.

use crate::level::LogLevel;
use crate::registry::SourceRegistry;

/// Trait implemented by filters deciding whether a record is emitted.
pub trait SourceFilter {
    /// Return `true` if a record from `source` at `level` should be emitted.
    fn should_log(&self, source: &str, level: LogLevel) -> bool;
}

/// Whether `requested` clears `threshold`.
#[inline]
pub fn passes(requested: LogLevel, threshold: LogLevel) -> bool {
    requested >= threshold
}

/// Outcome of evaluating a record against the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    /// The requested level is a sentinel.
    InvalidLevel,
    /// The requested level is below the global threshold.
    BelowGlobal,
    /// The source has not been registered.
    Unregistered,
    /// The requested level is below the source's threshold.
    BelowSource,
}

impl Verdict {
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Verdict::Allowed)
    }
}

/// Filter combining the global threshold with the registry.
#[derive(Clone, Copy, Debug)]
pub struct TwoLevelFilter<'a> {
    global: LogLevel,
    registry: &'a SourceRegistry,
}

impl<'a> TwoLevelFilter<'a> {
    pub fn new(global: LogLevel, registry: &'a SourceRegistry) -> Self {
        Self { global, registry }
    }

    /// Evaluate `level` for `source`.
    ///
    /// The global gate is checked first; the registry is only consulted when
    /// it passes.
    pub fn evaluate(&self, source: &str, level: LogLevel) -> Verdict {
        if !level.is_requestable() {
            return Verdict::InvalidLevel;
        }
        if !passes(level, self.global) {
            return Verdict::BelowGlobal;
        }
        match self.registry.get(source) {
            None => Verdict::Unregistered,
            Some(threshold) if passes(level, threshold) => Verdict::Allowed,
            Some(_) => Verdict::BelowSource,
        }
    }
}

impl SourceFilter for TwoLevelFilter<'_> {
    fn should_log(&self, source: &str, level: LogLevel) -> bool {
        self.evaluate(source, level).is_allowed()
    }
}
