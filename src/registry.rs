//! Registry mapping source names to per-source minimum levels.
//!
//! The registry is a plain owned map; synchronisation is the job of the
//! [`Facility`](crate::facility::Facility) that owns it. Names longer than
//! [`SOURCE_STORED_LEN`] bytes are stored truncated, and every lookup applies
//! the same truncation so a name that was accepted is always found again.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FacilityError;
use crate::formatter::floor_char_boundary;
use crate::level::LogLevel;

/// Longest source name, in bytes, accepted by [`SourceRegistry::register`].
///
/// Only the first [`SOURCE_STORED_LEN`] bytes are stored and compared, so two
/// accepted names sharing those bytes address the same entry: registering
/// the second reports [`Registration::Updated`] and replaces the first's
/// threshold.
pub const SOURCE_NAME_MAX_LEN: usize = 128;

/// Number of bytes of a source name kept by the registry.
pub const SOURCE_STORED_LEN: usize = SOURCE_NAME_MAX_LEN - 1;

/// Return the part of `name` the registry stores and matches on.
pub fn stored_name(name: &str) -> &str {
    &name[..floor_char_boundary(name, SOURCE_STORED_LEN)]
}

/// A source name paired with its minimum level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub name: String,
    pub min_level: LogLevel,
}

impl SourceDescriptor {
    pub fn new(name: impl Into<String>, min_level: LogLevel) -> Self {
        Self {
            name: name.into(),
            min_level,
        }
    }
}

impl<S: Into<String>> From<(S, LogLevel)> for SourceDescriptor {
    fn from((name, min_level): (S, LogLevel)) -> Self {
        Self::new(name, min_level)
    }
}

/// Outcome of a successful registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// A new entry was allocated.
    Inserted,
    /// An existing entry had its threshold overwritten.
    Updated,
}

/// Owned map from stored source name to minimum level.
#[derive(Clone, Debug, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, LogLevel>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name` or overwrite its threshold.
    ///
    /// Fails without touching the registry when `level` is
    /// [`LogLevel::Invalid`], when `name` is longer than
    /// [`SOURCE_NAME_MAX_LEN`] bytes, or when memory for a new entry cannot
    /// be reserved.
    pub fn register(&mut self, name: &str, level: LogLevel) -> Result<Registration, FacilityError> {
        if !level.is_threshold() {
            return Err(FacilityError::InvalidLevel(level));
        }
        if name.len() > SOURCE_NAME_MAX_LEN {
            return Err(FacilityError::SourceNameTooLong {
                len: name.len(),
                max: SOURCE_NAME_MAX_LEN,
            });
        }
        let key = stored_name(name);
        if let Some(existing) = self.sources.get_mut(key) {
            *existing = level;
            return Ok(Registration::Updated);
        }

        let mut owned = String::new();
        owned
            .try_reserve_exact(key.len())
            .map_err(|_| FacilityError::OutOfMemory)?;
        owned.push_str(key);
        self.sources
            .try_reserve(1)
            .map_err(|_| FacilityError::OutOfMemory)?;
        self.sources.insert(owned, level);
        Ok(Registration::Inserted)
    }

    /// Register each descriptor in order, stopping at the first failure.
    ///
    /// Entries applied before the failing one are kept. A later duplicate of
    /// a name overwrites the earlier one.
    pub fn register_many<'a, I>(&mut self, descriptors: I) -> Result<(), FacilityError>
    where
        I: IntoIterator<Item = &'a SourceDescriptor>,
    {
        for (index, descriptor) in descriptors.into_iter().enumerate() {
            self.register(&descriptor.name, descriptor.min_level)
                .map_err(|source| FacilityError::Batch {
                    index,
                    name: descriptor.name.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    /// Remove `name`, returning its threshold if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<LogLevel> {
        self.sources.remove(stored_name(name))
    }

    /// Threshold registered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<LogLevel> {
        self.sources.get(stored_name(name)).copied()
    }

    /// Threshold registered for `name`, or [`LogLevel::Invalid`].
    pub fn lookup(&self, name: &str) -> LogLevel {
        self.get(name).unwrap_or(LogLevel::Invalid)
    }

    /// Copy every entry into a caller-owned vector.
    ///
    /// Order follows the map's iteration order and is not stable across
    /// mutations.
    pub fn snapshot(&self) -> Result<Vec<SourceDescriptor>, FacilityError> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.sources.len())
            .map_err(|_| FacilityError::OutOfMemory)?;
        out.extend(
            self.sources
                .iter()
                .map(|(name, level)| SourceDescriptor::new(name.as_str(), *level)),
        );
        Ok(out)
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Point-in-time copy of the registry together with the global level.
///
/// Dropping the dump releases it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceDump {
    pub global_level: LogLevel,
    pub sources: Vec<SourceDescriptor>,
}

impl SourceDump {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceDescriptor> {
        self.sources.iter()
    }

    /// Threshold recorded for `name` in this dump.
    pub fn level_of(&self, name: &str) -> Option<LogLevel> {
        let key = stored_name(name);
        self.sources
            .iter()
            .find(|d| d.name == key)
            .map(|d| d.min_level)
    }
}

impl IntoIterator for SourceDump {
    type Item = SourceDescriptor;
    type IntoIter = std::vec::IntoIter<SourceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.sources.into_iter()
    }
}
