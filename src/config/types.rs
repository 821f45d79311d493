//! Type definitions and builder for facility configuration.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::FacilityError;
use crate::facility::FacilityOptions;
use crate::formatter::FormatOptions;
use crate::level::LogLevel;
use crate::registry::SourceDescriptor;

/// Errors that may occur while loading or applying a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The INI text is malformed.
    #[error("invalid INI configuration: {0}")]
    Ini(#[from] ::ini::ParseError),
    /// The JSON text is malformed or does not match the schema.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// A level value is not a level name.
    #[error("invalid level {value:?} for {key}")]
    InvalidLevel { key: String, value: String },
    /// A boolean value is not recognised.
    #[error("invalid flag {value:?} for {key}")]
    InvalidFlag { key: String, value: String },
    /// A section or key is not part of the schema.
    #[error("unknown configuration entry {0}")]
    UnknownEntry(String),
    /// Initialising or registering on the facility failed.
    #[error(transparent)]
    Facility(#[from] FacilityError),
}

/// Declarative description of an initialised facility.
///
/// `sources` keeps document order; a later duplicate overrides an earlier
/// one when registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacilityConfig {
    pub level: LogLevel,
    pub thread_safe: bool,
    pub timestamps: bool,
    pub function_names: bool,
    #[serde(with = "source_map")]
    pub sources: Vec<SourceDescriptor>,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            thread_safe: true,
            timestamps: false,
            function_names: false,
            sources: Vec::new(),
        }
    }
}

impl FacilityConfig {
    /// Options passed to [`Facility::init_with`](crate::Facility::init_with).
    pub fn options(&self) -> FacilityOptions {
        FacilityOptions::new(self.level, self.thread_safe).with_format(
            FormatOptions::default()
                .with_timestamps(self.timestamps)
                .with_function_names(self.function_names),
        )
    }
}

/// `sources` as a `name -> level` map, preserving entry order.
mod source_map {
    use super::*;

    pub fn serialize<S: Serializer>(
        sources: &[SourceDescriptor],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(sources.len()))?;
        for source in sources {
            map.serialize_entry(&source.name, &source.min_level)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<SourceDescriptor>, D::Error> {
        deserializer.deserialize_map(SourceMapVisitor)
    }

    struct SourceMapVisitor;

    impl<'de> Visitor<'de> for SourceMapVisitor {
        type Value = Vec<SourceDescriptor>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of source names to level names")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut sources = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, min_level)) = access.next_entry::<String, LogLevel>()? {
                sources.push(SourceDescriptor { name, min_level });
            }
            Ok(sources)
        }
    }
}

/// Builder for [`FacilityConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigBuilder {
    config: FacilityConfig,
}

impl From<FacilityConfig> for ConfigBuilder {
    fn from(config: FacilityConfig) -> Self {
        Self { config }
    }
}

impl ConfigBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the global level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Choose whether emission holds the state lock throughout.
    pub fn with_thread_safe(mut self, thread_safe: bool) -> Self {
        self.config.thread_safe = thread_safe;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.config.timestamps = enabled;
        self
    }

    pub fn with_function_names(mut self, enabled: bool) -> Self {
        self.config.function_names = enabled;
        self
    }

    /// Append a source registration.
    pub fn with_source(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.config.sources.push(SourceDescriptor::new(name, level));
        self
    }

    /// Return the configuration built so far.
    pub fn config(&self) -> &FacilityConfig {
        &self.config
    }

    /// Consume the builder, returning the configuration.
    pub fn into_config(self) -> FacilityConfig {
        self.config
    }
}
