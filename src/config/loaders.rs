//! INI and JSON loaders for [`FacilityConfig`].
//!
//! The INI layout uses two sections:
//!
//! ```ini
//! [facility]
//! level = INFO
//! thread_safe = true
//! timestamps = false
//! function_names = false
//!
//! [sources]
//! NET = DEBUG
//! DB = WARNING
//! ```
//!
//! Every key is optional. Unknown sections or keys are rejected.

use std::fs;
use std::path::Path;

use ::ini::{Ini, Properties};

use super::types::{ConfigError, FacilityConfig};
use crate::level::LogLevel;
use crate::registry::SourceDescriptor;

const FACILITY_SECTION: &str = "facility";
const SOURCES_SECTION: &str = "sources";

fn parse_level(key: &str, value: &str) -> Result<LogLevel, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidLevel {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

fn apply_facility_section(
    config: &mut FacilityConfig,
    props: &Properties,
) -> Result<(), ConfigError> {
    for (key, value) in props.iter() {
        let qualified = format!("{FACILITY_SECTION}.{key}");
        match key {
            "level" => config.level = parse_level(&qualified, value)?,
            "thread_safe" => config.thread_safe = parse_flag(&qualified, value)?,
            "timestamps" => config.timestamps = parse_flag(&qualified, value)?,
            "function_names" => config.function_names = parse_flag(&qualified, value)?,
            _ => return Err(ConfigError::UnknownEntry(qualified)),
        }
    }
    Ok(())
}

fn apply_sources_section(
    config: &mut FacilityConfig,
    props: &Properties,
) -> Result<(), ConfigError> {
    for (name, value) in props.iter() {
        let qualified = format!("{SOURCES_SECTION}.{name}");
        let level = parse_level(&qualified, value)?;
        config.sources.push(SourceDescriptor::new(name, level));
    }
    Ok(())
}

impl FacilityConfig {
    /// Parse the INI layout described in the module documentation.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text)?;
        let mut config = Self::default();
        for (section, props) in ini.iter() {
            match section {
                Some(FACILITY_SECTION) => apply_facility_section(&mut config, props)?,
                Some(SOURCES_SECTION) => apply_sources_section(&mut config, props)?,
                None if props.is_empty() => {}
                None => {
                    let first = props.iter().next().map(|(key, _)| key).unwrap_or_default();
                    return Err(ConfigError::UnknownEntry(first.to_owned()));
                }
                Some(other) => return Err(ConfigError::UnknownEntry(format!("[{other}]"))),
            }
        }
        Ok(config)
    }

    /// Read and parse an INI file.
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_ini_str(&read(path.as_ref())?)
    }

    /// Parse a JSON document such as
    /// `{"level": "INFO", "sources": {"NET": "DEBUG"}}`.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    /// Render as pretty-printed JSON accepted by [`Self::from_json_str`].
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
