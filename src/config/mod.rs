//! Declarative facility configuration.
//!
//! A [`FacilityConfig`] is loaded from INI or JSON, or assembled with a
//! [`ConfigBuilder`], and applied with [`ConfigBuilder::build_and_init`].

mod build;
mod loaders;
mod types;

pub use types::{ConfigBuilder, ConfigError, FacilityConfig};
