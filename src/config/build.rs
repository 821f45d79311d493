//! Realisation of a configuration on a facility.

use log::debug;

use crate::config::ConfigError;
use crate::facility::{Facility, INTERNAL_TARGET};
use crate::manager;

use super::types::ConfigBuilder;

impl ConfigBuilder {
    /// Initialise `facility` and register the configured sources.
    ///
    /// Sources are registered in order after a successful initialisation. A
    /// failing source stops the process; the ones before it stay registered
    /// and the facility stays initialised.
    pub fn build_and_init(&self, facility: &Facility) -> Result<(), ConfigError> {
        let config = self.config();
        facility.init_with(config.options())?;
        facility.register_many(&config.sources)?;
        debug!(
            target: INTERNAL_TARGET,
            "configuration applied: {} sources",
            config.sources.len()
        );
        Ok(())
    }

    /// [`Self::build_and_init`] on the process-wide facility.
    pub fn build_and_init_global(&self) -> Result<(), ConfigError> {
        self.build_and_init(manager::facility())
    }
}
