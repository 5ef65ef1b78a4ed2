//! Service container for dependency injection
//!
//! Wires the build service to its settings and command runner.

use std::sync::Arc;

use crate::application::services::BuildService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, RealCommandRunner};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealCommandRunner))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, cmd: Arc<dyn CommandRunner>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, cmd }
    }

    /// Build service validated against the current settings.
    ///
    /// # Errors
    /// `Config` if the toolchain or variant catalog is inconsistent.
    pub fn build_service(&self) -> ApplicationResult<BuildService> {
        Ok(BuildService::new(
            Arc::clone(&self.cmd),
            self.settings.toolchain()?,
            self.settings.catalog()?,
        ))
    }
}
