//! Service container for dependency injection
//!
//! Wires up the harvest service with its settings and filesystem.

use std::sync::Arc;

use crate::application::services::HarvestService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Harvest service configured with the parser settings.
    pub fn harvest_service(&self) -> HarvestService {
        HarvestService::new(Arc::clone(&self.fs), self.settings.parser.clone())
    }
}
