// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Configuration layer for the Rapu harness
//!
//! Two documents are read once at process start and treated as read-only
//! afterwards: an environment-specific settings file
//! (`config/application-{env}.toml`) and a structured framework document
//! (`config/framework.yml`).

mod framework;
mod settings;

pub use framework::{
    ApiSection, DatabaseSection, FrameworkConfig, PerformanceSection, ReportingSection, UiSection,
};
pub use settings::Settings;

use std::path::Path;
use std::sync::Arc;

/// Environment variable selecting the settings file
pub const ENV_VAR: &str = "RAPU_ENV";

/// Default environment when `RAPU_ENV` is unset
pub const DEFAULT_ENV: &str = "qa";

/// Immutable bundle of both configuration documents
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    settings: Arc<Settings>,
    framework: Arc<FrameworkConfig>,
}

impl ConfigHandle {
    /// Load both documents from the given config directory.
    ///
    /// Load failures are logged and fall back to built-in defaults, so a
    /// missing config tree never aborts a run.
    pub fn load(config_dir: impl AsRef<Path>) -> Self {
        let config_dir = config_dir.as_ref();
        let env = std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENV.to_string());

        let settings = Settings::load(config_dir, &env);
        let framework = FrameworkConfig::load(config_dir.join("framework.yml"));

        Self {
            settings: Arc::new(settings),
            framework: Arc::new(framework),
        }
    }

    /// Build a handle from already-constructed documents (used by tests)
    pub fn from_parts(settings: Settings, framework: FrameworkConfig) -> Self {
        Self {
            settings: Arc::new(settings),
            framework: Arc::new(framework),
        }
    }

    /// Environment-specific settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Structured framework configuration
    pub fn framework(&self) -> &FrameworkConfig {
        &self.framework
    }
}

impl Default for ConfigHandle {
    fn default() -> Self {
        Self::from_parts(Settings::default(), FrameworkConfig::default())
    }
}
