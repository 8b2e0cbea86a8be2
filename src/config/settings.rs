// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Environment-specific settings
//!
//! Loaded from `config/application-{env}.toml`. Unknown keys land in the
//! `extra` table and stay reachable through the string accessors.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::Result;

/// Environment-specific key/value settings, immutable after load
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Browser name (chrome, firefox, edge, safari)
    pub browser: String,
    /// Run the browser headless
    pub headless: bool,
    /// Implicit wait applied to element lookups (seconds)
    pub implicit_wait_secs: u64,
    /// Explicit wait used by readiness polling (seconds)
    pub explicit_wait_secs: u64,
    /// UI base URL
    pub base_url: String,
    /// API base URL
    pub api_base_url: String,
    /// WebDriver server URL (chromedriver, geckodriver, or a grid)
    pub webdriver_url: String,
    /// Directory for failure screenshots
    pub screenshot_path: String,
    /// Directory for HTML report artifacts
    pub report_path: String,
    /// Free-form extra keys
    #[serde(flatten)]
    pub extra: HashMap<String, toml::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            browser: "chrome".to_string(),
            headless: false,
            implicit_wait_secs: 10,
            explicit_wait_secs: 20,
            base_url: "https://www.google.com".to_string(),
            api_base_url: "https://api.example.com".to_string(),
            webdriver_url: "http://localhost:4444".to_string(),
            screenshot_path: "target/screenshots".to_string(),
            report_path: "target/reports".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Load settings for the given environment, falling back to defaults
    /// when the file is missing or malformed.
    pub fn load(config_dir: &Path, env: &str) -> Self {
        let path = config_dir.join(format!("application-{}.toml", env));
        match Self::from_file(&path) {
            Ok(settings) => {
                info!("Loaded configuration for environment: {}", env);
                settings
            }
            Err(e) => {
                error!("Failed to load settings from {}: {}", path.display(), e);
                info!("Loaded default settings");
                Self::default()
            }
        }
    }

    /// Parse a settings file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Get an extra key as string
    pub fn get(&self, key: &str) -> Option<String> {
        self.extra.get(key).map(|v| match v {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Get an extra key as string with default
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Get an extra key as integer with default
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.extra.get(key) {
            Some(toml::Value::Integer(i)) => *i,
            Some(toml::Value::String(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Get an extra key as boolean with default
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.extra.get(key) {
            Some(toml::Value::Boolean(b)) => *b,
            Some(toml::Value::String(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Implicit wait as a duration
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Explicit wait as a duration
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_secs(self.explicit_wait_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.browser, "chrome");
        assert!(!settings.headless);
        assert_eq!(settings.explicit_wait(), Duration::from_secs(20));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application-qa.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
browser = "firefox"
headless = true
implicit_wait_secs = 5
api_base_url = "https://api.test.local"
team = "platform"
retries = 3
"#
        )
        .unwrap();

        let settings = Settings::load(dir.path(), "qa");
        assert_eq!(settings.browser, "firefox");
        assert!(settings.headless);
        assert_eq!(settings.implicit_wait_secs, 5);
        assert_eq!(settings.api_base_url, "https://api.test.local");
        // unknown keys stay reachable
        assert_eq!(settings.get_or("team", "none"), "platform");
        assert_eq!(settings.get_int("retries", 0), 3);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path(), "staging");
        assert_eq!(settings.browser, "chrome");
        assert_eq!(settings.report_path, "target/reports");
    }

    #[test]
    fn test_extra_accessors_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.get("missing"), None);
        assert_eq!(settings.get_int("missing", 7), 7);
        assert!(settings.get_bool("missing", true));
    }
}
