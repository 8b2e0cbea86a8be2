// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Structured framework configuration
//!
//! One YAML document (`config/framework.yml`) with per-concern sections.
//! Every section has sensible defaults so a partial document is fine.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::Result;

/// Framework-wide configuration document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    pub ui: UiSection,
    pub api: ApiSection,
    pub reporting: ReportingSection,
    pub database: DatabaseSection,
    pub performance: PerformanceSection,
}

/// UI testing settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Browsers this deployment supports
    pub supported_browsers: Vec<String>,
    /// Browser options keyed by browser name
    pub browser_options: HashMap<String, String>,
    /// Default operation timeout (seconds)
    pub default_timeout_secs: u64,
    /// Capture screenshots on failure
    pub take_screenshots: bool,
    /// Screenshot image format
    pub screenshot_format: String,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            supported_browsers: vec![
                "chrome".to_string(),
                "firefox".to_string(),
                "edge".to_string(),
                "safari".to_string(),
            ],
            browser_options: HashMap::new(),
            default_timeout_secs: 30,
            take_screenshots: true,
            screenshot_format: "PNG".to_string(),
        }
    }
}

/// API testing settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Connection timeout (milliseconds)
    pub connection_timeout_ms: u64,
    /// Read timeout (milliseconds)
    pub read_timeout_ms: u64,
    /// Log request/response details
    pub enable_logging: bool,
    /// Default content type for request bodies
    pub default_content_type: String,
    /// Extra default headers
    pub default_headers: HashMap<String, String>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            connection_timeout_ms: 10_000,
            read_timeout_ms: 30_000,
            enable_logging: true,
            default_content_type: "application/json".to_string(),
            default_headers: HashMap::new(),
        }
    }
}

impl ApiSection {
    /// Connection timeout as a duration
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }

    /// Read timeout as a duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Reporting settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportingSection {
    pub report_type: String,
    pub generate_html_report: bool,
    pub report_path: String,
}

impl Default for ReportingSection {
    fn default() -> Self {
        Self {
            report_type: "html".to_string(),
            generate_html_report: true,
            report_path: "target/reports".to_string(),
        }
    }
}

/// Database settings (carried as configuration only)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub driver: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            driver: None,
            max_connections: 10,
        }
    }
}

/// Performance-run settings (carried as configuration only)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerformanceSection {
    pub thread_count: u32,
    pub ramp_up_secs: u64,
}

impl Default for PerformanceSection {
    fn default() -> Self {
        Self {
            thread_count: 10,
            ramp_up_secs: 60,
        }
    }
}

impl FrameworkConfig {
    /// Load the framework document, falling back to defaults on failure
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded framework configuration from {}", path.display());
                config
            }
            Err(e) => {
                error!(
                    "Failed to load framework configuration from {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Parse a framework document
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Whether the given browser name is in the supported list
    pub fn supports_browser(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.ui.supported_browsers.iter().any(|b| b.eq_ignore_ascii_case(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FrameworkConfig::default();
        assert_eq!(config.api.connection_timeout(), Duration::from_secs(10));
        assert!(config.ui.take_screenshots);
        assert!(config.supports_browser("Chrome"));
        assert!(!config.supports_browser("netscape"));
    }

    #[test]
    fn test_partial_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framework.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
api:
  connection_timeout_ms: 5000
  default_headers:
    x-team: platform
reporting:
  report_path: out/reports
"#
        )
        .unwrap();

        let config = FrameworkConfig::load(&path);
        assert_eq!(config.api.connection_timeout_ms, 5000);
        assert_eq!(
            config.api.default_headers.get("x-team").map(String::as_str),
            Some("platform")
        );
        assert_eq!(config.reporting.report_path, "out/reports");
        // untouched sections keep defaults
        assert_eq!(config.performance.thread_count, 10);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = FrameworkConfig::load("/nonexistent/framework.yml");
        assert_eq!(config.api.read_timeout_ms, 30_000);
    }
}
