// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser-name dispatch and WebDriver capabilities

use std::fmt;

use thirtyfour::{
    BrowserCapabilitiesHelper, Capabilities, ChromiumLikeCapabilities, DesiredCapabilities,
};
use tracing::warn;

use crate::error::Result;

/// Browser families the harness can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
    Edge,
    Safari,
}

impl BrowserKind {
    /// Parse a configured browser name.
    ///
    /// Unknown names fall back to Chrome with a warning, matching the
    /// fixed-default dispatch contract.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "chrome" => BrowserKind::Chrome,
            "firefox" => BrowserKind::Firefox,
            "edge" => BrowserKind::Edge,
            "safari" => BrowserKind::Safari,
            other => {
                warn!("Unsupported browser: {}. Defaulting to chrome", other);
                BrowserKind::Chrome
            }
        }
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Edge => "edge",
            BrowserKind::Safari => "safari",
        }
    }

    /// Build WebDriver capabilities for this browser
    pub fn capabilities(&self, headless: bool) -> Result<Capabilities> {
        match self {
            BrowserKind::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                if headless {
                    caps.add_arg("--headless=new")?;
                }
                for arg in CHROMIUM_ARGS {
                    caps.add_arg(arg)?;
                }
                caps.add_arg("--disable-blink-features=AutomationControlled")?;
                caps.insert_browser_option("excludeSwitches", serde_json::json!(["enable-automation"]))?;
                Ok(caps.into())
            }
            BrowserKind::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if headless {
                    caps.add_arg("-headless")?;
                }
                Ok(caps.into())
            }
            BrowserKind::Edge => {
                let mut caps = DesiredCapabilities::edge();
                if headless {
                    caps.add_arg("--headless=new")?;
                }
                for arg in CHROMIUM_ARGS {
                    caps.add_arg(arg)?;
                }
                Ok(caps.into())
            }
            BrowserKind::Safari => Ok(DesiredCapabilities::safari().into()),
        }
    }
}

/// Hardening arguments shared by Chromium-family browsers
const CHROMIUM_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--disable-extensions",
    "--disable-infobars",
    "--start-maximized",
];

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
