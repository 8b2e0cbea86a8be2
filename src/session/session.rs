// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser session handle
//!
//! Thin wrapper over a live WebDriver session. Every method is a direct
//! pass-through to the protocol with logging; the only local logic is the
//! page-readiness poll.

use std::time::{Duration, Instant};

use thirtyfour::prelude::*;
use tracing::{debug, info};

use super::BrowserKind;
use crate::error::{Error, Result};

/// Interval between readiness polls
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A live browser session, owned by exactly one execution thread
#[derive(Clone)]
pub struct UiSession {
    driver: WebDriver,
    browser: BrowserKind,
    explicit_wait: Duration,
}

impl UiSession {
    /// Wrap an established WebDriver session
    pub fn new(driver: WebDriver, browser: BrowserKind, explicit_wait: Duration) -> Self {
        Self {
            driver,
            browser,
            explicit_wait,
        }
    }

    /// The browser family backing this session
    pub fn browser(&self) -> BrowserKind {
        self.browser
    }

    /// The configured explicit wait
    pub fn explicit_wait(&self) -> Duration {
        self.explicit_wait
    }

    /// Underlying driver, for operations not wrapped here
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Navigate to a URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        info!("Navigated to: {}", url);
        Ok(())
    }

    /// Current page URL
    pub async fn current_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.to_string())
    }

    /// Current page title
    pub async fn title(&self) -> Result<String> {
        Ok(self.driver.title().await?)
    }

    /// Refresh the current page
    pub async fn refresh(&self) -> Result<()> {
        self.driver.refresh().await?;
        info!("Page refreshed");
        Ok(())
    }

    /// Navigate back in history
    pub async fn back(&self) -> Result<()> {
        self.driver.back().await?;
        info!("Navigated back to previous page");
        Ok(())
    }

    /// Navigate forward in history
    pub async fn forward(&self) -> Result<()> {
        self.driver.forward().await?;
        info!("Navigated forward to next page");
        Ok(())
    }

    /// Find an element
    pub async fn find(&self, by: By) -> Result<WebElement> {
        Ok(self.driver.find(by).await?)
    }

    /// Execute a script and return its JSON result
    pub async fn execute(&self, script: &str) -> Result<serde_json::Value> {
        let ret = self.driver.execute(script, Vec::new()).await?;
        Ok(ret.json().clone())
    }

    /// Poll `document.readyState` until the page reports complete.
    ///
    /// Bounded by the configured explicit wait.
    pub async fn wait_for_page_load(&self) -> Result<()> {
        let deadline = Instant::now() + self.explicit_wait;
        loop {
            let state = self.execute("return document.readyState").await?;
            if state.as_str() == Some("complete") {
                debug!("Page load complete");
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::timeout(
                    "page load",
                    self.explicit_wait.as_millis() as u64,
                ));
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    /// Capture the current viewport as PNG bytes
    pub async fn screenshot_png(&self) -> Result<Vec<u8>> {
        Ok(self.driver.screenshot_as_png().await?)
    }

    /// End the session
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

impl std::fmt::Debug for UiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiSession")
            .field("browser", &self.browser)
            .field("explicit_wait", &self.explicit_wait)
            .finish()
    }
}
