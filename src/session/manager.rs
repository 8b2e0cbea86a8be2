// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Config-bound session manager
//!
//! Creates browser sessions from the configured browser name and WebDriver
//! server, one per thread via the registry. Release is best-effort: quit
//! failures are logged and the registry entry is removed regardless.

use thirtyfour::WebDriver;
use tracing::{error, info, warn};

use super::{BrowserKind, SessionRegistry, UiSession};
use crate::config::ConfigHandle;
use crate::error::Result;

/// Per-thread browser session manager
pub struct SessionManager {
    config: ConfigHandle,
    registry: SessionRegistry<UiSession>,
}

impl SessionManager {
    /// Create a manager bound to the given configuration
    pub fn new(config: ConfigHandle) -> Self {
        Self {
            config,
            registry: SessionRegistry::new(),
        }
    }

    /// The session for the current thread, created on first use
    pub async fn session(&self) -> Result<UiSession> {
        self.registry.acquire_with(|| self.create()).await
    }

    /// The current thread's session without creating one
    pub fn current(&self) -> Option<UiSession> {
        self.registry.get()
    }

    async fn create(&self) -> Result<UiSession> {
        let settings = self.config.settings();
        let browser = BrowserKind::parse(&settings.browser);
        if !self.config.framework().supports_browser(browser.name()) {
            warn!(
                "Browser {} is not in the supported list; continuing anyway",
                browser
            );
        }

        let caps = browser.capabilities(settings.headless)?;
        let driver = WebDriver::new(&settings.webdriver_url, caps).await?;

        driver
            .set_implicit_wait_timeout(settings.implicit_wait())
            .await?;
        if let Err(e) = driver.maximize_window().await {
            // headless servers commonly reject this; not worth failing over
            warn!("Could not maximize window: {}", e);
        }

        info!("{} WebDriver session created successfully", browser);
        Ok(UiSession::new(driver, browser, settings.explicit_wait()))
    }

    /// Quit and deregister the current thread's session
    pub async fn release(&self) {
        if let Some(session) = self.registry.release() {
            match session.quit().await {
                Ok(()) => info!("Session quit successfully"),
                Err(e) => error!("Error quitting session: {}", e),
            }
        }
    }

    /// Quit and deregister every session
    pub async fn release_all(&self) {
        let sessions = self.registry.drain();
        let count = sessions.len();
        for session in sessions {
            if let Err(e) = session.quit().await {
                error!("Error quitting session: {}", e);
            }
        }
        if count > 0 {
            info!("All {} sessions quit", count);
        }
    }

    /// Number of live sessions across all threads
    pub fn active_sessions(&self) -> usize {
        self.registry.len()
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("active_sessions", &self.registry.len())
            .finish()
    }
}
