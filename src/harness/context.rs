// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-case test context

use std::fmt::Debug;
use std::sync::Arc;

use tracing::{error, info};

use crate::api::ApiClient;
use crate::config::ConfigHandle;
use crate::error::{Error, Result};
use crate::report::{ReportSink, TestStatus};
use crate::session::{SessionManager, UiSession};

/// Everything a test body needs: API client, lazy browser session,
/// report logging, and assertion helpers
pub struct TestContext {
    config: ConfigHandle,
    sessions: Arc<SessionManager>,
    sink: ReportSink,
    api: ApiClient,
}

impl TestContext {
    pub(crate) fn new(
        config: ConfigHandle,
        sessions: Arc<SessionManager>,
        sink: ReportSink,
    ) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        Ok(Self {
            config,
            sessions,
            sink,
            api,
        })
    }

    /// The run configuration
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// The API client for this case
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Mutable API client, for auth/header changes
    pub fn api_mut(&mut self) -> &mut ApiClient {
        &mut self.api
    }

    /// The browser session for this thread, created on first use
    pub async fn ui(&self) -> Result<UiSession> {
        self.sessions.session().await
    }

    /// Navigate the browser session to a URL
    pub async fn navigate(&self, url: &str) -> Result<UiSession> {
        let session = self.ui().await?;
        session.navigate(url).await?;
        Ok(session)
    }

    /// Navigate to the configured UI base URL
    pub async fn open_base_url(&self) -> Result<UiSession> {
        let url = self.config.settings().base_url.clone();
        self.navigate(&url).await
    }

    /// Log a test step
    pub fn step(&self, step: &str) {
        info!("Test Step: {}", step);
        self.sink.log_step(step);
    }

    /// Log a test data point
    pub fn data(&self, key: &str, value: &str) {
        info!("Test Data - {}: {}", key, value);
        self.sink.log_data(key, value);
    }

    /// Assert a condition, recording the outcome
    pub fn ensure(&self, condition: bool, message: &str) -> Result<()> {
        if condition {
            info!("Assertion passed: {}", message);
            self.sink.log(TestStatus::Info, format!("Assertion passed: {}", message));
            Ok(())
        } else {
            error!("Assertion failed: {}", message);
            Err(Error::assertion(message))
        }
    }

    /// Assert equality, recording the outcome
    pub fn ensure_eq<T: PartialEq + Debug>(
        &self,
        actual: T,
        expected: T,
        message: &str,
    ) -> Result<()> {
        if actual == expected {
            info!("Assertion passed: {} - Value: {:?}", message, actual);
            self.sink.log(
                TestStatus::Info,
                format!("Assertion passed: {} - Value: {:?}", message, actual),
            );
            Ok(())
        } else {
            error!(
                "Assertion failed: {} - Expected: {:?}, Actual: {:?}",
                message, expected, actual
            );
            Err(Error::assertion_mismatch(message, expected, actual))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigHandle, FrameworkConfig, Settings};

    fn test_context() -> TestContext {
        let config = ConfigHandle::from_parts(Settings::default(), FrameworkConfig::default());
        let sessions = Arc::new(SessionManager::new(config.clone()));
        TestContext::new(config, sessions, ReportSink::new()).unwrap()
    }

    #[test]
    fn test_ensure_records_outcome() {
        let ctx = test_context();
        ctx.sink.start_case("t", "");

        assert!(ctx.ensure(true, "ok").is_ok());
        let err = ctx.ensure(false, "bad").unwrap_err();
        assert!(err.is_assertion());
    }

    #[test]
    fn test_ensure_eq_mismatch_detail() {
        let ctx = test_context();
        ctx.sink.start_case("t", "");

        assert!(ctx.ensure_eq(200u16, 200, "status").is_ok());
        let err = ctx.ensure_eq(404u16, 200, "status").unwrap_err();
        let detail = err.assertion_detail().unwrap();
        assert!(detail.contains("200"));
        assert!(detail.contains("404"));
    }
}
