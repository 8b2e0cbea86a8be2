// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Test case runner

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use super::TestContext;
use crate::config::ConfigHandle;
use crate::report::{ReportSink, TestStatus};
use crate::screenshot;
use crate::session::SessionManager;

/// What a test case exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    /// Browser only
    Ui,
    /// HTTP only
    Api,
    /// Browser and HTTP together
    Hybrid,
}

impl CaseKind {
    /// Whether failures should trigger screenshot capture
    pub fn uses_browser(&self) -> bool {
        matches!(self, CaseKind::Ui | CaseKind::Hybrid)
    }
}

/// Outcome of one executed case
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub name: String,
    pub outcome: TestStatus,
    pub error: Option<String>,
    pub duration_ms: u64,
}

impl CaseResult {
    /// Whether the case passed
    pub fn passed(&self) -> bool {
        self.outcome == TestStatus::Pass
    }
}

/// Totals for a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub report_path: Option<PathBuf>,
}

impl RunSummary {
    /// Whether every case passed
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Total executed cases
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passed, {} failed, {} skipped",
            self.passed, self.failed, self.skipped
        )
    }
}

/// Drives test cases through the shared lifecycle
pub struct Harness {
    config: ConfigHandle,
    sessions: Arc<SessionManager>,
    sink: ReportSink,
}

impl Harness {
    /// Create a harness over the given configuration
    pub fn new(config: ConfigHandle) -> Self {
        let sessions = Arc::new(SessionManager::new(config.clone()));
        Self {
            config,
            sessions,
            sink: ReportSink::new(),
        }
    }

    /// The report sink
    pub fn sink(&self) -> &ReportSink {
        &self.sink
    }

    /// The session manager
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// The run configuration
    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    /// Run one test case through the full lifecycle.
    ///
    /// On a failing UI-capable case with a live session this produces
    /// exactly one screenshot attempt and exactly one report-failure entry,
    /// even when the screenshot attempt itself fails. The thread's session
    /// is always released afterwards.
    pub async fn run_case<F, Fut>(
        &self,
        name: &str,
        description: &str,
        kind: CaseKind,
        body: F,
    ) -> CaseResult
    where
        F: FnOnce(TestContext) -> Fut,
        Fut: Future<Output = crate::error::Result<()>>,
    {
        info!("Starting test method: {} - {}", name, description);
        self.sink.start_case(name, description);
        let start = Instant::now();

        let result = match TestContext::new(
            self.config.clone(),
            Arc::clone(&self.sessions),
            self.sink.clone(),
        ) {
            Ok(ctx) => body(ctx).await,
            Err(e) => Err(e),
        };

        let outcome = match result {
            Ok(()) => {
                self.sink.end_case(TestStatus::Pass, None);
                CaseResult {
                    name: name.to_string(),
                    outcome: TestStatus::Pass,
                    error: None,
                    duration_ms: start.elapsed().as_millis() as u64,
                }
            }
            Err(e) => {
                let detail = e.assertion_detail().unwrap_or_else(|| e.to_string());
                error!("Test failed: {} - {}", name, detail);

                if kind.uses_browser() {
                    self.capture_failure_screenshot(name).await;
                }

                self.sink.end_case(TestStatus::Fail, Some(&detail));
                CaseResult {
                    name: name.to_string(),
                    outcome: TestStatus::Fail,
                    error: Some(detail),
                    duration_ms: start.elapsed().as_millis() as u64,
                }
            }
        };

        self.sessions.release().await;
        info!(
            "Finishing test method: {} - Status: {}",
            name, outcome.outcome
        );
        outcome
    }

    /// One screenshot attempt, annotating both the file-based and the
    /// byte-based report hooks. Failures never propagate.
    async fn capture_failure_screenshot(&self, test_name: &str) {
        let Some(session) = self.sessions.current() else {
            return;
        };
        let dir = self.config.settings().screenshot_path.clone();

        match screenshot::capture(&session, &dir, test_name).await {
            Ok(path) => {
                self.sink.attach_screenshot(&path);
                let bytes = screenshot::read_bytes(&path);
                self.sink.attach_bytes("Screenshot", &bytes);
            }
            Err(e) => {
                error!("Failed to take screenshot: {}", e);
                self.sink.attach_bytes("Screenshot", &[]);
            }
        }
    }

    /// Flush the report and quit every session, returning run totals
    pub async fn finish(&self) -> RunSummary {
        let report_path = match self.sink.flush(&self.config.settings().report_path) {
            Ok(path) => Some(path),
            Err(e) => {
                error!("Failed to flush report: {}", e);
                None
            }
        };
        self.sessions.release_all().await;

        let (passed, failed, skipped) = self.sink.counts();
        RunSummary {
            passed,
            failed,
            skipped,
            report_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigHandle, FrameworkConfig, Settings};
    use crate::error::Error;

    fn test_harness(report_dir: &std::path::Path) -> Harness {
        let settings = Settings {
            report_path: report_dir.display().to_string(),
            ..Settings::default()
        };
        Harness::new(ConfigHandle::from_parts(settings, FrameworkConfig::default()))
    }

    #[tokio::test]
    async fn test_passing_case() {
        let dir = tempfile::tempdir().unwrap();
        let harness = test_harness(dir.path());

        let result = harness
            .run_case("api_ok", "passes", CaseKind::Api, |ctx| async move {
                ctx.step("do nothing");
                Ok(())
            })
            .await;

        assert!(result.passed());
        let cases = harness.sink().finished_cases();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].outcome, TestStatus::Pass);
    }

    #[tokio::test]
    async fn test_failing_case_produces_one_failure_entry() {
        let dir = tempfile::tempdir().unwrap();
        let harness = test_harness(dir.path());

        let result = harness
            .run_case("api_bad", "fails", CaseKind::Api, |_ctx| async move {
                Err(Error::assertion("expected 200"))
            })
            .await;

        assert!(!result.passed());
        assert_eq!(result.error.as_deref(), Some("expected 200"));

        let cases = harness.sink().finished_cases();
        assert_eq!(cases[0].count(TestStatus::Fail), 1);
    }

    #[tokio::test]
    async fn test_failing_ui_case_without_session_skips_screenshot() {
        let dir = tempfile::tempdir().unwrap();
        let harness = test_harness(dir.path());

        // no session was ever created, so there is nothing to capture
        let result = harness
            .run_case("ui_bad", "fails", CaseKind::Ui, |_ctx| async move {
                Err(Error::assertion("element missing"))
            })
            .await;

        assert_eq!(result.outcome, TestStatus::Fail);
        let cases = harness.sink().finished_cases();
        assert_eq!(cases[0].attachments().count(), 0);
        assert_eq!(cases[0].count(TestStatus::Fail), 1);
        assert_eq!(harness.sessions().active_sessions(), 0);
    }

    #[tokio::test]
    async fn test_finish_flushes_report_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        let harness = test_harness(dir.path());

        harness
            .run_case("one", "", CaseKind::Api, |_| async { Ok(()) })
            .await;
        harness
            .run_case("two", "", CaseKind::Api, |_| async {
                Err(Error::assertion("nope"))
            })
            .await;

        let summary = harness.finish().await;
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 2);
        assert!(!summary.all_passed());
        assert!(summary.report_path.unwrap().exists());
    }
}
