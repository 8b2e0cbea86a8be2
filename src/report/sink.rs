// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Report sink

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::ThreadId;

use chrono::{DateTime, Local};
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{info, warn};

use super::html;
use crate::error::Result;

/// Status of a report entry or a sealed test record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Pass,
    Fail,
    Skip,
    Info,
    Warning,
    Error,
}

impl TestStatus {
    /// Whether this status seals a test record
    pub fn is_outcome(&self) -> bool {
        matches!(self, TestStatus::Pass | TestStatus::Fail | TestStatus::Skip)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Skip => "SKIP",
            TestStatus::Info => "INFO",
            TestStatus::Warning => "WARNING",
            TestStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// One appended report line
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub status: TestStatus,
    pub message: String,
    pub attachment: Option<PathBuf>,
    pub timestamp: DateTime<Local>,
}

/// All entries recorded for one test case
#[derive(Debug, Clone)]
pub struct TestRecord {
    pub name: String,
    pub description: String,
    pub entries: Vec<ReportEntry>,
    pub outcome: TestStatus,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
}

impl TestRecord {
    fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            entries: Vec::new(),
            outcome: TestStatus::Skip,
            started_at: Local::now(),
            finished_at: None,
        }
    }

    /// Count of entries with the given status
    pub fn count(&self, status: TestStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Entries carrying an attachment
    pub fn attachments(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.attachment.is_some())
    }
}

struct SinkInner {
    active: DashMap<ThreadId, TestRecord>,
    finished: Mutex<Vec<TestRecord>>,
    started_at: DateTime<Local>,
}

/// Append-only report sink, cheap to clone and share
#[derive(Clone)]
pub struct ReportSink {
    inner: Arc<SinkInner>,
}

impl ReportSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SinkInner {
                active: DashMap::new(),
                finished: Mutex::new(Vec::new()),
                started_at: Local::now(),
            }),
        }
    }

    fn key() -> ThreadId {
        std::thread::current().id()
    }

    /// Begin a test record for the current thread
    pub fn start_case(&self, name: &str, description: &str) {
        self.inner
            .active
            .insert(Self::key(), TestRecord::new(name, description));
        info!("Started test in report: {}", name);
    }

    /// Append an entry to the current thread's record
    pub fn log(&self, status: TestStatus, message: impl Into<String>) {
        self.append(ReportEntry {
            status,
            message: message.into(),
            attachment: None,
            timestamp: Local::now(),
        });
    }

    fn append(&self, entry: ReportEntry) {
        if let Some(mut record) = self.inner.active.get_mut(&Self::key()) {
            record.entries.push(entry);
        } else {
            warn!("Report entry dropped; no active test record");
        }
    }

    /// Log a test step
    pub fn log_step(&self, step: &str) {
        self.log(TestStatus::Info, format!("Step: {}", step));
    }

    /// Log a test data point
    pub fn log_data(&self, key: &str, value: &str) {
        self.log(TestStatus::Info, format!("Test Data - {}: {}", key, value));
    }

    /// Attach a screenshot file to the current record
    pub fn attach_screenshot(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Screenshot file not found: {}", path.display());
            return;
        }
        self.append(ReportEntry {
            status: TestStatus::Info,
            message: format!("Screenshot: {}", path.display()),
            attachment: Some(path.to_path_buf()),
            timestamp: Local::now(),
        });
        info!("Screenshot added to report: {}", path.display());
    }

    /// Record a byte attachment (e.g. a screenshot that was never written
    /// to disk). Only the label and size are kept in the report.
    pub fn attach_bytes(&self, label: &str, bytes: &[u8]) {
        self.log(
            TestStatus::Info,
            format!("Attachment: {} ({} bytes)", label, bytes.len()),
        );
    }

    /// Seal the current thread's record with an outcome
    pub fn end_case(&self, outcome: TestStatus, detail: Option<&str>) {
        let Some((_, mut record)) = self.inner.active.remove(&Self::key()) else {
            warn!("end_case called with no active test record");
            return;
        };

        let message = match (outcome, detail) {
            (TestStatus::Pass, _) => "Test passed successfully".to_string(),
            (TestStatus::Fail, Some(d)) => format!("Test failed: {}", d),
            (TestStatus::Fail, None) => "Test failed".to_string(),
            (TestStatus::Skip, Some(d)) => format!("Test skipped: {}", d),
            (TestStatus::Skip, None) => "Test skipped".to_string(),
            (other, _) => format!("Test status: {}", other),
        };
        record.entries.push(ReportEntry {
            status: outcome,
            message,
            attachment: None,
            timestamp: Local::now(),
        });
        record.outcome = outcome;
        record.finished_at = Some(Local::now());

        info!("Ended test in report: {}", record.name);
        self.inner.finished.lock().push(record);
    }

    /// Whether the current thread has an active record
    pub fn has_active_case(&self) -> bool {
        self.inner.active.contains_key(&Self::key())
    }

    /// Snapshot of sealed records
    pub fn finished_cases(&self) -> Vec<TestRecord> {
        self.inner.finished.lock().clone()
    }

    /// (passed, failed, skipped) counts over sealed records
    pub fn counts(&self) -> (usize, usize, usize) {
        let finished = self.inner.finished.lock();
        let passed = finished.iter().filter(|r| r.outcome == TestStatus::Pass).count();
        let failed = finished.iter().filter(|r| r.outcome == TestStatus::Fail).count();
        let skipped = finished.iter().filter(|r| r.outcome == TestStatus::Skip).count();
        (passed, failed, skipped)
    }

    /// Render the run into a timestamped HTML file under `report_dir`
    pub fn flush(&self, report_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let report_dir = report_dir.as_ref();
        std::fs::create_dir_all(report_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = report_dir.join(format!("RapuReport_{}.html", timestamp));

        let cases = self.finished_cases();
        let rendered = html::render(self.inner.started_at, &cases);
        std::fs::write(&path, rendered)?;

        info!("Report flushed: {}", path.display());
        Ok(path)
    }
}

impl Default for ReportSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_order() {
        let sink = ReportSink::new();
        sink.start_case("login", "user can log in");
        sink.log_step("open login page");
        sink.log_data("user", "anna");
        sink.log(TestStatus::Warning, "slow response");
        sink.end_case(TestStatus::Pass, None);

        let cases = sink.finished_cases();
        assert_eq!(cases.len(), 1);
        let record = &cases[0];
        assert_eq!(record.outcome, TestStatus::Pass);
        assert_eq!(record.entries.len(), 4);
        assert!(record.entries[0].message.contains("open login page"));
        assert!(record.entries[1].message.contains("Test Data - user: anna"));
        assert_eq!(record.entries[3].status, TestStatus::Pass);
    }

    #[test]
    fn test_fail_outcome_carries_detail() {
        let sink = ReportSink::new();
        sink.start_case("checkout", "");
        sink.end_case(TestStatus::Fail, Some("total mismatch"));

        let cases = sink.finished_cases();
        assert_eq!(cases[0].outcome, TestStatus::Fail);
        assert!(cases[0].entries[0].message.contains("total mismatch"));
        assert_eq!(sink.counts(), (0, 1, 0));
    }

    #[test]
    fn test_log_without_active_case_is_ignored() {
        let sink = ReportSink::new();
        sink.log_step("orphan step");
        sink.end_case(TestStatus::Pass, None);
        assert!(sink.finished_cases().is_empty());
    }

    #[test]
    fn test_missing_screenshot_is_not_attached() {
        let sink = ReportSink::new();
        sink.start_case("ui", "");
        sink.attach_screenshot("/nonexistent/shot.png");
        sink.end_case(TestStatus::Fail, Some("boom"));

        let cases = sink.finished_cases();
        assert_eq!(cases[0].attachments().count(), 0);
    }

    #[test]
    fn test_flush_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let sink = ReportSink::new();
        sink.start_case("api_smoke", "GET /health returns 200");
        sink.log_step("send request");
        sink.end_case(TestStatus::Pass, None);

        let path = sink.flush(dir.path()).unwrap();
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("api_smoke"));
        assert!(content.contains("PASS"));
    }
}
