// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Rapu - Hybrid UI + REST API Test Automation Harness
//!
//! A pure Rust harness combining browser automation (W3C WebDriver) with
//! REST API testing, unified HTML reporting, and screenshot capture on
//! failure. No JVM, no Selenium server-side libraries.
//!
//! ## Features
//!
//! - Browser dispatch: chrome/firefox/edge/safari from configuration,
//!   with a fixed chrome fallback
//! - Per-thread sessions: one browser per test thread, lazily created,
//!   explicitly released
//! - REST client: JSON defaults, bearer/basic auth, request logging
//! - Lifecycle runner: start/report/screenshot-on-failure/release
//! - HTML reports: one timestamped artifact per run
//! - Config: environment TOML settings + structured YAML framework document
//!
//! ## Example
//!
//! ```rust,no_run
//! use rapu::{CaseKind, ConfigHandle, Harness};
//!
//! #[tokio::main]
//! async fn main() {
//!     let harness = Harness::new(ConfigHandle::load("config"));
//!
//!     harness
//!         .run_case("health", "GET /health returns 200", CaseKind::Api, |ctx| async move {
//!             let response = ctx.api().get("/health").await?;
//!             ctx.ensure_eq(response.status_code(), 200, "status code")
//!         })
//!         .await;
//!
//!     let summary = harness.finish().await;
//!     println!("{}", summary);
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod harness;
pub mod report;
pub mod screenshot;
pub mod session;

// Re-exports for convenience

// Configuration
pub use config::{ConfigHandle, FrameworkConfig, Settings};

// Sessions
pub use session::{BrowserKind, SessionManager, SessionRegistry, UiSession};

// API testing
pub use api::{ApiClient, ApiResponse};

// Reporting
pub use report::{ReportEntry, ReportSink, TestRecord, TestStatus};

// Lifecycle
pub use harness::{CaseKind, CaseResult, Harness, RunSummary, TestContext};

// Errors
pub use error::{Error, Result};

/// Rapu version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
