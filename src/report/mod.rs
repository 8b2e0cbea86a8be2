// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Reporting layer
//!
//! An append-only sink of per-test entries, one active record per thread,
//! flushed once at the end of a run into a timestamped HTML artifact.

mod html;
mod sink;

pub use sink::{ReportEntry, ReportSink, TestRecord, TestStatus};
