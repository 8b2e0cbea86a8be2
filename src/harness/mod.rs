// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Test lifecycle
//!
//! The harness drives each test case through the same sequence the
//! suite-level hooks of a conventional runner would: start logging and the
//! report record, hand the body a context, capture a screenshot on UI
//! failure, release the thread's browser session, seal the record.

mod context;
mod runner;

pub use context::TestContext;
pub use runner::{CaseKind, CaseResult, Harness, RunSummary};
