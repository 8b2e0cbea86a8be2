// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser session layer
//!
//! One browser session per execution thread, created lazily on first use and
//! owned exclusively by that thread. The registry is a plain keyed map with
//! no pooling and no eviction; release quits the browser best-effort and
//! removes the entry.

mod browser;
mod manager;
mod registry;
mod session;

pub use browser::BrowserKind;
pub use manager::SessionManager;
pub use registry::SessionRegistry;
pub use session::UiSession;
