// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! REST API testing layer
//!
//! A thin client over the HTTP transport: JSON defaults, optional bearer or
//! basic auth, request/response logging. State is per test instance; nothing
//! is shared across tests.

mod client;
mod response;

pub use client::ApiClient;
pub use response::ApiResponse;

/// User agent sent with every API request
pub const USER_AGENT: &str = concat!("rapu/", env!("CARGO_PKG_VERSION"));
