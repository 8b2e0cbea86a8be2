// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the Rapu harness
//!
//! Provides detailed error context for debugging test runs.
//! Each error type includes relevant context (URL, status, operation).

use std::fmt;

use thiserror::Error;

/// Result type alias for Rapu operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Rapu harness
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// WebDriver command failed
    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Browser session error
    #[error("Session error: {0}")]
    Session(String),

    /// Assertion failure raised by a test body
    #[error("Assertion failed: {message}")]
    Assertion {
        message: String,
        expected: Option<String>,
        actual: Option<String>,
    },

    /// Timeout error
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        url: Option<String>,
    },

    /// Screenshot capture error
    #[error("Screenshot error: {0}")]
    Screenshot(String),

    /// Report sink error
    #[error("Report error: {0}")]
    Report(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML settings parse error
    #[error("Settings parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML framework config parse error
    #[error("Framework config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a session error
    pub fn session<S: Into<String>>(msg: S) -> Self {
        Error::Session(msg.into())
    }

    /// Create a simple assertion error
    pub fn assertion<S: Into<String>>(msg: S) -> Self {
        Error::Assertion {
            message: msg.into(),
            expected: None,
            actual: None,
        }
    }

    /// Create an assertion error with expected/actual values
    pub fn assertion_mismatch(
        msg: impl Into<String>,
        expected: impl fmt::Debug,
        actual: impl fmt::Debug,
    ) -> Self {
        Error::Assertion {
            message: msg.into(),
            expected: Some(format!("{:?}", expected)),
            actual: Some(format!("{:?}", actual)),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: None,
        }
    }

    /// Create a timeout error with URL
    pub fn timeout_with_url(
        operation: impl Into<String>,
        duration_ms: u64,
        url: impl Into<String>,
    ) -> Self {
        Error::Timeout {
            operation: operation.into(),
            duration_ms,
            url: Some(url.into()),
        }
    }

    /// Create a screenshot error
    pub fn screenshot<S: Into<String>>(msg: S) -> Self {
        Error::Screenshot(msg.into())
    }

    /// Create a report error
    pub fn report<S: Into<String>>(msg: S) -> Self {
        Error::Report(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an assertion failure
    pub fn is_assertion(&self) -> bool {
        matches!(self, Error::Assertion { .. })
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Check if this is a transport-level error
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::WebDriver(_))
    }

    /// Format assertion details for report entries
    pub fn assertion_detail(&self) -> Option<String> {
        match self {
            Error::Assertion {
                message,
                expected: Some(e),
                actual: Some(a),
            } => Some(format!("{} - Expected: {}, Actual: {}", message, e, a)),
            Error::Assertion { message, .. } => Some(message.clone()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_error() {
        let err = Error::assertion_mismatch("status code", 200, 404);

        assert!(err.is_assertion());
        let detail = err.assertion_detail().unwrap();
        assert!(detail.contains("200"));
        assert!(detail.contains("404"));
    }

    #[test]
    fn test_timeout_error() {
        let err = Error::timeout_with_url("page load", 20000, "https://example.com");

        assert!(err.is_timeout());
        assert!(!err.is_assertion());
    }

    #[test]
    fn test_simple_assertion_detail() {
        let err = Error::assertion("title should not be empty");
        assert_eq!(
            err.assertion_detail().as_deref(),
            Some("title should not be empty")
        );
    }
}
