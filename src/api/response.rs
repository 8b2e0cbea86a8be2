// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Captured API response

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::error;
use url::Url;

use crate::error::{Error, Result};

/// A fully buffered API response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Elapsed request time in milliseconds
    pub elapsed_ms: u64,
}

impl ApiResponse {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            elapsed_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if status is client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Check if status is server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(|e| Error::Other(e.to_string()))
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }

    /// Parse body as a JSON value
    pub fn json_value(&self) -> Result<serde_json::Value> {
        self.json()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Validate the status code, logging on mismatch
    pub fn validate_status(&self, expected: u16) -> bool {
        let actual = self.status_code();
        let valid = actual == expected;
        if !valid {
            error!(
                "Status code validation failed. Expected: {}, Actual: {}",
                expected, actual
            );
        }
        valid
    }

    /// Check the body contains the given text, logging on mismatch
    pub fn contains(&self, expected: &str) -> bool {
        let found = self.text_lossy().contains(expected);
        if !found {
            error!(
                "Response validation failed. Expected text '{}' not found in response",
                expected
            );
        }
        found
    }

    /// Extract a value from the JSON body by pointer path, as a string.
    ///
    /// Returns None when the body is not JSON or the path is absent.
    pub fn extract(&self, pointer: &str) -> Option<String> {
        let value: serde_json::Value = match self.json() {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to extract JSON value using path {}: {}", pointer, e);
                return None;
            }
        };
        value.pointer(pointer).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Extract and deserialize a value from the JSON body by pointer path
    pub fn extract_as<T: DeserializeOwned>(&self, pointer: &str) -> Option<T> {
        let value: serde_json::Value = self.json().ok()?;
        let node = value.pointer(pointer)?.clone();
        match serde_json::from_value(node) {
            Ok(v) => Some(v),
            Err(e) => {
                error!("Failed to extract JSON value using path {}: {}", pointer, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_body(body: &str) -> ApiResponse {
        ApiResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from(body.to_string()),
            Url::parse("https://api.example.com/users").unwrap(),
            42,
        )
    }

    #[test]
    fn test_status_validation() {
        let resp = response_with_body("{}");
        assert!(resp.validate_status(200));
        assert!(!resp.validate_status(404));
    }

    #[test]
    fn test_contains() {
        let resp = response_with_body(r#"{"name":"anna"}"#);
        assert!(resp.contains("anna"));
        assert!(!resp.contains("bertil"));
    }

    #[test]
    fn test_extract_pointer() {
        let resp = response_with_body(r#"{"user":{"id":12,"name":"anna"}}"#);
        assert_eq!(resp.extract("/user/name").as_deref(), Some("anna"));
        assert_eq!(resp.extract("/user/id").as_deref(), Some("12"));
        assert_eq!(resp.extract("/user/missing"), None);
        assert_eq!(resp.extract_as::<u64>("/user/id"), Some(12));
    }

    #[test]
    fn test_extract_on_non_json_body() {
        let resp = response_with_body("plain text");
        assert_eq!(resp.extract("/anything"), None);
    }
}
