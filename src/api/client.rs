// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! REST API client

use std::collections::HashMap;
use std::time::Instant;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use tracing::{debug, info};

use super::response::ApiResponse;
use super::USER_AGENT;
use crate::config::ConfigHandle;
use crate::error::Result;

/// Per-test REST client with JSON defaults and optional auth
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    default_headers: HeaderMap,
    bearer_token: Option<String>,
    basic_auth: Option<(String, String)>,
    enable_logging: bool,
}

impl ApiClient {
    /// Create a client against the configured API base URL
    pub fn new(config: &ConfigHandle) -> Result<Self> {
        let base_url = config.settings().api_base_url.clone();
        Self::with_base_url(config, base_url)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(config: &ConfigHandle, base_url: impl Into<String>) -> Result<Self> {
        let api = &config.framework().api;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(api.connection_timeout())
            .timeout(api.read_timeout())
            .build()?;

        let mut default_headers = default_header_map(&api.default_content_type);
        for (name, value) in &api.default_headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                default_headers.insert(name, value);
            }
        }

        Ok(Self {
            client,
            base_url: base_url.into(),
            default_headers,
            bearer_token: None,
            basic_auth: None,
            enable_logging: api.enable_logging,
        })
    }

    /// Change the base URL
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Current base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set a bearer token sent on every request
    pub fn set_bearer_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set basic auth credentials
    pub fn set_basic_auth(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> &mut Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Clear all auth state
    pub fn clear_auth(&mut self) -> &mut Self {
        self.bearer_token = None;
        self.basic_auth = None;
        self
    }

    /// Add a default header
    pub fn add_default_header(
        &mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> &mut Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            self.default_headers.insert(name, value);
        }
        self
    }

    /// Remove a default header
    pub fn remove_default_header(&mut self, name: impl AsRef<str>) -> &mut Self {
        if let Ok(name) = HeaderName::try_from(name.as_ref()) {
            self.default_headers.remove(name);
        }
        self
    }

    /// Restore default headers and drop auth state
    pub fn reset(&mut self) -> &mut Self {
        self.default_headers = default_header_map("application/json");
        self.clear_auth()
    }

    /// GET request
    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse> {
        self.execute(Method::GET, endpoint, &[], None, None).await
    }

    /// GET request with query parameters and extra headers
    pub async fn get_with(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse> {
        self.execute(Method::GET, endpoint, query, None, headers)
            .await
    }

    /// POST request with a JSON body
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<ApiResponse> {
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.execute(Method::POST, endpoint, &[], Some(body), None)
            .await
    }

    /// POST request with a raw body
    pub async fn post_raw(&self, endpoint: &str, body: impl Into<Bytes>) -> Result<ApiResponse> {
        self.execute(Method::POST, endpoint, &[], Some(body.into()), None)
            .await
    }

    /// PUT request with a JSON body
    pub async fn put<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<ApiResponse> {
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.execute(Method::PUT, endpoint, &[], Some(body), None)
            .await
    }

    /// PATCH request with a JSON body
    pub async fn patch<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<ApiResponse> {
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.execute(Method::PATCH, endpoint, &[], Some(body), None)
            .await
    }

    /// DELETE request
    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
        self.execute(Method::DELETE, endpoint, &[], None, None).await
    }

    /// Execute a request.
    ///
    /// The endpoint is appended to the base URL verbatim; method, endpoint
    /// and body reach the transport unchanged.
    pub async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<Bytes>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        let start = Instant::now();

        let mut builder = self.client.request(method.clone(), &url);

        for (name, value) in self.default_headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(extra) = headers {
            for (name, value) in extra {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }

        if let Some(ref token) = self.bearer_token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        } else if let Some((ref user, ref pass)) = self.basic_auth {
            let encoded = base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                format!("{}:{}", user, pass),
            );
            builder = builder.header("authorization", format!("Basic {}", encoded));
        }

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        if self.enable_logging {
            info!("Sending {} request to: {}", method, url);
        }

        let response = builder.send().await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let status = response.status();
        let final_url = response.url().clone();
        let response_headers = response.headers().clone();
        let response_body = response.bytes().await?;

        let api_response = ApiResponse::new(
            status,
            response_headers,
            response_body,
            final_url,
            elapsed_ms,
        );

        if self.enable_logging {
            info!("Response Status: {}", api_response.status_code());
            info!("Response Time: {} ms", api_response.elapsed_ms);
            debug!("Response Headers: {:?}", api_response.headers);
            debug!("Response Body: {}", api_response.text_lossy());
        }

        Ok(api_response)
    }

    /// Execute multiple prepared requests concurrently
    pub async fn get_all(&self, endpoints: &[&str]) -> Vec<Result<ApiResponse>> {
        let futures: Vec<_> = endpoints.iter().map(|e| self.get(e)).collect();
        futures::future::join_all(futures).await
    }
}

fn default_header_map(content_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::try_from(content_type) {
        headers.insert("content-type", value.clone());
        headers.insert("accept", value);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigHandle, FrameworkConfig, Settings};
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> ConfigHandle {
        ConfigHandle::from_parts(Settings::default(), FrameworkConfig::default())
    }

    #[tokio::test]
    async fn test_forwards_method_endpoint_and_body_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/users"))
            .and(body_string(r#"{"name":"anna"}"#))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&test_config(), server.uri()).unwrap();
        let response = client
            .post_raw("/api/users", r#"{"name":"anna"}"#)
            .await
            .unwrap();

        assert_eq!(response.status_code(), 201);
    }

    #[tokio::test]
    async fn test_json_defaults_and_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("content-type", "application/json"))
            .and(header("authorization", "Bearer t-123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":7}"#))
            .expect(1)
            .mount(&server)
            .await;

        let mut client = ApiClient::with_base_url(&test_config(), server.uri()).unwrap();
        client.set_bearer_token("t-123");

        let response = client.get("/me").await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.extract("/id").as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_query_params_and_extra_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust"))
            .and(header("x-trace", "abc"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(&test_config(), server.uri()).unwrap();
        let mut extra = HashMap::new();
        extra.insert("x-trace".to_string(), "abc".to_string());

        let response = client
            .get_with("/search", &[("q", "rust")], Some(&extra))
            .await
            .unwrap();
        assert_eq!(response.status_code(), 200);
    }

    #[tokio::test]
    async fn test_put_patch_delete_methods() {
        let server = MockServer::start().await;
        for m in ["PUT", "PATCH", "DELETE"] {
            Mock::given(method(m))
                .and(path("/item/1"))
                .respond_with(ResponseTemplate::new(204))
                .mount(&server)
                .await;
        }

        let client = ApiClient::with_base_url(&test_config(), server.uri()).unwrap();
        let body = serde_json::json!({"v": 1});
        assert_eq!(client.put("/item/1", &body).await.unwrap().status_code(), 204);
        assert_eq!(
            client.patch("/item/1", &body).await.unwrap().status_code(),
            204
        );
        assert_eq!(client.delete("/item/1").await.unwrap().status_code(), 204);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut client = ApiClient::with_base_url(&test_config(), "http://localhost").unwrap();
        client
            .set_bearer_token("x")
            .add_default_header("x-extra", "1")
            .remove_default_header("accept");
        client.reset();

        assert!(client.bearer_token.is_none());
        assert!(client.default_headers.get("x-extra").is_none());
        assert!(client.default_headers.get("accept").is_some());
    }
}
