//! HTTP transport for refresh requests, backed by reqwest.
//!
//! The client sends exactly one request per call and hands back the status
//! line and raw body. It does not retry and does not interpret the status;
//! that is the refresh orchestrator's job.

use crate::config::{get_config, RefreshClientConfig};
use crate::executor::error::RefreshError;
use crate::models::{HttpMethod, RefreshRequest, RefreshResponse};
use reqwest::redirect::Policy;

/// A reusable HTTP client for refresh requests.
#[derive(Debug, Clone)]
pub struct RefreshClient {
    inner: reqwest::Client,
}

impl RefreshClient {
    /// Builds a client from an explicit configuration.
    pub fn new(config: &RefreshClientConfig) -> Result<Self, RefreshError> {
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects as usize)
        } else {
            Policy::none()
        };

        let mut builder = reqwest::Client::builder()
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .user_agent(config.user_agent.clone());

        if let Some(timeout) = config.timeout_duration() {
            builder = builder.timeout(timeout);
        }

        let inner = builder
            .build()
            .map_err(|e| RefreshError::Build(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Builds a client from the global configuration.
    pub fn from_global_config() -> Result<Self, RefreshError> {
        Self::new(&get_config())
    }

    /// Sends a request and reads the full response body.
    ///
    /// Any status code is returned as a response; only transport failures are
    /// errors here.
    pub async fn send(&self, request: &RefreshRequest) -> Result<RefreshResponse, RefreshError> {
        let method = match request.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
            HttpMethod::PUT => reqwest::Method::PUT,
            HttpMethod::PATCH => reqwest::Method::PATCH,
            HttpMethod::DELETE => reqwest::Method::DELETE,
        };

        let mut req_builder = self.inner.request(method, &request.url);

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        log::debug!("Sending refresh request: {} {}", request.method, request.url);

        let response = req_builder.send().await?;

        let status = response.status();
        let status_code = status.as_u16();
        // The transport does not expose the server's own reason phrase
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let mut refresh_response = RefreshResponse::new(status_code, status_text);
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                refresh_response.add_header(name.as_str().to_string(), value_str.to_string());
            }
        }

        let body = response.bytes().await?;
        refresh_response.set_body(body.to_vec());

        log::debug!(
            "Refresh response: {} {} ({} bytes)",
            status_code,
            refresh_response.status_text,
            refresh_response.body.len()
        );

        Ok(refresh_response)
    }
}
