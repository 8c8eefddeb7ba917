//! Reqwest-backed API client

use super::{ApiClient, render_path};
use crate::config::{ClientConfig, HttpMethod};
use crate::core::error::ClientError;
use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

/// HTTP implementation of [`ApiClient`]
///
/// Resolves endpoints against a [`ClientConfig`], applies configured headers
/// plus any set at runtime, and returns response bodies as JSON. Error
/// statuses surface as [`ClientError::RequestFailed`]; no retries, no custom
/// timeouts.
pub struct HttpClient {
    config: ClientConfig,
    headers: IndexMap<String, String>,
    inner: reqwest::Client,
}

impl HttpClient {
    /// Create a client from a configuration
    pub fn new(config: ClientConfig) -> Self {
        let headers = config.headers.clone();
        Self {
            config,
            headers,
            inner: reqwest::Client::new(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl ApiClient for HttpClient {
    async fn call(&self, endpoint: &str, payload: Value) -> Result<Value> {
        let config = self
            .config
            .endpoint(endpoint)
            .ok_or_else(|| ClientError::UnknownEndpoint {
                endpoint: endpoint.to_string(),
            })?;

        let path = render_path(&config.path, &payload)?;
        let url = self.url_for(&path);

        let mut request = match config.method {
            HttpMethod::Get => self.inner.get(&url),
            HttpMethod::Post => self.inner.post(&url),
            HttpMethod::Put => self.inner.put(&url),
            HttpMethod::Patch => self.inner.patch(&url),
            HttpMethod::Delete => self.inner.delete(&url),
        };
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if config.method.has_body() {
            request = request.json(&payload);
        }

        tracing::debug!(endpoint = %endpoint, method = %config.method, url = %url, "calling endpoint");

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if !status.is_success() {
            return Err(ClientError::RequestFailed {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: body.to_string(),
            }
            .into());
        }

        Ok(body)
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }
}
