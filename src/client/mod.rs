//! API client abstraction
//!
//! The scaffolding itself never performs I/O; thunked flows at call sites
//! talk to the backend through [`ApiClient`]. The trait is intentionally
//! small: one async call per configured endpoint plus a header setter for
//! auth tokens. The `http` feature provides a reqwest-backed implementation.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::HttpClient;

use crate::core::error::{ClientError, TrellisResult};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Client abstraction over a configured endpoint table
///
/// Implementations resolve `endpoint` against their configuration, perform
/// the call and return the response body as JSON. They never retry and never
/// interpret the payload beyond path-parameter substitution.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Call a configured endpoint by name
    async fn call(&self, endpoint: &str, payload: Value) -> Result<Value>;

    /// Set a header sent with every subsequent request
    ///
    /// Typical use is installing an auth token after login.
    fn set_header(&mut self, name: &str, value: &str);
}

/// Substitute `{param}` segments of a path template from the payload
///
/// Parameters must resolve to scalar payload values (strings or numbers).
///
/// # Examples
///
/// ```
/// use trellis::client::render_path;
/// use serde_json::json;
///
/// let path = render_path("/users/{id}/posts", &json!({"id": 7})).unwrap();
/// assert_eq!(path, "/users/7/posts");
/// ```
pub fn render_path(template: &str, payload: &Value) -> TrellisResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            return Err(ClientError::InvalidPathTemplate {
                path: template.to_string(),
            }
            .into());
        };
        let name = &after[..end];
        let rendered = match payload.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(ClientError::MissingPathParameter {
                    path: template.to_string(),
                    parameter: name.to_string(),
                }
                .into());
            }
        };
        out.push_str(&rendered);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
