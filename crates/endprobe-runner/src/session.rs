//! Authenticated HTTP session
//!
//! Cookies set by the login response are kept in the client's cookie store
//! and replayed on every later request, so discovery and probing share one
//! authenticated session.

use std::time::Duration;

use endprobe_core::Method;
use tracing::{debug, warn};

/// Per-request timeout. A stuck endpoint fails its own request instead of
/// hanging the run.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Status and raw body of an HTTP response, whatever the status class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Request seam between the probe engine and the network.
///
/// 4xx and 5xx responses are `Ok`. Only failures below HTTP (connection
/// refused, DNS, TLS, timeout) are `Err`.
pub trait ApiClient {
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] if no HTTP response was received.
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: &[(String, String)],
    ) -> Result<ApiResponse, SessionError>;
}

/// reqwest-backed [`ApiClient`] with a cookie store.
pub struct Session {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl Session {
    /// Build a session for `endpoint`.
    ///
    /// With `insecure` set and an `https://` endpoint, certificate and
    /// hostname verification are both disabled. This is an explicit, unsafe
    /// opt-in for self-signed lab deployments.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(endpoint: &str, insecure: bool) -> Result<Self, SessionError> {
        let base_url = endpoint.trim_end_matches('/').to_string();

        let mut builder = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT);

        if insecure && base_url.starts_with("https://") {
            warn!(endpoint = %base_url, "TLS certificate and hostname verification disabled");
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        let client = builder
            .build()
            .map_err(|e| SessionError::Build(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ApiClient for Session {
    fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: &[(String, String)],
    ) -> Result<ApiResponse, SessionError> {
        let url = format!("{}{path}", self.base_url);

        let mut req = self
            .client
            .request(to_reqwest(method), &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body_value) = body {
            req = req.json(body_value);
        }

        let transport = |e: reqwest::Error| SessionError::Transport {
            method,
            url: url.clone(),
            message: e.to_string(),
        };

        let resp = req.send().map_err(transport)?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(transport)?;

        debug!(%method, %url, status, bytes = text.len(), "response");
        Ok(ApiResponse { status, body: text })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("HTTP client error: {0}")]
    Build(String),
    #[error("{method} {url}: {message}")]
    Transport {
        method: Method,
        url: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_stripped() {
        let s = Session::new("http://localhost:3000/", false).unwrap();
        assert_eq!(s.base_url(), "http://localhost:3000");
    }

    #[test]
    fn insecure_ignored_for_plain_http() {
        let s = Session::new("http://localhost:3000", true).unwrap();
        assert_eq!(s.base_url(), "http://localhost:3000");
    }

    #[test]
    fn insecure_https_builds() {
        assert!(Session::new("https://dockhand.lan", true).is_ok());
    }

    #[test]
    fn method_mapping() {
        assert_eq!(to_reqwest(Method::Options), reqwest::Method::OPTIONS);
        assert_eq!(to_reqwest(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn connection_refused_is_transport_error() {
        // Port 9 (discard) on loopback is essentially never listening.
        let s = Session::new("http://127.0.0.1:9", false).unwrap();
        let err = s.request(Method::Get, "/api/users", None, &[]).unwrap_err();
        assert!(matches!(err, SessionError::Transport { method: Method::Get, .. }));
        assert!(err.to_string().starts_with("GET http://127.0.0.1:9/api/users"));
    }

    #[test]
    fn success_range() {
        assert!(ApiResponse::new(204, "").is_success());
        assert!(!ApiResponse::new(302, "").is_success());
        assert!(!ApiResponse::new(401, "nope").is_success());
    }
}
