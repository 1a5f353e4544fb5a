//! Probe execution: login, discovery, then one request per catalog entry

use endprobe_core::template::PlannedRequest;
use endprobe_core::{
    Catalog, Credentials, EndpointSpec, Fixtures, LOGIN_PATH, Materialized, Method, Outcome,
    Payload, ProbeConfig, ProbeResult, ProbeSettings, classify, materialize,
};
use tracing::{debug, info, warn};

use crate::discovery::discover;
use crate::session::{ApiClient, SessionError};

const TRANSPORT_NOTE: &str = "Transport error";

/// Log in with `credentials`. The session keeps whatever cookie the service sets.
///
/// # Errors
///
/// Returns [`ProbeError::LoginFailed`] on any non-2xx answer and
/// [`ProbeError::Session`] if the login request never completed.
pub fn authenticate(client: &dyn ApiClient, credentials: &Credentials) -> Result<(), ProbeError> {
    let body = credentials.login_body();
    let resp = client.request(Method::Post, LOGIN_PATH, Some(&body), &[])?;
    if !resp.is_success() {
        return Err(ProbeError::LoginFailed {
            status: resp.status,
            body: resp.body,
        });
    }
    info!(user = %credentials.username, provider = %credentials.auth_provider, "logged in");
    Ok(())
}

/// Fixtures and per-entry results of one pass.
#[derive(Debug, Clone)]
pub struct ProbeRun {
    pub fixtures: Fixtures,
    /// In catalog order, one per entry
    pub results: Vec<ProbeResult>,
}

/// Sequential probe pass over a catalog.
pub struct ProbeRunner {
    credentials: Credentials,
    settings: ProbeSettings,
}

impl ProbeRunner {
    #[must_use]
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            credentials: config.credentials.clone(),
            settings: config.settings.clone(),
        }
    }

    #[must_use]
    pub fn with_allow_mutation(mut self, allow: bool) -> Self {
        self.settings.allow_mutation = allow;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Authenticate, discover fixtures, then probe every catalog entry.
    ///
    /// # Errors
    ///
    /// Only a failed login aborts the pass. Transport failures on individual
    /// entries are recorded on their results.
    pub fn run(&self, client: &dyn ApiClient, catalog: &Catalog) -> Result<ProbeRun, ProbeError> {
        authenticate(client, &self.credentials)?;

        let fixtures = discover(client, &self.settings.default_env);
        info!(discovered = fixtures.discovered(), "fixtures ready");

        let results: Vec<ProbeResult> = catalog
            .iter()
            .map(|spec| self.probe(client, spec, &fixtures))
            .collect();

        Ok(ProbeRun { fixtures, results })
    }

    /// Probe a single entry. Never fails: every entry yields one result.
    #[must_use]
    pub fn probe(&self, client: &dyn ApiClient, spec: &EndpointSpec, fixtures: &Fixtures) -> ProbeResult {
        let req = match materialize(spec, fixtures, &self.settings) {
            Materialized::Skip { note } => {
                debug!(endpoint = %spec.label(), "skipped: no fixture");
                return ProbeResult {
                    method: spec.method,
                    path: spec.path.clone(),
                    http_code: None,
                    result: classify(spec, Outcome::Skipped),
                    note,
                    issued_method: None,
                    transport_error: None,
                };
            }
            Materialized::Issue(req) => req,
        };

        match self.send(client, &req) {
            Ok(status) => {
                let result = classify(spec, Outcome::Status(status));
                debug!(endpoint = %spec.label(), sent = %req.method, path = %req.path, status, %result, "probed");
                ProbeResult {
                    method: spec.method,
                    path: spec.path.clone(),
                    http_code: Some(status),
                    result,
                    note: req.note,
                    issued_method: Some(req.method),
                    transport_error: None,
                }
            }
            Err(e) => {
                warn!(endpoint = %spec.label(), error = %e, "request failed");
                let note = if req.note.is_empty() {
                    TRANSPORT_NOTE.to_string()
                } else {
                    format!("{}; {TRANSPORT_NOTE}", req.note)
                };
                ProbeResult {
                    method: spec.method,
                    path: spec.path.clone(),
                    http_code: None,
                    result: classify(spec, Outcome::TransportFailed),
                    note,
                    issued_method: Some(req.method),
                    transport_error: Some(e.to_string()),
                }
            }
        }
    }

    fn send(&self, client: &dyn ApiClient, req: &PlannedRequest) -> Result<u16, SessionError> {
        let body = req.payload.map(|p| match p {
            Payload::Credentials => self.credentials.login_body(),
            Payload::Empty => serde_json::json!({}),
        });
        client
            .request(req.method, &req.path, body.as_ref(), &req.query)
            .map(|resp| resp.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("login failed with status {status}: {body}")]
    LoginFailed { status: u16, body: String },
    #[error(transparent)]
    Session(#[from] SessionError),
}
