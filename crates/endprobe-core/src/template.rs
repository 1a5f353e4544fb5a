//! Route templating and the safe-mode policy
//!
//! Turns a catalog entry plus the discovered fixtures into either a concrete
//! request or a decision not to send one.

use crate::catalog::{EndpointSpec, Method};
use crate::config::ProbeSettings;
use crate::fixtures::Fixtures;

/// Substitute for `{id}` when no trustworthy fixture is available.
pub const SENTINEL_ID: &str = "_probe_id_";
/// Substitute for `{name}` when no trustworthy fixture is available.
pub const SENTINEL_NAME: &str = "_probe_name_";

pub const NOTE_NO_FIXTURE: &str = "No fixture available for path placeholder";
pub const NOTE_PLACEHOLDER_PROBE: &str = "Safe mode: placeholder probe";
pub const NOTE_OPTIONS_PROBE: &str = "Safe mode: options probe (mutation skipped)";

/// Query parameter carrying the environment id on environment-scoped routes.
pub const ENV_QUERY_PARAM: &str = "env";

/// What goes in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// `{}`
    Empty,
    /// The login body built from the run's credentials
    Credentials,
}

/// A request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRequest {
    /// Verb actually sent (may differ from the catalog's under safe mode)
    pub method: Method,
    /// Concrete, percent-encoded path
    pub path: String,
    pub query: Vec<(String, String)>,
    pub payload: Option<Payload>,
    pub note: String,
}

/// Result of materializing one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// A GET whose placeholder could not be trustworthily resolved. Never sent.
    Skip { note: String },
    Issue(PlannedRequest),
}

impl Materialized {
    #[must_use]
    pub fn note(&self) -> &str {
        match self {
            Self::Skip { note } => note,
            Self::Issue(req) => &req.note,
        }
    }
}

/// Materialize `spec` against `fixtures`.
///
/// Placeholders resolve left to right: `{name}`, then `{id}`, then `{type}`.
/// Identifying placeholders take the real fixture only for GET; every other
/// verb gets a sentinel so that route matching is exercised without touching
/// a real resource.
#[must_use]
pub fn materialize(spec: &EndpointSpec, fixtures: &Fixtures, settings: &ProbeSettings) -> Materialized {
    let is_get = spec.method == Method::Get;
    let fixture = spec.fixture.and_then(|source| fixtures.resolve(source));
    let mut path = spec.path.clone();
    let mut trustworthy = true;

    for (placeholder, sentinel) in [("{name}", SENTINEL_NAME), ("{id}", SENTINEL_ID)] {
        if !path.contains(placeholder) {
            continue;
        }
        match fixture {
            Some(value) if is_get => {
                path = path.replace(placeholder, &urlencoding::encode(value));
            }
            _ => {
                path = path.replace(placeholder, sentinel);
                if is_get {
                    trustworthy = false;
                }
            }
        }
    }

    if path.contains("{type}") {
        path = path.replace("{type}", &urlencoding::encode(fixtures.schedule_type()));
    }

    if !trustworthy {
        return Materialized::Skip {
            note: NOTE_NO_FIXTURE.to_string(),
        };
    }

    let query = if spec.with_env {
        vec![(ENV_QUERY_PARAM.to_string(), settings.default_env.clone())]
    } else {
        Vec::new()
    };

    let mut payload = if spec.is_login() {
        Some(Payload::Credentials)
    } else if spec.method.carries_payload() {
        Some(Payload::Empty)
    } else {
        None
    };

    let mut method = spec.method;
    let mut note = String::new();

    if !settings.allow_mutation && spec.method.is_mutating() && !spec.is_login() {
        if spec.has_placeholder() {
            note = NOTE_PLACEHOLDER_PROBE.to_string();
        } else {
            method = Method::Options;
            payload = None;
            note = NOTE_OPTIONS_PROBE.to_string();
        }
    }

    Materialized::Issue(PlannedRequest {
        method,
        path,
        query,
        payload,
        note,
    })
}
