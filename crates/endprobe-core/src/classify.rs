//! Result classification

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::EndpointSpec;

/// What a probe found out about one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// The route answered with something other than 404
    Present,
    /// A route without placeholders answered 404
    NotPresent,
    /// Not verified: no fixture for a GET placeholder, or the request never completed
    UnverifiedNoFixture,
    /// A parameterized route answered 404
    #[serde(rename = "unexpected_404")]
    Unexpected404,
}

impl ResultKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::NotPresent => "not_present",
            Self::UnverifiedNoFixture => "unverified_no_fixture",
            Self::Unexpected404 => "unexpected_404",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a catalog entry was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Never sent: no trustworthy fixture
    Skipped,
    /// The server answered with this status
    Status(u16),
    /// Sent, but failed below HTTP (timeout, connection, TLS)
    TransportFailed,
}

/// Classify one outcome. Only route existence is judged, never response content.
#[must_use]
pub fn classify(spec: &EndpointSpec, outcome: Outcome) -> ResultKind {
    match outcome {
        Outcome::Skipped | Outcome::TransportFailed => ResultKind::UnverifiedNoFixture,
        Outcome::Status(404) if spec.is_parameterized() => ResultKind::Unexpected404,
        Outcome::Status(404) => ResultKind::NotPresent,
        Outcome::Status(_) => ResultKind::Present,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Method;

    fn plain() -> EndpointSpec {
        EndpointSpec::new(Method::Get, "/api/widgets")
    }

    fn parameterized() -> EndpointSpec {
        EndpointSpec::new(Method::Get, "/api/widgets/{id}")
    }

    #[test]
    fn not_found_without_placeholder() {
        assert_eq!(classify(&plain(), Outcome::Status(404)), ResultKind::NotPresent);
    }

    #[test]
    fn not_found_with_placeholder() {
        assert_eq!(
            classify(&parameterized(), Outcome::Status(404)),
            ResultKind::Unexpected404
        );
    }

    #[test]
    fn not_found_with_unknown_placeholder() {
        let spec = EndpointSpec::new(Method::Get, "/api/widgets/{slug}");
        assert_eq!(classify(&spec, Outcome::Status(404)), ResultKind::Unexpected404);
    }

    #[test]
    fn skipped_is_unverified() {
        assert_eq!(
            classify(&parameterized(), Outcome::Skipped),
            ResultKind::UnverifiedNoFixture
        );
    }

    #[test]
    fn transport_failure_is_unverified() {
        assert_eq!(
            classify(&plain(), Outcome::TransportFailed),
            ResultKind::UnverifiedNoFixture
        );
    }

    #[test]
    fn everything_else_is_present() {
        for status in [200, 201, 204, 301, 302, 400, 401, 403, 405, 409, 422, 500, 502] {
            assert_eq!(classify(&plain(), Outcome::Status(status)), ResultKind::Present);
            assert_eq!(
                classify(&parameterized(), Outcome::Status(status)),
                ResultKind::Present
            );
        }
    }

    #[test]
    fn serde_names() {
        assert_eq!(
            serde_json::to_string(&ResultKind::Unexpected404).unwrap(),
            r#""unexpected_404""#
        );
        assert_eq!(
            serde_json::to_string(&ResultKind::UnverifiedNoFixture).unwrap(),
            r#""unverified_no_fixture""#
        );
        for kind in [
            ResultKind::Present,
            ResultKind::NotPresent,
            ResultKind::UnverifiedNoFixture,
            ResultKind::Unexpected404,
        ] {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }
    }
}
