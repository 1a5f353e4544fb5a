//! Endpoint catalog: the ordered list of routes a probe pass verifies
//!
//! Each parameterized entry names the fixture that materializes its
//! identifying placeholder, so route → fixture resolution never depends on
//! matching path prefixes at request time.

use std::collections::HashSet;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::fixtures::FixtureSource;

/// Route used to authenticate. Always issued as specified, with real credentials.
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Placeholders understood by the route templater.
pub const KNOWN_PLACEHOLDERS: &[&str] = &["{name}", "{id}", "{type}"];

/// HTTP verb of a catalog entry or of an issued request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    /// Inspection-only verb used when safe mode downgrades a singleton mutation.
    Options,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }

    /// POST, PUT and DELETE change server state; GET and OPTIONS do not.
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Delete)
    }

    /// Whether requests with this verb carry a JSON payload.
    #[must_use]
    pub const fn carries_payload(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EndpointSpec {
    /// HTTP method as declared by the API
    pub method: Method,
    /// Path template, e.g. "/api/users/{id}"
    pub path: String,
    /// Whether the `env` query parameter must accompany the call
    #[serde(default)]
    pub with_env: bool,
    /// Fixture that materializes the `{id}` or `{name}` placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<FixtureSource>,
}

impl EndpointSpec {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            with_env: false,
            fixture: None,
        }
    }

    #[must_use]
    pub fn with_env(mut self) -> Self {
        self.with_env = true;
        self
    }

    #[must_use]
    pub fn with_fixture(mut self, source: FixtureSource) -> Self {
        self.fixture = Some(source);
        self
    }

    /// True if the template contains any of `{id}`, `{name}`, `{type}`.
    #[must_use]
    pub fn has_placeholder(&self) -> bool {
        KNOWN_PLACEHOLDERS.iter().any(|p| self.path.contains(p))
    }

    /// True if the template has any `{...}` segment, known or not. A 404 on
    /// such a route is unexpected rather than a missing route.
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        self.path.contains('{')
    }

    /// True for the authentication route.
    #[must_use]
    pub fn is_login(&self) -> bool {
        self.path == LOGIN_PATH
    }

    /// Operation label, e.g. "GET /api/users/{id}"
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Every `{...}` segment in the template, in order of appearance.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            found.push(&rest[start..=start + len]);
            rest = &rest[start + len + 1..];
        }
        found
    }
}

/// A check result produced while validating a catalog or a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Validation {
    pub check: String,
    pub status: ValidationStatus,
    pub message: String,
}

/// Status of a validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Ok,
    Warning,
    Error,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Ordered, immutable list of endpoints.
///
/// Declaration order is significant: results and reports follow it so that
/// two runs can be diffed line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    pub endpoints: Vec<EndpointSpec>,
}

impl Catalog {
    #[must_use]
    pub fn new(endpoints: Vec<EndpointSpec>) -> Self {
        Self { endpoints }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointSpec> {
        self.endpoints.iter()
    }

    /// Load a catalog file.
    ///
    /// Format is chosen by extension (`.toml`, `.yaml`/`.yml`, `.json`), falling
    /// back to content sniffing: a leading `{` means JSON, a leading `[[` or
    /// `endpoints =` means TOML, anything else is tried as YAML.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "toml" => parse_toml(content),
            "yaml" | "yml" => parse_yaml(content),
            "json" => parse_json(content),
            _ => {
                let trimmed = content.trim_start();
                if trimmed.starts_with('{') {
                    parse_json(content)
                } else if trimmed.starts_with("[[") || is_toml_assignment(trimmed) {
                    parse_toml(content)
                } else {
                    parse_yaml(content)
                }
            }
        }
    }

    /// Structural checks: unknown placeholders, missing fixture sources,
    /// duplicates, and whether the login route is present.
    #[must_use]
    pub fn validate(&self) -> Vec<Validation> {
        let mut out = Vec::new();

        if self.endpoints.is_empty() {
            out.push(Validation {
                check: "catalog_size".into(),
                status: ValidationStatus::Error,
                message: "catalog has no endpoints".into(),
            });
            return out;
        }

        out.push(Validation {
            check: "catalog_size".into(),
            status: ValidationStatus::Ok,
            message: format!("{} endpoints", self.endpoints.len()),
        });

        let mut seen = HashSet::new();
        for spec in &self.endpoints {
            if !seen.insert((spec.method, spec.path.as_str())) {
                out.push(Validation {
                    check: "duplicate".into(),
                    status: ValidationStatus::Warning,
                    message: format!("{} is declared more than once", spec.label()),
                });
            }

            let placeholders = spec.placeholders();
            for p in &placeholders {
                if !KNOWN_PLACEHOLDERS.contains(p) {
                    out.push(Validation {
                        check: "unknown_placeholder".into(),
                        status: ValidationStatus::Warning,
                        message: format!(
                            "{}: placeholder {p} is never substituted",
                            spec.label()
                        ),
                    });
                }
            }

            let needs_fixture = placeholders.iter().any(|p| *p == "{id}" || *p == "{name}");
            match (needs_fixture, spec.fixture) {
                (true, None) => out.push(Validation {
                    check: "fixture_source".into(),
                    status: ValidationStatus::Warning,
                    message: format!(
                        "{}: no fixture source; sentinel ids will always be used",
                        spec.label()
                    ),
                }),
                (false, Some(source)) => out.push(Validation {
                    check: "fixture_source".into(),
                    status: ValidationStatus::Warning,
                    message: format!(
                        "{}: fixture {source} declared but path has no {{id}} or {{name}}",
                        spec.label()
                    ),
                }),
                _ => {}
            }
        }

        if !self.endpoints.iter().any(EndpointSpec::is_login) {
            out.push(Validation {
                check: "login_route".into(),
                status: ValidationStatus::Warning,
                message: format!("{LOGIN_PATH} is not in the catalog; it will not be reported"),
            });
        }

        out
    }

    /// The built-in Dockhand route table.
    #[must_use]
    pub fn builtin() -> Self {
        use FixtureSource as F;
        use Method::{Delete, Get, Post, Put};

        let e = EndpointSpec::new;
        let endpoints = vec![
            e(Post, LOGIN_PATH),
            e(Get, "/api/auth/session"),
            e(Get, "/api/settings/general"),
            e(Post, "/api/settings/general"),
            e(Get, "/api/auth/settings"),
            e(Put, "/api/auth/settings"),
            e(Get, "/api/auth/providers"),
            e(Get, "/api/license"),
            e(Post, "/api/license"),
            e(Delete, "/api/license"),
            e(Get, "/api/activity"),
            e(Get, "/api/hawser/connect"),
            // Schedules
            e(Get, "/api/schedules"),
            e(Get, "/api/schedules/executions"),
            e(Post, "/api/schedules/system/{id}/toggle").with_fixture(F::SystemScheduleId),
            e(Post, "/api/schedules/{type}/{id}/toggle").with_fixture(F::Schedule),
            e(Post, "/api/schedules/{type}/{id}/run").with_fixture(F::Schedule),
            // Users
            e(Get, "/api/users"),
            e(Post, "/api/users"),
            e(Get, "/api/users/{id}").with_fixture(F::UserId),
            e(Put, "/api/users/{id}").with_fixture(F::UserId),
            e(Delete, "/api/users/{id}").with_fixture(F::UserId),
            // Environments
            e(Get, "/api/environments"),
            e(Post, "/api/environments"),
            e(Get, "/api/environments/{id}").with_fixture(F::EnvironmentId),
            e(Put, "/api/environments/{id}").with_fixture(F::EnvironmentId),
            e(Delete, "/api/environments/{id}").with_fixture(F::EnvironmentId),
            // Registries
            e(Get, "/api/registries"),
            e(Post, "/api/registries"),
            e(Get, "/api/registries/{id}").with_fixture(F::RegistryId),
            e(Put, "/api/registries/{id}").with_fixture(F::RegistryId),
            e(Delete, "/api/registries/{id}").with_fixture(F::RegistryId),
            // Git credentials
            e(Get, "/api/git/credentials"),
            e(Post, "/api/git/credentials"),
            e(Get, "/api/git/credentials/{id}").with_fixture(F::GitCredentialId),
            e(Put, "/api/git/credentials/{id}").with_fixture(F::GitCredentialId),
            e(Delete, "/api/git/credentials/{id}").with_fixture(F::GitCredentialId),
            // Git repositories
            e(Get, "/api/git/repositories"),
            e(Post, "/api/git/repositories"),
            e(Get, "/api/git/repositories/{id}").with_fixture(F::GitRepositoryId),
            e(Put, "/api/git/repositories/{id}").with_fixture(F::GitRepositoryId),
            e(Delete, "/api/git/repositories/{id}").with_fixture(F::GitRepositoryId),
            // Config sets
            e(Get, "/api/config-sets"),
            e(Post, "/api/config-sets"),
            e(Get, "/api/config-sets/{id}").with_fixture(F::ConfigSetId),
            e(Put, "/api/config-sets/{id}").with_fixture(F::ConfigSetId),
            e(Delete, "/api/config-sets/{id}").with_fixture(F::ConfigSetId),
            // Notifications
            e(Get, "/api/notifications"),
            e(Post, "/api/notifications"),
            e(Get, "/api/notifications/{id}").with_fixture(F::NotificationId),
            e(Put, "/api/notifications/{id}").with_fixture(F::NotificationId),
            e(Delete, "/api/notifications/{id}").with_fixture(F::NotificationId),
            // Stacks
            e(Get, "/api/stacks").with_env(),
            e(Post, "/api/stacks").with_env(),
            e(Post, "/api/stacks/{name}/start").with_env().with_fixture(F::StackName),
            e(Post, "/api/stacks/{name}/stop").with_env().with_fixture(F::StackName),
            e(Post, "/api/stacks/{name}/restart").with_env().with_fixture(F::StackName),
            e(Post, "/api/stacks/{name}/down").with_env().with_fixture(F::StackName),
            e(Delete, "/api/stacks/{name}").with_env().with_fixture(F::StackName),
            e(Get, "/api/stacks/{name}/env").with_env().with_fixture(F::StackName),
            e(Put, "/api/stacks/{name}/env").with_env().with_fixture(F::StackName),
            e(Get, "/api/stacks/{name}/env/raw").with_env().with_fixture(F::StackName),
            e(Put, "/api/stacks/{name}/env/raw").with_env().with_fixture(F::StackName),
            e(Post, "/api/stacks/scan"),
            e(Post, "/api/stacks/adopt"),
            e(Get, "/api/stacks/sources"),
            // Git stacks
            e(Post, "/api/git/stacks/{id}/webhook").with_fixture(F::GitStackId),
            e(Post, "/api/git/stacks/{id}/deploy-stream").with_fixture(F::GitStackId),
            e(Get, "/api/git/stacks/{id}/env-files").with_fixture(F::GitStackId),
            e(Post, "/api/git/stacks/{id}/env-files").with_fixture(F::GitStackId),
            e(Get, "/api/dashboard/stats").with_env(),
            // Networks
            e(Get, "/api/networks").with_env(),
            e(Post, "/api/networks").with_env(),
            e(Get, "/api/networks/{id}/inspect").with_env().with_fixture(F::NetworkId),
            e(Delete, "/api/networks/{id}").with_env().with_fixture(F::NetworkId),
            e(Post, "/api/networks/{id}/connect").with_env().with_fixture(F::NetworkId),
            e(Post, "/api/networks/{id}/disconnect").with_env().with_fixture(F::NetworkId),
            // Volumes
            e(Get, "/api/volumes").with_env(),
            e(Post, "/api/volumes").with_env(),
            e(Get, "/api/volumes/{name}/inspect").with_env().with_fixture(F::VolumeName),
            e(Delete, "/api/volumes/{name}").with_env().with_fixture(F::VolumeName),
            e(Post, "/api/volumes/{name}/clone").with_env().with_fixture(F::VolumeName),
            // Images
            e(Get, "/api/images").with_env(),
            e(Post, "/api/images/pull").with_env(),
            e(Delete, "/api/images/{id}").with_env().with_fixture(F::ImageId),
            e(Post, "/api/images/push").with_env(),
            e(Post, "/api/images/scan").with_env(),
            // Containers
            e(Get, "/api/containers").with_env(),
            e(Post, "/api/containers").with_env(),
            e(Get, "/api/containers/{id}").with_env().with_fixture(F::ContainerId),
            e(Delete, "/api/containers/{id}").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/start").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/stop").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/restart").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/pause").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/unpause").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/rename").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/update").with_env().with_fixture(F::ContainerId),
            e(Get, "/api/containers/{id}/logs").with_env().with_fixture(F::ContainerId),
            e(Get, "/api/containers/{id}/top").with_env().with_fixture(F::ContainerId),
            e(Get, "/api/containers/{id}/shells").with_env().with_fixture(F::ContainerId),
            e(Post, "/api/containers/{id}/files/create").with_env().with_fixture(F::ContainerId),
            e(Get, "/api/containers/{id}/files/content").with_env().with_fixture(F::ContainerId),
            e(Put, "/api/containers/{id}/files/content").with_env().with_fixture(F::ContainerId),
            e(Delete, "/api/containers/{id}/files/delete").with_env().with_fixture(F::ContainerId),
            e(Get, "/api/containers/stats").with_env(),
            e(Post, "/api/containers/check-updates").with_env(),
            e(Get, "/api/containers/pending-updates").with_env(),
            // Misc
            e(Get, "/api/configs"),
            e(Get, "/api/backups"),
        ];

        Self { endpoints }
    }

    /// Example catalog file written by `endprobe catalog --example`.
    #[must_use]
    pub fn example() -> &'static str {
        r#"# endprobe catalog
#
# Entries are probed in declaration order. `fixture` names the discovered
# resource that fills the {id} or {name} placeholder. Valid sources:
#   user_id, environment_id, registry_id, git_credential_id, git_repository_id,
#   config_set_id, notification_id, stack_name, git_stack_id, network_id,
#   volume_name, image_id, container_id, system_schedule_id, schedule

[[endpoints]]
method = "POST"
path = "/api/auth/login"

[[endpoints]]
method = "GET"
path = "/api/users"

[[endpoints]]
method = "GET"
path = "/api/users/{id}"
fixture = "user_id"

[[endpoints]]
method = "GET"
path = "/api/containers/{id}/logs"
fixture = "container_id"
with_env = true
"#
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a EndpointSpec;
    type IntoIter = std::slice::Iter<'a, EndpointSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}

/// `endpoints = [...]`, as opposed to YAML's `endpoints:`.
fn is_toml_assignment(content: &str) -> bool {
    content
        .strip_prefix("endpoints")
        .map(str::trim_start)
        .is_some_and(|rest| rest.starts_with('='))
}

fn parse_toml(content: &str) -> Result<Catalog, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(format!("Invalid TOML: {e}")))
}

fn parse_yaml(content: &str) -> Result<Catalog, ConfigError> {
    serde_yml::from_str(content).map_err(|e| ConfigError::Parse(format!("Invalid YAML: {e}")))
}

fn parse_json(content: &str) -> Result<Catalog, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::Parse(format!("Invalid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 110);
        assert_eq!(catalog.endpoints[0].path, LOGIN_PATH);
        assert_eq!(catalog.endpoints[0].method, Method::Post);
        assert_eq!(catalog.endpoints.last().unwrap().path, "/api/backups");
    }

    #[test]
    fn builtin_catalog_validates_cleanly() {
        let issues: Vec<_> = Catalog::builtin()
            .validate()
            .into_iter()
            .filter(|v| v.status != ValidationStatus::Ok)
            .collect();
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn every_identifying_placeholder_has_a_source() {
        for spec in Catalog::builtin().iter() {
            let needs = spec.path.contains("{id}") || spec.path.contains("{name}");
            assert_eq!(needs, spec.fixture.is_some(), "{}", spec.label());
        }
    }

    #[test]
    fn volume_routes_bind_volume_name() {
        let catalog = Catalog::builtin();
        let inspect = catalog
            .iter()
            .find(|s| s.path == "/api/volumes/{name}/inspect")
            .unwrap();
        assert_eq!(inspect.fixture, Some(FixtureSource::VolumeName));
        assert!(inspect.with_env);
    }

    #[test]
    fn placeholder_detection() {
        assert!(EndpointSpec::new(Method::Get, "/api/users/{id}").has_placeholder());
        assert!(EndpointSpec::new(Method::Post, "/api/schedules/{type}/x").has_placeholder());
        assert!(!EndpointSpec::new(Method::Get, "/api/users").has_placeholder());

        let custom = EndpointSpec::new(Method::Get, "/api/widgets/{slug}");
        assert!(!custom.has_placeholder());
        assert!(custom.is_parameterized());
    }

    #[test]
    fn placeholders_in_order() {
        let spec = EndpointSpec::new(Method::Post, "/api/schedules/{type}/{id}/run");
        assert_eq!(spec.placeholders(), vec!["{type}", "{id}"]);
        let unclosed = EndpointSpec::new(Method::Get, "/api/{oops");
        assert!(unclosed.placeholders().is_empty());
    }

    #[test]
    fn method_properties() {
        assert!(Method::Delete.is_mutating());
        assert!(!Method::Options.is_mutating());
        assert!(Method::Put.carries_payload());
        assert!(!Method::Delete.carries_payload());
        assert_eq!(Method::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn parse_toml_catalog() {
        let toml = r#"
[[endpoints]]
method = "GET"
path = "/api/widgets"

[[endpoints]]
method = "DELETE"
path = "/api/widgets/{id}"
fixture = "container_id"
with_env = true
"#;
        let catalog = Catalog::parse(Path::new("c.toml"), toml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.endpoints[1].method, Method::Delete);
        assert_eq!(catalog.endpoints[1].fixture, Some(FixtureSource::ContainerId));
        assert!(catalog.endpoints[1].with_env);
        assert!(!catalog.endpoints[0].with_env);
    }

    #[test]
    fn parse_yaml_catalog() {
        let yaml = "endpoints:\n  - method: GET\n    path: /api/widgets/{name}\n    fixture: stack_name\n";
        let catalog = Catalog::parse(Path::new("c.yml"), yaml).unwrap();
        assert_eq!(catalog.endpoints[0].fixture, Some(FixtureSource::StackName));
    }

    #[test]
    fn parse_json_by_sniffing() {
        let json = r#"{"endpoints": [{"method": "PUT", "path": "/api/settings"}]}"#;
        let catalog = Catalog::parse(Path::new("catalog"), json).unwrap();
        assert_eq!(catalog.endpoints[0].method, Method::Put);
    }

    #[test]
    fn yaml_without_extension_is_not_mistaken_for_toml() {
        let yaml = "endpoints:\n  - method: GET\n    path: /api/widgets\n";
        let catalog = Catalog::parse(Path::new("my-catalog"), yaml).unwrap();
        assert_eq!(catalog.endpoints[0].path, "/api/widgets");
    }

    #[test]
    fn inline_toml_array_sniffed() {
        let toml = "endpoints = [{ method = \"GET\", path = \"/api/widgets\" }]\n";
        let catalog = Catalog::parse(Path::new("catalog.conf"), toml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(is_toml_assignment("endpoints  = []"));
        assert!(!is_toml_assignment("endpoints:\n  []"));
    }

    #[test]
    fn parse_rejects_unknown_fixture() {
        let toml = "[[endpoints]]\nmethod = \"GET\"\npath = \"/x/{id}\"\nfixture = \"widget_id\"\n";
        let err = Catalog::parse(Path::new("c.toml"), toml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn example_catalog_parses() {
        let catalog = Catalog::parse(Path::new("endprobe.toml"), Catalog::example()).unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.endpoints[0].is_login());
    }

    #[test]
    fn validate_flags_problems() {
        let catalog = Catalog::new(vec![
            EndpointSpec::new(Method::Get, "/api/widgets/{id}"),
            EndpointSpec::new(Method::Get, "/api/widgets/{id}"),
            EndpointSpec::new(Method::Get, "/api/gadgets/{slug}"),
            EndpointSpec::new(Method::Get, "/api/plain").with_fixture(FixtureSource::UserId),
        ]);
        let checks: Vec<_> = catalog
            .validate()
            .into_iter()
            .filter(|v| v.status == ValidationStatus::Warning)
            .map(|v| v.check)
            .collect();
        assert!(checks.contains(&"duplicate".to_string()));
        assert!(checks.contains(&"unknown_placeholder".to_string()));
        assert!(checks.contains(&"fixture_source".to_string()));
        assert!(checks.contains(&"login_route".to_string()));
    }

    #[test]
    fn validate_empty_catalog_is_error() {
        let v = Catalog::new(vec![]).validate();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].status, ValidationStatus::Error);
    }
}
