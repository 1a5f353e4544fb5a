//! Dry run: what a probe pass would send, without sending anything
//!
//! Lets an operator confirm which routes safe mode downgrades and which GETs
//! would be skipped for lack of fixtures before pointing the tool at a live
//! service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Method, Validation, ValidationStatus};
use crate::config::ProbeSettings;
use crate::fixtures::Fixtures;
use crate::template::{Materialized, materialize};

/// What would happen to one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanEntry {
    /// Method as declared in the catalog
    pub method: Method,
    /// Path template
    pub path: String,
    /// Verb that would be sent; absent when skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_method: Option<Method>,
    /// Concrete path that would be requested; absent when skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concrete_path: Option<String>,
    /// Query string, e.g. "env=1"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub query: String,
    #[serde(default)]
    pub note: String,
}

impl PlanEntry {
    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.issued_method.is_none()
    }
}

/// Complete dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProbePlan {
    pub entries: Vec<PlanEntry>,
    /// Entries that would be sent
    pub issued: usize,
    /// GETs skipped for lack of a fixture
    pub skipped: usize,
    /// Mutations replaced by OPTIONS
    pub downgraded: usize,
    pub allow_mutation: bool,
    pub validations: Vec<Validation>,
}

/// Materialize every catalog entry against `fixtures` without I/O.
#[must_use]
pub fn plan(catalog: &Catalog, fixtures: &Fixtures, settings: &ProbeSettings) -> ProbePlan {
    let mut entries = Vec::with_capacity(catalog.len());
    let (mut issued, mut skipped, mut downgraded) = (0, 0, 0);

    for spec in catalog {
        let entry = match materialize(spec, fixtures, settings) {
            Materialized::Skip { note } => {
                skipped += 1;
                PlanEntry {
                    method: spec.method,
                    path: spec.path.clone(),
                    issued_method: None,
                    concrete_path: None,
                    query: String::new(),
                    note,
                }
            }
            Materialized::Issue(req) => {
                issued += 1;
                if req.method != spec.method {
                    downgraded += 1;
                }
                PlanEntry {
                    method: spec.method,
                    path: spec.path.clone(),
                    issued_method: Some(req.method),
                    concrete_path: Some(req.path),
                    query: req
                        .query
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join("&"),
                    note: req.note,
                }
            }
        };
        entries.push(entry);
    }

    ProbePlan {
        entries,
        issued,
        skipped,
        downgraded,
        allow_mutation: settings.allow_mutation,
        validations: catalog.validate(),
    }
}

impl ProbePlan {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.validations
            .iter()
            .any(|v| v.status == ValidationStatus::Error)
    }

    /// Human-readable rendering.
    #[must_use]
    pub fn to_terminal(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "Dry run: {} endpoints ({} sent, {} skipped, {} downgraded to OPTIONS)",
            self.entries.len(),
            self.issued,
            self.skipped,
            self.downgraded
        ));
        lines.push(format!(
            "Mutation: {}",
            if self.allow_mutation {
                "ALLOWED"
            } else {
                "safe mode"
            }
        ));
        lines.push(String::new());

        for e in &self.entries {
            let target = match (&e.issued_method, &e.concrete_path) {
                (Some(m), Some(p)) if e.query.is_empty() => format!("{m} {p}"),
                (Some(m), Some(p)) => format!("{m} {p}?{}", e.query),
                _ => "SKIP".to_string(),
            };
            let mut line = format!("  {:<7}{:<48} -> {target}", e.method.as_str(), e.path);
            if !e.note.is_empty() {
                line.push_str(&format!("  [{}]", e.note));
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push("Validations:".to_string());
        for v in &self.validations {
            lines.push(format!("  [{}] {}: {}", v.status, v.check, v.message));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EndpointSpec;
    use crate::fixtures::FixtureSource;

    #[test]
    fn offline_plan_of_builtin_catalog() {
        let p = plan(&Catalog::builtin(), &Fixtures::default(), &ProbeSettings::default());
        assert_eq!(p.entries.len(), 110);
        assert_eq!(p.issued + p.skipped, 110);
        assert!(p.skipped > 0);
        assert!(p.downgraded > 0);
        assert!(!p.has_errors());

        // No entry except login sends a real mutation to a singleton route
        for (spec, entry) in Catalog::builtin().iter().zip(&p.entries) {
            if let Some(m) = entry.issued_method {
                if m.is_mutating() && !spec.is_login() {
                    assert!(spec.has_placeholder(), "{}", spec.label());
                }
            }
        }
    }

    #[test]
    fn mutation_allowed_means_no_downgrades() {
        let settings = ProbeSettings {
            allow_mutation: true,
            ..ProbeSettings::default()
        };
        let p = plan(&Catalog::builtin(), &Fixtures::default(), &settings);
        assert_eq!(p.downgraded, 0);
        assert!(p.to_terminal().contains("Mutation: ALLOWED"));
    }

    #[test]
    fn entries_follow_catalog_order() {
        let catalog = Catalog::new(vec![
            EndpointSpec::new(Method::Get, "/b"),
            EndpointSpec::new(Method::Get, "/a/{id}").with_fixture(FixtureSource::ImageId),
            EndpointSpec::new(Method::Post, "/c").with_env(),
        ]);
        let p = plan(&catalog, &Fixtures::default(), &ProbeSettings::default());
        let paths: Vec<_> = p.entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/b", "/a/{id}", "/c"]);
        assert!(p.entries[1].is_skipped());
        assert_eq!(p.entries[2].issued_method, Some(Method::Options));
        assert_eq!(p.entries[2].query, "env=1");

        let text = p.to_terminal();
        assert!(text.contains("-> SKIP"));
        assert!(text.contains("-> OPTIONS /c?env=1"));
    }

    #[test]
    fn empty_catalog_has_errors() {
        let p = plan(&Catalog::new(vec![]), &Fixtures::default(), &ProbeSettings::default());
        assert!(p.has_errors());
        assert!(p.entries.is_empty());
    }
}
