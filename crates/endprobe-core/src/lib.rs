//! endprobe-core: catalog, fixtures, safe-mode policy and classification
//!
//! Everything here is pure logic. Network I/O lives in `endprobe-runner`.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod fixtures;
pub mod listing;
pub mod plan;
pub mod report;
pub mod schema;
pub mod template;

pub use catalog::{Catalog, EndpointSpec, LOGIN_PATH, Method, Validation, ValidationStatus};
pub use classify::{Outcome, ResultKind, classify};
pub use config::{ConfigError, Credentials, ProbeConfig, ProbeSettings};
pub use fixtures::{FixtureSource, Fixtures, Lookup};
pub use listing::Listing;
pub use plan::{PlanEntry, ProbePlan, plan};
pub use report::{ProbeReport, ProbeResult, ReportMeta, Summary};
pub use template::{Materialized, Payload, PlannedRequest, materialize};
