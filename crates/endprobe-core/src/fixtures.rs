//! Fixtures: live resource identifiers discovered before probing

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Schedule type assumed when no custom schedule was discovered.
pub const DEFAULT_SCHEDULE_TYPE: &str = "system";

/// One identifier per resource kind, discovered from list endpoints.
///
/// Built once after login and read-only for the rest of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Fixtures {
    pub user_id: Option<String>,
    pub stack_name: Option<String>,
    pub environment_id: Option<String>,
    pub system_schedule_id: Option<String>,
    pub custom_schedule_id: Option<String>,
    pub custom_schedule_type: Option<String>,
    pub network_id: Option<String>,
    pub volume_name: Option<String>,
    pub image_id: Option<String>,
    pub container_id: Option<String>,
    pub git_repository_id: Option<String>,
    pub git_credential_id: Option<String>,
    pub registry_id: Option<String>,
    pub config_set_id: Option<String>,
    pub notification_id: Option<String>,
    pub git_stack_id: Option<String>,
}

/// Which fixture materializes a route's `{id}` or `{name}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FixtureSource {
    UserId,
    EnvironmentId,
    RegistryId,
    GitCredentialId,
    GitRepositoryId,
    ConfigSetId,
    NotificationId,
    StackName,
    GitStackId,
    NetworkId,
    VolumeName,
    ImageId,
    ContainerId,
    SystemScheduleId,
    /// Custom schedule id, falling back to the system schedule id
    Schedule,
}

impl FixtureSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserId => "user_id",
            Self::EnvironmentId => "environment_id",
            Self::RegistryId => "registry_id",
            Self::GitCredentialId => "git_credential_id",
            Self::GitRepositoryId => "git_repository_id",
            Self::ConfigSetId => "config_set_id",
            Self::NotificationId => "notification_id",
            Self::StackName => "stack_name",
            Self::GitStackId => "git_stack_id",
            Self::NetworkId => "network_id",
            Self::VolumeName => "volume_name",
            Self::ImageId => "image_id",
            Self::ContainerId => "container_id",
            Self::SystemScheduleId => "system_schedule_id",
            Self::Schedule => "schedule",
        }
    }
}

impl std::fmt::Display for FixtureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Fixtures {
    /// Resolve a fixture source to a usable value.
    ///
    /// Empty strings are treated as absent.
    #[must_use]
    pub fn resolve(&self, source: FixtureSource) -> Option<&str> {
        match source {
            FixtureSource::UserId => usable(&self.user_id),
            FixtureSource::EnvironmentId => usable(&self.environment_id),
            FixtureSource::RegistryId => usable(&self.registry_id),
            FixtureSource::GitCredentialId => usable(&self.git_credential_id),
            FixtureSource::GitRepositoryId => usable(&self.git_repository_id),
            FixtureSource::ConfigSetId => usable(&self.config_set_id),
            FixtureSource::NotificationId => usable(&self.notification_id),
            FixtureSource::StackName => usable(&self.stack_name),
            FixtureSource::GitStackId => usable(&self.git_stack_id),
            FixtureSource::NetworkId => usable(&self.network_id),
            FixtureSource::VolumeName => usable(&self.volume_name),
            FixtureSource::ImageId => usable(&self.image_id),
            FixtureSource::ContainerId => usable(&self.container_id),
            FixtureSource::SystemScheduleId => usable(&self.system_schedule_id),
            FixtureSource::Schedule => {
                usable(&self.custom_schedule_id).or_else(|| usable(&self.system_schedule_id))
            }
        }
    }

    /// Value substituted for `{type}`: the custom schedule type, else "system".
    #[must_use]
    pub fn schedule_type(&self) -> &str {
        usable(&self.custom_schedule_type).unwrap_or(DEFAULT_SCHEDULE_TYPE)
    }

    /// (key, value) pairs in declaration order, for display.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Option<&str>); 16] {
        [
            ("user_id", self.user_id.as_deref()),
            ("stack_name", self.stack_name.as_deref()),
            ("environment_id", self.environment_id.as_deref()),
            ("system_schedule_id", self.system_schedule_id.as_deref()),
            ("custom_schedule_id", self.custom_schedule_id.as_deref()),
            ("custom_schedule_type", self.custom_schedule_type.as_deref()),
            ("network_id", self.network_id.as_deref()),
            ("volume_name", self.volume_name.as_deref()),
            ("image_id", self.image_id.as_deref()),
            ("container_id", self.container_id.as_deref()),
            ("git_repository_id", self.git_repository_id.as_deref()),
            ("git_credential_id", self.git_credential_id.as_deref()),
            ("registry_id", self.registry_id.as_deref()),
            ("config_set_id", self.config_set_id.as_deref()),
            ("notification_id", self.notification_id.as_deref()),
            ("git_stack_id", self.git_stack_id.as_deref()),
        ]
    }

    /// Number of fixture keys that hold a value.
    #[must_use]
    pub fn discovered(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }
}

fn usable(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Outcome of a single discovery lookup.
///
/// Keeps "the service has no such resource" apart from "the lookup itself
/// failed" so the two can be logged differently before collapsing to `Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// A value was extracted
    Found(String),
    /// The listing was readable but yielded nothing usable
    Missing(String),
    /// Non-200 status, unparsable body, or transport failure
    Failed(String),
}

impl Lookup {
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Found(v) => Some(v),
            Self::Missing(_) | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
