//! Fixture discovery from safe list endpoints
//!
//! Every lookup is independent: a failed or empty listing leaves its fixture
//! absent and discovery moves on.

use endprobe_core::listing::{first_field, id_string};
use endprobe_core::template::ENV_QUERY_PARAM;
use endprobe_core::{Fixtures, Listing, Lookup, Method};
use tracing::{debug, warn};

use crate::session::ApiClient;

const ID_KEYS: &[&str] = &["id", "_id"];
const SYSTEM_SCHEDULE: &str = "system";

/// Where a discovered value is stored.
type Slot = fn(&mut Fixtures) -> &mut Option<String>;

/// Global resources: bare array, first record's `id` (or `_id`).
const GLOBAL_LISTS: &[(&str, &str, Slot)] = &[
    ("user_id", "/api/users", |f| &mut f.user_id),
    ("environment_id", "/api/environments", |f| &mut f.environment_id),
    ("registry_id", "/api/registries", |f| &mut f.registry_id),
    ("git_credential_id", "/api/git/credentials", |f| &mut f.git_credential_id),
    ("git_repository_id", "/api/git/repositories", |f| &mut f.git_repository_id),
    ("config_set_id", "/api/config-sets", |f| &mut f.config_set_id),
    ("notification_id", "/api/notifications", |f| &mut f.notification_id),
];

/// Environment-scoped resources: bare array, one named field of the first record.
const ENV_LISTS: &[(&str, &str, &str, Slot)] = &[
    ("network_id", "/api/networks", "id", |f| &mut f.network_id),
    ("volume_name", "/api/volumes", "name", |f| &mut f.volume_name),
    ("image_id", "/api/images", "id", |f| &mut f.image_id),
    ("container_id", "/api/containers", "id", |f| &mut f.container_id),
];

/// Build the fixture table for this run.
pub fn discover(client: &dyn ApiClient, default_env: &str) -> Fixtures {
    let mut fixtures = Fixtures::default();
    let env_query = [(ENV_QUERY_PARAM.to_string(), default_env.to_string())];

    for &(key, path, slot) in GLOBAL_LISTS {
        let lookup = fetch_listing(client, path, &[], None).and_then(|listing| {
            listing
                .first_record()
                .and_then(|record| first_field(record, ID_KEYS))
                .map_or_else(|| Lookup::Missing("no id on first record".into()), Lookup::Found)
        });
        *slot(&mut fixtures) = settle(key, lookup);
    }

    match fetch_listing(client, "/api/schedules", &[], Some("schedules")).into_result() {
        Ok(listing) => {
            let (system, custom) = scan_schedules(&listing);
            fixtures.system_schedule_id = system;
            if let Some((id, kind)) = custom {
                fixtures.custom_schedule_id = Some(id);
                fixtures.custom_schedule_type = Some(kind);
            }
            debug!(
                system = ?fixtures.system_schedule_id,
                custom = ?fixtures.custom_schedule_id,
                kind = ?fixtures.custom_schedule_type,
                "schedules"
            );
        }
        Err(reason) => warn!(%reason, "schedule lookup failed"),
    }

    match fetch_listing(client, "/api/stacks", &env_query, Some("stacks")).into_result() {
        Ok(listing) => {
            if let Some(record) = listing.first_record() {
                fixtures.stack_name = record.get("name").and_then(id_string);
                fixtures.git_stack_id = record.get("id").and_then(id_string);
            }
            debug!(name = ?fixtures.stack_name, id = ?fixtures.git_stack_id, "stacks");
        }
        Err(reason) => warn!(%reason, "stack lookup failed"),
    }

    for &(key, path, field, slot) in ENV_LISTS {
        let lookup = fetch_listing(client, path, &env_query, None).and_then(|listing| {
            listing
                .first_record()
                .and_then(|record| record.get(field))
                .and_then(id_string)
                .map_or_else(|| Lookup::Missing(format!("no {field} on first record")), Lookup::Found)
        });
        *slot(&mut fixtures) = settle(key, lookup);
    }

    debug!(discovered = fixtures.discovered(), "fixture discovery finished");
    fixtures
}

/// A listing fetch, before any field is extracted.
enum Fetched {
    Listing(Listing),
    Failed(String),
}

impl Fetched {
    fn and_then(self, extract: impl FnOnce(Listing) -> Lookup) -> Lookup {
        match self {
            Self::Listing(listing) => extract(listing),
            Self::Failed(reason) => Lookup::Failed(reason),
        }
    }

    fn into_result(self) -> Result<Listing, String> {
        match self {
            Self::Listing(listing) => Ok(listing),
            Self::Failed(reason) => Err(reason),
        }
    }
}

fn fetch_listing(
    client: &dyn ApiClient,
    path: &str,
    query: &[(String, String)],
    wrapper: Option<&str>,
) -> Fetched {
    match client.request(Method::Get, path, None, query) {
        Ok(resp) if resp.status == 200 => match Listing::parse(&resp.body, wrapper) {
            Some(listing) => Fetched::Listing(listing),
            None => Fetched::Failed(format!("{path}: response is not a list")),
        },
        Ok(resp) => Fetched::Failed(format!("{path}: status {}", resp.status)),
        Err(e) => Fetched::Failed(e.to_string()),
    }
}

/// First system schedule id, and first (id, type) of any other type.
fn scan_schedules(listing: &Listing) -> (Option<String>, Option<(String, String)>) {
    let mut system = None;
    let mut custom = None;
    for record in listing.items().iter().filter_map(|v| v.as_object()) {
        let (Some(id), Some(kind)) = (
            record.get("id").and_then(id_string),
            record.get("type").and_then(id_string),
        ) else {
            continue;
        };
        if kind == SYSTEM_SCHEDULE {
            system.get_or_insert(id);
        } else if custom.is_none() {
            custom = Some((id, kind));
        }
    }
    (system, custom)
}

fn settle(key: &str, lookup: Lookup) -> Option<String> {
    match &lookup {
        Lookup::Found(value) => debug!(key, value = %value, "fixture found"),
        Lookup::Missing(reason) => debug!(key, %reason, "fixture missing"),
        Lookup::Failed(reason) => warn!(key, %reason, "fixture lookup failed"),
    }
    lookup.into_option()
}
