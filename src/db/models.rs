use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::lolesports::types::{League, LiveEvent, ScheduleEvent, Team, Tournament};

/// How an incoming document treats an already stored one with the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Overwrite only when the change marker differs
    WhenChanged,
    /// Overwrite on every sighting
    Always,
}

/// A record persisted in its own collection, keyed by a natural key.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Table holding this kind of document
    const COLLECTION: &'static str;
    const POLICY: UpdatePolicy;

    /// Business identifier; `None` when the record cannot be keyed.
    fn natural_key(&self) -> Option<&str>;

    /// Field whose change triggers a rewrite under `UpdatePolicy::WhenChanged`
    fn change_marker(&self) -> Option<&str> {
        None
    }

    /// Slug that no other document of the collection may hold
    fn unique_slug(&self) -> Option<&str> {
        None
    }
}

impl Document for League {
    const COLLECTION: &'static str = "leagues";
    const POLICY: UpdatePolicy = UpdatePolicy::WhenChanged;

    fn natural_key(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn change_marker(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn unique_slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl Document for Tournament {
    const COLLECTION: &'static str = "tournaments";
    const POLICY: UpdatePolicy = UpdatePolicy::WhenChanged;

    fn natural_key(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn change_marker(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn unique_slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl Document for ScheduleEvent {
    const COLLECTION: &'static str = "schedule_events";
    const POLICY: UpdatePolicy = UpdatePolicy::WhenChanged;

    /// Schedule events are identified by their match, not by a top-level id
    fn natural_key(&self) -> Option<&str> {
        self.game_match.as_ref().map(|m| m.id.as_str())
    }

    fn change_marker(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

impl Document for Team {
    const COLLECTION: &'static str = "teams";
    const POLICY: UpdatePolicy = UpdatePolicy::Always;

    fn natural_key(&self) -> Option<&str> {
        Some(&self.id)
    }
}

impl Document for LiveEvent {
    const COLLECTION: &'static str = "live_events";
    const POLICY: UpdatePolicy = UpdatePolicy::Always;

    fn natural_key(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// Result of a single conditional upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
    Unchanged,
}

/// A document as read back from the store, with its bookkeeping timestamps.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<D> {
    #[serde(flatten)]
    pub document: D,
    /// Number of rewrites since insertion
    #[allow(dead_code)]
    #[serde(skip)]
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
