use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

use crate::lolesports::types::{League, LiveEvent, ScheduleEvent, Team, Tournament};

pub mod models;
pub use models::*;

/// Thread-safe SQLite document store (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        let conn = self.lock()?;
        for collection in COLLECTIONS {
            conn.execute_batch(&collection_schema(collection))?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database connection mutex poisoned"))
    }

    // ── Writes ────────────────────────────────────────────────────────────────

    /// Insert `doc`, or rewrite the stored copy according to `D::POLICY`.
    ///
    /// One statement: the existence check and the write cannot interleave
    /// with another writer.
    pub fn upsert<D: Document>(&self, doc: &D) -> Result<UpsertOutcome> {
        let key = doc
            .natural_key()
            .context("document has no natural key")?;
        let body = serde_json::to_string(doc)?;
        let conn = self.lock()?;
        let revision: Option<i64> = conn
            .query_row(
                &upsert_sql(D::COLLECTION, D::POLICY),
                params![key, doc.unique_slug(), doc.change_marker(), body, Utc::now()],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("upsert into {} failed for {}", D::COLLECTION, key))?;

        Ok(match revision {
            Some(0) => UpsertOutcome::Inserted,
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Unchanged,
        })
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    /// All documents of a collection, oldest first
    pub fn find_all<D: Document>(&self) -> Result<Vec<Stored<D>>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT document, revision, created_at, updated_at FROM {} ORDER BY created_at, key",
            D::COLLECTION
        ))?;
        let rows = stmt
            .query_map([], map_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(decode::<D>).collect()
    }

    #[cfg(test)]
    pub fn find_by_key<D: Document>(&self, key: &str) -> Result<Option<Stored<D>>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT document, revision, created_at, updated_at FROM {} WHERE key = ?1",
                    D::COLLECTION
                ),
                params![key],
                map_row,
            )
            .optional()?;
        row.map(decode::<D>).transpose()
    }

    #[cfg(test)]
    pub fn count<D: Document>(&self) -> Result<i64> {
        let conn = self.lock()?;
        let n = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", D::COLLECTION),
            [],
            |r| r.get(0),
        )?;
        Ok(n)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

type RawRow = (String, i64, chrono::DateTime<Utc>, chrono::DateTime<Utc>);

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn decode<D: Document>((body, revision, created_at, updated_at): RawRow) -> Result<Stored<D>> {
    let document = serde_json::from_str(&body)
        .with_context(|| format!("corrupt document in {}", D::COLLECTION))?;
    Ok(Stored {
        document,
        revision,
        created_at,
        updated_at,
    })
}

/// Conditional upsert returning the new revision, or no row when nothing was written
fn upsert_sql(collection: &str, policy: UpdatePolicy) -> String {
    let guard = match policy {
        UpdatePolicy::WhenChanged => format!("\n             WHERE {collection}.marker IS NOT excluded.marker"),
        UpdatePolicy::Always => String::new(),
    };
    format!(
        "INSERT INTO {collection} (key, slug, marker, document, revision, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)
             ON CONFLICT(key) DO UPDATE SET
                slug=excluded.slug,
                marker=excluded.marker,
                document=excluded.document,
                revision={collection}.revision + 1,
                updated_at=excluded.updated_at{guard}
             RETURNING revision"
    )
}

const COLLECTIONS: [&str; 5] = [
    League::COLLECTION,
    Tournament::COLLECTION,
    ScheduleEvent::COLLECTION,
    Team::COLLECTION,
    LiveEvent::COLLECTION,
];

/// SQLite schema for one collection (idempotent CREATE IF NOT EXISTS).
///
/// `slug` is NULL for collections without a unique slug; NULLs never collide.
fn collection_schema(collection: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {collection} (
    key         TEXT    PRIMARY KEY,
    slug        TEXT,
    marker      TEXT,
    document    TEXT    NOT NULL,
    revision    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_{collection}_slug ON {collection}(slug);
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lolesports::fake::{league, live_event, schedule_event, team, tournament};

    #[test]
    fn test_insert_then_unchanged_then_updated() {
        let db = Database::open_in_memory().unwrap();

        assert_eq!(db.upsert(&league("1", "LCS Old")).unwrap(), UpsertOutcome::Inserted);
        assert_eq!(db.upsert(&league("1", "LCS Old")).unwrap(), UpsertOutcome::Unchanged);
        assert_eq!(db.upsert(&league("1", "LCS")).unwrap(), UpsertOutcome::Updated);

        let stored: Stored<League> = db.find_by_key("1").unwrap().unwrap();
        assert_eq!(stored.document.name, "LCS");
        assert_eq!(stored.revision, 1);
        assert_eq!(db.count::<League>().unwrap(), 1);
    }

    #[test]
    fn test_unchanged_marker_keeps_old_payload() {
        let db = Database::open_in_memory().unwrap();
        db.upsert(&league("1", "LCS")).unwrap();

        let mut renamed_region = league("1", "LCS");
        renamed_region.region = "AMERICAS".to_string();
        assert_eq!(db.upsert(&renamed_region).unwrap(), UpsertOutcome::Unchanged);

        let stored: Stored<League> = db.find_by_key("1").unwrap().unwrap();
        assert_eq!(stored.document.region, "NORTH AMERICA");
    }

    #[test]
    fn test_updated_writes_full_payload() {
        let db = Database::open_in_memory().unwrap();
        db.upsert(&tournament("t1", "spring_2024")).unwrap();

        let mut incoming = tournament("t1", "spring_split_2024");
        incoming.league_id = "98767991299243165".to_string();
        assert_eq!(db.upsert(&incoming).unwrap(), UpsertOutcome::Updated);

        let stored: Stored<Tournament> = db.find_by_key("t1").unwrap().unwrap();
        assert_eq!(stored.document, incoming);
        assert!(stored.updated_at >= stored.created_at);
    }

    #[test]
    fn test_always_policy_overwrites_identical_records() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.upsert(&team("t1", "Cloud9")).unwrap(), UpsertOutcome::Inserted);
        assert_eq!(db.upsert(&team("t1", "Cloud9")).unwrap(), UpsertOutcome::Updated);
        assert_eq!(db.upsert(&live_event("e1", "inProgress")).unwrap(), UpsertOutcome::Inserted);
        assert_eq!(db.upsert(&live_event("e1", "inProgress")).unwrap(), UpsertOutcome::Updated);

        let stored: Stored<Team> = db.find_by_key("t1").unwrap().unwrap();
        assert_eq!(stored.revision, 1);
        assert_eq!(db.count::<LiveEvent>().unwrap(), 1);
    }

    #[test]
    fn test_schedule_events_keyed_by_match_id() {
        let db = Database::open_in_memory().unwrap();
        db.upsert(&schedule_event("m1", "unstarted")).unwrap();

        let stored: Stored<ScheduleEvent> = db.find_by_key("m1").unwrap().unwrap();
        assert_eq!(stored.document.state.as_deref(), Some("unstarted"));
        assert_eq!(
            db.upsert(&schedule_event("m1", "completed")).unwrap(),
            UpsertOutcome::Updated
        );
    }

    #[test]
    fn test_document_without_key_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let mut show = schedule_event("m1", "completed");
        show.game_match = None;
        assert!(db.upsert(&show).is_err());
        assert_eq!(db.count::<ScheduleEvent>().unwrap(), 0);
    }

    #[test]
    fn test_slug_collision_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.upsert(&league("1", "LCS")).unwrap();

        let mut clash = league("2", "LCS Academy");
        clash.slug = "lcs".to_string();
        let err = db.upsert(&clash).unwrap_err();
        assert!(format!("{:#}", err).contains("UNIQUE"));

        assert_eq!(db.count::<League>().unwrap(), 1);
        let stored: Stored<League> = db.find_by_key("1").unwrap().unwrap();
        assert_eq!(stored.document, league("1", "LCS"));
        assert_eq!(stored.revision, 0);

        db.upsert(&tournament("t1", "spring")).unwrap();
        assert!(db.upsert(&tournament("t2", "spring")).is_err());
        assert_eq!(db.count::<Tournament>().unwrap(), 1);
    }

    #[test]
    fn test_slug_only_unique_where_declared() {
        let db = Database::open_in_memory().unwrap();
        // teams carry a slug too, but it is not a store constraint
        db.upsert(&team("t1", "Cloud9")).unwrap();
        db.upsert(&team("t2", "Cloud9")).unwrap();
        assert_eq!(db.count::<Team>().unwrap(), 2);
    }

    #[test]
    fn test_null_state_is_a_marker_value() {
        let db = Database::open_in_memory().unwrap();
        let mut pending = schedule_event("m1", "unstarted");
        pending.state = None;
        assert_eq!(db.upsert(&pending).unwrap(), UpsertOutcome::Inserted);
        assert_eq!(db.upsert(&pending).unwrap(), UpsertOutcome::Unchanged);
        assert_eq!(
            db.upsert(&schedule_event("m1", "unstarted")).unwrap(),
            UpsertOutcome::Updated
        );
    }

    #[test]
    fn test_find_all_returns_every_document() {
        let db = Database::open_in_memory().unwrap();
        db.upsert(&league("1", "LCS")).unwrap();
        db.upsert(&league("2", "LEC")).unwrap();

        let leagues: Vec<Stored<League>> = db.find_all().unwrap();
        let mut names: Vec<_> = leagues.iter().map(|l| l.document.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["LCS", "LEC"]);
    }
}
