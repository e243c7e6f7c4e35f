//! SQLite-backed catalog store.
//!
//! Records are stored as a JSON payload column plus a few indexed scalar
//! columns (sort key, title, published year) so the canonical ordering can
//! be done by the database. Predicates evaluate on decoded records, the
//! same path every store uses.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;
use uuid::Uuid;

use shelfmark_domain::Record;

use crate::matcher::{ApproximateMatch, APPROXIMATE_MATCH_LIMIT};
use crate::query::CatalogPredicate;
use crate::store::{CatalogStore, StoreError};

/// SQLite implementation of the [`CatalogStore`] trait.
pub struct SqliteCatalogStore {
    conn: Mutex<Connection>,
}

impl SqliteCatalogStore {
    /// Open (or create) a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn =
            Connection::open(path).map_err(|e| StoreError::Storage(format!("open: {}", e)))?;
        Self::init_with_connection(conn)
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Storage(format!("open_in_memory: {}", e)))?;
        Self::init_with_connection(conn)
    }

    fn init_with_connection(conn: Connection) -> Result<Self, StoreError> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;

            CREATE TABLE IF NOT EXISTS records (
                id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                sort_key TEXT NOT NULL,
                title TEXT NOT NULL,
                published_year INTEGER,
                created_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_records_sort_key ON records(sort_key);
            CREATE INDEX IF NOT EXISTS idx_records_title ON records(title COLLATE NOCASE);
            ",
        )
        .map_err(|e| StoreError::Storage(format!("init_schema: {}", e)))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Storage("connection mutex poisoned".to_string()))
    }

    fn write_record(conn: &Connection, record: &Record) -> Result<(), StoreError> {
        let payload =
            serde_json::to_string(record).map_err(|e| StoreError::Storage(e.to_string()))?;
        conn.execute(
            "INSERT OR REPLACE INTO records (id, payload, sort_key, title, published_year, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.id.to_string(),
                payload,
                record.sort_key,
                record.title,
                record.published_year,
                record.created_at.timestamp_millis(),
            ],
        )
        .map_err(|e| StoreError::Storage(format!("write: {}", e)))?;
        Ok(())
    }

    fn decode(payload: &str) -> Result<Record, StoreError> {
        serde_json::from_str(payload).map_err(|e| StoreError::Storage(format!("decode: {}", e)))
    }

    /// All records in canonical order: sort key, year descending (missing
    /// year last — SQLite sorts NULL below every value, so DESC trails),
    /// title case-insensitive.
    fn load_ordered(conn: &Connection) -> Result<Vec<Record>, StoreError> {
        let mut stmt = conn
            .prepare(
                "SELECT payload FROM records
                 ORDER BY sort_key ASC, published_year DESC, title COLLATE NOCASE ASC",
            )
            .map_err(|e| StoreError::Storage(format!("prepare: {}", e)))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Storage(format!("query: {}", e)))?;

        let mut records = Vec::new();
        for payload in rows {
            let payload = payload.map_err(|e| StoreError::Storage(format!("row: {}", e)))?;
            records.push(Self::decode(&payload)?);
        }
        Ok(records)
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn save(&self, mut record: Record) -> Result<Uuid, StoreError> {
        record.normalize();
        let conn = self.lock()?;

        let exists: Option<String> = conn
            .query_row(
                "SELECT id FROM records WHERE id = ?1",
                params![record.id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Storage(format!("lookup: {}", e)))?;
        if exists.is_some() {
            return Err(StoreError::AlreadyExists(record.id));
        }

        Self::write_record(&conn, &record)?;
        debug!(id = %record.id, "record saved");
        Ok(record.id)
    }

    fn update(&self, id: Uuid, record: Record) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM records WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Storage(format!("lookup: {}", e)))?;

        let mut stored = Self::decode(&payload.ok_or(StoreError::NotFound(id))?)?;
        stored.apply_update(record);
        Self::write_record(&conn, &stored)?;
        debug!(id = %id, "record updated");
        Ok(())
    }

    fn find_one(&self, id: Uuid) -> Result<Option<Record>, StoreError> {
        let conn = self.lock()?;
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM records WHERE id = ?1",
                params![id.to_string()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::Storage(format!("lookup: {}", e)))?;
        payload.as_deref().map(Self::decode).transpose()
    }

    fn find(&self, predicate: &CatalogPredicate) -> Result<Vec<Record>, StoreError> {
        let conn = self.lock()?;
        let all = Self::load_ordered(&conn)?;
        let total = all.len();
        let matched: Vec<Record> = all.into_iter().filter(|r| predicate.matches(r)).collect();
        debug!(matched = matched.len(), total, "catalog query");
        Ok(matched)
    }

    fn find_approximate(
        &self,
        matcher: &ApproximateMatch,
    ) -> Result<Vec<Record>, StoreError> {
        let conn = self.lock()?;
        let matched: Vec<Record> = Self::load_ordered(&conn)?
            .into_iter()
            .filter(|r| matcher.matches(r))
            .take(APPROXIMATE_MATCH_LIMIT)
            .collect();
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{build_predicate, FilterParams};
    use crate::matcher::build_approximate_predicate;
    use shelfmark_domain::{MediaKind, ReadingState, SourceRef};

    fn open() -> SqliteCatalogStore {
        SqliteCatalogStore::open_in_memory().unwrap()
    }

    #[test]
    fn save_and_round_trip() {
        let store = open();
        let mut record = Record::new("Dune", MediaKind::Book);
        record.sources = vec![SourceRef::new("shop", "https://example.org")];
        record.category = Some("Fiction".to_string());
        let id = store.save(record).unwrap();

        let found = store.find_one(id).unwrap().unwrap();
        assert_eq!(found.title, "Dune");
        // normalization ran before the write
        assert_eq!(found.tags, vec!["Fiction"]);
        assert_eq!(found.sort_key, "0101");
    }

    #[test]
    fn find_one_missing_is_none() {
        let store = open();
        assert!(store.find_one(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn duplicate_save_is_rejected() {
        let store = open();
        let record = Record::new("Dune", MediaKind::Book);
        let copy = record.clone();
        store.save(record).unwrap();
        assert!(matches!(
            store.save(copy),
            Err(StoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn update_preserves_identity() {
        let store = open();
        let record = Record::new("Dune", MediaKind::Book);
        let created_at = record.created_at;
        let id = store.save(record).unwrap();

        let mut incoming = Record::new("Dune Messiah", MediaKind::Book);
        incoming.archived = true;
        store.update(id, incoming).unwrap();

        let stored = store.find_one(id).unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.created_at, created_at);
        assert_eq!(stored.title, "Dune Messiah");
        assert_eq!(stored.sort_key, "1101");
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = open();
        let record = Record::new("Dune", MediaKind::Book);
        assert!(matches!(
            store.update(Uuid::new_v4(), record),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn find_orders_by_key_year_and_title() {
        let store = open();

        let mut starred = Record::new("zeta", MediaKind::Book);
        starred.starred = true;
        let mut dated_new = Record::new("beta", MediaKind::Book);
        dated_new.published_year = Some(2020);
        let mut dated_old = Record::new("Alpha", MediaKind::Book);
        dated_old.published_year = Some(1990);
        let undated = Record::new("gamma", MediaKind::Book);

        for r in [starred, dated_new, dated_old, undated] {
            store.save(r).unwrap();
        }

        let all = store.find(&CatalogPredicate::default()).unwrap();
        let titles: Vec<&str> = all.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["zeta", "beta", "Alpha", "gamma"]);
    }

    #[test]
    fn find_filters_by_state() {
        let store = open();
        let mut finished = Record::new("Done", MediaKind::Book);
        finished.state = ReadingState::Finished;
        store.save(finished).unwrap();
        store.save(Record::new("Reading", MediaKind::Book)).unwrap();

        let params = FilterParams {
            states: vec!["finished".to_string()],
            ..Default::default()
        };
        let matched = store.find(&build_predicate(&params)).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Done");
    }

    #[test]
    fn approximate_lookup() {
        let store = open();
        store
            .save(Record::new("Clean Code: A Handbook", MediaKind::Book))
            .unwrap();
        store.save(Record::new("Refactoring", MediaKind::Book)).unwrap();

        let matcher = build_approximate_predicate(Some("Clean Code"), None).unwrap();
        let matched = store.find_approximate(&matcher).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Clean Code: A Handbook");
    }
}
