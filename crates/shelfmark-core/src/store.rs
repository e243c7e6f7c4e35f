//! The persistence interface the engine is written against.

use uuid::Uuid;

use shelfmark_domain::Record;

use crate::matcher::ApproximateMatch;
use crate::query::CatalogPredicate;

/// The trait all catalog storage backends implement.
///
/// Implementations own read consistency and update atomicity; callers treat
/// each operation as one consistent snapshot. `find` returns records in
/// canonical catalog order (sort key, then year descending, then title).
pub trait CatalogStore: Send + Sync {
    /// Persist a new record. Normalizes it (tag fill, reading-log order,
    /// sort key) before writing. Returns the record's id.
    fn save(&self, record: Record) -> Result<Uuid, StoreError>;

    /// Replace an existing record's mutable attributes. The stored id and
    /// creation timestamp are preserved and the sort key is recomputed
    /// from the incoming attributes.
    fn update(&self, id: Uuid, record: Record) -> Result<(), StoreError>;

    /// Fetch a single record. Absence is a value, not an error.
    fn find_one(&self, id: Uuid) -> Result<Option<Record>, StoreError>;

    /// All records matching the predicate, in canonical order.
    fn find(&self, predicate: &CatalogPredicate) -> Result<Vec<Record>, StoreError>;

    /// Loose title/author lookup, capped at
    /// [`crate::matcher::APPROXIMATE_MATCH_LIMIT`] results.
    fn find_approximate(&self, matcher: &ApproximateMatch)
        -> Result<Vec<Record>, StoreError>;
}

/// Errors from a catalog store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(Uuid),

    #[error("record already exists: {0}")]
    AlreadyExists(Uuid),

    #[error("storage error: {0}")]
    Storage(String),
}
