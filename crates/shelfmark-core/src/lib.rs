//! shelfmark-core: catalog query and facet engine
//!
//! This crate turns loosely structured filter input into deterministic,
//! paginated, consistently ordered catalog listings:
//! - Filter predicate building from raw request parameters
//! - Fixed-size pagination with clamp-to-start fallback
//! - Facet aggregation merging a curated baseline vocabulary with
//!   observed record values
//! - Loose title/author matching for duplicate-detection lookups
//! - The `CatalogStore` persistence interface with SQLite and in-memory
//!   implementations
//!
//! All engine components are pure functions of their inputs; the store
//! alone owns consistency of the underlying record set.

pub mod filter;
pub mod matcher;
pub mod memory_store;
pub mod page;
pub mod query;
pub mod store;
pub mod taxonomy;

#[cfg(feature = "sqlite")]
pub mod sqlite_store;

pub use filter::{build_predicate, FilterParams};
pub use matcher::{build_approximate_predicate, ApproximateMatch, APPROXIMATE_MATCH_LIMIT};
pub use memory_store::MemoryCatalogStore;
pub use page::{paginate, Page, PAGE_SIZE};
pub use query::{CatalogPredicate, ValueSet};
pub use store::{CatalogStore, StoreError};
pub use taxonomy::{aggregate_taxonomy, BaselineTaxonomy, Taxonomy};

#[cfg(feature = "sqlite")]
pub use sqlite_store::SqliteCatalogStore;
