//! Domain types for the shelfmark personal catalog
//!
//! This crate provides the canonical models for catalog entries:
//! - Record: a single book/media entry with descriptive, classification,
//!   and reading-state attributes
//! - ReadingState, Verdict, MediaKind: closed value enumerations
//! - SourceRef, ReadingEvent: small attached value types
//! - Sort-key derivation and the canonical record ordering

pub mod record;
pub mod sort_key;
pub mod source;
pub mod state;

pub use record::*;
pub use sort_key::*;
pub use source::*;
pub use state::*;
