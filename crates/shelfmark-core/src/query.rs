//! Structured catalog predicates.
//!
//! A [`CatalogPredicate`] is the validated form of user filter input,
//! consumable by any [`crate::store::CatalogStore`] implementation. It both
//! serializes (so a transport can log or forward it) and evaluates directly
//! against records, so every store shares one evaluation path.

use serde::{Deserialize, Serialize};

use shelfmark_domain::{MediaKind, ReadingState, Record, Verdict};

/// Accepted values for one multi-valued filter dimension.
///
/// `Any` means the dimension is unrestricted — an absent or empty parameter
/// matches every record. An explicit empty `OneOf` matches nothing, which is
/// how unrecognized filter values degrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueSet<T> {
    Any,
    OneOf(Vec<T>),
}

impl<T> Default for ValueSet<T> {
    fn default() -> Self {
        ValueSet::Any
    }
}

impl<T: PartialEq> ValueSet<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            ValueSet::Any => true,
            ValueSet::OneOf(values) => values.contains(value),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, ValueSet::Any)
    }
}

/// A structured filter over catalog records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPredicate {
    /// Case-insensitive substring match against the title.
    pub title_substring: Option<String>,
    pub verdicts: ValueSet<Verdict>,
    pub states: ValueSet<ReadingState>,
    pub starred: ValueSet<bool>,
    pub archived: ValueSet<bool>,
    pub kinds: ValueSet<MediaKind>,
    /// Conjunctive: a record must carry all of these (case-insensitive).
    pub required_tags: Vec<String>,
    /// At least one source entry must have exactly this name.
    pub source_name: Option<String>,
}

impl CatalogPredicate {
    /// Whether this predicate matches every record.
    pub fn is_unrestricted(&self) -> bool {
        self.title_substring.is_none()
            && self.verdicts.is_any()
            && self.states.is_any()
            && self.starred.is_any()
            && self.archived.is_any()
            && self.kinds.is_any()
            && self.required_tags.is_empty()
            && self.source_name.is_none()
    }

    /// Evaluate the predicate against one record.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(needle) = &self.title_substring {
            if !record
                .title
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        if !self.verdicts.admits(&record.verdict)
            || !self.states.admits(&record.state)
            || !self.starred.admits(&record.starred)
            || !self.archived.admits(&record.archived)
            || !self.kinds.admits(&record.kind)
        {
            return false;
        }

        if !self.required_tags.iter().all(|tag| record.has_tag(tag)) {
            return false;
        }

        if let Some(name) = &self.source_name {
            if !record.sources.iter().any(|s| &s.name == name) {
                return false;
            }
        }

        true
    }
}
