//! Record domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::sort_key::compute_sort_key;
use crate::source::{ReadingEvent, SourceRef};
use crate::state::{MediaKind, ReadingState, Verdict};

/// A single catalog entry (book, ebook, audiobook, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned identifier, immutable after creation.
    pub id: Uuid,

    // Descriptive attributes
    pub title: String,
    pub root_title: Option<String>,
    pub authors: Option<String>,
    pub publisher: Option<String>,
    pub published_year: Option<i32>,
    pub edition: Option<u32>,
    pub pages: Option<u32>,
    /// Opaque reference into cover storage; not interpreted here.
    pub cover_ref: Option<String>,

    // Classification
    pub kind: MediaKind,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    /// Deduplicated, case-insensitively sorted. Always contains the
    /// record's own category and subcategory.
    pub tags: Vec<String>,

    // State
    pub state: ReadingState,
    pub starred: bool,
    pub archived: bool,
    pub verdict: Verdict,

    // Free text
    pub note: Option<String>,
    pub description: Option<String>,

    // Attachments
    pub sources: Vec<SourceRef>,
    /// Sorted ascending by date; equal dates keep insertion order.
    pub reading_log: Vec<ReadingEvent>,

    // Metadata
    pub created_at: DateTime<Utc>,
    /// Derived four-digit ordering key, recomputed on every create/update.
    pub sort_key: String,
}

impl Record {
    /// Create a new record with required identifying fields and defaults.
    pub fn new(title: impl Into<String>, kind: MediaKind) -> Self {
        let mut record = Self {
            id: Uuid::new_v4(),
            title: title.into(),
            root_title: None,
            authors: None,
            publisher: None,
            published_year: None,
            edition: None,
            pages: None,
            cover_ref: None,
            kind,
            category: None,
            subcategory: None,
            tags: Vec::new(),
            state: ReadingState::default(),
            starred: false,
            archived: false,
            verdict: Verdict::default(),
            note: None,
            description: None,
            sources: Vec::new(),
            reading_log: Vec::new(),
            created_at: Utc::now(),
            sort_key: String::new(),
        };
        record.normalize();
        record
    }

    /// Restore model invariants: tag fill/dedup, reading-log order, and a
    /// fresh sort key. Called by stores before every save and update.
    pub fn normalize(&mut self) {
        self.fill_tags();
        self.reading_log.sort_by_key(|e| e.date);
        self.refresh_sort_key();
    }

    /// Recompute the derived sort key from the current attributes.
    pub fn refresh_sort_key(&mut self) {
        self.sort_key = compute_sort_key(self);
    }

    /// Replace the mutable attribute set with `incoming`, preserving the
    /// identifier and creation timestamp, then re-normalize.
    pub fn apply_update(&mut self, incoming: Record) {
        let Record {
            id: _,
            title,
            root_title,
            authors,
            publisher,
            published_year,
            edition,
            pages,
            cover_ref,
            kind,
            category,
            subcategory,
            tags,
            state,
            starred,
            archived,
            verdict,
            note,
            description,
            sources,
            reading_log,
            created_at: _,
            sort_key: _,
        } = incoming;

        self.title = title;
        self.root_title = root_title;
        self.authors = authors;
        self.publisher = publisher;
        self.published_year = published_year;
        self.edition = edition;
        self.pages = pages;
        self.cover_ref = cover_ref;
        self.kind = kind;
        self.category = category;
        self.subcategory = subcategory;
        self.tags = tags;
        self.state = state;
        self.starred = starred;
        self.archived = archived;
        self.verdict = verdict;
        self.note = note;
        self.description = description;
        self.sources = sources;
        self.reading_log = reading_log;

        self.normalize();
    }

    /// Whether the record carries a tag, compared case-insensitively.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Merge the record's category and subcategory into its tag list,
    /// dedup case-insensitively (first casing wins), and sort.
    fn fill_tags(&mut self) {
        let mut seen: HashSet<String> = HashSet::new();
        let mut filled: Vec<String> = Vec::with_capacity(self.tags.len() + 2);

        let classification = [&self.category, &self.subcategory];
        for tag in self.tags.iter().chain(classification.into_iter().flatten()) {
            let tag = tag.trim();
            if tag.is_empty() {
                continue;
            }
            if seen.insert(tag.to_lowercase()) {
                filled.push(tag.to_string());
            }
        }

        filled.sort_by_key(|t| t.to_lowercase());
        self.tags = filled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_record_defaults() {
        let r = Record::new("Dune", MediaKind::Book);
        assert_eq!(r.state, ReadingState::Current);
        assert_eq!(r.verdict, Verdict::Unspecified);
        assert!(!r.starred);
        assert!(!r.archived);
        assert_eq!(r.sort_key.len(), 4);
    }

    #[test]
    fn tags_include_category_and_subcategory() {
        let mut r = Record::new("The Rust Programming Language", MediaKind::Book);
        r.category = Some("Programming".to_string());
        r.subcategory = Some("Rust".to_string());
        r.tags = vec!["reference".to_string()];
        r.normalize();
        assert_eq!(r.tags, vec!["Programming", "reference", "Rust"]);
    }

    #[test]
    fn tags_dedup_case_insensitively_keeping_first_casing() {
        let mut r = Record::new("x", MediaKind::Book);
        r.category = Some("programming".to_string());
        r.tags = vec!["Programming".to_string(), "  ".to_string(), "classic".to_string()];
        r.normalize();
        assert_eq!(r.tags, vec!["classic", "Programming"]);
    }

    #[test]
    fn reading_log_sorted_with_stable_ties() {
        let mut r = Record::new("x", MediaKind::Book);
        r.reading_log = vec![
            ReadingEvent::new(date(2024, 5, 1)).with_note("later"),
            ReadingEvent::new(date(2024, 1, 1)).with_note("first of day"),
            ReadingEvent::new(date(2024, 1, 1)).with_note("second of day"),
        ];
        r.normalize();
        let notes: Vec<&str> = r
            .reading_log
            .iter()
            .map(|e| e.note.as_deref().unwrap())
            .collect();
        assert_eq!(notes, vec!["first of day", "second of day", "later"]);
    }

    #[test]
    fn update_preserves_id_and_created_at() {
        let original = Record::new("Dune", MediaKind::Book);
        let id = original.id;
        let created_at = original.created_at;

        let mut incoming = Record::new("Dune Messiah", MediaKind::Book);
        incoming.starred = true;

        let mut updated = original;
        updated.apply_update(incoming);

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.title, "Dune Messiah");
        // sort key recomputed from incoming attributes
        assert_eq!(updated.sort_key, "0001");
    }

    #[test]
    fn serde_round_trip() {
        let mut r = Record::new("Dune", MediaKind::Ebook);
        r.state = ReadingState::Other("wishlist".to_string());
        r.sources = vec![SourceRef::new("shop", "https://example.org")];
        r.normalize();

        let json = serde_json::to_string(&r).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
