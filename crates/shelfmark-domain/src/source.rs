//! Attached value types: external sources and reading-log events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named external source for a record (e.g. a shop page or library link).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub name: String,
    pub location: String,
}

impl SourceRef {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// A dated reading-log entry.
///
/// Records keep these sorted ascending by date; entries sharing a date keep
/// their original insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingEvent {
    pub date: NaiveDate,
    pub note: Option<String>,
}

impl ReadingEvent {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
