//! Sort-key derivation and the canonical record ordering.
//!
//! The sort key is a four-digit string stored on every record and used as
//! the primary ordering dimension. Lower sorts first:
//!
//! 1. archived: `0` active, `1` archived
//! 2. starred:  `0` starred, `1` not starred
//! 3. state:    `0` current, `1` paused, `2` finished, `3` other
//! 4. verdict:  `0` recommended, `1` unspecified, `2` not-recommended
//!
//! Ties break on published year (descending, missing year last) and then
//! title (ascending, case-insensitive).

use std::cmp::Ordering;

use crate::record::Record;

/// Derive the four-digit sort key from a record's current attributes.
///
/// Always computed from the incoming attribute values, never read back from
/// a previously stored key. Idempotent for an unchanged record.
pub fn compute_sort_key(record: &Record) -> String {
    let mut key = String::with_capacity(4);
    key.push(if record.archived { '1' } else { '0' });
    key.push(if record.starred { '0' } else { '1' });
    key.push(char::from(b'0' + record.state.sort_rank()));
    key.push(char::from(b'0' + record.verdict.sort_rank()));
    key
}

/// Compare two records in canonical catalog order.
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    a.sort_key
        .cmp(&b.sort_key)
        .then_with(|| compare_year_desc(a.published_year, b.published_year))
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
}

/// Sort a slice of records into canonical order (stable).
pub fn sort_records(records: &mut [Record]) {
    records.sort_by(compare_records);
}

fn compare_year_desc(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
