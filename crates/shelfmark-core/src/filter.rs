//! Filter predicate builder.
//!
//! Translates raw, optionally-repeated request parameters into a
//! [`CatalogPredicate`]. The rules that matter:
//!
//! - An absent or empty multi-value parameter means "match any value",
//!   never "match nothing".
//! - Unrecognized values degrade to empty match sets for that dimension
//!   (no results for that dimension), never an error.

use shelfmark_domain::{MediaKind, ReadingState, Verdict};

use crate::query::{CatalogPredicate, ValueSet};

/// Raw filter parameters as a transport layer would collect them from a
/// query string. All fields optional; repeated parameters arrive as lists.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub title: Option<String>,
    pub verdicts: Vec<String>,
    pub states: Vec<String>,
    pub starred: Vec<String>,
    pub archived: Vec<String>,
    pub kinds: Vec<String>,
    pub tags: Vec<String>,
    pub source: Option<String>,
}

/// Build a structured predicate from raw parameters. Never fails.
pub fn build_predicate(params: &FilterParams) -> CatalogPredicate {
    CatalogPredicate {
        title_substring: clean_optional(&params.title),
        verdicts: multi_valued(&params.verdicts, Verdict::parse_strict),
        states: multi_valued(&params.states, |v| Some(ReadingState::parse(v))),
        starred: multi_valued(&params.starred, parse_flag),
        archived: multi_valued(&params.archived, parse_flag),
        kinds: multi_valued(&params.kinds, |v| Some(MediaKind::parse(v))),
        required_tags: params
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        source_name: clean_optional(&params.source),
    }
}

/// Normalize one multi-valued dimension.
///
/// No usable raw values at all → `Any` (unrestricted). Raw values present
/// but none recognized → an empty `OneOf` (matches nothing).
fn multi_valued<T>(raw: &[String], parse: impl Fn(&str) -> Option<T>) -> ValueSet<T> {
    let supplied: Vec<&str> = raw
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if supplied.is_empty() {
        return ValueSet::Any;
    }

    ValueSet::OneOf(supplied.into_iter().filter_map(parse).collect())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn clean_optional(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
