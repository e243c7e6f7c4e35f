//! Approximate title/author matching.
//!
//! Builds loose match predicates for "did we already catalog something like
//! this" lookups. Fragments are tokenized on non-word boundaries, capped
//! (title: first four tokens, author: first two), and joined with an
//! any-characters wildcard into a case-insensitive pattern. When both
//! fragments are supplied the match is a disjunction: a title-only hit or
//! an author-only hit both qualify.

use lazy_static::lazy_static;
use regex::Regex;

use shelfmark_domain::Record;

/// Upper bound on approximate-match results returned by a store.
pub const APPROXIMATE_MATCH_LIMIT: usize = 11;

const TITLE_TOKEN_CAP: usize = 4;
const AUTHOR_TOKEN_CAP: usize = 2;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W+").unwrap();
}

/// A compiled approximate-match predicate.
#[derive(Debug, Clone)]
pub struct ApproximateMatch {
    title: Option<Regex>,
    author: Option<Regex>,
}

/// Build an approximate-match predicate from optional fragments.
///
/// Returns `None` when neither fragment yields any token — the caller gets
/// an empty result set, not an unrestricted scan.
pub fn build_approximate_predicate(
    title_fragment: Option<&str>,
    author_fragment: Option<&str>,
) -> Option<ApproximateMatch> {
    let title = title_fragment.and_then(|f| loose_pattern(f, TITLE_TOKEN_CAP));
    let author = author_fragment.and_then(|f| loose_pattern(f, AUTHOR_TOKEN_CAP));

    if title.is_none() && author.is_none() {
        return None;
    }
    Some(ApproximateMatch { title, author })
}

impl ApproximateMatch {
    /// Whether the record matches the title pattern or the author pattern.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(re) = &self.title {
            if re.is_match(&record.title) {
                return true;
            }
        }
        if let Some(re) = &self.author {
            if let Some(authors) = &record.authors {
                if re.is_match(authors) {
                    return true;
                }
            }
        }
        false
    }

    pub fn title_pattern(&self) -> Option<&str> {
        self.title.as_ref().map(Regex::as_str)
    }

    pub fn author_pattern(&self) -> Option<&str> {
        self.author.as_ref().map(Regex::as_str)
    }
}

/// Tokenize a fragment, cap the token count, and compile the wildcard
/// pattern. Returns `None` for fragments without any word characters.
fn loose_pattern(fragment: &str, token_cap: usize) -> Option<Regex> {
    let tokens: Vec<String> = NON_WORD
        .split(fragment)
        .filter(|t| !t.is_empty())
        .take(token_cap)
        .map(regex::escape)
        .collect();

    if tokens.is_empty() {
        return None;
    }

    let pattern = format!("(?i){}", tokens.join(".*"));
    Regex::new(&pattern).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_domain::MediaKind;

    fn record(title: &str, authors: Option<&str>) -> Record {
        let mut r = Record::new(title, MediaKind::Book);
        r.authors = authors.map(str::to_string);
        r
    }

    #[test]
    fn title_fragment_matches_loosely() {
        let m = build_approximate_predicate(Some("Clean Code"), None).unwrap();
        assert!(m.matches(&record("Clean Code: A Handbook", None)));
        assert!(!m.matches(&record("Refactoring", None)));
    }

    #[test]
    fn match_is_case_insensitive() {
        let m = build_approximate_predicate(Some("clean code"), None).unwrap();
        assert!(m.matches(&record("CLEAN CODE", None)));
    }

    #[test]
    fn title_tokens_capped_at_four() {
        let m =
            build_approximate_predicate(Some("one two three four five six"), None).unwrap();
        assert_eq!(m.title_pattern(), Some("(?i)one.*two.*three.*four"));
        // the fifth token no longer constrains the match
        assert!(m.matches(&record("one two three four", None)));
    }

    #[test]
    fn author_tokens_capped_at_two() {
        let m = build_approximate_predicate(None, Some("Robert C. Martin")).unwrap();
        assert_eq!(m.author_pattern(), Some("(?i)Robert.*C"));
    }

    #[test]
    fn both_fragments_form_a_disjunction() {
        let m =
            build_approximate_predicate(Some("Clean Code"), Some("Fowler")).unwrap();
        // title-only hit
        assert!(m.matches(&record("Clean Code", Some("Robert C. Martin"))));
        // author-only hit
        assert!(m.matches(&record("Refactoring", Some("Martin Fowler"))));
        // neither
        assert!(!m.matches(&record("Dune", Some("Frank Herbert"))));
    }

    #[test]
    fn punctuation_splits_tokens() {
        let m = build_approximate_predicate(Some("Domain-Driven Design"), None).unwrap();
        assert_eq!(m.title_pattern(), Some("(?i)Domain.*Driven.*Design"));
        assert!(m.matches(&record("Domain-Driven Design: Tackling Complexity", None)));
    }

    #[test]
    fn no_fragments_builds_nothing() {
        assert!(build_approximate_predicate(None, None).is_none());
        assert!(build_approximate_predicate(Some("  !! "), Some("")).is_none());
    }

    #[test]
    fn missing_authors_field_never_matches_author_pattern() {
        let m = build_approximate_predicate(None, Some("Fowler")).unwrap();
        assert!(!m.matches(&record("Refactoring", None)));
    }
}
