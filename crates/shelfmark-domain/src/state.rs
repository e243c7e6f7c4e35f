//! Reading state, verdict, and media kind enumerations.
//!
//! All three round-trip through plain strings so stored payloads stay
//! readable and values written by older revisions of the service survive
//! deserialization.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReadingState {
    Current,
    Paused,
    Finished,
    /// Anything outside the closed set (e.g. "wishlist" from an older
    /// revision). Preserved verbatim.
    Other(String),
}

impl Default for ReadingState {
    fn default() -> Self {
        ReadingState::Current
    }
}

impl ReadingState {
    /// Parse a state string. Never fails; unknown values become `Other`.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "current" => ReadingState::Current,
            "paused" => ReadingState::Paused,
            "finished" => ReadingState::Finished,
            _ => ReadingState::Other(input.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReadingState::Current => "current",
            ReadingState::Paused => "paused",
            ReadingState::Finished => "finished",
            ReadingState::Other(s) => s,
        }
    }

    /// Ordering digit for sort-key derivation: current < paused < finished < other.
    pub fn sort_rank(&self) -> u8 {
        match self {
            ReadingState::Current => 0,
            ReadingState::Paused => 1,
            ReadingState::Finished => 2,
            ReadingState::Other(_) => 3,
        }
    }
}

impl From<String> for ReadingState {
    fn from(s: String) -> Self {
        ReadingState::parse(&s)
    }
}

impl From<ReadingState> for String {
    fn from(s: ReadingState) -> Self {
        s.as_str().to_string()
    }
}

/// Recommendation verdict for a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Recommended,
    NotRecommended,
    #[default]
    Unspecified,
}

impl Verdict {
    /// Strict parse used by filter inputs: unknown values are rejected
    /// rather than folded into `Unspecified`.
    pub fn parse_strict(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "recommended" => Some(Verdict::Recommended),
            "not-recommended" => Some(Verdict::NotRecommended),
            "unspecified" => Some(Verdict::Unspecified),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Recommended => "recommended",
            Verdict::NotRecommended => "not-recommended",
            Verdict::Unspecified => "unspecified",
        }
    }

    /// Ordering digit: recommended < unspecified < not-recommended.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Verdict::Recommended => 0,
            Verdict::Unspecified => 1,
            Verdict::NotRecommended => 2,
        }
    }
}

impl From<String> for Verdict {
    fn from(s: String) -> Self {
        Verdict::parse_strict(&s).unwrap_or(Verdict::Unspecified)
    }
}

impl From<Verdict> for String {
    fn from(v: Verdict) -> Self {
        v.as_str().to_string()
    }
}

/// Kind of catalogued media.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaKind {
    Book,
    Ebook,
    Audiobook,
    Article,
    Other(String),
}

impl Default for MediaKind {
    fn default() -> Self {
        MediaKind::Book
    }
}

impl MediaKind {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "book" => MediaKind::Book,
            "ebook" => MediaKind::Ebook,
            "audiobook" => MediaKind::Audiobook,
            "article" => MediaKind::Article,
            _ => MediaKind::Other(input.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Book => "book",
            MediaKind::Ebook => "ebook",
            MediaKind::Audiobook => "audiobook",
            MediaKind::Article => "article",
            MediaKind::Other(s) => s,
        }
    }
}

impl From<String> for MediaKind {
    fn from(s: String) -> Self {
        MediaKind::parse(&s)
    }
}

impl From<MediaKind> for String {
    fn from(k: MediaKind) -> Self {
        k.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("current", ReadingState::Current)]
    #[test_case("Paused", ReadingState::Paused)]
    #[test_case(" finished ", ReadingState::Finished)]
    #[test_case("wishlist", ReadingState::Other("wishlist".to_string()))]
    fn parse_reading_state(input: &str, expected: ReadingState) {
        assert_eq!(ReadingState::parse(input), expected);
    }

    #[test]
    fn reading_state_rank_ordering() {
        let ranks: Vec<u8> = [
            ReadingState::Current,
            ReadingState::Paused,
            ReadingState::Finished,
            ReadingState::Other("wishlist".to_string()),
        ]
        .iter()
        .map(|s| s.sort_rank())
        .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn verdict_strict_parse_rejects_unknown() {
        assert_eq!(Verdict::parse_strict("recommended"), Some(Verdict::Recommended));
        assert_eq!(Verdict::parse_strict("meh"), None);
    }

    #[test]
    fn verdict_rank_ordering() {
        assert!(Verdict::Recommended.sort_rank() < Verdict::Unspecified.sort_rank());
        assert!(Verdict::Unspecified.sort_rank() < Verdict::NotRecommended.sort_rank());
    }

    #[test]
    fn state_serde_round_trip_preserves_unknown() {
        let state = ReadingState::Other("wishlist".to_string());
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"wishlist\"");
        let back: ReadingState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn media_kind_round_trip() {
        let kind = MediaKind::parse("Audiobook");
        assert_eq!(kind, MediaKind::Audiobook);
        let json = serde_json::to_string(&kind).unwrap();
        let back: MediaKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}
