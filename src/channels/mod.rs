//! Extraction channels.
//!
//! Each channel scans a sentence independently and proposes
//! [`Candidate`] spans; channels never see each other's output. The
//! resolver (`crate::resolve`) owns all conflict handling, so a channel
//! is free to over-propose as long as each individual proposal passes
//! the shared surface filters below.

mod dictionary;
mod pattern;
mod tagger;

pub use dictionary::DictionaryChannel;
pub use pattern::PatternChannel;
pub use tagger::{TagSpan, Tagger, TaggerChannel};

use crate::gazetteer::Gazetteer;
use crate::mention::{Candidate, ChannelKind};
use crate::Result;

mod private {
    pub trait Sealed {}
}

/// A single extraction strategy.
///
/// Sealed: the channel set is fixed because the resolver's merge rules
/// are written against exactly these three kinds (plus the test mock).
pub trait Channel: private::Sealed + Send + Sync {
    /// Scan one sentence, returning zero or more candidate spans.
    ///
    /// Offsets in returned candidates are byte offsets into `sentence`.
    fn scan(&self, sentence: &str) -> Result<Vec<Candidate>>;

    /// Which channel this is, for merge priority and method tags.
    fn kind(&self) -> ChannelKind;

    /// Whether the channel can run (external taggers may be absent).
    fn is_available(&self) -> bool {
        true
    }

    /// Human-readable description for logs.
    fn description(&self) -> &str;
}

impl private::Sealed for DictionaryChannel {}
impl<T: Tagger> private::Sealed for TaggerChannel<T> {}
impl private::Sealed for PatternChannel {}
impl private::Sealed for MockChannel {}

/// Surface filters shared by every channel.
///
/// Returns false for curated exclusions and for names under two
/// codepoints that are not on the single-character whitelist.
pub(crate) fn passes_surface_filters(gazetteer: &Gazetteer, text: &str) -> bool {
    if text.is_empty() || gazetteer.is_excluded(text) {
        return false;
    }
    if text.chars().count() < 2 && !gazetteer.is_short_whitelisted(text) {
        return false;
    }
    true
}

/// CJK Unified Ideographs plus the iteration mark 々.
pub(crate) fn is_kanji(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c) || c == '々'
}

/// Scripted channel for tests: returns a fixed candidate list for any
/// sentence.
#[derive(Debug, Clone)]
pub struct MockChannel {
    kind: ChannelKind,
    candidates: Vec<Candidate>,
    available: bool,
}

impl MockChannel {
    /// Create a mock that emits the given candidates.
    #[must_use]
    pub fn new(kind: ChannelKind, candidates: Vec<Candidate>) -> Self {
        Self {
            kind,
            candidates,
            available: true,
        }
    }

    /// Create a mock that reports itself unavailable.
    #[must_use]
    pub fn unavailable(kind: ChannelKind) -> Self {
        Self {
            kind,
            candidates: Vec::new(),
            available: false,
        }
    }
}

impl Channel for MockChannel {
    fn scan(&self, _sentence: &str) -> Result<Vec<Candidate>> {
        Ok(self.candidates.clone())
    }

    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn description(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::PlaceCategory;

    #[test]
    fn surface_filters_reject_short_and_excluded() {
        let g = Gazetteer::global().unwrap();
        assert!(!passes_surface_filters(g, ""));
        assert!(!passes_surface_filters(g, "今日"));
        assert!(!passes_surface_filters(g, "瀬"));
        assert!(passes_surface_filters(g, "柏"));
        assert!(passes_surface_filters(g, "横浜"));
    }

    #[test]
    fn kanji_classification() {
        assert!(is_kanji('山'));
        assert!(is_kanji('々'));
        assert!(!is_kanji('の'));
        assert!(!is_kanji('パ'));
        assert!(!is_kanji('A'));
    }

    #[test]
    fn mock_channel_replays() {
        let c = Candidate::new(
            "横浜",
            PlaceCategory::City,
            ChannelKind::Dictionary,
            0.95,
            0,
            6,
        );
        let mock = MockChannel::new(ChannelKind::Dictionary, vec![c.clone()]);
        assert_eq!(mock.scan("anything").unwrap(), vec![c]);
        assert!(!MockChannel::unavailable(ChannelKind::Tagger).is_available());
    }
}
