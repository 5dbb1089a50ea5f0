//! Tagger channel: adapter over an external morphological tagger.
//!
//! The tagger itself is a trait so the pipeline never links against a
//! particular tokenizer; callers plug in whatever they run (or nothing,
//! in which case the channel reports itself unavailable).

use super::{passes_surface_filters, Channel};
use crate::gazetteer::Gazetteer;
use crate::mention::{Candidate, ChannelKind, PlaceCategory};
use crate::Result;

/// Confidence discount applied to every tagger span. External taggers
/// rarely expose calibrated scores.
pub(crate) const TAGGER_DISCOUNT: f64 = 0.85;

/// One labeled span as reported by an external tagger.
#[derive(Debug, Clone, PartialEq)]
pub struct TagSpan {
    /// Surface form.
    pub text: String,
    /// Tagger label (LOCATION, GPE, FACILITY, ORGANIZATION, ...).
    pub label: String,
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Tagger-reported score in [0, 1].
    pub score: f64,
}

/// An external morphological tagger.
pub trait Tagger: Send + Sync {
    /// Tag one sentence. Offsets must be byte offsets into `sentence`.
    fn tag(&self, sentence: &str) -> Result<Vec<TagSpan>>;

    /// Whether the tagger backend is usable right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// Adapts a [`Tagger`] to the channel interface.
///
/// Tagger failures are isolated: a backend error is logged and the
/// channel contributes nothing for that sentence, so one flaky tokenizer
/// never takes down a batch run.
pub struct TaggerChannel<T: Tagger> {
    tagger: T,
    gazetteer: &'static Gazetteer,
}

impl<T: Tagger> TaggerChannel<T> {
    /// Wrap a tagger backend.
    pub fn new(tagger: T) -> Result<Self> {
        Ok(Self {
            tagger,
            gazetteer: Gazetteer::global()?,
        })
    }

    fn convert(&self, span: TagSpan) -> Option<Candidate> {
        // ORGANIZATION spans are kept (company names often embed place
        // names) but distrusted twice over.
        let (category, discount) = match span.label.as_str() {
            "LOCATION" | "GPE" => (PlaceCategory::Unknown, TAGGER_DISCOUNT),
            "FACILITY" => (PlaceCategory::Landmark, TAGGER_DISCOUNT),
            "ORGANIZATION" => (PlaceCategory::Unknown, TAGGER_DISCOUNT * TAGGER_DISCOUNT),
            _ => return None,
        };
        if !passes_surface_filters(self.gazetteer, &span.text) {
            return None;
        }
        Some(Candidate::new(
            span.text,
            category,
            ChannelKind::Tagger,
            span.score * discount,
            span.start,
            span.end,
        ))
    }
}

impl<T: Tagger> Channel for TaggerChannel<T> {
    fn scan(&self, sentence: &str) -> Result<Vec<Candidate>> {
        let spans = match self.tagger.tag(sentence) {
            Ok(spans) => spans,
            Err(err) => {
                log::warn!("tagger {} failed, skipping: {err}", self.tagger.name());
                return Ok(Vec::new());
            }
        };
        // Offsets come from an external process; anything that does not
        // line up with the sentence bytes is dropped before it can reach
        // the slicing downstream.
        let mut out: Vec<Candidate> = spans
            .into_iter()
            .filter(|span| {
                let aligned = sentence.get(span.start..span.end) == Some(span.text.as_str());
                if !aligned {
                    log::warn!(
                        "tagger {} span {}..{} does not match the sentence text, dropping",
                        self.tagger.name(),
                        span.start,
                        span.end
                    );
                }
                aligned
            })
            .filter_map(|s| self.convert(s))
            .collect();
        out.sort_by_key(|c| (c.start, c.end));
        Ok(out)
    }

    fn kind(&self) -> ChannelKind {
        ChannelKind::Tagger
    }

    fn is_available(&self) -> bool {
        self.tagger.is_available()
    }

    fn description(&self) -> &str {
        "external tagger"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FixedTagger(Vec<TagSpan>);

    impl Tagger for FixedTagger {
        fn tag(&self, _sentence: &str) -> Result<Vec<TagSpan>> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingTagger;

    impl Tagger for FailingTagger {
        fn tag(&self, _sentence: &str) -> Result<Vec<TagSpan>> {
            Err(Error::channel("backend crashed"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn span(text: &str, label: &str, start: usize, score: f64) -> TagSpan {
        TagSpan {
            text: text.to_string(),
            label: label.to_string(),
            start,
            end: start + text.len(),
            score,
        }
    }

    #[test]
    fn location_spans_are_discounted() {
        let ch = TaggerChannel::new(FixedTagger(vec![span("横浜", "LOCATION", 0, 1.0)])).unwrap();
        let found = ch.scan("横浜に着いた").unwrap();
        assert_eq!(found.len(), 1);
        assert!((found[0].confidence.get() - TAGGER_DISCOUNT).abs() < 1e-9);
        assert_eq!(found[0].category, PlaceCategory::Unknown);
    }

    #[test]
    fn organization_spans_doubly_discounted() {
        let ch =
            TaggerChannel::new(FixedTagger(vec![span("横浜銀行", "ORGANIZATION", 0, 1.0)])).unwrap();
        let found = ch.scan("横浜銀行の前").unwrap();
        assert!((found[0].confidence.get() - TAGGER_DISCOUNT * TAGGER_DISCOUNT).abs() < 1e-9);
    }

    #[test]
    fn unrelated_labels_dropped() {
        let ch = TaggerChannel::new(FixedTagger(vec![span("太郎", "PERSON", 0, 1.0)])).unwrap();
        assert!(ch.scan("太郎が来た").unwrap().is_empty());
    }

    #[test]
    fn backend_failure_is_isolated() {
        let ch = TaggerChannel::new(FailingTagger).unwrap();
        assert!(ch.scan("横浜に着いた").unwrap().is_empty());
    }

    #[test]
    fn non_boundary_offsets_are_dropped() {
        // end byte 10 lands inside へ (bytes 9..12).
        let ch = TaggerChannel::new(FixedTagger(vec![TagSpan {
            text: "天竜峡".to_string(),
            label: "GPE".to_string(),
            start: 0,
            end: 10,
            score: 0.9,
        }]))
        .unwrap();
        assert!(ch.scan("天竜峡へ向かった").unwrap().is_empty());
    }

    #[test]
    fn spans_disagreeing_with_sentence_text_are_dropped() {
        let ch = TaggerChannel::new(FixedTagger(vec![span("横浜", "LOCATION", 3, 0.9)])).unwrap();
        assert!(ch.scan("横浜に着いた").unwrap().is_empty());
    }

    #[test]
    fn facility_maps_to_landmark() {
        let ch = TaggerChannel::new(FixedTagger(vec![span("清水寺", "FACILITY", 0, 0.9)])).unwrap();
        let found = ch.scan("清水寺を訪ねた").unwrap();
        assert_eq!(found[0].category, PlaceCategory::Landmark);
    }
}
