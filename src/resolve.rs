//! Overlap resolution and cross-channel merging.
//!
//! Resolution is greedy and deterministic: candidates are ranked by
//! (category priority, confidence, span length, start offset) and
//! accepted in order unless they intersect an already-accepted span.
//! Category priority leads the key so that 東京都渋谷区 always beats the
//! contained 東京都, and a curated historic name beats a generic suffix
//! hit on the same characters.

use crate::mention::{Candidate, ExtractionMethod};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A candidate that survived resolution, with channel provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedCandidate {
    /// The winning candidate.
    pub candidate: Candidate,
    /// Every channel that proposed this spelling.
    pub method: ExtractionMethod,
}

fn rank(a: &Candidate, b: &Candidate) -> Ordering {
    a.category
        .priority()
        .cmp(&b.category.priority())
        .then_with(|| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| b.span_len().cmp(&a.span_len()))
        .then_with(|| a.start.cmp(&b.start))
}

/// Drop overlapping candidates within one channel's output, keeping the
/// greedy winners. Output is sorted by start offset.
#[must_use]
pub fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(rank);
    let mut accepted: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for cand in candidates {
        if !accepted.iter().any(|a| a.overlaps(&cand)) {
            accepted.push(cand);
        }
    }
    accepted.sort_by_key(|c| (c.start, c.end));
    accepted
}

/// Merge per-channel winner lists into one disjoint candidate set.
///
/// Candidates group by folded spelling, so a sentence yields at most one
/// mention per distinct place name. Per group the best proposal wins
/// (highest confidence, channel priority breaking ties, then earliest
/// occurrence) and the contributing channels are unioned. The group
/// winners then go through overlap resolution once more, since channels
/// resolve independently and may still disagree on boundaries (伊勢 from
/// the dictionary against 伊勢神宮 from a pattern rule).
#[must_use]
pub fn merge_channels(per_channel: Vec<Vec<Candidate>>) -> Vec<MergedCandidate> {
    let mut by_name: HashMap<String, (Candidate, ExtractionMethod)> = HashMap::new();

    for winners in per_channel.into_iter().map(resolve_overlaps) {
        for cand in winners {
            let key = crate::normalize::fold_variants(&cand.text);
            match by_name.get_mut(&key) {
                None => {
                    let method = ExtractionMethod::single(cand.channel);
                    by_name.insert(key, (cand, method));
                }
                Some((best, method)) => {
                    method.add(cand.channel);
                    if replaces(&cand, best) {
                        *best = cand;
                    }
                }
            }
        }
    }

    let mut merged: Vec<(Candidate, ExtractionMethod)> = by_name.into_values().collect();
    let survivors = resolve_overlaps(merged.iter().map(|(c, _)| c.clone()).collect());

    merged.retain(|(c, _)| survivors.iter().any(|s| s.start == c.start && s.end == c.end));
    merged.sort_by_key(|(c, _)| (c.start, c.end));
    merged
        .into_iter()
        .map(|(candidate, method)| MergedCandidate { candidate, method })
        .collect()
}

/// Whether `challenger` becomes the group representative: higher
/// confidence wins, channel priority breaks ties, then the earliest
/// occurrence. The representative keeps its own score and span whole.
fn replaces(challenger: &Candidate, incumbent: &Candidate) -> bool {
    match challenger.confidence.partial_cmp(&incumbent.confidence) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Less) | None => false,
        Some(Ordering::Equal) => {
            match challenger.channel.priority().cmp(&incumbent.channel.priority()) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => challenger.start < incumbent.start,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::{ChannelKind, PlaceCategory};

    fn cand(
        text: &str,
        category: PlaceCategory,
        channel: ChannelKind,
        conf: f64,
        start: usize,
        end: usize,
    ) -> Candidate {
        Candidate::new(text, category, channel, conf, start, end)
    }

    #[test]
    fn compound_beats_contained_prefecture() {
        let resolved = resolve_overlaps(vec![
            cand("東京都", PlaceCategory::Prefecture, ChannelKind::Pattern, 0.95, 0, 9),
            cand(
                "東京都渋谷区",
                PlaceCategory::CompoundAdmin,
                ChannelKind::Pattern,
                0.98,
                0,
                18,
            ),
            cand("渋谷区", PlaceCategory::City, ChannelKind::Pattern, 0.85, 9, 18),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].text, "東京都渋谷区");
    }

    #[test]
    fn category_priority_beats_confidence() {
        // A prefecture at lower confidence still wins the span.
        let resolved = resolve_overlaps(vec![
            cand("大阪", PlaceCategory::Prefecture, ChannelKind::Dictionary, 0.80, 0, 6),
            cand("大阪", PlaceCategory::NaturalFeature, ChannelKind::Pattern, 0.99, 0, 6),
        ]);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].category, PlaceCategory::Prefecture);
    }

    #[test]
    fn disjoint_spans_all_survive() {
        let resolved = resolve_overlaps(vec![
            cand("東京", PlaceCategory::Prefecture, ChannelKind::Dictionary, 0.95, 0, 6),
            cand("京都", PlaceCategory::Prefecture, ChannelKind::Dictionary, 0.95, 15, 21),
        ]);
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].start < resolved[1].start);
    }

    #[test]
    fn merge_unions_methods_on_identical_span() {
        let merged = merge_channels(vec![
            vec![cand("横浜", PlaceCategory::City, ChannelKind::Dictionary, 0.95, 0, 6)],
            vec![cand("横浜", PlaceCategory::City, ChannelKind::Pattern, 0.85, 0, 6)],
        ]);
        assert_eq!(merged.len(), 1);
        let m = &merged[0];
        assert_eq!(m.method.to_string(), "dictionary+pattern");
        assert!((m.candidate.confidence.get() - 0.95).abs() < 1e-9);
        assert_eq!(m.candidate.channel, ChannelKind::Dictionary);
    }

    #[test]
    fn merge_resolves_cross_channel_boundary_disagreement() {
        // Dictionary proposes both 伊勢神宮 and 伊勢; pattern proposes
        // 伊勢神宮 only. The historic name outranks the landmark.
        let merged = merge_channels(vec![
            vec![
                cand(
                    "伊勢神宮",
                    PlaceCategory::Landmark,
                    ChannelKind::Dictionary,
                    0.90,
                    0,
                    12,
                ),
                cand(
                    "伊勢",
                    PlaceCategory::HistoricProvince,
                    ChannelKind::Dictionary,
                    0.85,
                    0,
                    6,
                ),
            ],
            vec![cand(
                "伊勢神宮",
                PlaceCategory::Landmark,
                ChannelKind::Pattern,
                0.70,
                0,
                12,
            )],
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].candidate.text, "伊勢");
        assert_eq!(merged[0].candidate.category, PlaceCategory::HistoricProvince);
    }

    #[test]
    fn group_representative_chosen_by_confidence() {
        // Same spelling from two channels at different spans: the more
        // confident proposal wins whole, keeping its own span, channel
        // and score.
        let merged = merge_channels(vec![
            vec![cand("青山", PlaceCategory::City, ChannelKind::Dictionary, 0.80, 0, 6)],
            vec![cand("青山", PlaceCategory::Unknown, ChannelKind::Tagger, 0.90, 12, 18)],
        ]);
        assert_eq!(merged.len(), 1);
        let m = &merged[0];
        assert_eq!(m.candidate.channel, ChannelKind::Tagger);
        assert_eq!(m.candidate.start, 12);
        assert!((m.candidate.confidence.get() - 0.90).abs() < 1e-9);
        assert_eq!(m.method.to_string(), "dictionary+tagger");
    }

    #[test]
    fn repeated_name_collapses_to_first_occurrence() {
        let merged = merge_channels(vec![vec![
            cand("東京", PlaceCategory::Prefecture, ChannelKind::Dictionary, 0.95, 0, 6),
            cand("東京", PlaceCategory::Prefecture, ChannelKind::Dictionary, 0.95, 18, 24),
        ]]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].candidate.start, 0);
    }

    #[test]
    fn deterministic_for_shuffled_input() {
        let a = vec![
            cand("東京", PlaceCategory::Prefecture, ChannelKind::Dictionary, 0.95, 0, 6),
            cand("東京湾", PlaceCategory::NaturalFeature, ChannelKind::Pattern, 0.75, 0, 9),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(resolve_overlaps(a), resolve_overlaps(b));
    }
}
