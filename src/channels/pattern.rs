//! Pattern channel: productive-suffix rules over kanji runs.

use super::{is_kanji, passes_surface_filters, Channel};
use crate::gazetteer::{Gazetteer, REJECT_PREFIX_CHARS, REJECT_SUFFIX_CHARS};
use crate::mention::{Candidate, ChannelKind, PlaceCategory};
use crate::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// One suffix rule.
///
/// `generic` rules (bare suffix productions) get the extra stem
/// rejection checks; the administrative rules are precise enough that
/// those checks would only cause false negatives (三重県 starts with a
/// numeral kanji and must still match).
struct Rule {
    regex: &'static Lazy<Regex>,
    category: PlaceCategory,
    confidence: f64,
    generic: bool,
}

static COMPOUND_ADMIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[一-龯々]{1,3}[都道府県][一-龯々]{1,6}[市区町村]").expect("compound admin regex")
});
static PREFECTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[一-龯々]{1,3}[都道府県]").expect("prefecture regex"));
static MUNICIPALITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[一-龯々]{1,6}[市区町村]").expect("municipality regex"));
static DISTRICT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[一-龯々]{1,5}郡").expect("district regex"));
static NATURAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[一-龯々]{1,4}[山川湖海峠谷野原島岬浦崎]").expect("natural feature regex")
});
static LANDMARK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[一-龯々]{1,4}(?:神宮|神社|大社|[寺宮橋駅])").expect("landmark regex")
});

/// Rules in descending precision order. Confidences are rule precision
/// measured on the source corpus.
static RULES: &[Rule] = &[
    Rule {
        regex: &COMPOUND_ADMIN,
        category: PlaceCategory::CompoundAdmin,
        confidence: 0.98,
        generic: false,
    },
    Rule {
        regex: &PREFECTURE,
        category: PlaceCategory::Prefecture,
        confidence: 0.95,
        generic: false,
    },
    Rule {
        regex: &MUNICIPALITY,
        category: PlaceCategory::City,
        confidence: 0.85,
        generic: true,
    },
    Rule {
        regex: &DISTRICT,
        category: PlaceCategory::District,
        confidence: 0.80,
        generic: true,
    },
    Rule {
        regex: &NATURAL,
        category: PlaceCategory::NaturalFeature,
        confidence: 0.75,
        generic: true,
    },
    Rule {
        regex: &LANDMARK,
        category: PlaceCategory::Landmark,
        confidence: 0.70,
        generic: true,
    },
];

/// Scans with suffix rules and enforces kanji-run boundaries.
///
/// The regex engine has no lookaround, so the boundary constraint (a
/// match must not sit inside a longer kanji run) is checked against the
/// neighboring characters after each hit.
pub struct PatternChannel {
    gazetteer: &'static Gazetteer,
}

impl PatternChannel {
    /// Create a channel over the process-wide gazetteer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            gazetteer: Gazetteer::global()?,
        })
    }

    fn at_run_boundary(sentence: &str, start: usize, end: usize) -> bool {
        let before = sentence[..start].chars().next_back();
        let after = sentence[end..].chars().next();
        !before.is_some_and(is_kanji) && !after.is_some_and(is_kanji)
    }

    fn stem_rejected(surface: &str) -> bool {
        let mut chars = surface.chars();
        let first = chars.next();
        if first.is_some_and(|c| REJECT_PREFIX_CHARS.contains(&c)) {
            return true;
        }
        // The char before the category suffix marks organization/time
        // words the suffix rules would otherwise accept (支店前, 午後...).
        let stem_last = surface.chars().rev().nth(1);
        stem_last.is_some_and(|c| REJECT_SUFFIX_CHARS.contains(&c))
    }
}

impl Channel for PatternChannel {
    fn scan(&self, sentence: &str) -> Result<Vec<Candidate>> {
        let mut out = Vec::new();
        let mut seen: HashSet<(usize, usize, u8)> = HashSet::new();

        for rule in RULES {
            for m in rule.regex.find_iter(sentence) {
                let (start, end) = (m.start(), m.end());
                if !Self::at_run_boundary(sentence, start, end) {
                    continue;
                }
                let surface = m.as_str();
                if !passes_surface_filters(self.gazetteer, surface) {
                    continue;
                }
                if rule.generic && Self::stem_rejected(surface) {
                    continue;
                }
                if !seen.insert((start, end, rule.category.priority())) {
                    continue;
                }
                out.push(Candidate::new(
                    surface,
                    rule.category.clone(),
                    ChannelKind::Pattern,
                    rule.confidence,
                    start,
                    end,
                ));
            }
        }
        out.sort_by_key(|c| (c.start, c.end));
        Ok(out)
    }

    fn kind(&self) -> ChannelKind {
        ChannelKind::Pattern
    }

    fn description(&self) -> &str {
        "suffix patterns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(sentence: &str) -> Vec<Candidate> {
        PatternChannel::new().unwrap().scan(sentence).unwrap()
    }

    #[test]
    fn compound_admin_matches_whole_span() {
        let found = scan("東京都渋谷区に住む");
        let compound = found
            .iter()
            .find(|c| c.category == PlaceCategory::CompoundAdmin)
            .unwrap();
        assert_eq!(compound.text, "東京都渋谷区");
        assert!((compound.confidence.get() - 0.98).abs() < 1e-9);
    }

    #[test]
    fn contained_prefecture_fails_boundary_check() {
        // 東京都 inside 東京都渋谷区 sits mid-run and must not match alone.
        let found = scan("東京都渋谷区に住む");
        assert!(!found
            .iter()
            .any(|c| c.text == "東京都" && c.category == PlaceCategory::Prefecture));
    }

    #[test]
    fn standalone_prefecture_matches() {
        let found = scan("三重県に向かった");
        let pref = found
            .iter()
            .find(|c| c.category == PlaceCategory::Prefecture)
            .unwrap();
        assert_eq!(pref.text, "三重県");
        assert!((pref.confidence.get() - 0.95).abs() < 1e-9);
    }

    #[test]
    fn natural_feature_suffix() {
        let found = scan("隅田川を渡る");
        let nat = found
            .iter()
            .find(|c| c.category == PlaceCategory::NaturalFeature)
            .unwrap();
        assert_eq!(nat.text, "隅田川");
        assert!((nat.confidence.get() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn district_suffix() {
        let found = scan("愛甲郡の村");
        let d = found
            .iter()
            .find(|c| c.category == PlaceCategory::District)
            .unwrap();
        assert_eq!(d.text, "愛甲郡");
    }

    #[test]
    fn landmark_suffix() {
        let found = scan("善光寺へ参る");
        assert!(found
            .iter()
            .any(|c| c.text == "善光寺" && c.category == PlaceCategory::Landmark));
    }

    #[test]
    fn generic_noun_excluded() {
        // 山道 is on the generic exclusion list even though 道 ends a run.
        let found = scan("山道を歩く");
        assert!(!found.iter().any(|c| c.text == "山道"));
    }

    #[test]
    fn numeric_stem_rejected_for_generic_rules() {
        let found = scan("三本川のほとり");
        assert!(!found.iter().any(|c| c.text == "三本川"));
    }

    #[test]
    fn time_stem_rejected() {
        let found = scan("午後駅で待つ");
        assert!(!found.iter().any(|c| c.text.ends_with('駅')));
    }
}
