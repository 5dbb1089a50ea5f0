//! Name normalization: variant folding, alias resolution, structural
//! canonicalization.
//!
//! Normalization is idempotent: the canonical name of a canonical name
//! is itself. Unknown names pass through unchanged at
//! [`Confidence::UNCERTAIN`] rather than being dropped, so the caller
//! always gets a non-empty canonical name.

use crate::gazetteer::{prefecture_base, Gazetteer};
use crate::mention::PlaceCategory;
use crate::types::Confidence;
use crate::Result;
use unicode_normalization::UnicodeNormalization;

/// Result of normalizing one surface form.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Canonical primary name. Never empty.
    pub canonical_name: String,
    /// Category after normalization (may refine the channel's guess).
    pub category: PlaceCategory,
    /// Prefecture, when the canonical form maps to exactly one.
    pub prefecture: Option<String>,
    /// Confidence in the normalization itself: certain for table-backed
    /// and structural results, uncertain for pass-through.
    pub confidence: Confidence,
}

/// Table- and structure-driven normalizer.
pub struct Normalizer {
    gazetteer: &'static Gazetteer,
}

impl Normalizer {
    /// Create a normalizer over the process-wide gazetteer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            gazetteer: Gazetteer::global()?,
        })
    }

    /// Normalize one surface form, refining the category when the name
    /// resolves through a table or a structural rule.
    #[must_use]
    pub fn normalize(&self, text: &str, category: &PlaceCategory) -> Normalized {
        let folded = fold_variants(text);

        // Alias table wins over everything: 勢州 means 伊勢 regardless of
        // what the surface structure suggests.
        if let Some(canonical) = self.gazetteer.alias(&folded) {
            let entry = self.gazetteer.lookup(canonical);
            return Normalized {
                canonical_name: canonical.to_string(),
                category: entry.map_or_else(|| category.clone(), |e| e.category.clone()),
                prefecture: entry.and_then(|e| e.prefecture.clone()),
                confidence: Confidence::CERTAIN,
            };
        }

        if let Some(entry) = self.gazetteer.lookup(&folded) {
            return Normalized {
                canonical_name: entry.name.clone(),
                category: entry.category.clone(),
                prefecture: entry.prefecture.clone(),
                confidence: Confidence::CERTAIN,
            };
        }

        if *category == PlaceCategory::CompoundAdmin {
            if let Some((prefecture, municipality)) = split_compound(&folded) {
                return Normalized {
                    canonical_name: municipality.to_string(),
                    category: PlaceCategory::CompoundAdmin,
                    prefecture: Some(prefecture.to_string()),
                    confidence: Confidence::CERTAIN,
                };
            }
        }

        if let Some(normalized) = self.structural(&folded) {
            return normalized;
        }

        Normalized {
            canonical_name: folded,
            category: category.clone(),
            prefecture: None,
            confidence: Confidence::UNCERTAIN,
        }
    }

    /// Suffix-driven canonicalization for names absent from the tables.
    fn structural(&self, folded: &str) -> Option<Normalized> {
        // Strip 都/府/県 only when the remainder is a real prefecture
        // base; 甲府 must not become 甲.
        if folded.ends_with(['都', '府', '県']) {
            let base = prefecture_base(folded);
            if base != folded && self.gazetteer.prefecture(base).is_some() {
                return Some(Normalized {
                    canonical_name: base.to_string(),
                    category: PlaceCategory::Prefecture,
                    prefecture: Some(folded.to_string()),
                    confidence: Confidence::CERTAIN,
                });
            }
        }

        let category = if folded.ends_with(['市', '区', '町', '村']) {
            PlaceCategory::City
        } else if folded.ends_with('郡') {
            PlaceCategory::District
        } else if folded.ends_with(['山', '川', '湖', '海', '峠', '谷', '島', '岬', '浦', '崎']) {
            PlaceCategory::NaturalFeature
        } else if folded.ends_with(['寺', '宮', '橋', '駅']) || folded.ends_with("神社") {
            PlaceCategory::Landmark
        } else {
            return None;
        };

        if folded.chars().count() < 2 {
            return None;
        }
        Some(Normalized {
            canonical_name: folded.to_string(),
            category,
            prefecture: None,
            confidence: Confidence::CERTAIN,
        })
    }
}

/// Fold width and orthographic variants onto one spelling: NFKC
/// (half-width katakana, full-width Latin and digits) plus the small-kana
/// possessive marker. Every table lookup and merge key goes through this.
pub(crate) fn fold_variants(text: &str) -> String {
    text.nfkc()
        .map(|c| match c {
            'ヶ' | 'ヵ' => 'が',
            _ => c,
        })
        .collect()
}

/// Split a compound admin name at its prefecture suffix
/// (東京都渋谷区 → (東京都, 渋谷区)).
fn split_compound(text: &str) -> Option<(&str, &str)> {
    for (idx, c) in text.char_indices() {
        if matches!(c, '都' | '道' | '府' | '県') && idx > 0 {
            let split = idx + c.len_utf8();
            let rest = &text[split..];
            if !rest.is_empty() && rest.ends_with(['市', '区', '町', '村']) {
                return Some((&text[..split], rest));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new().unwrap()
    }

    #[test]
    fn alias_resolves_to_canonical() {
        let n = normalizer().normalize("勢州", &PlaceCategory::Unknown);
        assert_eq!(n.canonical_name, "伊勢");
        assert_eq!(n.category, PlaceCategory::HistoricProvince);
        assert_eq!(n.confidence, Confidence::CERTAIN);
    }

    #[test]
    fn prefecture_suffix_stripped_when_base_is_known() {
        let n = normalizer().normalize("三重県", &PlaceCategory::Prefecture);
        assert_eq!(n.canonical_name, "三重");
        assert_eq!(n.category, PlaceCategory::Prefecture);
    }

    #[test]
    fn false_suffix_is_left_alone() {
        // 甲府 ends in 府 but 甲 is not a prefecture.
        let n = normalizer().normalize("甲府", &PlaceCategory::City);
        assert_eq!(n.canonical_name, "甲府");
    }

    #[test]
    fn compound_canonicalizes_to_municipality() {
        let n = normalizer().normalize("東京都渋谷区", &PlaceCategory::CompoundAdmin);
        assert_eq!(n.canonical_name, "渋谷区");
        assert_eq!(n.category, PlaceCategory::CompoundAdmin);
        assert_eq!(n.prefecture.as_deref(), Some("東京都"));
    }

    #[test]
    fn table_hits_carry_their_prefecture() {
        let n = normalizer().normalize("横浜", &PlaceCategory::City);
        assert_eq!(n.prefecture.as_deref(), Some("神奈川県"));
    }

    #[test]
    fn small_kana_variants_fold() {
        let n = normalizer().normalize("関ヶ原", &PlaceCategory::Unknown);
        assert_eq!(n.canonical_name, "関が原");
    }

    #[test]
    fn half_width_katakana_folds_to_full_width() {
        let n = normalizer().normalize("ﾊﾟﾘ", &PlaceCategory::Foreign);
        assert_eq!(n.canonical_name, "パリ");
        assert_eq!(n.category, PlaceCategory::Foreign);
        assert_eq!(n.confidence, Confidence::CERTAIN);
    }

    #[test]
    fn width_variants_share_one_folded_spelling() {
        assert_eq!(fold_variants("ﾊﾟﾘ"), fold_variants("パリ"));
        assert_eq!(fold_variants("１２３"), "123");
    }

    #[test]
    fn unknown_passes_through_uncertain() {
        let n = normalizer().normalize("架空郷", &PlaceCategory::Unknown);
        assert_eq!(n.canonical_name, "架空郷");
        assert_eq!(n.category, PlaceCategory::Unknown);
        assert_eq!(n.confidence, Confidence::UNCERTAIN);
    }

    #[test]
    fn structural_suffix_refines_category() {
        let n = normalizer().normalize("架空川", &PlaceCategory::Unknown);
        assert_eq!(n.category, PlaceCategory::NaturalFeature);
        assert_eq!(n.confidence, Confidence::CERTAIN);
    }

    #[test]
    fn normalization_is_idempotent() {
        let nz = normalizer();
        for (text, cat) in [
            ("勢州", PlaceCategory::Unknown),
            ("三重県", PlaceCategory::Prefecture),
            ("東京都渋谷区", PlaceCategory::CompoundAdmin),
            ("架空郷", PlaceCategory::Unknown),
            ("隅田川", PlaceCategory::NaturalFeature),
        ] {
            let once = nz.normalize(text, &cat);
            let twice = nz.normalize(&once.canonical_name, &once.category);
            assert_eq!(once.canonical_name, twice.canonical_name, "{text}");
        }
    }
}
