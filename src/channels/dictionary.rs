//! Dictionary channel: exact substring match against the gazetteer.

use super::{passes_surface_filters, Channel};
use crate::gazetteer::Gazetteer;
use crate::mention::{Candidate, ChannelKind};
use crate::Result;
use std::collections::HashSet;

/// Scans for every occurrence of every known gazetteer name and alias.
///
/// No boundary checks: a curated name is trusted even inside a longer
/// kanji run (伊勢 inside 伊勢神宮 is a legitimate candidate; the
/// resolver decides which one survives). Names are tried longest first
/// so that when two spellings share a start offset the compound form is
/// emitted before its components.
pub struct DictionaryChannel {
    gazetteer: &'static Gazetteer,
}

impl DictionaryChannel {
    /// Create a channel over the process-wide gazetteer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            gazetteer: Gazetteer::global()?,
        })
    }
}

impl Channel for DictionaryChannel {
    fn scan(&self, sentence: &str) -> Result<Vec<Candidate>> {
        let mut out = Vec::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for entry in self.gazetteer.dictionary_entries() {
            let mut spellings = vec![entry.name.as_str()];
            spellings.extend(entry.aliases.iter().map(String::as_str));
            for spelling in spellings {
                if !passes_surface_filters(self.gazetteer, spelling) {
                    continue;
                }
                for (start, matched) in sentence.match_indices(spelling) {
                    let end = start + matched.len();
                    if !seen.insert((start, end)) {
                        continue;
                    }
                    out.push(Candidate::new(
                        matched,
                        entry.category.clone(),
                        ChannelKind::Dictionary,
                        entry.base_confidence.get(),
                        start,
                        end,
                    ));
                }
            }
        }
        out.sort_by_key(|c| (c.start, c.end));
        Ok(out)
    }

    fn kind(&self) -> ChannelKind {
        ChannelKind::Dictionary
    }

    fn description(&self) -> &str {
        "gazetteer exact-match"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::PlaceCategory;

    fn scan(sentence: &str) -> Vec<Candidate> {
        DictionaryChannel::new().unwrap().scan(sentence).unwrap()
    }

    #[test]
    fn finds_known_city() {
        let found = scan("横浜へ行った");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "横浜");
        assert_eq!(found[0].category, PlaceCategory::City);
        assert_eq!(found[0].start, 0);
        assert_eq!(found[0].end, "横浜".len());
    }

    #[test]
    fn finds_name_inside_longer_run() {
        // 伊勢 and 伊勢神宮 both match; overlap is the resolver's problem.
        let found = scan("伊勢神宮に参拝した");
        let texts: Vec<_> = found.iter().map(|c| c.text.as_str()).collect();
        assert!(texts.contains(&"伊勢神宮"));
        assert!(texts.contains(&"伊勢"));
    }

    #[test]
    fn finds_alias_surface_form() {
        let found = scan("大坂の商人");
        assert_eq!(found[0].text, "大坂");
        assert_eq!(found[0].category, PlaceCategory::Prefecture);
    }

    #[test]
    fn whitelisted_single_char_matches() {
        let found = scan("柏の駅前");
        assert!(found.iter().any(|c| c.text == "柏"));
    }

    #[test]
    fn excluded_words_never_match() {
        assert!(scan("今日はあそこで").is_empty());
    }

    #[test]
    fn repeated_occurrences_all_reported() {
        let found = scan("東京から東京へ");
        let tokyo: Vec<_> = found.iter().filter(|c| c.text == "東京").collect();
        assert_eq!(tokyo.len(), 2);
    }
}
