//! Context classification: place usage vs. person usage.
//!
//! Works on a 3-sentence window (previous, current, next). Cue tables
//! come from the source corpus; weights are deliberately coarse (+0.10
//! per place cue, +0.15 per person cue) because cue counts saturate
//! quickly in short literary sentences.

use crate::gazetteer::{Gazetteer, HISTORIC_OVERRIDE_CONFIDENCE};
use crate::mention::Candidate;
use crate::types::Confidence;
use crate::Result;

/// Particles/verb stems immediately after a name that mark movement or
/// location.
const PLACE_SUFFIX_CUES: &[&str] = &[
    "へ", "に行", "に向", "に着", "に住", "に帰", "に戻", "から", "まで", "で降", "に泊",
    "を発", "を出",
];

/// Place-usage verbs counted anywhere in the window.
const PLACE_WINDOW_CUES: &[&str] = &[
    "行った", "行く", "向かった", "向かう", "訪れ", "到着", "着いた", "滞在", "住んで", "旅",
    "出発", "帰った", "戻った", "泊まっ", "渡った", "越えた",
];

/// Honorific/title suffixes immediately after a name that mark a person.
const PERSON_TITLE_CUES: &[&str] = &["さん", "君", "氏", "様", "先生", "夫人", "殿", "嬢"];

/// Person-usage verbs counted anywhere in the window.
const PERSON_WINDOW_CUES: &[&str] = &[
    "言った", "言う", "話した", "話す", "笑った", "笑う", "泣いた", "怒った", "思った",
    "答えた", "叫んだ", "呟いた", "頷いた",
];

/// Weight of one place cue.
const PLACE_CUE_WEIGHT: f64 = 0.10;

/// Weight of one person cue.
const PERSON_CUE_WEIGHT: f64 = 0.15;

/// Confidence reported with a surname veto.
const VETO_CONFIDENCE: f64 = 0.8;

/// Confidence reported with an ordinary rejection (including ties).
const REJECT_CONFIDENCE: f64 = 0.7;

/// Classifier outcome for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Place usage, by cue scoring.
    Place,
    /// Place usage, forced by historic-context keywords.
    HistoricPlace,
    /// Rejected: vetoable surname with a person cue present.
    PersonVeto,
    /// Rejected: person evidence outweighed place evidence.
    Person,
    /// Rejected: place evidence below the acceptance threshold.
    Insufficient,
}

impl Verdict {
    /// Whether the candidate survives as a place mention.
    #[must_use]
    pub fn accepted(self) -> bool {
        matches!(self, Verdict::Place | Verdict::HistoricPlace)
    }
}

/// A verdict with the classifier-adjusted confidence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Accept/reject outcome.
    pub verdict: Verdict,
    /// Confidence in the decision: the boosted place score on
    /// acceptance, a fixed rejection confidence otherwise.
    pub confidence: Confidence,
}

/// The 3-sentence context window around a candidate's sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextWindow<'a> {
    /// Sentence before, when the caller has one.
    pub before: Option<&'a str>,
    /// Sentence after, when the caller has one.
    pub after: Option<&'a str>,
}

/// Cue-based place/person classifier.
pub struct Classifier {
    gazetteer: &'static Gazetteer,
}

impl Classifier {
    /// Create a classifier over the process-wide gazetteer.
    pub fn new() -> Result<Self> {
        Ok(Self {
            gazetteer: Gazetteer::global()?,
        })
    }

    /// Classify one resolved candidate in its sentence and window.
    #[must_use]
    pub fn classify(
        &self,
        candidate: &Candidate,
        sentence: &str,
        window: ContextWindow<'_>,
    ) -> Classification {
        let following = &sentence[candidate.end.min(sentence.len())..];

        let canonical = self
            .gazetteer
            .alias(&candidate.text)
            .unwrap_or(&candidate.text);

        // Historic keywords override ordinary scoring: 伊勢 next to 神宮
        // is a place no matter what verbs surround it.
        if let Some(historic) = self.gazetteer.historic(canonical) {
            let keyword_hit = historic
                .keywords
                .iter()
                .any(|k| self.window_contains(sentence, window, k));
            if keyword_hit {
                let base = candidate.confidence.get();
                return Classification {
                    verdict: Verdict::HistoricPlace,
                    confidence: Confidence::saturating(base.max(HISTORIC_OVERRIDE_CONFIDENCE)),
                };
            }
        }

        let person_cues = self.count_person_cues(following, sentence, window);
        let ambiguous = self.gazetteer.ambiguous(canonical);

        if let Some(amb) = ambiguous {
            if amb.is_vetoable() && person_cues > 0 {
                return Classification {
                    verdict: Verdict::PersonVeto,
                    confidence: Confidence::saturating(VETO_CONFIDENCE),
                };
            }
        }

        let place_cues = self.count_place_cues(following, sentence, window);
        let person_prior = ambiguous.map_or(0.0, |a| a.person_prior);

        let place_score = candidate.confidence.get() + PLACE_CUE_WEIGHT * place_cues as f64;
        let person_score = person_prior + PERSON_CUE_WEIGHT * person_cues as f64;

        // Acceptance needs a place majority, nothing more; a tie is
        // resolved against extraction.
        if place_score > person_score {
            Classification {
                verdict: Verdict::Place,
                confidence: Confidence::saturating(place_score),
            }
        } else if person_score >= place_score && person_cues > 0 {
            Classification {
                verdict: Verdict::Person,
                confidence: Confidence::saturating(REJECT_CONFIDENCE),
            }
        } else {
            Classification {
                verdict: Verdict::Insufficient,
                confidence: Confidence::saturating(REJECT_CONFIDENCE),
            }
        }
    }

    fn window_contains(&self, sentence: &str, window: ContextWindow<'_>, needle: &str) -> bool {
        sentence.contains(needle)
            || window.before.is_some_and(|s| s.contains(needle))
            || window.after.is_some_and(|s| s.contains(needle))
    }

    fn count_place_cues(
        &self,
        following: &str,
        sentence: &str,
        window: ContextWindow<'_>,
    ) -> usize {
        let suffix = PLACE_SUFFIX_CUES
            .iter()
            .filter(|cue| following.starts_with(*cue))
            .count();
        let windowed = PLACE_WINDOW_CUES
            .iter()
            .filter(|cue| self.window_contains(sentence, window, cue))
            .count();
        suffix + windowed
    }

    fn count_person_cues(
        &self,
        following: &str,
        sentence: &str,
        window: ContextWindow<'_>,
    ) -> usize {
        let titles = PERSON_TITLE_CUES
            .iter()
            .filter(|cue| following.starts_with(*cue))
            .count();
        let windowed = PERSON_WINDOW_CUES
            .iter()
            .filter(|cue| self.window_contains(sentence, window, cue))
            .count();
        titles + windowed
    }
}
