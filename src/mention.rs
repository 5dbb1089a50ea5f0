//! Core data types: extraction candidates and resolved place mentions.

use crate::types::Confidence;
use serde::{Deserialize, Serialize};

/// Category of a place reference.
///
/// Categories double as the priority key for overlap resolution: a more
/// specific administrative category always beats a more generic pattern
/// category on the same span, regardless of confidence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceCategory {
    /// Prefecture + municipality in one span (東京都渋谷区).
    CompoundAdmin,
    /// Prefecture (東京都, 京都府, 三重県).
    Prefecture,
    /// Municipality or well-known city/district name (横浜, 渋谷区).
    City,
    /// Old provincial name (伊勢, 武蔵, 薩摩).
    HistoricProvince,
    /// Foreign place frequent in literary text (パリ, 上海).
    Foreign,
    /// County (郡) pattern match.
    District,
    /// Temple, shrine, station, bridge or other named landmark.
    Landmark,
    /// Natural feature by productive suffix (〜川, 〜山, 〜湖).
    NaturalFeature,
    /// Category could not be determined.
    Unknown,
}

impl PlaceCategory {
    /// Resolution priority, ascending (0 wins over 1).
    ///
    /// Compound admin names are the most specific thing the scanner can
    /// produce and must never lose to one of their own components.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            PlaceCategory::CompoundAdmin => 0,
            PlaceCategory::Prefecture => 1,
            PlaceCategory::City => 2,
            PlaceCategory::HistoricProvince => 3,
            PlaceCategory::Foreign => 4,
            PlaceCategory::District => 5,
            PlaceCategory::Landmark => 6,
            PlaceCategory::NaturalFeature => 7,
            PlaceCategory::Unknown => 8,
        }
    }

    /// Stable label string (used in serialized output and logs).
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            PlaceCategory::CompoundAdmin => "compound_admin",
            PlaceCategory::Prefecture => "prefecture",
            PlaceCategory::City => "city",
            PlaceCategory::HistoricProvince => "historic_province",
            PlaceCategory::Foreign => "foreign",
            PlaceCategory::District => "district",
            PlaceCategory::Landmark => "landmark",
            PlaceCategory::NaturalFeature => "natural_feature",
            PlaceCategory::Unknown => "unknown",
        }
    }

    /// Parse from a label string. Unknown labels map to `Unknown`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "compound_admin" => PlaceCategory::CompoundAdmin,
            "prefecture" => PlaceCategory::Prefecture,
            "city" => PlaceCategory::City,
            "historic_province" => PlaceCategory::HistoricProvince,
            "foreign" => PlaceCategory::Foreign,
            "district" => PlaceCategory::District,
            "landmark" => PlaceCategory::Landmark,
            "natural_feature" => PlaceCategory::NaturalFeature,
            _ => PlaceCategory::Unknown,
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// One independent extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Exact match against the gazetteer name/alias sets.
    Dictionary,
    /// Productive-suffix regex rules with boundary checks.
    Pattern,
    /// External morphological tagger adapter.
    Tagger,
}

impl ChannelKind {
    /// Merge priority, ascending (dictionary beats pattern beats tagger
    /// on equal confidence).
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            ChannelKind::Dictionary => 0,
            ChannelKind::Pattern => 1,
            ChannelKind::Tagger => 2,
        }
    }

    /// Short name used in extraction-method tags.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Dictionary => "dictionary",
            ChannelKind::Pattern => "pattern",
            ChannelKind::Tagger => "tagger",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which channel(s) contributed a resolved mention.
///
/// Kept in channel-priority order; renders as `"dictionary+pattern"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionMethod(Vec<ChannelKind>);

impl ExtractionMethod {
    /// Create from a single channel.
    #[must_use]
    pub fn single(kind: ChannelKind) -> Self {
        Self(vec![kind])
    }

    /// Record another contributing channel (idempotent).
    pub fn add(&mut self, kind: ChannelKind) {
        if !self.0.contains(&kind) {
            self.0.push(kind);
            self.0.sort_by_key(ChannelKind::priority);
        }
    }

    /// Contributing channels, in priority order.
    #[must_use]
    pub fn channels(&self) -> &[ChannelKind] {
        &self.0
    }

    /// True if the given channel contributed.
    #[must_use]
    pub fn contains(&self, kind: ChannelKind) -> bool {
        self.0.contains(&kind)
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ChannelKind::as_str)
            .collect::<Vec<_>>()
            .join("+");
        write!(f, "{joined}")
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One unresolved span+category+confidence proposal from a single
/// extraction channel.
///
/// Offsets are byte offsets into the sentence (what `regex` and
/// `str::find` return); length rules elsewhere count codepoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Matched surface form.
    pub text: String,
    /// Category proposed by the channel.
    pub category: PlaceCategory,
    /// Channel that produced this candidate.
    pub channel: ChannelKind,
    /// Channel-local confidence.
    pub confidence: Confidence,
    /// Start byte offset in the sentence.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Candidate {
    /// Create a new candidate.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        category: PlaceCategory,
        channel: ChannelKind,
        confidence: f64,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            text: text.into(),
            category,
            channel,
            confidence: Confidence::saturating(confidence),
            start,
            end,
        }
    }

    /// Span length in bytes.
    #[must_use]
    pub fn span_len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Surface length in Unicode codepoints.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if this candidate's span intersects another's.
    #[must_use]
    pub fn overlaps(&self, other: &Candidate) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }
}

/// A resolved, classified, normalized place reference, ready for
/// persistence by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMention {
    /// Normalized primary identity of the place. Never empty: falls back
    /// to `original_text` when normalization has no rule.
    pub canonical_name: String,
    /// Surface form as matched in the sentence.
    pub original_text: String,
    /// Final category after normalization.
    pub category: PlaceCategory,
    /// Composed confidence (extraction x classification).
    pub confidence: Confidence,
    /// Channel(s) that produced the underlying candidate.
    pub extraction_method: ExtractionMethod,
    /// Neighboring sentence before, if the caller supplied one.
    pub context_before: Option<String>,
    /// Neighboring sentence after, if the caller supplied one.
    pub context_after: Option<String>,
    /// Coordinates, when any geocode tier produced an in-bounds hit.
    pub coordinates: Option<GeoPoint>,
    /// Full geocode provenance for the coordinates.
    pub geocode: Option<crate::geocode::GeocodeResult>,
    /// Start byte offset of the original span in the sentence.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl PlaceMention {
    /// Check if this mention's original span intersects another's.
    #[must_use]
    pub fn overlaps(&self, other: &PlaceMention) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }
}
