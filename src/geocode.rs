//! Tiered geocoding.
//!
//! Coordinates come from the curated tables first and an external
//! service last. Every hit is bounds-checked: a domestic name that
//! geocodes outside the Japan bounding box is treated as a miss and the
//! chain keeps going, because external services happily resolve kanji
//! strings to places in other countries.

use crate::gazetteer::Gazetteer;
use crate::mention::{GeoPoint, PlaceCategory};
use crate::types::Confidence;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Confidence penalty for a partial (substring) table match.
const PARTIAL_MATCH_PENALTY: f64 = 0.3;

/// Floor for partial-match confidence after the penalty.
const PARTIAL_MATCH_FLOOR: f64 = 0.3;

/// Confidence assigned to external-service hits.
const EXTERNAL_CONFIDENCE: f64 = 0.6;

/// Default number of attempts against the external service.
pub(crate) const DEFAULT_EXTERNAL_RETRIES: u32 = 3;

const BACKOFF_BASE: Duration = Duration::from_millis(10);

/// An inclusive lat/lng rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge.
    pub min_latitude: f64,
    /// Northern edge.
    pub max_latitude: f64,
    /// Western edge.
    pub min_longitude: f64,
    /// Eastern edge.
    pub max_longitude: f64,
}

impl BoundingBox {
    /// The Japanese archipelago.
    pub const JAPAN: Self = Self {
        min_latitude: 24.0,
        max_latitude: 46.0,
        min_longitude: 123.0,
        max_longitude: 146.0,
    };

    /// Whole-world sanity bounds.
    pub const WORLD: Self = Self {
        min_latitude: -90.0,
        max_latitude: 90.0,
        min_longitude: -180.0,
        max_longitude: 180.0,
    };

    /// Whether a point lies inside this box.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}

/// Which tier produced the coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeocodeSource {
    /// Curated city/district table.
    CityTable,
    /// Prefecture table.
    PrefectureTable,
    /// Historic-province table.
    HistoricTable,
    /// Landmark table.
    LandmarkTable,
    /// Foreign-place table.
    ForeignTable,
    /// Substring match against a curated entry.
    PartialMatch,
    /// External geocoding service.
    External,
}

/// Coordinates with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// The canonical name that was resolved.
    pub canonical_name: String,
    /// The resolved point.
    pub point: GeoPoint,
    /// Tier that produced it.
    pub source: GeocodeSource,
    /// Tier-specific confidence.
    pub confidence: Confidence,
    /// Prefecture (or country) recorded on the matching table entry.
    pub prefecture: Option<String>,
    /// The table entry or query string that actually matched; differs
    /// from `canonical_name` for partial matches, historic names (where
    /// it carries the modern mapping) and fallback queries.
    pub matched_name: String,
}

/// An external geocoding backend (the last tier).
pub trait GeocodingService: Send + Sync {
    /// Resolve a free-form query to coordinates, `Ok(None)` for a clean
    /// miss. `region_hint` narrows the search (e.g. 日本 for domestic
    /// names); backends may ignore it.
    fn geocode(&self, query: &str, region_hint: Option<&str>) -> Result<Option<GeoPoint>>;

    /// Backend name for logs.
    fn name(&self) -> &str;
}

/// The tier chain.
pub struct Geocoder {
    gazetteer: &'static Gazetteer,
    external: Option<Box<dyn GeocodingService>>,
    retries: u32,
}

impl Geocoder {
    /// Table-only geocoder.
    pub fn new() -> Result<Self> {
        Ok(Self {
            gazetteer: Gazetteer::global()?,
            external: None,
            retries: DEFAULT_EXTERNAL_RETRIES,
        })
    }

    /// Add an external service as the final tier.
    #[must_use]
    pub fn with_external(mut self, service: Box<dyn GeocodingService>, retries: u32) -> Self {
        self.external = Some(service);
        self.retries = retries.max(1);
        self
    }

    /// Resolve a canonical name through the tiers.
    ///
    /// Tier order: the category's own table first, then the remaining
    /// tables, then partial matches, then the external service. Returns
    /// `None` when every tier misses; geocoding failure never fails the
    /// mention.
    #[must_use]
    pub fn resolve(&self, name: &str, category: &PlaceCategory) -> Option<GeocodeResult> {
        let bounds = self.bounds_for(category);

        if let Some(result) = self.table_lookup(name, category) {
            return Some(result);
        }
        if let Some(result) = self.partial_lookup(name, bounds) {
            return Some(result);
        }
        self.external_lookup(name, bounds)
    }

    fn table_result(name: &str, entry: &crate::gazetteer::GazetteerEntry, source: GeocodeSource)
        -> Option<GeocodeResult> {
        entry.coordinates.map(|point| GeocodeResult {
            canonical_name: name.to_string(),
            point,
            source,
            confidence: entry.base_confidence,
            prefecture: entry.prefecture.clone(),
            matched_name: entry.name.clone(),
        })
    }

    fn bounds_for(&self, category: &PlaceCategory) -> BoundingBox {
        if *category == PlaceCategory::Foreign {
            BoundingBox::WORLD
        } else {
            BoundingBox::JAPAN
        }
    }

    fn table_lookup(&self, name: &str, category: &PlaceCategory) -> Option<GeocodeResult> {
        // Historic names shadow modern ones (伊勢 the province, not the
        // modern city hall), so their table goes first for that category.
        if *category == PlaceCategory::HistoricProvince {
            if let Some(result) = self.historic_lookup(name) {
                return Some(result);
            }
        }

        for (entry, source) in [
            (self.gazetteer.city(name), GeocodeSource::CityTable),
            (self.gazetteer.prefecture(name), GeocodeSource::PrefectureTable),
        ] {
            if let Some(entry) = entry {
                if let Some(result) = Self::table_result(name, entry, source) {
                    return Some(result);
                }
            }
        }

        if let Some(result) = self.historic_lookup(name) {
            return Some(result);
        }

        for (entry, source) in [
            (self.gazetteer.landmark(name), GeocodeSource::LandmarkTable),
            (self.gazetteer.foreign(name), GeocodeSource::ForeignTable),
        ] {
            if let Some(entry) = entry {
                if let Some(result) = Self::table_result(name, entry, source) {
                    return Some(result);
                }
            }
        }
        None
    }

    fn historic_lookup(&self, name: &str) -> Option<GeocodeResult> {
        self.gazetteer.historic(name).map(|h| GeocodeResult {
            canonical_name: name.to_string(),
            point: h.coordinates,
            source: GeocodeSource::HistoricTable,
            confidence: Confidence::saturating(crate::gazetteer::HISTORIC_OVERRIDE_CONFIDENCE),
            prefecture: None,
            matched_name: h.modern_name.clone(),
        })
    }

    fn partial_lookup(&self, name: &str, bounds: BoundingBox) -> Option<GeocodeResult> {
        let mut best: Option<GeocodeResult> = None;
        for entry in self.gazetteer.partial_matches(name) {
            let Some(point) = entry.coordinates else {
                continue;
            };
            if !bounds.contains(point) {
                continue;
            }
            let confidence = Confidence::saturating(
                (entry.base_confidence.get() - PARTIAL_MATCH_PENALTY).max(PARTIAL_MATCH_FLOOR),
            );
            let candidate = GeocodeResult {
                canonical_name: name.to_string(),
                point,
                source: GeocodeSource::PartialMatch,
                confidence,
                prefecture: entry.prefecture.clone(),
                matched_name: entry.name.clone(),
            };
            let better = match &best {
                None => true,
                Some(b) => candidate.confidence > b.confidence,
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }

    fn external_lookup(&self, name: &str, bounds: BoundingBox) -> Option<GeocodeResult> {
        let service = self.external.as_deref()?;
        let region_hint = (bounds == BoundingBox::JAPAN).then_some("日本");
        for query in fallback_queries(name) {
            match self.query_with_retries(service, &query, region_hint) {
                Some(point) if bounds.contains(point) => {
                    return Some(GeocodeResult {
                        canonical_name: name.to_string(),
                        point,
                        source: GeocodeSource::External,
                        confidence: Confidence::saturating(EXTERNAL_CONFIDENCE),
                        prefecture: None,
                        matched_name: query,
                    });
                }
                Some(point) => {
                    log::debug!(
                        "{query}: external hit ({}, {}) out of bounds, trying next query",
                        point.latitude,
                        point.longitude
                    );
                }
                None => {}
            }
        }
        None
    }

    fn query_with_retries(
        &self,
        service: &dyn GeocodingService,
        query: &str,
        region_hint: Option<&str>,
    ) -> Option<GeoPoint> {
        for attempt in 0..self.retries {
            match service.geocode(query, region_hint) {
                Ok(hit) => return hit,
                Err(err) => {
                    log::warn!(
                        "geocoder {} attempt {}/{} failed for {query}: {err}",
                        service.name(),
                        attempt + 1,
                        self.retries,
                    );
                    if attempt + 1 < self.retries {
                        std::thread::sleep(BACKOFF_BASE * 2u32.pow(attempt));
                    }
                }
            }
        }
        None
    }
}

/// Query variants tried against the external service, most specific
/// first. The region hint handles country scoping, so the variants only
/// add the administrative/station suffixes the source corpus needed.
fn fallback_queries(name: &str) -> Vec<String> {
    vec![
        name.to_string(),
        format!("{name}市"),
        format!("{name}町"),
        format!("{name}駅"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedService {
        point: Option<GeoPoint>,
        calls: Arc<AtomicUsize>,
    }

    impl GeocodingService for FixedService {
        fn geocode(&self, _query: &str, _region_hint: Option<&str>) -> Result<Option<GeoPoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.point)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingService {
        calls: Arc<AtomicUsize>,
    }

    impl GeocodingService for FailingService {
        fn geocode(&self, _query: &str, _region_hint: Option<&str>) -> Result<Option<GeoPoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::channel("network down"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn city_table_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let g = Geocoder::new().unwrap().with_external(
            Box::new(FixedService {
                point: Some(GeoPoint::new(35.0, 135.0)),
                calls: calls.clone(),
            }),
            3,
        );
        let result = g.resolve("横浜", &PlaceCategory::City).unwrap();
        assert_eq!(result.source, GeocodeSource::CityTable);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn historic_table_first_for_historic_category() {
        let g = Geocoder::new().unwrap();
        let result = g.resolve("伊勢", &PlaceCategory::HistoricProvince).unwrap();
        assert_eq!(result.source, GeocodeSource::HistoricTable);
        assert!((result.point.latitude - 34.49).abs() < 1e-6);
        assert_eq!(result.matched_name, "三重県伊勢市");
    }

    #[test]
    fn historic_tier_owns_historic_names_for_any_category() {
        // Channels may report 伊勢 with a weaker category; provenance
        // still comes from the historic table, third in the chain.
        let g = Geocoder::new().unwrap();
        let result = g.resolve("伊勢", &PlaceCategory::Unknown).unwrap();
        assert_eq!(result.source, GeocodeSource::HistoricTable);
    }

    #[test]
    fn foreign_places_escape_japan_bounds() {
        let g = Geocoder::new().unwrap();
        let result = g.resolve("パリ", &PlaceCategory::Foreign).unwrap();
        assert_eq!(result.source, GeocodeSource::ForeignTable);
        assert!(!BoundingBox::JAPAN.contains(result.point));
    }

    #[test]
    fn partial_match_is_penalized() {
        let g = Geocoder::new().unwrap();
        // 横浜港 is not in any table; 横浜 matches as a substring.
        let result = g.resolve("横浜港", &PlaceCategory::Unknown).unwrap();
        assert_eq!(result.source, GeocodeSource::PartialMatch);
        assert_eq!(result.matched_name, "横浜");
        assert!((result.confidence.get() - 0.65).abs() < 1e-9);
    }

    #[test]
    fn out_of_bounds_external_hit_is_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let g = Geocoder::new().unwrap().with_external(
            Box::new(FixedService {
                point: Some(GeoPoint::new(48.85, 2.35)),
                calls: calls.clone(),
            }),
            1,
        );
        assert!(g.resolve("架空郷", &PlaceCategory::Unknown).is_none());
        // Every fallback query was tried before giving up.
        assert_eq!(calls.load(Ordering::SeqCst), fallback_queries("架空郷").len());
    }

    #[test]
    fn external_failures_are_retried_then_absorbed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let g = Geocoder::new()
            .unwrap()
            .with_external(Box::new(FailingService { calls: calls.clone() }), 2);
        assert!(g.resolve("架空郷", &PlaceCategory::Unknown).is_none());
        assert_eq!(
            calls.load(Ordering::SeqCst),
            2 * fallback_queries("架空郷").len()
        );
    }

    #[test]
    fn in_bounds_external_hit_wins() {
        let calls = Arc::new(AtomicUsize::new(0));
        let g = Geocoder::new().unwrap().with_external(
            Box::new(FixedService {
                point: Some(GeoPoint::new(35.5, 139.5)),
                calls,
            }),
            3,
        );
        let result = g.resolve("架空郷", &PlaceCategory::Unknown).unwrap();
        assert_eq!(result.source, GeocodeSource::External);
        assert!((result.confidence.get() - EXTERNAL_CONFIDENCE).abs() < 1e-9);
    }

    #[test]
    fn miss_everywhere_is_none_not_error() {
        let g = Geocoder::new().unwrap();
        assert!(g.resolve("ゾグヴァル", &PlaceCategory::Unknown).is_none());
    }
}
