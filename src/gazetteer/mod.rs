//! Static place-name reference data.
//!
//! Tables are compiled in (`data.rs`), parsed into lookup maps once on
//! first access, and validated at that point: a malformed entry is a
//! fatal [`Error::Gazetteer`](crate::Error) so that integrity problems
//! surface at startup rather than as silently wrong extractions.
//!
//! The maps are read-only after construction and safe to share across
//! worker threads without locking.

mod data;

use crate::mention::{GeoPoint, PlaceCategory};
use crate::types::Confidence;
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub(crate) use data::{HISTORIC_OVERRIDE_CONFIDENCE, REJECT_PREFIX_CHARS, REJECT_SUFFIX_CHARS};

/// Static reference data for one known place name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    /// Canonical spelling.
    pub name: String,
    /// Known variant spellings.
    pub aliases: Vec<String>,
    /// Category of the place.
    pub category: PlaceCategory,
    /// Prefecture (or country, for foreign entries).
    pub prefecture: Option<String>,
    /// Representative coordinates, when curated.
    pub coordinates: Option<GeoPoint>,
    /// Confidence assigned to a bare dictionary hit on this entry.
    pub base_confidence: Confidence,
}

/// One ambiguous surname/place-name pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguousName {
    /// The shared surface form.
    pub name: String,
    /// Prior likelihood that a bare occurrence is a person.
    pub person_prior: f64,
    /// Canonical place reading when it is a place.
    pub canonical_place: String,
    /// Prefecture of the place reading.
    pub prefecture: String,
}

impl AmbiguousName {
    /// Whether a person cue in context vetoes this name outright.
    #[must_use]
    pub fn is_vetoable(&self) -> bool {
        self.person_prior > data::AMBIGUOUS_VETO_PRIOR
    }
}

/// One historic provincial name with its modern mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricPlace {
    /// Classical name (伊勢, 武蔵, ...).
    pub name: String,
    /// Modern equivalent used by the normalizer.
    pub modern_name: String,
    /// Representative coordinates.
    pub coordinates: GeoPoint,
    /// Context keywords that mark classical usage.
    pub keywords: Vec<String>,
}

/// Loaded, validated gazetteer tables.
#[derive(Debug)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    by_name: HashMap<String, usize>,
    cities: HashMap<String, usize>,
    prefectures: HashMap<String, usize>,
    landmarks: HashMap<String, usize>,
    foreign: HashMap<String, usize>,
    historic: HashMap<String, HistoricPlace>,
    ambiguous: HashMap<String, AmbiguousName>,
    aliases: HashMap<String, String>,
    excluded: HashSet<&'static str>,
    short_whitelist: HashSet<&'static str>,
}

static GLOBAL: OnceCell<Gazetteer> = OnceCell::new();

impl Gazetteer {
    /// Get the process-wide gazetteer, building and validating the
    /// built-in tables on first call.
    pub fn global() -> Result<&'static Gazetteer> {
        GLOBAL.get_or_try_init(Gazetteer::from_builtin)
    }

    /// Build from the compiled-in tables.
    pub fn from_builtin() -> Result<Self> {
        let mut entries = Vec::new();
        let mut cities = HashMap::new();
        let mut prefectures = HashMap::new();
        let mut landmarks = HashMap::new();
        let mut foreign = HashMap::new();

        for &(name, lat, lng, pref, conf) in data::CITIES {
            cities.insert(name.to_string(), entries.len());
            entries.push(GazetteerEntry {
                name: name.to_string(),
                aliases: Vec::new(),
                category: PlaceCategory::City,
                prefecture: Some(pref.to_string()),
                coordinates: Some(GeoPoint::new(lat, lng)),
                base_confidence: Confidence::saturating(conf),
            });
        }

        for &(name, lat, lng) in data::PREFECTURES {
            let base = prefecture_base(name).to_string();
            let idx = entries.len();
            prefectures.insert(name.to_string(), idx);
            // The suffix-free form is how prefectures usually appear in
            // running text (東京, not 東京都).
            prefectures.entry(base.clone()).or_insert(idx);
            entries.push(GazetteerEntry {
                name: base.clone(),
                aliases: vec![name.to_string()],
                category: PlaceCategory::Prefecture,
                prefecture: Some(name.to_string()),
                coordinates: Some(GeoPoint::new(lat, lng)),
                base_confidence: Confidence::saturating(data::PREFECTURE_CONFIDENCE),
            });
        }

        for &(name, lat, lng, pref) in data::LANDMARKS {
            landmarks.insert(name.to_string(), entries.len());
            entries.push(GazetteerEntry {
                name: name.to_string(),
                aliases: Vec::new(),
                category: PlaceCategory::Landmark,
                prefecture: Some(pref.to_string()),
                coordinates: Some(GeoPoint::new(lat, lng)),
                base_confidence: Confidence::saturating(data::LANDMARK_CONFIDENCE),
            });
        }

        for &(name, lat, lng, country) in data::FOREIGN_PLACES {
            foreign.insert(name.to_string(), entries.len());
            entries.push(GazetteerEntry {
                name: name.to_string(),
                aliases: Vec::new(),
                category: PlaceCategory::Foreign,
                prefecture: Some(country.to_string()),
                coordinates: Some(GeoPoint::new(lat, lng)),
                base_confidence: Confidence::saturating(data::FOREIGN_CONFIDENCE),
            });
        }

        let mut historic = HashMap::new();
        for &(name, lat, lng, modern, keywords) in data::HISTORIC_PROVINCES {
            historic.insert(
                name.to_string(),
                HistoricPlace {
                    name: name.to_string(),
                    modern_name: modern.to_string(),
                    coordinates: GeoPoint::new(lat, lng),
                    keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                },
            );
            // Dictionary entry only; the geocode tiers reach historic
            // names through their own table, not the city map.
            entries.push(GazetteerEntry {
                name: name.to_string(),
                aliases: Vec::new(),
                category: PlaceCategory::HistoricProvince,
                prefecture: None,
                coordinates: Some(GeoPoint::new(lat, lng)),
                base_confidence: Confidence::saturating(data::HISTORIC_CONFIDENCE),
            });
        }

        let mut ambiguous = HashMap::new();
        for &(name, prior, place, pref) in data::AMBIGUOUS_SURNAMES {
            ambiguous.insert(
                name.to_string(),
                AmbiguousName {
                    name: name.to_string(),
                    person_prior: prior,
                    canonical_place: place.to_string(),
                    prefecture: pref.to_string(),
                },
            );
        }

        let aliases = data::ALIASES
            .iter()
            .map(|&(v, c)| (v.to_string(), c.to_string()))
            .collect();

        let excluded = data::EXCLUDED_TEMPORAL
            .iter()
            .chain(data::EXCLUDED_DIRECTIONAL)
            .chain(data::EXCLUDED_GENERIC)
            .copied()
            .collect();

        let mut by_name = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_name.entry(entry.name.clone()).or_insert(idx);
            for alias in &entry.aliases {
                by_name.entry(alias.clone()).or_insert(idx);
            }
        }

        // Attach variant spellings to their canonical entries so the
        // dictionary channel can match them directly in text.
        for &(variant, canonical) in data::ALIASES {
            if let Some(&idx) = by_name.get(canonical) {
                entries[idx].aliases.push(variant.to_string());
                by_name.entry(variant.to_string()).or_insert(idx);
            }
        }

        let gazetteer = Gazetteer {
            entries,
            by_name,
            cities,
            prefectures,
            landmarks,
            foreign,
            historic,
            ambiguous,
            aliases,
            excluded,
            short_whitelist: data::SHORT_NAME_WHITELIST.iter().copied().collect(),
        };
        gazetteer.validate()?;
        Ok(gazetteer)
    }

    /// Integrity validation, run once at load.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            if entry.name.is_empty() {
                return Err(Error::gazetteer("entry with empty name"));
            }
            if let Some(coords) = entry.coordinates {
                let world = crate::geocode::BoundingBox::WORLD;
                if !world.contains(coords) {
                    return Err(Error::gazetteer(format!(
                        "{}: coordinates ({}, {}) outside plausible range",
                        entry.name, coords.latitude, coords.longitude
                    )));
                }
                if entry.category != PlaceCategory::Foreign
                    && !crate::geocode::BoundingBox::JAPAN.contains(coords)
                {
                    return Err(Error::gazetteer(format!(
                        "{}: domestic entry outside Japan bounding box",
                        entry.name
                    )));
                }
            }
        }
        for historic in self.historic.values() {
            if historic.keywords.is_empty() {
                return Err(Error::gazetteer(format!(
                    "{}: historic entry without context keywords",
                    historic.name
                )));
            }
        }
        for amb in self.ambiguous.values() {
            if !(0.0..=1.0).contains(&amb.person_prior) {
                return Err(Error::gazetteer(format!(
                    "{}: person prior {} not in [0, 1]",
                    amb.name, amb.person_prior
                )));
            }
        }
        Ok(())
    }

    /// All entries, dictionary-channel scan order (longest name first so
    /// compound surfaces beat their components at emission time).
    pub fn dictionary_entries(&self) -> impl Iterator<Item = &GazetteerEntry> {
        let mut sorted: Vec<&GazetteerEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.name
                .chars()
                .count()
                .cmp(&a.name.chars().count())
                .then_with(|| a.name.cmp(&b.name))
        });
        sorted.into_iter()
    }

    /// Look up any known spelling (canonical or alias).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&GazetteerEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    /// City-tier lookup.
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&GazetteerEntry> {
        self.cities.get(name).map(|&idx| &self.entries[idx])
    }

    /// Prefecture-tier lookup (accepts full and base forms).
    #[must_use]
    pub fn prefecture(&self, name: &str) -> Option<&GazetteerEntry> {
        self.prefectures.get(name).map(|&idx| &self.entries[idx])
    }

    /// Landmark-tier lookup.
    #[must_use]
    pub fn landmark(&self, name: &str) -> Option<&GazetteerEntry> {
        self.landmarks.get(name).map(|&idx| &self.entries[idx])
    }

    /// Foreign-tier lookup.
    #[must_use]
    pub fn foreign(&self, name: &str) -> Option<&GazetteerEntry> {
        self.foreign.get(name).map(|&idx| &self.entries[idx])
    }

    /// Historic-place table lookup.
    #[must_use]
    pub fn historic(&self, name: &str) -> Option<&HistoricPlace> {
        self.historic.get(name)
    }

    /// Ambiguous-surname table lookup.
    #[must_use]
    pub fn ambiguous(&self, name: &str) -> Option<&AmbiguousName> {
        self.ambiguous.get(name)
    }

    /// Alias-table lookup (exact variant spellings only).
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// True if the surface form is on a curated exclusion list.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(name)
    }

    /// True if a sub-2-codepoint name is explicitly allowed.
    #[must_use]
    pub fn is_short_whitelisted(&self, name: &str) -> bool {
        self.short_whitelist.contains(name)
    }

    /// Entries whose canonical name contains, or is contained in, the
    /// query. Used by the partial-match geocode tier.
    pub fn partial_matches<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a GazetteerEntry> + 'a {
        self.entries.iter().filter(move |e| {
            e.coordinates.is_some()
                && e.name != name
                && (e.name.contains(name) || name.contains(e.name.as_str()))
        })
    }
}

/// Strip the administrative suffix from a full prefecture name.
#[must_use]
pub(crate) fn prefecture_base(name: &str) -> &str {
    // 北海道 is its own base; 道 is part of the name.
    if name == "北海道" {
        return name;
    }
    name.strip_suffix('都')
        .or_else(|| name.strip_suffix('府'))
        .or_else(|| name.strip_suffix('県'))
        .unwrap_or(name)
}
