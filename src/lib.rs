//! # chimei
//!
//! Place-name extraction and resolution for Japanese literary text.
//!
//! Three independent channels scan each sentence (gazetteer lookup,
//! productive-suffix patterns, an optional external tagger), overlaps
//! are resolved by category priority, context decides place versus
//! person usage, names are normalized to canonical forms, and a tiered
//! geocoder attaches coordinates where it can.
//!
//! ## Quick start
//!
//! ```rust
//! use chimei::Extractor;
//!
//! # fn main() -> chimei::Result<()> {
//! let extractor = Extractor::new()?;
//! let mentions = extractor.extract("東京から京都へ向かった")?;
//!
//! assert_eq!(mentions.len(), 2);
//! assert_eq!(mentions[0].canonical_name, "東京");
//! assert_eq!(mentions[1].canonical_name, "京都");
//! assert!(mentions[0].coordinates.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Batch extraction
//!
//! [`Extractor::extract_batch`] processes consecutive sentences on a
//! worker pool and feeds each sentence its neighbors as context, so
//! cues like 参拝 in the previous sentence can rescue an ambiguous name
//! in the next one.
//!
//! ## What does *not* come out
//!
//! Surnames in person usage (柏さん), temporal and deictic words (今日,
//! あそこ), and generic nouns that happen to end in a place suffix are
//! filtered before a mention is ever produced. A name that cannot be
//! geocoded still comes out as a mention, just without coordinates.

#![warn(missing_docs)]

pub mod channels;
pub mod classify;
mod error;
pub mod gazetteer;
pub mod geocode;
pub mod mention;
pub mod normalize;
pub mod pipeline;
pub mod resolve;
pub mod types;

pub use channels::{Channel, DictionaryChannel, MockChannel, PatternChannel, TagSpan, Tagger,
    TaggerChannel};
pub use classify::{Classification, Classifier, ContextWindow, Verdict};
pub use error::{Error, Result};
pub use gazetteer::{AmbiguousName, Gazetteer, GazetteerEntry, HistoricPlace};
pub use geocode::{
    BoundingBox, GeocodeResult, GeocodeSource, Geocoder, GeocodingService,
};
pub use mention::{
    Candidate, ChannelKind, ExtractionMethod, GeoPoint, PlaceCategory, PlaceMention,
};
pub use normalize::{Normalized, Normalizer};
pub use pipeline::{ExtractionStats, Extractor, ExtractorBuilder};
pub use resolve::{merge_channels, resolve_overlaps, MergedCandidate};
pub use types::Confidence;
