//! The extraction pipeline: scan, resolve, classify, normalize, geocode.

use crate::channels::{Channel, DictionaryChannel, PatternChannel, Tagger, TaggerChannel};
use crate::classify::{Classifier, ContextWindow};
use crate::geocode::{Geocoder, GeocodingService, DEFAULT_EXTERNAL_RETRIES};
use crate::mention::PlaceMention;
use crate::normalize::Normalizer;
use crate::resolve::merge_channels;
use crate::Result;
use std::thread;

fn default_workers() -> usize {
    thread::available_parallelism().map_or(4, usize::from)
}

/// Builder for [`Extractor`].
pub struct ExtractorBuilder {
    tagger: Option<Box<dyn Channel>>,
    external: Option<Box<dyn GeocodingService>>,
    retries: u32,
    geocoding: bool,
    workers: Option<usize>,
}

impl ExtractorBuilder {
    /// Plug in an external morphological tagger as a third channel.
    pub fn with_tagger<T: Tagger + 'static>(mut self, tagger: T) -> Result<Self> {
        self.tagger = Some(Box::new(TaggerChannel::new(tagger)?));
        Ok(self)
    }

    /// Plug in an external geocoding service as the final tier.
    #[must_use]
    pub fn with_geocoding_service(mut self, service: Box<dyn GeocodingService>) -> Self {
        self.external = Some(service);
        self
    }

    /// Override the retry count for the external geocoding tier. Takes
    /// effect at build time, in any order relative to
    /// [`with_geocoding_service`](Self::with_geocoding_service).
    #[must_use]
    pub fn geocoding_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Skip geocoding entirely; mentions come back without coordinates.
    #[must_use]
    pub fn without_geocoding(mut self) -> Self {
        self.geocoding = false;
        self
    }

    /// Worker threads for batch extraction (defaults to the number of
    /// available cores).
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    /// Build the extractor, loading and validating the gazetteer.
    pub fn build(self) -> Result<Extractor> {
        let mut channels: Vec<Box<dyn Channel>> = vec![
            Box::new(DictionaryChannel::new()?),
            Box::new(PatternChannel::new()?),
        ];
        if let Some(tagger) = self.tagger {
            channels.push(tagger);
        }
        let geocoder = match self.external {
            Some(service) => Geocoder::new()?.with_external(service, self.retries),
            None => Geocoder::new()?,
        };
        Ok(Extractor {
            channels,
            classifier: Classifier::new()?,
            normalizer: Normalizer::new()?,
            geocoder,
            geocoding: self.geocoding,
            workers: self.workers,
        })
    }
}

/// Sentence-level place-name extractor.
///
/// Construction validates the gazetteer; everything after that is
/// infallible per mention (a sentence that yields nothing yields an
/// empty vec, not an error).
pub struct Extractor {
    channels: Vec<Box<dyn Channel>>,
    classifier: Classifier,
    normalizer: Normalizer,
    geocoder: Geocoder,
    geocoding: bool,
    workers: Option<usize>,
}

impl Extractor {
    /// Start building an extractor.
    #[must_use]
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder {
            tagger: None,
            external: None,
            retries: DEFAULT_EXTERNAL_RETRIES,
            geocoding: true,
            workers: None,
        }
    }

    /// Default extractor: dictionary + pattern channels, table-only
    /// geocoding.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Extract from one sentence without neighboring context.
    pub fn extract(&self, sentence: &str) -> Result<Vec<PlaceMention>> {
        self.extract_sentence(sentence, ContextWindow::default())
    }

    /// Extract from one sentence with its 3-sentence context window.
    ///
    /// Returned mentions are sorted by start offset and have pairwise
    /// disjoint spans.
    pub fn extract_sentence(
        &self,
        sentence: &str,
        window: ContextWindow<'_>,
    ) -> Result<Vec<PlaceMention>> {
        let mut per_channel = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            if !channel.is_available() {
                log::debug!("channel {} unavailable, skipping", channel.description());
                continue;
            }
            per_channel.push(channel.scan(sentence)?);
        }

        let mut mentions = Vec::new();
        for merged in merge_channels(per_channel) {
            let candidate = &merged.candidate;
            let classification = self.classifier.classify(candidate, sentence, window);
            if !classification.verdict.accepted() {
                log::debug!(
                    "{}: rejected ({:?})",
                    candidate.text,
                    classification.verdict
                );
                continue;
            }

            let normalized = self
                .normalizer
                .normalize(&candidate.text, &candidate.category);
            let confidence = classification
                .confidence
                .discount(normalized.confidence.get());

            let geocode = if self.geocoding {
                self.geocoder
                    .resolve(&normalized.canonical_name, &normalized.category)
            } else {
                None
            };

            mentions.push(PlaceMention {
                canonical_name: normalized.canonical_name,
                original_text: candidate.text.clone(),
                category: normalized.category,
                confidence,
                extraction_method: merged.method,
                context_before: window.before.map(str::to_string),
                context_after: window.after.map(str::to_string),
                coordinates: geocode.as_ref().map(|g| g.point),
                geocode,
                start: candidate.start,
                end: candidate.end,
            });
        }

        mentions.sort_by_key(|m| (m.start, m.end));
        Ok(mentions)
    }

    /// Extract from consecutive sentences in parallel.
    ///
    /// Each sentence gets its neighbors as the context window. Results
    /// come back in input order regardless of worker scheduling.
    pub fn extract_batch(&self, sentences: &[&str]) -> Result<Vec<Vec<PlaceMention>>> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }
        let workers = self
            .workers
            .unwrap_or_else(default_workers)
            .min(sentences.len());

        let (job_tx, job_rx) = crossbeam_channel::bounded::<usize>(sentences.len());
        let (result_tx, result_rx) =
            crossbeam_channel::bounded::<(usize, Result<Vec<PlaceMention>>)>(sentences.len());

        for idx in 0..sentences.len() {
            // The channel holds every index, and we still own the
            // receiver, so this cannot fail or block.
            let _ = job_tx.send(idx);
        }
        drop(job_tx);

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    while let Ok(idx) = job_rx.recv() {
                        let window = ContextWindow {
                            before: idx.checked_sub(1).map(|i| sentences[i]),
                            after: sentences.get(idx + 1).copied(),
                        };
                        let outcome = self.extract_sentence(sentences[idx], window);
                        let _ = result_tx.send((idx, outcome));
                    }
                });
            }
        });
        drop(result_tx);

        let mut indexed: Vec<(usize, Result<Vec<PlaceMention>>)> = result_rx.iter().collect();
        indexed.sort_by_key(|(idx, _)| *idx);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }
}

/// Aggregate counts over a batch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionStats {
    /// Sentences processed.
    pub sentences: usize,
    /// Sentences with at least one mention.
    pub sentences_with_mentions: usize,
    /// Total mentions.
    pub mentions: usize,
    /// Mentions that received coordinates.
    pub geocoded: usize,
}

impl ExtractionStats {
    /// Summarize a batch result.
    #[must_use]
    pub fn from_batch(batch: &[Vec<PlaceMention>]) -> Self {
        let mut stats = Self {
            sentences: batch.len(),
            ..Self::default()
        };
        for mentions in batch {
            if !mentions.is_empty() {
                stats.sentences_with_mentions += 1;
            }
            stats.mentions += mentions.len();
            stats.geocoded += mentions.iter().filter(|m| m.coordinates.is_some()).count();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mention::{ChannelKind, PlaceCategory};

    #[test]
    fn journey_sentence_yields_both_endpoints() {
        let extractor = Extractor::new().unwrap();
        let mentions = extractor.extract("東京から京都へ向かった").unwrap();
        let names: Vec<_> = mentions.iter().map(|m| m.canonical_name.as_str()).collect();
        assert_eq!(names, vec!["東京", "京都"]);
        for m in &mentions {
            assert_eq!(m.category, PlaceCategory::Prefecture);
            assert!(m.coordinates.is_some());
        }
    }

    #[test]
    fn surname_usage_yields_nothing() {
        let extractor = Extractor::new().unwrap();
        assert!(extractor.extract("柏さんが笑った").unwrap().is_empty());
    }

    #[test]
    fn spans_are_disjoint_and_sorted() {
        let extractor = Extractor::new().unwrap();
        let mentions = extractor
            .extract("東京都渋谷区から横浜へ行った")
            .unwrap();
        for pair in mentions.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn compound_admin_survives_whole() {
        let extractor = Extractor::new().unwrap();
        let mentions = extractor
            .extract("東京都渋谷区に住んでいた")
            .unwrap();
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].original_text, "東京都渋谷区");
        assert_eq!(mentions[0].canonical_name, "渋谷区");
        assert_eq!(mentions[0].category, PlaceCategory::CompoundAdmin);
    }

    #[test]
    fn higher_confidence_dictionary_span_beats_pattern_extension() {
        let extractor = Extractor::new().unwrap();
        let mentions = extractor.extract("鎌倉市に向かった").unwrap();
        // Dictionary 鎌倉 (0.95) and pattern 鎌倉市 (0.85) tie on
        // category, so confidence decides.
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].canonical_name, "鎌倉");
        assert!(mentions[0]
            .extraction_method
            .contains(ChannelKind::Dictionary));
    }

    #[test]
    fn channels_merge_on_identical_spans() {
        let extractor = Extractor::new().unwrap();
        let mentions = extractor.extract("京都へ向かった").unwrap();
        assert_eq!(mentions.len(), 1);
        // 京都 is both a dictionary entry and a 〜都 pattern hit.
        assert_eq!(mentions[0].extraction_method.to_string(), "dictionary+pattern");
    }

    #[test]
    fn geocoding_can_be_disabled() {
        let extractor = Extractor::builder().without_geocoding().build().unwrap();
        let mentions = extractor.extract("横浜へ行った").unwrap();
        assert_eq!(mentions.len(), 1);
        assert!(mentions[0].coordinates.is_none());
        assert!(mentions[0].geocode.is_none());
    }

    #[test]
    fn batch_preserves_input_order() {
        let extractor = Extractor::builder().workers(3).build().unwrap();
        let sentences = vec![
            "東京から京都へ向かった",
            "柏さんが笑った",
            "横浜に着いた",
            "何もない文である",
        ];
        let batch = extractor.extract_batch(&sentences).unwrap();
        assert_eq!(batch.len(), 4);
        assert_eq!(batch[0].len(), 2);
        assert!(batch[1].is_empty());
        assert_eq!(batch[2][0].canonical_name, "横浜");
        assert!(batch[3].is_empty());
    }

    #[test]
    fn batch_neighbors_feed_the_window() {
        let extractor = Extractor::new().unwrap();
        // 伊勢 alone is ambiguous; the previous sentence's 参拝 marks it.
        let batch = extractor
            .extract_batch(&["神宮へ参拝する朝であった", "伊勢に着いた"])
            .unwrap();
        assert!(batch[1].iter().any(|m| m.canonical_name == "伊勢"));
    }

    #[test]
    fn stats_summarize_batch() {
        let extractor = Extractor::new().unwrap();
        let batch = extractor
            .extract_batch(&["横浜へ行った", "何もない"])
            .unwrap();
        let stats = ExtractionStats::from_batch(&batch);
        assert_eq!(stats.sentences, 2);
        assert_eq!(stats.sentences_with_mentions, 1);
        assert_eq!(stats.mentions, 1);
        assert_eq!(stats.geocoded, 1);
    }
}
