use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::constants::*;
use crate::sources::{FrequencySource, WordSource};
use crate::text::{normalize_count_word, normalize_word};

/// Outcome of a single provider during a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    /// Entries returned (before normalization), or the failure message.
    pub outcome: Result<usize, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub word_sources: Vec<SourceReport>,
    pub frequency_source: Option<SourceReport>,
}

impl BuildReport {
    /// True when no word source succeeded and the vocabulary is the
    /// domain vocabulary alone.
    pub fn is_degraded(&self) -> bool {
        !self.word_sources.iter().any(|s| s.outcome.is_ok())
    }
}

/// Sorted vocabulary, scaled frequency scores and the static ranking tables.
/// Immutable once built.
#[derive(Debug)]
pub struct Lexicon {
    vocabulary: Vec<String>,
    frequencies: HashMap<String, u32>,
    domain: HashSet<&'static str>,
    associations: HashMap<&'static str, &'static [&'static str]>,
    report: BuildReport,
}

// Equality covers the built content; the report is diagnostics only.
impl PartialEq for Lexicon {
    fn eq(&self, other: &Self) -> bool {
        self.vocabulary == other.vocabulary && self.frequencies == other.frequencies
    }
}

impl Lexicon {
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn frequency(&self, word: &str) -> Option<u32> {
        self.frequencies.get(word).copied()
    }

    pub fn frequency_len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_domain_word(&self, word: &str) -> bool {
        self.domain.contains(word)
    }

    /// Words associated with an already-lowercased trigger token.
    pub fn associations(&self, trigger: &str) -> Option<&'static [&'static str]> {
        self.associations.get(trigger).copied()
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}

/// Map raw counts linearly onto `[0, FREQUENCY_SCALE_MAX]`:
/// `floor(count * FREQUENCY_SCALE_MAX / max_count)`.
pub fn scale_frequencies(counts: &HashMap<String, u64>) -> HashMap<String, u32> {
    let max = counts.values().copied().max().unwrap_or(0);
    counts
        .iter()
        .map(|(word, &count)| {
            let score = if max == 0 {
                0
            } else {
                (u128::from(count) * u128::from(FREQUENCY_SCALE_MAX) / u128::from(max)) as u32
            };
            (word.clone(), score)
        })
        .collect()
}

/// Collects providers and merges them into a `Lexicon`.
#[derive(Default)]
pub struct LexiconBuilder {
    word_sources: Vec<Box<dyn WordSource>>,
    frequency_source: Option<Box<dyn FrequencySource>>,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word_source(mut self, source: impl WordSource + 'static) -> Self {
        self.word_sources.push(Box::new(source));
        self
    }

    pub fn frequency_source(mut self, source: impl FrequencySource + 'static) -> Self {
        self.frequency_source = Some(Box::new(source));
        self
    }

    pub fn word_source_count(&self) -> usize {
        self.word_sources.len()
    }

    /// Merge every provider into a lexicon. Provider failures are logged
    /// and skipped; the result always contains the domain vocabulary.
    pub fn build(&self) -> Lexicon {
        let mut report = BuildReport::default();

        // BTreeSet gives dedupe and codepoint order in one pass
        let mut words: BTreeSet<String> = DOMAIN_VOCABULARY
            .iter()
            .filter_map(|w| normalize_word(w))
            .collect();

        for source in &self.word_sources {
            let outcome = match source.provide() {
                Ok(raw) => {
                    let before = words.len();
                    words.extend(raw.iter().filter_map(|w| normalize_word(w)));
                    debug!(
                        source = source.name(),
                        provided = raw.len(),
                        added = words.len() - before,
                        "merged word source"
                    );
                    Ok(raw.len())
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "word source failed; skipping");
                    Err(e.to_string())
                }
            };
            report.word_sources.push(SourceReport {
                name: source.name().to_string(),
                outcome,
            });
        }

        let mut counts: HashMap<String, u64> = HashMap::new();
        if let Some(source) = &self.frequency_source {
            let outcome = match source.provide_frequencies() {
                Ok(raw) => {
                    for (w, c) in &raw {
                        if let Some(w) = normalize_count_word(w) {
                            let total = counts.entry(w).or_insert(0);
                            *total = total.saturating_add(*c);
                        }
                    }
                    Ok(raw.len())
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "frequency source failed; skipping");
                    Err(e.to_string())
                }
            };
            report.frequency_source = Some(SourceReport {
                name: source.name().to_string(),
                outcome,
            });
        }

        let vocabulary: Vec<String> = words.into_iter().collect();
        let frequencies = scale_frequencies(&counts);

        info!(
            words = vocabulary.len(),
            with_frequency = frequencies.len(),
            degraded = report.is_degraded(),
            "autocomplete lexicon built"
        );

        Lexicon {
            vocabulary,
            frequencies,
            domain: DOMAIN_VOCABULARY.iter().copied().collect(),
            associations: WORD_ASSOCIATIONS.iter().copied().collect(),
            report,
        }
    }
}
