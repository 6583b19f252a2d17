use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;
use crate::lexicon::LexiconBuilder;
use crate::sources::{CorpusFrequencies, CountsFile, WordListDir, WordListFile};

/// Provider and server settings, read from TOML. Every field is optional.
///
/// ```toml
/// word_lists = ["/usr/share/dict/words"]
/// word_dirs = ["data/dictionaries"]
/// corpus = ["data/corpus"]
/// frequency_list = "data/counts.txt"
/// bind = "127.0.0.1:3000"
/// default_limit = 8
/// max_limit = 15
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub word_lists: Vec<PathBuf>,
    pub word_dirs: Vec<PathBuf>,
    /// Text files or directories counted for word frequencies.
    pub corpus: Vec<PathBuf>,
    /// Precomputed `word count` list; used instead of `corpus` when set.
    pub frequency_list: Option<PathBuf>,
    pub bind: String,
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_lists: vec![PathBuf::from(DEFAULT_WORD_LIST)],
            word_dirs: Vec::new(),
            corpus: Vec::new(),
            frequency_list: None,
            bind: DEFAULT_BIND.to_string(),
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `explicit` if given, else the file named by `$PM_AUTOCOMPLETE_CONFIG`,
    /// else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn builder(&self) -> LexiconBuilder {
        let mut builder = LexiconBuilder::new();
        for path in &self.word_lists {
            builder = builder.word_source(WordListFile::new(path));
        }
        for path in &self.word_dirs {
            builder = builder.word_source(WordListDir::new(path));
        }
        if let Some(path) = &self.frequency_list {
            builder = builder.frequency_source(CountsFile::new(path));
        } else if !self.corpus.is_empty() {
            builder = builder.frequency_source(CorpusFrequencies::new(&self.corpus));
        }
        builder
    }

    /// Requested limit (or the default) clamped to `0..=max_limit`.
    pub fn clamp_limit(&self, requested: Option<i64>) -> usize {
        let max = self.max_limit.min(i64::MAX as usize) as i64;
        let limit = requested.unwrap_or(self.default_limit as i64);
        limit.clamp(0, max) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.word_lists, vec![PathBuf::from(DEFAULT_WORD_LIST)]);
        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.default_limit, 8);
        assert_eq!(config.max_limit, 15);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "corpus = [\"data/corpus\"]\nmax_limit = 10\n").expect("seed config");

        let config = Config::from_file(&path).expect("load");
        assert_eq!(config.corpus, vec![PathBuf::from("data/corpus")]);
        assert_eq!(config.max_limit, 10);
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.bind, DEFAULT_BIND);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "wordlists = []\n").expect("seed config");

        let err = Config::from_file(&path).expect_err("typo");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = Config::load(Some(&dir.path().join("missing.toml"))).expect_err("missing");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn clamp_limit_bounds() {
        let config = Config::default();
        assert_eq!(config.clamp_limit(None), 8);
        assert_eq!(config.clamp_limit(Some(3)), 3);
        assert_eq!(config.clamp_limit(Some(100)), 15);
        assert_eq!(config.clamp_limit(Some(-4)), 0);
        assert_eq!(config.clamp_limit(Some(i64::MIN)), 0);
    }

    #[test]
    fn builder_wires_configured_sources() {
        let dir = tempfile::tempdir().expect("tempdir");
        let words = dir.path().join("words.txt");
        let counts = dir.path().join("counts.txt");
        let corpus = dir.path().join("corpus.txt");
        fs::write(&words, "quasar\nquartz\n").expect("seed words");
        fs::write(&counts, "quartz 10\nquasar 5\n").expect("seed counts");
        fs::write(&corpus, "quasar quasar quasar").expect("seed corpus");

        let config = Config {
            word_lists: vec![words, dir.path().join("missing.txt")],
            corpus: vec![corpus.clone()],
            frequency_list: Some(counts),
            ..Config::default()
        };
        let builder = config.builder();
        assert_eq!(builder.word_source_count(), 2);

        let lexicon = builder.build();
        assert!(lexicon.vocabulary().iter().any(|w| w == "quasar"));
        // the counts file wins over the corpus
        assert_eq!(lexicon.frequency("quartz"), Some(FREQUENCY_SCALE_MAX));
        assert_eq!(lexicon.frequency("quasar"), Some(FREQUENCY_SCALE_MAX / 2));

        let corpus_only = Config {
            word_lists: Vec::new(),
            corpus: vec![corpus],
            ..Config::default()
        };
        let lexicon = corpus_only.builder().build();
        assert_eq!(lexicon.frequency("quasar"), Some(FREQUENCY_SCALE_MAX));
        assert_eq!(lexicon.frequency("quartz"), None);
    }
}
