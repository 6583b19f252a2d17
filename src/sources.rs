use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use memmap2::MmapOptions;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::text::corpus_tokens;

/// A provider of candidate vocabulary words.
///
/// Output need not be normalized; the lexicon builder lowercases and
/// filters whatever it receives.
pub trait WordSource: Send + Sync {
    fn name(&self) -> &str;
    fn provide(&self) -> Result<HashSet<String>, SourceError>;
}

/// A provider of raw word -> occurrence counts from a reference corpus.
pub trait FrequencySource: Send + Sync {
    fn name(&self) -> &str;
    fn provide_frequencies(&self) -> Result<HashMap<String, u64>, SourceError>;
}

// ── In-memory providers ─────────────────────────────────────────────────────

pub struct StaticWords {
    name: String,
    words: HashSet<String>,
}

impl StaticWords {
    pub fn new<I, S>(name: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordSource for StaticWords {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self) -> Result<HashSet<String>, SourceError> {
        Ok(self.words.clone())
    }
}

pub struct StaticFrequencies {
    name: String,
    counts: HashMap<String, u64>,
}

impl StaticFrequencies {
    pub fn new<I, S>(name: &str, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            counts: counts.into_iter().map(|(w, c)| (w.into(), c)).collect(),
        }
    }
}

impl FrequencySource for StaticFrequencies {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide_frequencies(&self) -> Result<HashMap<String, u64>, SourceError> {
        Ok(self.counts.clone())
    }
}

// ── File-backed providers ───────────────────────────────────────────────────

/// Memory-map `path` and hand each line (lossily decoded) to `f`.
fn for_each_line(path: &Path, mut f: impl FnMut(&str)) -> Result<(), SourceError> {
    let file = File::open(path).map_err(|e| SourceError::io(path, e))?;
    let len = file.metadata().map_err(|e| SourceError::io(path, e))?.len();
    if len == 0 {
        return Ok(());
    }
    // The mapping is read once and dropped before returning.
    let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(|e| SourceError::io(path, e))?;
    for raw in mmap.split(|&b| b == b'\n') {
        f(&String::from_utf8_lossy(raw));
    }
    Ok(())
}

/// Collect every regular file below `root` (or `root` itself when it is a file).
fn walk_files(root: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let meta = fs::metadata(root).map_err(|e| SourceError::io(root, e))?;
    if meta.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut dirs = vec![root.to_path_buf()];
    while let Some(dir) = dirs.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            debug!(dir = %dir.display(), "skipping unreadable directory");
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn read_word_list(path: &Path, words: &mut HashSet<String>) -> Result<(), SourceError> {
    for_each_line(path, |line| {
        let w = line.trim();
        if !w.is_empty() && !w.starts_with('#') {
            words.insert(w.to_string());
        }
    })
}

/// A plain word list, one entry per line. Blank lines and `#` comments are skipped.
pub struct WordListFile {
    name: String,
    path: PathBuf,
}

impl WordListFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("word-list:{}", path.display()),
            path,
        }
    }
}

impl WordSource for WordListFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self) -> Result<HashSet<String>, SourceError> {
        let mut words = HashSet::new();
        read_word_list(&self.path, &mut words)?;
        Ok(words)
    }
}

/// Every file below a directory, each read as a word list.
pub struct WordListDir {
    name: String,
    root: PathBuf,
}

impl WordListDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            name: format!("word-dir:{}", root.display()),
            root,
        }
    }
}

impl WordSource for WordListDir {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self) -> Result<HashSet<String>, SourceError> {
        let mut words = HashSet::new();
        for path in walk_files(&self.root)? {
            if let Err(e) = read_word_list(&path, &mut words) {
                debug!(error = %e, "skipping unreadable word list");
            }
        }
        Ok(words)
    }
}

/// A precomputed frequency list of `word count` lines.
pub struct CountsFile {
    name: String,
    path: PathBuf,
}

impl CountsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: format!("counts:{}", path.display()),
            path,
        }
    }
}

fn parse_count_line(line: &str) -> Option<(&str, u64)> {
    let mut fields = line.split_whitespace();
    let word = fields.next()?;
    let count = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((word, count))
}

impl FrequencySource for CountsFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide_frequencies(&self) -> Result<HashMap<String, u64>, SourceError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut lines = 0usize;
        let mut malformed = 0usize;

        for_each_line(&self.path, |line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return;
            }
            lines += 1;
            match parse_count_line(line) {
                Some((word, count)) => {
                    let total = counts.entry(word.to_string()).or_insert(0);
                    *total = total.saturating_add(count);
                }
                None => malformed += 1,
            }
        })?;

        if lines > 0 && malformed == lines {
            return Err(SourceError::Malformed {
                path: self.path.clone(),
                reason: format!("none of {lines} lines is a `word count` pair"),
            });
        }
        if malformed > 0 {
            debug!(source = %self.name, malformed, "skipped malformed count lines");
        }
        Ok(counts)
    }
}

/// Raw occurrence counts over a reference corpus of text files.
pub struct CorpusFrequencies {
    name: String,
    roots: Vec<PathBuf>,
}

impl CorpusFrequencies {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(Into::into).collect();
        let listed: Vec<String> = roots.iter().map(|p| p.display().to_string()).collect();
        Self {
            name: format!("corpus:{}", listed.join(",")),
            roots,
        }
    }
}

impl FrequencySource for CorpusFrequencies {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide_frequencies(&self) -> Result<HashMap<String, u64>, SourceError> {
        if self.roots.is_empty() {
            return Err(SourceError::Unavailable("no corpus paths configured".into()));
        }

        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut last_err = None;
        let mut readable_roots = 0usize;
        for root in &self.roots {
            let files = match walk_files(root) {
                Ok(files) => files,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "skipping unreadable corpus root");
                    last_err = Some(e);
                    continue;
                }
            };
            readable_roots += 1;
            for path in files {
                let bytes = match fs::read(&path) {
                    Ok(b) => b,
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "skipping unreadable corpus file");
                        continue;
                    }
                };
                for token in corpus_tokens(&String::from_utf8_lossy(&bytes)) {
                    let total = counts.entry(token).or_insert(0);
                    *total = total.saturating_add(1);
                }
            }
        }

        match last_err {
            Some(e) if readable_roots == 0 => Err(e),
            _ => Ok(counts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_file_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("words.txt");
        fs::write(&path, "# header\nalpha\n\n  Beta  \r\ngamma\n").expect("seed words");

        let words = WordListFile::new(&path).provide().expect("provide");
        let expected: HashSet<String> =
            ["alpha", "Beta", "gamma"].iter().map(|s| s.to_string()).collect();
        assert_eq!(words, expected);
    }

    #[test]
    fn word_list_file_handles_empty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").expect("seed empty");

        assert!(WordListFile::new(&path).provide().expect("provide").is_empty());
    }

    #[test]
    fn word_list_file_missing_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = WordListFile::new(dir.path().join("nope.txt"))
            .provide()
            .expect_err("missing file");
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn word_list_dir_walks_nested_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(dir.path().join("top.txt"), "roadmap\n").expect("seed top");
        fs::write(nested.join("deep.txt"), "backlog\nsprint\n").expect("seed deep");

        let words = WordListDir::new(dir.path()).provide().expect("provide");
        assert_eq!(words.len(), 3);
        assert!(words.contains("backlog"));
    }

    #[test]
    fn counts_file_sums_duplicates_and_skips_bad_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("counts.txt");
        fs::write(&path, "the 100\nthe 5\nbroken\nword notanumber\nplan 7\n").expect("seed counts");

        let counts = CountsFile::new(&path).provide_frequencies().expect("provide");
        assert_eq!(counts.get("the"), Some(&105));
        assert_eq!(counts.get("plan"), Some(&7));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn counts_file_saturates_instead_of_overflowing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("counts.txt");
        fs::write(&path, "the 18446744073709551615\nthe 1\nplan 2\n").expect("seed counts");

        let counts = CountsFile::new(&path).provide_frequencies().expect("provide");
        assert_eq!(counts.get("the"), Some(&u64::MAX));
        assert_eq!(counts.get("plan"), Some(&2));
    }

    #[test]
    fn counts_file_with_only_bad_lines_is_malformed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("counts.txt");
        fs::write(&path, "just words here\nmore words\n").expect("seed counts");

        let err = CountsFile::new(&path)
            .provide_frequencies()
            .expect_err("malformed");
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn corpus_counts_tokens_across_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("one.txt"), "The plan. the PLAN!").expect("seed one");
        fs::write(dir.path().join("two.txt"), "a plan for the team").expect("seed two");

        let counts = CorpusFrequencies::new([dir.path()])
            .provide_frequencies()
            .expect("provide");
        assert_eq!(counts.get("the"), Some(&3));
        assert_eq!(counts.get("plan"), Some(&3));
        assert_eq!(counts.get("team"), Some(&1));
        assert_eq!(counts.get("a"), None);
    }

    #[test]
    fn corpus_skips_missing_roots_and_keeps_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let corpus = dir.path().join("notes");
        fs::create_dir_all(&corpus).expect("mkdir");
        fs::write(corpus.join("one.txt"), "sprint review sprint").expect("seed one");

        let counts = CorpusFrequencies::new([dir.path().join("missing"), corpus])
            .provide_frequencies()
            .expect("provide");
        assert_eq!(counts.get("sprint"), Some(&2));
        assert_eq!(counts.get("review"), Some(&1));
    }

    #[test]
    fn corpus_with_only_missing_roots_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = CorpusFrequencies::new([dir.path().join("gone"), dir.path().join("also-gone")])
            .provide_frequencies()
            .expect_err("no readable root");
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn corpus_without_roots_is_unavailable() {
        let err = CorpusFrequencies::new(Vec::<PathBuf>::new())
            .provide_frequencies()
            .expect_err("no roots");
        assert!(matches!(err, SourceError::Unavailable(_)));
    }
}
