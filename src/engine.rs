use once_cell::sync::OnceCell;

use crate::lexicon::{Lexicon, LexiconBuilder};
use crate::suggest::{rank, suggest, ScoredWord};

/// Owns the provider configuration and the lexicon built from it.
///
/// The lexicon is built on first use, at most once; concurrent first
/// callers block until that single build finishes and then share it.
/// Share across threads with `Arc<Autocomplete>`.
pub struct Autocomplete {
    builder: LexiconBuilder,
    lexicon: OnceCell<Lexicon>,
}

impl Autocomplete {
    pub fn new(builder: LexiconBuilder) -> Self {
        Self {
            builder,
            lexicon: OnceCell::new(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.lexicon.get_or_init(|| self.builder.build())
    }

    pub fn is_built(&self) -> bool {
        self.lexicon.get().is_some()
    }

    /// Build now rather than on the first query.
    pub fn warm(&self) -> &Lexicon {
        self.lexicon()
    }

    /// Drop the cached lexicon so the next query rebuilds it.
    /// Only for tests and restarts; requires exclusive access.
    pub fn invalidate(&mut self) {
        self.lexicon.take();
    }

    pub fn suggest(&self, prefix: &str, context: Option<&str>, limit: usize) -> Vec<String> {
        suggest(prefix, context, limit, self.lexicon())
    }

    pub fn rank(&self, prefix: &str, context: Option<&str>) -> Vec<ScoredWord> {
        rank(prefix, context, self.lexicon())
    }
}
