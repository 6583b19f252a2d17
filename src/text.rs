use crate::constants::{MAX_WORD_LEN, MIN_WORD_LEN};

fn is_alpha_word(w: &str) -> bool {
    !w.is_empty() && w.chars().all(char::is_alphabetic)
}

/// Lowercase `raw` and accept it as a vocabulary entry: alphabetic only,
/// between `MIN_WORD_LEN` and `MAX_WORD_LEN` chars.
pub fn normalize_word(raw: &str) -> Option<String> {
    let w = raw.trim().to_lowercase();
    let len = w.chars().count();
    if is_alpha_word(&w) && (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&len) {
        Some(w)
    } else {
        None
    }
}

/// Lowercase `raw` and accept it as a frequency observation. Unlike
/// vocabulary entries there is no upper length bound.
pub fn normalize_count_word(raw: &str) -> Option<String> {
    let w = raw.trim().to_lowercase();
    if is_alpha_word(&w) && w.chars().count() >= MIN_WORD_LEN {
        Some(w)
    } else {
        None
    }
}

/// Split corpus text into countable words.
///
/// Tokens are whitespace separated with surrounding punctuation stripped;
/// a token with inner punctuation or digits ("don't", "mp3") is dropped
/// whole rather than split.
pub fn corpus_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter_map(normalize_count_word)
}

/// Normalize the typed prefix: trimmed and lowercased.
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.trim().to_lowercase()
}
