use std::collections::HashSet;
use std::ops::Range;

use crate::constants::*;
use crate::lexicon::Lexicon;
use crate::text::normalize_prefix;

/// The smallest string greater than every string starting with `prefix`,
/// or `None` when no such bound exists (every char is `char::MAX`).
///
/// `"req"` -> `"rer"`. A final `char::MAX` carries into the previous char;
/// the surrogate gap is skipped.
pub fn prefix_upper_bound(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    while let Some(last) = chars.pop() {
        let next = match last {
            char::MAX => continue,
            '\u{D7FF}' => '\u{E000}',
            c => char::from_u32(c as u32 + 1)?,
        };
        chars.push(next);
        return Some(chars.into_iter().collect());
    }
    None
}

/// Index range of `vocabulary` (sorted) whose entries start with `prefix`.
pub fn prefix_range(vocabulary: &[String], prefix: &str) -> Range<usize> {
    let lo = vocabulary.partition_point(|w| w.as_str() < prefix);
    let hi = match prefix_upper_bound(prefix) {
        Some(bound) => vocabulary.partition_point(|w| w.as_str() < bound.as_str()),
        None => vocabulary.len(),
    };
    lo..hi.max(lo)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredWord {
    pub word: String,
    pub score: i64,
}

fn context_boost_set<'a>(lexicon: &'a Lexicon, context: Option<&str>) -> HashSet<&'a str> {
    let Some(ctx) = context.filter(|c| !c.is_empty()) else {
        return HashSet::new();
    };
    lexicon
        .associations(&ctx.to_lowercase())
        .map(|words| words.iter().copied().collect())
        .unwrap_or_default()
}

fn score_word(word: &str, lexicon: &Lexicon, boost: &HashSet<&str>) -> i64 {
    let mut score = 0i64;
    if boost.contains(word) {
        score += CONTEXT_BOOST;
    }
    if lexicon.is_domain_word(word) {
        score += DOMAIN_BOOST;
    }
    match lexicon.frequency(word) {
        Some(freq) => score += i64::from(freq),
        // Long words without frequency data sink below common short ones
        None => score -= UNKNOWN_LENGTH_PENALTY * word.chars().count() as i64,
    }
    score
}

/// Score and order every continuation of `prefix`, best first.
/// Ties are broken by the word in ascending order.
pub fn rank(prefix: &str, context: Option<&str>, lexicon: &Lexicon) -> Vec<ScoredWord> {
    let prefix = normalize_prefix(prefix);
    if prefix.chars().count() < MIN_PREFIX_LEN {
        return Vec::new();
    }

    let vocabulary = lexicon.vocabulary();
    let matches = &vocabulary[prefix_range(vocabulary, &prefix)];
    if matches.is_empty() {
        return Vec::new();
    }

    let boost = context_boost_set(lexicon, context);
    let mut scored: Vec<ScoredWord> = matches
        .iter()
        .filter(|w| **w != prefix)
        .map(|w| ScoredWord {
            score: score_word(w, lexicon, &boost),
            word: w.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
    scored
}

/// Up to `limit` ranked suggestions for `prefix`, optionally boosted by the
/// preceding `context` word.
pub fn suggest(prefix: &str, context: Option<&str>, limit: usize, lexicon: &Lexicon) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }
    let mut ranked = rank(prefix, context, lexicon);
    ranked.truncate(limit);
    ranked.into_iter().map(|s| s.word).collect()
}

pub fn suggest_and_print(prefix: &str, context: Option<&str>, limit: usize, lexicon: &Lexicon) {
    match context {
        Some(ctx) => println!("\nPrefix: '{prefix}'  (after '{ctx}')"),
        None => println!("\nPrefix: '{prefix}'"),
    }

    let ranked = rank(prefix, context, lexicon);
    if ranked.is_empty() {
        println!("  No suggestions.");
        return;
    }

    for s in ranked.iter().take(limit) {
        println!("  [{:>7}] {}", s.score, s.word);
    }
}
