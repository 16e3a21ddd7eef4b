//! Lexical tokenization of free-text conditions and index definitions.
//!
//! Neither input is a real grammar, so tokens are just runs of word
//! characters. `"user_id = 1 AND status = 'join'"` yields
//! `user_id, 1, AND, status, join`; the quoted `join` still counts as a join.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("word pattern is a valid regex"));

/// Splits text into word-like tokens borrowed from the input.
pub trait Tokenize {
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenize for WordTokenizer {
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        WORD.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Case-insensitive count of tokens equal to any of `words`.
pub fn count_words(tokens: &[&str], words: &[&str]) -> usize {
    tokens
        .iter()
        .filter(|t| words.iter().any(|w| t.eq_ignore_ascii_case(w)))
        .count()
}
