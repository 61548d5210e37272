use crate::config::TextConfig;
use crate::layout::WordFrequency;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "must", "can", "this", "that",
        "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us",
        "them", "my", "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours",
        "theirs",
    ]
    .into_iter()
    .collect()
});

const STEM_SUFFIXES: [&str; 7] = ["ing", "ed", "er", "est", "ly", "s", "es"];

/// Tokenizes `text` and counts each (stemmed) word, in first-seen order.
pub fn count_words(text: &str, config: &TextConfig) -> Vec<WordFrequency> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, " ");
    let extra: HashSet<String> = config
        .extra_stop_words
        .iter()
        .map(|word| word.to_lowercase())
        .collect();

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<WordFrequency> = Vec::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() < config.min_word_length
            || STOP_WORDS.contains(token)
            || extra.contains(token)
        {
            continue;
        }
        let word = if config.stemming {
            stem_word(token)
        } else {
            token
        };
        match index.get(word) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(word.to_string(), counts.len());
                counts.push(WordFrequency::new(word, 1));
            }
        }
    }
    counts
}

/// Stable sort by descending count; ties keep their incoming order.
pub fn rank_words(mut counts: Vec<WordFrequency>) -> Vec<WordFrequency> {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Strips the first matching suffix, keeping at least three characters.
pub fn stem_word(word: &str) -> &str {
    if word.chars().count() <= 3 {
        return word;
    }
    for suffix in STEM_SUFFIXES {
        if word.ends_with(suffix) && word.chars().count() > suffix.len() + 2 {
            return &word[..word.len() - suffix.len()];
        }
    }
    word
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordStats {
    pub total: u64,
    pub unique: usize,
    pub most_frequent: Option<WordFrequency>,
    pub top: Vec<WordFrequency>,
}

impl WordStats {
    pub const TOP_N: usize = 10;

    pub fn from_ranked(ranked: &[WordFrequency]) -> Self {
        Self {
            total: ranked.iter().map(|entry| entry.count as u64).sum(),
            unique: ranked.len(),
            most_frequent: ranked.first().cloned(),
            top: ranked.iter().take(Self::TOP_N).cloned().collect(),
        }
    }
}

impl fmt::Display for WordStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total words: {}", self.total)?;
        writeln!(f, "Unique words: {}", self.unique)?;
        if let Some(top) = &self.most_frequent {
            writeln!(f, "Most frequent: {} ({} times)", top.word, top.count)?;
        }
        for (idx, entry) in self.top.iter().enumerate() {
            writeln!(f, "{:>3}. {} ({} times)", idx + 1, entry.word, entry.count)?;
        }
        Ok(())
    }
}
