// Gram model: n-gram slicing, gram-length table, field naming
//
// Every indexed word becomes one record: the word itself in the stored
// `word` field, and for each gram length n of its range every n-gram under
// `gram{n}`, the first one under `start{n}` and the last one under `end{n}`.
// Lengths count chars, not bytes.

use std::iter;
use std::ops::RangeInclusive;

use gramspell_index::Record;

/// Stored field holding the original word.
pub const WORD_FIELD: &str = "word";

/// Words shorter than this are never indexed.
pub const MIN_WORD_LEN: usize = 3;

/// Inclusive range of gram lengths used for a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GramRange {
    pub min: usize,
    pub max: usize,
}

impl GramRange {
    pub fn lengths(self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Gram lengths for a word of `len` chars.
///
/// | len  | min | max |
/// |------|-----|-----|
/// | <= 4 | 1   | 2   |
/// | 5    | 2   | 3   |
/// | > 5  | 3   | 4   |
pub fn gram_range(len: usize) -> GramRange {
    match len {
        0..=4 => GramRange { min: 1, max: 2 },
        5 => GramRange { min: 2, max: 3 },
        _ => GramRange { min: 3, max: 4 },
    }
}

/// Number of chars in `word`.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// All n-grams of `word`, left to right, duplicates kept.
///
/// Returns `max(0, len - n + 1)` slices; empty for `n == 0`.
pub fn grams(word: &str, n: usize) -> Vec<&str> {
    if n == 0 {
        return Vec::new();
    }
    let bounds: Vec<usize> = word
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(word.len()))
        .collect();
    let len = bounds.len() - 1;
    if len < n {
        return Vec::new();
    }
    (0..=len - n)
        .map(|i| &word[bounds[i]..bounds[i + n]])
        .collect()
}

pub fn gram_field(n: usize) -> String {
    format!("gram{n}")
}

pub fn start_field(n: usize) -> String {
    format!("start{n}")
}

pub fn end_field(n: usize) -> String {
    format!("end{n}")
}

/// Build the index record for `word`.
pub fn word_record(word: &str) -> Record {
    let mut record = Record::new().with_stored(WORD_FIELD, word);
    for n in gram_range(char_len(word)).lengths() {
        let grams = grams(word, n);
        let key = gram_field(n);
        for gram in &grams {
            record.add(key.as_str(), *gram);
        }
        if let (Some(first), Some(last)) = (grams.first(), grams.last()) {
            record.add(start_field(n), *first);
            record.add(end_field(n), *last);
        }
    }
    record
}
