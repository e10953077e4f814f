// Candidate query construction
//
// The n-gram query only retrieves candidates; the final order is decided by
// the string-distance re-scoring in the ranker. That is why more hits than
// suggestions are requested.

use gramspell_index::Query;
use serde::{Deserialize, Serialize};

use crate::gram::{char_len, end_field, gram_field, gram_range, grams, start_field};

/// Hits fetched from the index per requested suggestion.
pub const HITS_PER_SUGGESTION: usize = 10;

/// Default boost of the first-gram clause.
pub const DEFAULT_START_BOOST: f32 = 2.0;

/// Default boost of the last-gram clause.
pub const DEFAULT_END_BOOST: f32 = 1.0;

/// Relevance boosts of the word-edge clauses. A boost of 0 (or below)
/// drops the clause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boosts {
    pub start: f32,
    pub end: f32,
}

impl Default for Boosts {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_BOOST,
            end: DEFAULT_END_BOOST,
        }
    }
}

/// Number of hits to request for `num_suggestions` suggestions.
pub fn max_hits(num_suggestions: usize) -> usize {
    num_suggestions.saturating_mul(HITS_PER_SUGGESTION)
}

/// Build the disjunctive candidate query for `word`.
pub fn build_query(word: &str, boosts: Boosts) -> Query {
    let mut query = Query::new();
    for n in gram_range(char_len(word)).lengths() {
        let grams = grams(word, n);
        let (Some(first), Some(last)) = (grams.first(), grams.last()) else {
            continue;
        };
        if boosts.start > 0.0 {
            query.should_boosted(start_field(n), *first, boosts.start);
        }
        if boosts.end > 0.0 {
            query.should_boosted(end_field(n), *last, boosts.end);
        }
        let key = gram_field(n);
        for gram in &grams {
            query.should(key.as_str(), *gram);
        }
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_for_six_letter_word() {
        let query = build_query("sneker", Boosts::default());
        assert_eq!(
            query.to_string(),
            "start3:sne^2 end3:ker gram3:sne gram3:nek gram3:eke gram3:ker \
             start4:snek^2 end4:eker gram4:snek gram4:neke gram4:eker"
        );
    }

    #[test]
    fn zero_boost_drops_edge_clauses() {
        let query = build_query("cat", Boosts { start: 0.0, end: 0.0 });
        assert!(query.clauses().iter().all(|c| c.field.starts_with("gram")));
        // 3 unigrams + 2 bigrams
        assert_eq!(query.len(), 5);
    }

    #[test]
    fn custom_boosts_are_applied() {
        let query = build_query("cat", Boosts { start: 3.5, end: 0.5 });
        let start = &query.clauses()[0];
        assert_eq!((start.field.as_str(), start.term.as_str()), ("start1", "c"));
        assert_eq!(start.boost, 3.5);
        let end = &query.clauses()[1];
        assert_eq!((end.field.as_str(), end.term.as_str()), ("end1", "t"));
        assert_eq!(end.boost, 0.5);
    }

    #[test]
    fn short_word_contributes_only_existing_lengths() {
        // "a" has range 1..=2 but no 2-grams
        let query = build_query("a", Boosts::default());
        assert_eq!(query.to_string(), "start1:a^2 end1:a gram1:a");
    }

    #[test]
    fn duplicate_grams_each_get_a_clause() {
        let query = build_query("banana", Boosts { start: 0.0, end: 0.0 });
        let an = query
            .clauses()
            .iter()
            .filter(|c| c.field == "gram3" && c.term == "ana")
            .count();
        assert_eq!(an, 2);
    }

    #[test]
    fn hits_scale_with_suggestions() {
        assert_eq!(max_hits(5), 50);
        assert_eq!(max_hits(1), 10);
    }
}
