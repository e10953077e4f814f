// Bounded top-K suggestion queue
//
// A fixed-capacity min-heap: the root is the worst retained suggestion, so
// deciding whether a newcomer gets in is a single comparison against it.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Upper bound on the slots reserved up front; larger queues grow on demand.
const PREALLOCATE_LIMIT: usize = 64;

/// A scored candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestWord {
    /// The suggested word.
    pub string: String,
    /// Similarity to the query word, 1.0 = identical.
    pub score: f32,
    /// Document frequency in the reference index (0 when not resolved).
    pub freq: usize,
}

impl SuggestWord {
    pub fn new(string: impl Into<String>, score: f32, freq: usize) -> Self {
        Self {
            string: string.into(),
            score,
            freq,
        }
    }

    /// Ranking order: higher score, then higher frequency, then the
    /// lexicographically smaller word. `Greater` means "better".
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.freq.cmp(&other.freq))
            .then_with(|| other.string.cmp(&self.string))
    }
}

/// Heap entry ordered by [`SuggestWord::rank_cmp`].
#[derive(Debug)]
struct Ranked(SuggestWord);

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0)
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Keeps the `capacity` best suggestions seen so far.
#[derive(Debug)]
pub struct SuggestQueue {
    capacity: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
}

impl SuggestQueue {
    /// Create a queue holding at most `capacity` suggestions.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(PREALLOCATE_LIMIT)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// The worst retained suggestion.
    pub fn top(&self) -> Option<&SuggestWord> {
        self.heap.peek().map(|Reverse(Ranked(word))| word)
    }

    /// Insert `word`, evicting the worst entry if the queue overflows.
    ///
    /// Returns the word that did not make it: `None` if there was room,
    /// the evicted entry if `word` displaced it, or `word` itself if it is
    /// worse than every retained entry. The returned value can be reused
    /// for the next candidate.
    pub fn insert_with_overflow(&mut self, word: SuggestWord) -> Option<SuggestWord> {
        if self.heap.len() < self.capacity {
            self.heap.push(Reverse(Ranked(word)));
            return None;
        }
        match self.heap.peek_mut() {
            Some(mut worst) if word.rank_cmp(&worst.0.0) == Ordering::Greater => {
                Some(std::mem::replace(&mut worst.0.0, word))
            }
            _ => Some(word),
        }
    }

    /// Remove and return the worst suggestion.
    pub fn pop(&mut self) -> Option<SuggestWord> {
        self.heap.pop().map(|Reverse(Ranked(word))| word)
    }

    /// Drain into a best-first list.
    pub fn into_sorted_vec(mut self) -> Vec<SuggestWord> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(word) = self.pop() {
            out.push(word);
        }
        out.reverse();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(s: &str, score: f32) -> SuggestWord {
        SuggestWord::new(s, score, 0)
    }

    #[test]
    fn keeps_the_best_k() {
        let mut queue = SuggestQueue::new(2);
        assert!(queue.insert_with_overflow(scored("a", 0.9)).is_none());
        assert!(queue.insert_with_overflow(scored("b", 0.95)).is_none());

        let rejected = queue.insert_with_overflow(scored("c", 0.7)).unwrap();
        assert_eq!(rejected.string, "c");

        let evicted = queue.insert_with_overflow(scored("d", 0.99)).unwrap();
        assert_eq!(evicted.string, "a");

        let scores: Vec<f32> = queue.into_sorted_vec().iter().map(|w| w.score).collect();
        assert_eq!(scores, [0.99f32, 0.95]);
    }

    #[test]
    fn top_is_the_worst_retained() {
        let mut queue = SuggestQueue::new(3);
        for (s, score) in [("a", 0.6), ("b", 0.8), ("c", 0.7)] {
            queue.insert_with_overflow(scored(s, score));
        }
        assert!(queue.is_full());
        assert_eq!(queue.top().map(|w| w.score), Some(0.6));
    }

    #[test]
    fn frequency_breaks_score_ties() {
        let mut queue = SuggestQueue::new(2);
        queue.insert_with_overflow(SuggestWord::new("rare", 0.8, 1));
        queue.insert_with_overflow(SuggestWord::new("common", 0.8, 50));
        queue.insert_with_overflow(SuggestWord::new("best", 0.9, 0));

        let words: Vec<String> = queue.into_sorted_vec().into_iter().map(|w| w.string).collect();
        assert_eq!(words, ["best", "common"]);
    }

    #[test]
    fn full_ties_prefer_the_smaller_word() {
        let mut queue = SuggestQueue::new(1);
        queue.insert_with_overflow(scored("zeta", 0.5));
        let out = queue.insert_with_overflow(scored("alpha", 0.5)).unwrap();
        assert_eq!(out.string, "zeta");
        assert_eq!(queue.top().unwrap().string, "alpha");

        // an exact duplicate of the worst entry does not get in
        let out = queue.insert_with_overflow(scored("alpha", 0.5)).unwrap();
        assert_eq!(out.string, "alpha");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut queue = SuggestQueue::new(0);
        let out = queue.insert_with_overflow(scored("a", 1.0));
        assert_eq!(out.map(|w| w.string), Some("a".to_string()));
        assert!(queue.is_empty());
    }

    #[test]
    fn huge_capacity_grows_on_demand() {
        let mut queue = SuggestQueue::new(usize::MAX);
        assert_eq!(queue.capacity(), usize::MAX);
        for (s, score) in [("a", 0.6), ("b", 0.9)] {
            assert!(queue.insert_with_overflow(scored(s, score)).is_none());
        }
        assert!(!queue.is_full());
        let words: Vec<String> = queue.into_sorted_vec().into_iter().map(|w| w.string).collect();
        assert_eq!(words, ["b", "a"]);
    }

    #[test]
    fn sorted_output_is_best_first() {
        let mut queue = SuggestQueue::new(4);
        for (s, score) in [("c", 0.6), ("a", 0.9), ("d", 0.55), ("b", 0.75)] {
            queue.insert_with_overflow(scored(s, score));
        }
        let words: Vec<String> = queue.into_sorted_vec().into_iter().map(|w| w.string).collect();
        assert_eq!(words, ["a", "b", "c", "d"]);
    }
}
