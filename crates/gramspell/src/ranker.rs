// Suggestion ranking: distance scoring and popularity filtering
//
// The index returns candidates in n-gram relevance order. The ranker walks
// them once, re-scores each with the configured string distance, drops the
// ones below the acceptance threshold or (when a reference index is given)
// below the popularity thresholds, and keeps the best K in a SuggestQueue.
// Once the queue is full the threshold is raised to its worst score, so
// later candidates must beat what is already kept.

use gramspell_core::{FieldSelector, StringDistance};
use gramspell_index::{Hit, IndexError, Searcher};
use tracing::debug;

use crate::gram::WORD_FIELD;
use crate::query::max_hits;
use crate::queue::{SuggestQueue, SuggestWord};

/// Frequency lookups against a caller-supplied reference index.
pub struct PopularityFilter<'a> {
    index: &'a dyn Searcher,
    fields: Vec<String>,
    more_popular: bool,
    word_freq: usize,
}

impl<'a> PopularityFilter<'a> {
    /// Resolve `field_spec` (a field, a comma-separated list, or `all`)
    /// against `index` and look up the frequency of the query `word`.
    pub fn new(
        index: &'a dyn Searcher,
        field_spec: &str,
        more_popular: bool,
        word: &str,
    ) -> Result<Self, IndexError> {
        let fields = FieldSelector::parse(field_spec).resolve(|| index.field_names())?;
        let mut filter = Self {
            index,
            fields,
            more_popular,
            word_freq: 0,
        };
        filter.word_freq = filter.frequency(word)?;
        Ok(filter)
    }

    /// Document frequency of `term`, summed over the selected fields.
    pub fn frequency(&self, term: &str) -> Result<usize, IndexError> {
        let mut freq = 0;
        for field in &self.fields {
            freq += self.index.doc_freq(field, term)?;
        }
        Ok(freq)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn more_popular(&self) -> bool {
        self.more_popular
    }

    /// Frequency of the query word.
    pub fn word_freq(&self) -> usize {
        self.word_freq
    }

    /// Whether the query word is already known well enough to be returned
    /// as its own and only suggestion.
    pub fn accepts_word_itself(&self) -> bool {
        !self.more_popular && self.word_freq > 0
    }

    /// Frequency a candidate must reach in more-popular mode.
    fn goal_freq(&self) -> usize {
        if self.more_popular { self.word_freq } else { 0 }
    }
}

/// Scores and filters raw candidate hits.
pub struct Ranker<'a> {
    pub distance: &'a dyn StringDistance,
    pub min_score: f32,
    pub min_doc_freq: usize,
}

impl Ranker<'_> {
    /// Rank the hits of a candidate query for `word`, best first.
    ///
    /// At most `max_hits(num_suggestions)` hits are examined and at most
    /// `num_suggestions` words returned. Any index failure aborts the whole
    /// ranking.
    pub fn rank(
        &self,
        word: &str,
        searcher: &dyn Searcher,
        hits: &[Hit],
        num_suggestions: usize,
        popularity: Option<&PopularityFilter<'_>>,
    ) -> Result<Vec<String>, IndexError> {
        let stop = hits.len().min(max_hits(num_suggestions));
        let mut queue = SuggestQueue::new(num_suggestions);
        let mut min = self.min_score;
        let mut candidate = SuggestWord::default();

        for hit in &hits[..stop] {
            candidate.string = searcher.stored_field(hit.doc, WORD_FIELD)?;
            candidate.freq = 0;
            debug!(term = %candidate.string, "found candidate");

            if candidate.string == word {
                debug!("candidate is the input word, skipping");
                continue;
            }

            candidate.score = self.distance.distance(word, &candidate.string);
            debug!(score = candidate.score, "distance score");
            if candidate.score < min {
                debug!(min_score = min, "below minimum score, skipping");
                continue;
            }

            if let Some(filter) = popularity {
                candidate.freq = filter.frequency(&candidate.string)?;
                debug!(freq = candidate.freq, "reference frequency");
                if filter.goal_freq() > candidate.freq || candidate.freq < self.min_doc_freq {
                    debug!(
                        min_doc_freq = self.min_doc_freq,
                        goal_freq = filter.goal_freq(),
                        "below frequency threshold, skipping"
                    );
                    continue;
                }
            }

            let overflow = queue.insert_with_overflow(std::mem::take(&mut candidate));
            if queue.is_full() {
                if let Some(worst) = queue.top() {
                    min = min.max(worst.score);
                }
            }
            candidate = overflow.unwrap_or_default();
        }

        Ok(queue
            .into_sorted_vec()
            .into_iter()
            .map(|w| w.string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramspell_core::distance::LevenshteinDistance;
    use gramspell_index::{IndexLocation, MemoryIndex, Record};

    use crate::gram::word_record;

    fn dictionary(words: &[&str]) -> MemoryIndex {
        MemoryIndex::with_records(words.iter().map(|w| word_record(w)))
    }

    fn all_hits(searcher: &dyn Searcher) -> Vec<Hit> {
        (0..searcher.num_docs() as u32)
            .map(|doc| Hit { doc, score: 1.0 })
            .collect()
    }

    fn reference_index(docs: &[&[(&str, &str)]]) -> MemoryIndex {
        MemoryIndex::with_records(docs.iter().map(|fields| {
            fields
                .iter()
                .fold(Record::new(), |record, (field, term)| record.with(*field, *term))
        }))
    }

    const RANKER: Ranker<'static> = Ranker {
        distance: &LevenshteinDistance,
        min_score: 0.5,
        min_doc_freq: 1,
    };

    #[test]
    fn orders_by_distance_and_skips_input_word() {
        let index = dictionary(&["speaker", "sneer", "sneaker", "sneker"]);
        let searcher = index.searcher().unwrap();
        let hits = all_hits(&*searcher);

        let ranked = RANKER.rank("sneker", &*searcher, &hits, 5, None).unwrap();
        assert_eq!(ranked, ["sneaker", "sneer", "speaker"]);
    }

    #[test]
    fn rejects_below_min_score() {
        let index = dictionary(&["sneaker", "zzzzzzz"]);
        let searcher = index.searcher().unwrap();
        let hits = all_hits(&*searcher);

        let ranked = RANKER.rank("sneker", &*searcher, &hits, 5, None).unwrap();
        assert_eq!(ranked, ["sneaker"]);
    }

    #[test]
    fn output_is_bounded() {
        let index = dictionary(&["kettle", "nettle", "settle", "mettle", "fettle"]);
        let searcher = index.searcher().unwrap();
        let hits = all_hits(&*searcher);

        let ranked = RANKER.rank("bettle", &*searcher, &hits, 2, None).unwrap();
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn only_the_first_hits_are_examined() {
        let words: Vec<String> = (0..30).map(|i| format!("wordy{i:02}")).collect();
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let index = dictionary(&refs);
        let searcher = index.searcher().unwrap();
        let hits = all_hits(&*searcher);

        // 1 suggestion -> 10 hits examined, so words 10.. are never seen
        let ranked = RANKER.rank("wordy29", &*searcher, &hits, 1, None).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_ne!(ranked[0], "wordy29");
        assert!(refs[..10].contains(&ranked[0].as_str()));
    }

    #[test]
    fn stored_field_failure_aborts() {
        let index = dictionary(&["sneaker"]);
        let searcher = index.searcher().unwrap();
        let hits = [Hit { doc: 42, score: 1.0 }];

        let err = RANKER.rank("sneker", &*searcher, &hits, 5, None).unwrap_err();
        assert!(matches!(err, IndexError::UnknownDocument(42)));
    }

    #[test]
    fn popularity_filter_sums_selected_fields() {
        let reference = reference_index(&[
            &[("title", "sneaker"), ("body", "sneaker")],
            &[("body", "sneaker")],
            &[("title", "sneer")],
        ]);
        let searcher = reference.searcher().unwrap();

        let single = PopularityFilter::new(&*searcher, "body", false, "sneker").unwrap();
        assert_eq!(single.frequency("sneaker").unwrap(), 2);

        let list = PopularityFilter::new(&*searcher, "title,body", false, "sneker").unwrap();
        assert_eq!(list.frequency("sneaker").unwrap(), 3);

        let all = PopularityFilter::new(&*searcher, "ALL", false, "sneker").unwrap();
        assert_eq!(all.fields(), ["body", "title"]);
        assert_eq!(all.frequency("sneer").unwrap(), 1);
        assert_eq!(all.word_freq(), 0);
        assert!(!all.accepts_word_itself());
    }

    #[test]
    fn known_word_is_accepted_unless_more_popular() {
        let reference = reference_index(&[&[("body", "sneker")]]);
        let searcher = reference.searcher().unwrap();

        let plain = PopularityFilter::new(&*searcher, "body", false, "sneker").unwrap();
        assert!(plain.accepts_word_itself());

        let popular = PopularityFilter::new(&*searcher, "body", true, "sneker").unwrap();
        assert!(!popular.accepts_word_itself());
        assert_eq!(popular.word_freq(), 1);
    }

    #[test]
    fn frequency_filters_candidates() {
        let index = dictionary(&["sneaker", "sneer", "speaker"]);
        let searcher = index.searcher().unwrap();
        let hits = all_hits(&*searcher);

        // sneaker absent from the reference, sneer once, speaker three times
        let reference = reference_index(&[
            &[("body", "sneer")],
            &[("body", "speaker")],
            &[("body", "speaker")],
            &[("body", "speaker")],
        ]);
        let ref_searcher = reference.searcher().unwrap();

        let filter = PopularityFilter::new(&*ref_searcher, "body", false, "sneker").unwrap();
        let ranked = RANKER
            .rank("sneker", &*searcher, &hits, 5, Some(&filter))
            .unwrap();
        assert_eq!(ranked, ["sneer", "speaker"]);

        let strict = Ranker {
            min_doc_freq: 2,
            ..RANKER
        };
        let ranked = strict
            .rank("sneker", &*searcher, &hits, 5, Some(&filter))
            .unwrap();
        assert_eq!(ranked, ["speaker"]);
    }

    #[test]
    fn more_popular_requires_at_least_the_word_frequency() {
        let index = dictionary(&["sneaker", "sneer", "speaker"]);
        let searcher = index.searcher().unwrap();
        let hits = all_hits(&*searcher);

        let reference = reference_index(&[
            &[("body", "sneker")],
            &[("body", "sneker")],
            &[("body", "sneer")],
            &[("body", "speaker")],
            &[("body", "speaker")],
            &[("body", "sneaker")],
            &[("body", "sneaker")],
            &[("body", "sneaker")],
        ]);
        let ref_searcher = reference.searcher().unwrap();

        let filter = PopularityFilter::new(&*ref_searcher, "body", true, "sneker").unwrap();
        let ranked = RANKER
            .rank("sneker", &*searcher, &hits, 5, Some(&filter))
            .unwrap();
        assert_eq!(ranked, ["sneaker", "speaker"]);
    }

    #[test]
    fn more_popular_goal_is_summed_over_selected_fields() {
        let index = dictionary(&["sneaker", "sneer", "speaker"]);
        let searcher = index.searcher().unwrap();
        let hits = all_hits(&*searcher);

        let reference = reference_index(&[
            &[("title", "sneker")],
            &[("title", "sneker")],
            &[("title", "speaker")],
            &[("body", "speaker")],
            &[("body", "sneaker")],
            &[("title", "sneer")],
            &[("title", "sneer")],
            &[("other", "sneaker")],
            &[("other", "sneaker")],
            &[("other", "sneaker")],
        ]);
        let ref_searcher = reference.searcher().unwrap();

        // goal 2; speaker only reaches it by adding title and body
        let listed =
            PopularityFilter::new(&*ref_searcher, "title,body", true, "sneker").unwrap();
        assert_eq!(listed.word_freq(), 2);
        let ranked = RANKER
            .rank("sneker", &*searcher, &hits, 5, Some(&listed))
            .unwrap();
        assert_eq!(ranked, ["sneer", "speaker"]);

        // "other" now counts for sneaker as well
        let all = PopularityFilter::new(&*ref_searcher, "all", true, "sneker").unwrap();
        assert_eq!(all.word_freq(), 2);
        assert_eq!(all.frequency("sneaker").unwrap(), 4);
        let ranked = RANKER
            .rank("sneker", &*searcher, &hits, 5, Some(&all))
            .unwrap();
        assert_eq!(ranked, ["sneaker", "sneer", "speaker"]);
    }
}
