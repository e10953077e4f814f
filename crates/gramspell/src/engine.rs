// SpellChecker: the suggestion engine facade
//
// Owns the index target, the configuration and the lifecycle flag, and is
// meant to be shared between threads. Two critical sections exist:
//
// - `modify_lock` serializes everything that changes the index or the index
//   target: `index_dictionary`, `clear_index`, `set_index`.
// - `index` (an RwLock around the target) is only held long enough to clone
//   the target handle. Searches then work on a leased read view and never
//   block each other.
//
// Lock order: `modify_lock` before `index`. Never acquire `modify_lock`
// while holding `index`.

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gramspell_core::StringDistance;
use gramspell_index::{IndexLocation, IndexWriter, Searcher};
use hashbrown::HashSet;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace};

use crate::dictionary::Dictionary;
use crate::error::{Result, SpellError};
use crate::gram::{MIN_WORD_LEN, WORD_FIELD, char_len, word_record};
use crate::options::SpellOptions;
use crate::query::{Boosts, build_query, max_hits};
use crate::ranker::{PopularityFilter, Ranker};

/// Restricts and re-ranks suggestions by their frequency in a reference
/// index (typically the document index the misspelled word came from).
#[derive(Clone, Copy)]
pub struct Popularity<'a> {
    /// The reference index view.
    pub index: &'a dyn Searcher,
    /// A field name, a comma-separated list of field names, or `all`.
    pub field: &'a str,
    /// Only suggest words at least as frequent as the input word.
    pub more_popular: bool,
}

impl<'a> Popularity<'a> {
    pub fn new(index: &'a dyn Searcher, field: &'a str) -> Self {
        Self {
            index,
            field,
            more_popular: false,
        }
    }

    /// Switch on more-popular mode.
    pub fn more_popular(mut self) -> Self {
        self.more_popular = true;
        self
    }
}

/// Mutable configuration, copied out at the start of each suggestion.
#[derive(Clone)]
struct Settings {
    min_score: f32,
    min_doc_freq: usize,
    boosts: Boosts,
    distance: Arc<dyn StringDistance>,
}

impl From<&SpellOptions> for Settings {
    fn from(options: &SpellOptions) -> Self {
        Self {
            min_score: options.min_score,
            min_doc_freq: options.min_doc_freq,
            boosts: Boosts {
                start: options.start_boost,
                end: options.end_boost,
            },
            distance: options.distance.build(),
        }
    }
}

/// A read view that is released when dropped, on every exit path.
struct SearcherLease {
    searcher: Arc<dyn Searcher>,
}

impl SearcherLease {
    fn acquire(index: &dyn IndexLocation) -> Result<Self> {
        let searcher = index.searcher()?;
        trace!(docs = searcher.num_docs(), "acquired searcher");
        Ok(Self { searcher })
    }
}

impl Deref for SearcherLease {
    type Target = dyn Searcher;

    fn deref(&self) -> &Self::Target {
        &*self.searcher
    }
}

impl Drop for SearcherLease {
    fn drop(&mut self) {
        trace!("released searcher");
    }
}

/// N-gram spelling suggestion engine over an [`IndexLocation`].
///
/// ```
/// use std::sync::Arc;
/// use gramspell::{SpellChecker, SpellOptions, WordList};
/// use gramspell_index::MemoryIndex;
///
/// let checker = SpellChecker::new(Arc::new(MemoryIndex::new()), SpellOptions::default());
/// checker.index_dictionary(&mut WordList::from(["kettle", "nettle"])).unwrap();
/// assert!(checker.exists("kettle").unwrap());
/// assert_eq!(checker.suggest_similar("kettel", 3).unwrap()[0], "kettle");
/// ```
pub struct SpellChecker {
    index: RwLock<Arc<dyn IndexLocation>>,
    modify_lock: Mutex<()>,
    settings: RwLock<Settings>,
    closed: AtomicBool,
}

impl SpellChecker {
    /// Create a spell checker over `index`.
    pub fn new(index: Arc<dyn IndexLocation>, options: SpellOptions) -> Self {
        Self {
            index: RwLock::new(index),
            modify_lock: Mutex::new(()),
            settings: RwLock::new(Settings::from(&options)),
            closed: AtomicBool::new(false),
        }
    }

    /// Create a spell checker with default options and a custom distance.
    pub fn with_distance(index: Arc<dyn IndexLocation>, distance: Arc<dyn StringDistance>) -> Self {
        let mut checker = Self::new(index, SpellOptions::default());
        checker.settings.get_mut().distance = distance;
        checker
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the index target. Waits for any running index modification.
    pub fn set_index(&self, index: Arc<dyn IndexLocation>) -> Result<()> {
        let _modify = self.modify_lock.lock();
        self.ensure_open()?;
        *self.index.write() = index;
        debug!("switched spell index");
        Ok(())
    }

    /// Set the minimum similarity, expected in (0, 1). Default 0.5.
    pub fn set_accuracy(&self, min_score: f32) -> Result<()> {
        self.ensure_open()?;
        self.settings.write().min_score = min_score;
        Ok(())
    }

    pub fn accuracy(&self) -> f32 {
        self.settings.read().min_score
    }

    /// Set the minimum reference-index frequency. Default 1.
    pub fn set_min_doc_freq(&self, min_doc_freq: usize) -> Result<()> {
        self.ensure_open()?;
        self.settings.write().min_doc_freq = min_doc_freq;
        Ok(())
    }

    pub fn min_doc_freq(&self) -> usize {
        self.settings.read().min_doc_freq
    }

    /// Set the first/last-gram boosts. Default 2.0 / 1.0.
    pub fn set_boosts(&self, boosts: Boosts) -> Result<()> {
        self.ensure_open()?;
        self.settings.write().boosts = boosts;
        Ok(())
    }

    pub fn boosts(&self) -> Boosts {
        self.settings.read().boosts
    }

    pub fn set_string_distance(&self, distance: Arc<dyn StringDistance>) -> Result<()> {
        self.ensure_open()?;
        self.settings.write().distance = distance;
        Ok(())
    }

    pub fn string_distance(&self) -> Arc<dyn StringDistance> {
        self.settings.read().distance.clone()
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Suggest up to `num_suggestions` words similar to `word`, best first.
    ///
    /// The n-gram retrieval does not rank like the final string distance, so
    /// asking for at least 5 suggestions gives better results even when only
    /// the first one is used.
    pub fn suggest_similar(&self, word: &str, num_suggestions: usize) -> Result<Vec<String>> {
        self.suggest(word, num_suggestions, None)
    }

    /// Suggest up to `num_suggestions` words similar to `word`, optionally
    /// restricted to words present in a reference index.
    ///
    /// With a reference index, a word that already occurs there is returned
    /// as its own only suggestion unless `more_popular` is set; candidates
    /// must reach the minimum frequency, and in more-popular mode also the
    /// frequency of `word` itself. Ties in similarity are broken by
    /// frequency.
    pub fn suggest(
        &self,
        word: &str,
        num_suggestions: usize,
        popularity: Option<Popularity<'_>>,
    ) -> Result<Vec<String>> {
        self.ensure_open()?;
        if num_suggestions == 0 {
            return Err(SpellError::InvalidArgument(
                "number of suggestions must be at least 1".to_string(),
            ));
        }

        let settings = self.settings.read().clone();
        let searcher = SearcherLease::acquire(&*self.current_index())?;

        let filter = popularity
            .map(|p| PopularityFilter::new(p.index, p.field, p.more_popular, word))
            .transpose()?;
        if let Some(filter) = &filter {
            if filter.accepts_word_itself() {
                debug!(word, freq = filter.word_freq(), "word is known, returning it");
                return Ok(vec![word.to_string()]);
            }
        }

        let query = build_query(word, settings.boosts);
        let hits = searcher.search(&query, max_hits(num_suggestions))?;
        debug!(word, clauses = query.len(), hits = hits.len(), "candidate query");

        let ranker = Ranker {
            distance: &*settings.distance,
            min_score: settings.min_score,
            min_doc_freq: settings.min_doc_freq,
        };
        Ok(ranker.rank(word, &*searcher, &hits, num_suggestions, filter.as_ref())?)
    }

    /// Whether `word` has been indexed.
    pub fn exists(&self, word: &str) -> Result<bool> {
        self.ensure_open()?;
        let searcher = SearcherLease::acquire(&*self.current_index())?;
        Ok(searcher.doc_freq(WORD_FIELD, word)? > 0)
    }

    // =========================================================================
    // Index modification
    // =========================================================================

    /// Index every word of `dict` that is at least 3 chars long and not
    /// indexed yet. Returns the number of words added.
    ///
    /// Added words are committed even if the dictionary fails part-way; the
    /// failure is returned afterwards.
    pub fn index_dictionary(&self, dict: &mut dyn Dictionary) -> Result<usize> {
        let _modify = self.modify_lock.lock();
        self.ensure_open()?;

        let index = self.current_index();
        let searcher = SearcherLease::acquire(&*index)?;
        let mut writer = index.writer()?;

        let mut added = 0;
        let outcome = add_words(dict, &searcher, &mut *writer, &mut added);

        if added > 0 {
            writer.commit()?;
        }
        info!(added, "indexed dictionary");
        outcome.map(|()| added)
    }

    /// Remove every word from the index.
    pub fn clear_index(&self) -> Result<()> {
        let _modify = self.modify_lock.lock();
        self.ensure_open()?;

        let index = self.current_index();
        let mut writer = index.writer()?;
        writer.delete_all()?;
        writer.commit()?;
        info!("cleared spell index");
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Close the spell checker and stop its index. Fails if already closed.
    pub fn close(&self) -> Result<()> {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SpellError::Closed);
        }
        self.current_index().stop();
        info!("spell checker closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            Err(SpellError::Closed)
        } else {
            Ok(())
        }
    }

    fn current_index(&self) -> Arc<dyn IndexLocation> {
        self.index.read().clone()
    }
}

/// Feed the dictionary into `writer`, counting additions in `added` so the
/// caller can commit them even when this returns an error.
fn add_words(
    dict: &mut dyn Dictionary,
    searcher: &SearcherLease,
    writer: &mut dyn IndexWriter,
    added: &mut usize,
) -> Result<()> {
    let mut seen = HashSet::new();
    for word in dict.words() {
        let word = word?;
        if char_len(&word) < MIN_WORD_LEN {
            continue;
        }
        if searcher.doc_freq(WORD_FIELD, &word)? > 0 || seen.contains(&word) {
            continue;
        }
        writer.add_record(word_record(&word))?;
        seen.insert(word);
        *added += 1;
    }
    Ok(())
}
