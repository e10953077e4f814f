// In-memory index with generation-versioned snapshots
//
// Readers get an `Arc<Snapshot>` of the latest committed generation and keep
// it for as long as they like; a commit builds a new snapshot and swaps the
// pointer, so searches never wait on indexing. Writers are serialized by the
// staging mutex, whose guard lives inside the write handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hashbrown::HashMap;
use parking_lot::{Mutex, MutexGuard, RwLock};
use tracing::{debug, trace};

use crate::query::Query;
use crate::record::Record;
use crate::{DocId, Hit, IndexError, IndexLocation, IndexWriter, Searcher};

/// Most documents one snapshot can hold: every `DocId` value once.
pub const MAX_DOCS: usize = (DocId::MAX as usize).saturating_add(1);

/// Fail if a snapshot holding `docs` documents cannot take one more.
fn ensure_room(docs: usize) -> Result<(), IndexError> {
    if docs >= MAX_DOCS {
        Err(IndexError::Full { limit: MAX_DOCS })
    } else {
        Ok(())
    }
}

/// Occurrences of one term in one document.
#[derive(Debug, Clone, Copy)]
struct Posting {
    doc: DocId,
    tf: u32,
}

/// An immutable committed generation of a [`MemoryIndex`].
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    generation: u64,
    /// Stored fields, indexed by `DocId`.
    stored: Vec<HashMap<String, String>>,
    /// field -> term -> postings in ascending doc order.
    postings: HashMap<String, HashMap<String, Vec<Posting>>>,
}

impl Snapshot {
    /// Commit counter; 0 for an index that was never committed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Callers keep `stored.len()` below `MAX_DOCS`, so the id fits.
    fn insert(&mut self, record: &Record) {
        let doc = self.stored.len() as DocId;
        let mut stored = HashMap::new();

        for (field, value) in record.fields() {
            if record.is_stored(field) && !stored.contains_key(field) {
                stored.insert(field.to_string(), value.to_string());
            }
            let postings = self
                .postings
                .entry(field.to_string())
                .or_default()
                .entry(value.to_string())
                .or_default();
            match postings.last_mut() {
                Some(last) if last.doc == doc => last.tf += 1,
                _ => postings.push(Posting { doc, tf: 1 }),
            }
        }

        self.stored.push(stored);
    }

    fn postings(&self, field: &str, term: &str) -> Option<&[Posting]> {
        self.postings
            .get(field)
            .and_then(|terms| terms.get(term))
            .map(Vec::as_slice)
    }
}

impl Searcher for Snapshot {
    /// Scores each matching document as
    /// `coord * sum(boost * sqrt(tf) * idf)` with
    /// `idf = 1 + ln(N / (df + 1))` and `coord = matched / total clauses`.
    /// Ties go to the lower doc id.
    fn search(&self, query: &Query, max_results: usize) -> Result<Vec<Hit>, IndexError> {
        if max_results == 0 || query.is_empty() {
            return Ok(Vec::new());
        }

        let num_docs = self.stored.len() as f32;
        let total = query.len() as f32;
        let mut acc: HashMap<DocId, (f32, u32)> = HashMap::new();

        for clause in query.clauses() {
            let Some(postings) = self.postings(&clause.field, &clause.term) else {
                continue;
            };
            let idf = 1.0 + (num_docs / (postings.len() as f32 + 1.0)).ln();
            for posting in postings {
                let entry = acc.entry(posting.doc).or_insert((0.0, 0));
                entry.0 += clause.boost * (posting.tf as f32).sqrt() * idf;
                entry.1 += 1;
            }
        }

        let mut hits: Vec<Hit> = acc
            .into_iter()
            .map(|(doc, (sum, matched))| Hit {
                doc,
                score: sum * matched as f32 / total,
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc.cmp(&b.doc)));
        hits.truncate(max_results);
        Ok(hits)
    }

    fn stored_field(&self, doc: DocId, field: &str) -> Result<String, IndexError> {
        let fields = self
            .stored
            .get(doc as usize)
            .ok_or(IndexError::UnknownDocument(doc))?;
        fields
            .get(field)
            .cloned()
            .ok_or_else(|| IndexError::MissingField {
                doc,
                field: field.to_string(),
            })
    }

    fn doc_freq(&self, field: &str, term: &str) -> Result<usize, IndexError> {
        Ok(self.postings(field, term).map_or(0, <[Posting]>::len))
    }

    fn field_names(&self) -> Result<Vec<String>, IndexError> {
        let mut names: Vec<String> = self.postings.keys().cloned().collect();
        names.sort_unstable();
        Ok(names)
    }

    fn terms(&self, field: &str) -> Result<Vec<String>, IndexError> {
        let mut terms: Vec<String> = self
            .postings
            .get(field)
            .map(|terms| terms.keys().cloned().collect())
            .unwrap_or_default();
        terms.sort_unstable();
        Ok(terms)
    }

    fn num_docs(&self) -> usize {
        self.stored.len()
    }
}

/// Changes staged by the current writer.
#[derive(Debug, Default)]
struct Staging {
    added: Vec<Record>,
    cleared: bool,
}

impl Staging {
    fn is_dirty(&self) -> bool {
        self.cleared || !self.added.is_empty()
    }

    fn reset(&mut self) {
        self.added.clear();
        self.cleared = false;
    }
}

/// Volatile inverted index.
///
/// ```
/// use gramspell_index::{IndexLocation, MemoryIndex, Record, Searcher};
///
/// let index = MemoryIndex::with_records([Record::new().with_stored("word", "kettle")]);
/// let searcher = index.searcher().unwrap();
/// assert_eq!(searcher.doc_freq("word", "kettle").unwrap(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryIndex {
    current: RwLock<Arc<Snapshot>>,
    staging: Mutex<Staging>,
    stopped: AtomicBool,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index whose first generation holds `records`. Records past
    /// [`MAX_DOCS`] are ignored.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let index = Self::new();
        {
            let mut staging = index.staging.lock();
            staging.added.extend(records.into_iter().take(MAX_DOCS));
            index.publish(&mut staging);
        }
        index
    }

    /// Generation of the latest commit.
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    fn check_running(&self) -> Result<(), IndexError> {
        if self.is_stopped() {
            Err(IndexError::Stopped)
        } else {
            Ok(())
        }
    }

    /// Fold staged changes into a new snapshot and make it current.
    ///
    /// The caller holds the staging lock, so no other publish can interleave
    /// between reading the current snapshot and replacing it.
    fn publish(&self, staging: &mut Staging) {
        let mut next = if staging.cleared {
            Snapshot::default()
        } else {
            Snapshot::clone(&self.current.read())
        };
        for record in &staging.added {
            next.insert(record);
        }
        staging.reset();

        let mut current = self.current.write();
        next.generation = current.generation + 1;
        debug!(
            generation = next.generation,
            docs = next.stored.len(),
            "published index snapshot"
        );
        *current = Arc::new(next);
    }
}

impl IndexLocation for MemoryIndex {
    fn searcher(&self) -> Result<Arc<dyn Searcher>, IndexError> {
        self.check_running()?;
        let snapshot: Arc<dyn Searcher> = self.current.read().clone();
        Ok(snapshot)
    }

    fn writer(&self) -> Result<Box<dyn IndexWriter + '_>, IndexError> {
        self.check_running()?;
        let staging = self.staging.lock();
        trace!("acquired index writer");
        Ok(Box::new(MemoryWriter {
            index: self,
            staging,
        }))
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

/// Write handle of a [`MemoryIndex`]. Uncommitted changes are discarded
/// when the handle is dropped.
pub struct MemoryWriter<'a> {
    index: &'a MemoryIndex,
    staging: MutexGuard<'a, Staging>,
}

impl IndexWriter for MemoryWriter<'_> {
    fn add_record(&mut self, record: Record) -> Result<(), IndexError> {
        self.index.check_running()?;
        let committed = if self.staging.cleared {
            0
        } else {
            self.index.current.read().stored.len()
        };
        ensure_room(committed.saturating_add(self.staging.added.len()))?;
        self.staging.added.push(record);
        Ok(())
    }

    fn delete_all(&mut self) -> Result<(), IndexError> {
        self.index.check_running()?;
        self.staging.added.clear();
        self.staging.cleared = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), IndexError> {
        self.index.check_running()?;
        self.index.publish(&mut self.staging);
        Ok(())
    }
}

impl Drop for MemoryWriter<'_> {
    fn drop(&mut self) {
        if self.staging.is_dirty() {
            debug!(
                staged = self.staging.added.len(),
                cleared = self.staging.cleared,
                "discarding uncommitted changes"
            );
            self.staging.reset();
        }
        trace!("released index writer");
    }
}
