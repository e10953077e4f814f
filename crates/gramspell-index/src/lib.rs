//! Term-index collaborator for the gramspell suggestion engine.
//!
//! The suggestion engine does not store anything itself. It talks to an
//! inverted index through the three traits in this crate:
//!
//! - [`IndexLocation`] -- a handle to one index; hands out read views and
//!   write handles
//! - [`Searcher`] -- an immutable, searchable view of committed records
//! - [`IndexWriter`] -- a scoped write handle (add, delete all, commit)
//!
//! Supporting modules:
//!
//! - [`record`] -- structured records of named string fields
//! - [`query`] -- disjunctive query descriptions of boosted term clauses
//! - [`memory`] -- [`MemoryIndex`](memory::MemoryIndex), an in-memory
//!   implementation with generation-versioned snapshots

pub mod memory;
pub mod query;
pub mod record;

use std::sync::Arc;

pub use memory::MemoryIndex;
pub use query::{Query, TermClause};
pub use record::Record;

/// Identifier of a record inside one searcher view.
pub type DocId = u32;

/// Error type for index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The index location has been stopped.
    #[error("index has been stopped")]
    Stopped,
    /// A document id does not belong to the searcher view.
    #[error("unknown document: {0}")]
    UnknownDocument(DocId),
    /// A document exists but does not store the requested field.
    #[error("document {doc} has no stored field {field:?}")]
    MissingField { doc: DocId, field: String },
    /// The index cannot address another document.
    #[error("index is full: at most {limit} documents")]
    Full { limit: usize },
    /// I/O failure reported by a backing store.
    #[error("index I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub doc: DocId,
    /// Relevance (higher is better). Only meaningful relative to other hits
    /// of the same search.
    pub score: f32,
}

/// Read view over committed records.
///
/// A view never changes after it has been handed out; records committed
/// later are only visible through a newer view.
pub trait Searcher: Send + Sync {
    /// Run a disjunctive query and return at most `max_results` hits,
    /// best first.
    fn search(&self, query: &Query, max_results: usize) -> Result<Vec<Hit>, IndexError>;

    /// Fetch a stored field of a record.
    fn stored_field(&self, doc: DocId, field: &str) -> Result<String, IndexError>;

    /// Number of records containing `term` in `field`.
    fn doc_freq(&self, field: &str, term: &str) -> Result<usize, IndexError>;

    /// Every field name present in the view.
    fn field_names(&self) -> Result<Vec<String>, IndexError>;

    /// Every distinct term of `field`, in ascending order.
    fn terms(&self, field: &str) -> Result<Vec<String>, IndexError>;

    /// Number of records in the view.
    fn num_docs(&self) -> usize;
}

/// Scoped write handle. Dropping it releases write access.
pub trait IndexWriter {
    /// Stage a record for addition.
    fn add_record(&mut self, record: Record) -> Result<(), IndexError>;

    /// Stage the removal of every record, including staged additions.
    fn delete_all(&mut self) -> Result<(), IndexError>;

    /// Consolidate staged changes and make them visible to new searchers.
    fn commit(&mut self) -> Result<(), IndexError>;
}

/// Handle to one index.
pub trait IndexLocation: Send + Sync {
    /// Acquire a read view of the latest committed generation.
    fn searcher(&self) -> Result<Arc<dyn Searcher>, IndexError>;

    /// Acquire the write handle. Blocks while another writer is alive.
    fn writer(&self) -> Result<Box<dyn IndexWriter + '_>, IndexError>;

    /// Release the index. Later `searcher`/`writer` calls fail with
    /// [`IndexError::Stopped`]; views already handed out stay usable.
    fn stop(&self);
}
