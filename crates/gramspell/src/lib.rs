//! N-gram spelling suggestion engine.
//!
//! Words are indexed as records of their character n-grams. A misspelled
//! word is turned into a disjunctive n-gram query, the retrieved candidates
//! are re-scored with a string-distance measure, optionally filtered by
//! their popularity in a caller-supplied reference index, and the best K
//! are returned.
//!
//! # Architecture
//!
//! - [`gram`] -- n-gram slicing, gram-length table, field names, word records
//! - [`query`] -- candidate query construction
//! - [`queue`] -- bounded top-K suggestion queue
//! - [`ranker`] -- distance scoring and popularity filtering
//! - [`dictionary`] -- word sources for indexing
//! - [`options`] -- engine configuration
//! - [`engine`] -- the [`SpellChecker`] facade
//!
//! ```
//! use std::sync::Arc;
//! use gramspell::{SpellChecker, SpellOptions, WordList};
//! use gramspell_index::MemoryIndex;
//!
//! let checker = SpellChecker::new(Arc::new(MemoryIndex::new()), SpellOptions::default());
//! checker.index_dictionary(&mut WordList::from(["sneaker", "sneer", "speaker"])).unwrap();
//! let suggestions = checker.suggest_similar("sneker", 5).unwrap();
//! assert_eq!(suggestions[0], "sneaker");
//! ```

pub mod dictionary;
pub mod engine;
pub mod error;
pub mod gram;
pub mod options;
pub mod query;
pub mod queue;
pub mod ranker;

pub use dictionary::{Dictionary, IndexFieldDictionary, PlainTextDictionary, WordList};
pub use engine::{Popularity, SpellChecker};
pub use error::{Result, SpellError};
pub use options::SpellOptions;
