// Word sources for indexing
//
// A dictionary is a lazy sequence of candidate words. The engine decides
// which of them are indexed (length, duplicates); sources only produce them.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::iter;
use std::path::Path;

use gramspell_index::Searcher;

use crate::error::{Result, SpellError};

/// A source of words to index.
pub trait Dictionary {
    /// Iterate over the words. A read failure is yielded as an error item;
    /// the engine stops at the first one.
    fn words(&mut self) -> Box<dyn Iterator<Item = Result<String>> + '_>;
}

/// One word per line. Lines are trimmed and blank lines skipped.
pub struct PlainTextDictionary<R> {
    reader: R,
}

impl<R: BufRead> PlainTextDictionary<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl PlainTextDictionary<BufReader<File>> {
    /// Open a word-list file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path).map_err(SpellError::Dictionary)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Dictionary for PlainTextDictionary<R> {
    fn words(&mut self) -> Box<dyn Iterator<Item = Result<String>> + '_> {
        Box::new((&mut self.reader).lines().filter_map(|line| match line {
            Ok(line) => {
                let word = line.trim();
                (!word.is_empty()).then(|| Ok(word.to_string()))
            }
            Err(e) => Some(Err(SpellError::Dictionary(e))),
        }))
    }
}

/// Every distinct term of one field of an existing index, e.g. to build
/// suggestions from the vocabulary of a document index.
pub struct IndexFieldDictionary<'a> {
    searcher: &'a dyn Searcher,
    field: String,
}

impl<'a> IndexFieldDictionary<'a> {
    pub fn new(searcher: &'a dyn Searcher, field: impl Into<String>) -> Self {
        Self {
            searcher,
            field: field.into(),
        }
    }
}

impl Dictionary for IndexFieldDictionary<'_> {
    fn words(&mut self) -> Box<dyn Iterator<Item = Result<String>> + '_> {
        match self.searcher.terms(&self.field) {
            Ok(terms) => Box::new(terms.into_iter().map(Ok)),
            Err(e) => Box::new(iter::once(Err(SpellError::Index(e)))),
        }
    }
}

/// An in-memory word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList(pub Vec<String>);

impl Dictionary for WordList {
    fn words(&mut self) -> Box<dyn Iterator<Item = Result<String>> + '_> {
        Box::new(self.0.iter().cloned().map(Ok))
    }
}

impl<S: Into<String>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        WordList(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for WordList {
    fn from(words: [S; N]) -> Self {
        words.into_iter().collect()
    }
}

impl From<Vec<String>> for WordList {
    fn from(words: Vec<String>) -> Self {
        WordList(words)
    }
}
