// Error type for the suggestion engine

use gramspell_index::IndexError;

/// Errors returned by [`SpellChecker`](crate::SpellChecker) operations.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    /// The spell checker was closed; no operation may run afterwards.
    /// Also returned by a second `close()`.
    #[error("spell checker has been closed")]
    Closed,

    /// A caller-supplied argument is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure reported by the term index. Never retried.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// The dictionary source could not be read.
    #[error("failed to read dictionary: {0}")]
    Dictionary(#[source] std::io::Error),

    /// Options could not be parsed.
    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}

pub type Result<T, E = SpellError> = std::result::Result<T, E>;
