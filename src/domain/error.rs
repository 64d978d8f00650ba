// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Every failure the data pipeline can report, as one enum.
//
// The application layer wraps these in anyhow with extra
// context; the lower layers match on the variants directly
// (e.g. `Exhausted` vs an empty page from `ExampleStore::next`).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntentError {
    /// A questions-file line that is not `<intent>\t<text>`
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// A word-vector line that is not `word f1 f2 ... fd`
    #[error("malformed word vector on line {line}: {reason}")]
    MalformedVector { line: usize, reason: String },

    /// `next` was called with the cursor already at the end
    #[error("example store exhausted at position {position} of {total}")]
    Exhausted { position: usize, total: usize },

    #[error("example {index} has intent {intent}, but only {classes} intents are defined")]
    UnknownIntent { index: usize, intent: usize, classes: usize },

    #[error("no vector for word '{0}'")]
    UnknownWord(String),

    /// None of the sentence's tokens has a word vector
    #[error("no known words in '{0}'")]
    NoKnownTokens(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IntentError>;
