//! Error types shared by the poem analysis pipeline and its file readers.
//!
//! Every stage fails fast: the first problem is returned to the caller unchanged and no partial
//! results are produced.
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for everything in `poet`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The poem has no lines left after blank and punctuation-only lines are dropped.
    #[error("the poem has no words in it")]
    MalformedInput,

    /// A token in the poem has no entry in the pronouncing dictionary.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// A phoneme sequence has no vowel sound, so it has no syllables and can't rhyme.
    #[error("malformed pronunciation, no vowel phoneme in: {0}")]
    MalformedPronunciation(String),

    /// More distinct rhyme sounds than there are letters to label them with.
    #[error("found {0} distinct rhyme groups but only 26 labels are available")]
    TooManyRhymeGroups(usize),

    /// The requested poetry form isn't in the catalog.
    #[error("unknown poetry form: {0}")]
    UnknownForm(String),

    /// A malformed line in a dictionary or form catalog. `line` is 1-indexed.
    #[error("parse error in {file:?}, line {line}: {message}")]
    Parse {
        file: Option<PathBuf>,
        line: usize,
        message: String,
    },

    /// File read failure, with the path that was being read.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a `Parse` error with no file attached yet.
    pub fn parse(line: usize, message: impl Into<String>) -> Error {
        Error::Parse {
            file: None,
            line,
            message: message.into(),
        }
    }

    /// Attaches `path` to a `Parse` error. Other variants pass through untouched.
    pub fn in_file(self, path: &std::path::Path) -> Error {
        match self {
            Error::Parse { line, message, .. } => Error::Parse {
                file: Some(path.to_path_buf()),
                line,
                message,
            },
            other => other,
        }
    }
}

/// Reads the whole file at `path` into a string.
pub fn read_to_string(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
