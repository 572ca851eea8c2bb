//! Turns raw poem text into lines of normalized words.
//!
//! The input text will generally have punctuation, capitalization, and blank lines that have to
//! be removed before the words can be looked up in the pronouncing dictionary. The words in the
//! dictionary are upper-cased and keep only essential inner punctuation (e.g. "LET'S").
use log::debug;

use crate::poet::error::{self, Error, Result};

/// Characters stripped from both ends of every word. Inner ones are kept (e.g. "DON'T").
const STRIPPED_CHARS: &[char] = &[
    '!', '"', '\'', '`', '@', '$', '%', '^', '&', '_', '-', '+', '=', '{', '}', '|', '\\', '/',
    ',', ';', ':', '.', '?', ')', '(', '[', ']', '<', '>', '*', '#', '\n', '\t', '\r', ' ',
];

/// Normalizes the input word for looking up in the dictionary.
///
/// This upper-cases `word` and strips punctuation and whitespace from both ends. The result may
/// be empty, e.g. for a lone dash, and callers have to drop those.
///
/// ```raw
/// "Birthday!!!" -> "BIRTHDAY"
/// "let's"       -> "LET'S"
/// ```
pub fn normalize(word: &str) -> String {
    word.to_uppercase().trim_matches(STRIPPED_CHARS).to_string()
}

/// A token is one normalized word from the original text. It is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Normalizes `word`, returning `None` if nothing is left of it.
    pub fn new(word: &str) -> Option<Token> {
        let text = normalize(word);
        if text.is_empty() {
            None
        } else {
            Some(Token(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a single non-blank line of a poem.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// The original text for the full line, trimmed.
    pub raw_text: String,

    /// The line number in the original text, 1-indexed. Blank lines are counted.
    pub num: usize,

    /// The normalized words of `raw_text`, left to right. Never empty.
    pub tokens: Vec<Token>,
}

/// An ordered, non-empty list of `Line`s.
#[derive(Clone, Debug, PartialEq)]
pub struct Poem {
    pub lines: Vec<Line>,
}

impl Poem {
    /// Returns the number of lines in the poem.
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Returns the tokens of every line, e.g. `[["YES"], ["NO", "YES"]]`.
    #[cfg(test)]
    pub fn words(&self) -> Vec<Vec<&str>> {
        self.lines
            .iter()
            .map(|l| l.tokens.iter().map(|t| t.as_str()).collect())
            .collect()
    }
}

/// Splits `raw_text` into lines of normalized tokens.
///
/// Lines with no words left after normalization (blank, or only punctuation) are dropped
/// entirely rather than kept as empty lines.
///
/// ```raw
/// The first line leads off,
///
///
/// With a gap before the next.
///     Then the poem ends.
/// ```
///
/// This produces three lines, with `["THE", "FIRST", "LINE", "LEADS", "OFF"]` first.
///
/// Fails with `MalformedInput` if no lines are left.
pub fn segment(raw_text: &str) -> Result<Poem> {
    let mut lines = vec![];
    for (i, raw_line) in raw_text.lines().enumerate() {
        let tokens: Vec<Token> = raw_line.split_whitespace().filter_map(Token::new).collect();
        if tokens.is_empty() {
            continue;
        }
        lines.push(Line {
            raw_text: raw_line.trim().to_string(),
            num: i + 1, /* 1-indexed */
            tokens,
        });
    }
    if lines.is_empty() {
        return Err(Error::MalformedInput);
    }
    debug!("Segmented {} lines from {} bytes.", lines.len(), raw_text.len());
    return Ok(Poem { lines });
}

/// Reads the poem in the file at `path`.
///
/// Each line is trimmed of leading and trailing whitespace and blank lines are removed.
pub fn read_poem_file(path: &std::path::Path) -> Result<String> {
    let contents = error::read_to_string(path)?;
    Ok(trim_poem_text(&contents))
}

fn trim_poem_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<&str>>()
        .join("\n")
}
