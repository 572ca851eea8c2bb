//! Looks up the words of a `Poem` and counts their syllables.
use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::poet::error::{Error, Result};
use crate::poet::phonemes::PhonemeSequence;
use crate::poet::poem::Poem;

/// A read-only source of word pronunciations.
///
/// Implemented by `dictionary::Dictionary` and by plain maps, so tests and callers can supply
/// whichever they have. Implementations are shared across poems and never modified by lookups.
pub trait Pronunciations {
    /// Returns the pronunciation of the normalized `word`, or None if it is unknown.
    fn pronunciation(&self, word: &str) -> Option<&PhonemeSequence>;
}

impl<S: BuildHasher> Pronunciations for HashMap<String, PhonemeSequence, S> {
    fn pronunciation(&self, word: &str) -> Option<&PhonemeSequence> {
        self.get(word)
    }
}

/// The pronunciation of each word on one line, in the same order.
pub type LinePronunciation = Vec<PhonemeSequence>;

/// The pronunciation of each line of a poem, in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct PoemPronunciation {
    pub lines: Vec<LinePronunciation>,
}

impl PoemPronunciation {
    /// Builds a pronunciation directly from phoneme strings, e.g. `[[["Y", "EH1", "S"]]]`.
    #[cfg(test)]
    pub fn from_phonemes(lines: &[&[&[&str]]]) -> PoemPronunciation {
        PoemPronunciation {
            lines: lines
                .iter()
                .map(|line| {
                    line.iter()
                        .map(|word| {
                            PhonemeSequence::new(word.iter().map(|&p| String::from(p)).collect())
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

/// Displays the phonemes with spaces between them, ` | ` between words and a newline between
/// lines, e.g. `Y EH1 S\nN OW1 | Y EH1 S`.
impl std::fmt::Display for PoemPronunciation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, word) in line.iter().enumerate() {
                if j > 0 {
                    write!(f, " | ")?;
                }
                write!(f, "{}", word)?;
            }
        }
        Ok(())
    }
}

/// Looks up every word of `poem` in `dict`, keeping the line and word order.
///
/// Fails with `UnknownWord` on the first word that isn't in the dictionary.
pub fn resolve<D: Pronunciations + ?Sized>(poem: &Poem, dict: &D) -> Result<PoemPronunciation> {
    let mut lines = Vec::with_capacity(poem.num_lines());
    for line in &poem.lines {
        let mut words = Vec::with_capacity(line.tokens.len());
        for token in &line.tokens {
            match dict.pronunciation(token.as_str()) {
                Some(phonemes) => words.push(phonemes.clone()),
                None => return Err(Error::UnknownWord(token.to_string())),
            }
        }
        lines.push(words);
    }
    Ok(PoemPronunciation { lines })
}

/// Returns the number of syllables on each line.
pub fn count_syllables(pronunciation: &PoemPronunciation) -> Vec<usize> {
    pronunciation
        .lines
        .iter()
        .map(|line| line.iter().map(|word| word.num_syllables()).sum())
        .collect()
}
