//! Phoneme sequences, as used by the CMU pronouncing dictionary.
//!
//! The dictionary uses the ARPABET 2-letter phonemes, described here:
//! <https://en.wikipedia.org/wiki/ARPABET>
//!
//! Vowel sounds carry a stress digit, e.g. `AH0`. Zero is unstressed, one is primary stress and
//! two is secondary. Consonants have no digit. Each vowel sound is one syllable.
use crate::poet::error::{Error, Result};

/// Returns whether `phoneme` is a vowel sound, i.e. it ends with a stress digit.
pub fn is_vowel(phoneme: &str) -> bool {
    phoneme.ends_with(|c: char| c.is_ascii_digit())
}

/// Returns `phoneme` without its stress digit, e.g. `EH1` -> `EH`. Consonants are unchanged.
pub fn strip_stress(phoneme: &str) -> &str {
    phoneme.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// The pronunciation of a single word, in order, e.g. `["SH", "R", "IH1", "M", "P"]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhonemeSequence {
    pub phonemes: Vec<String>,
}

impl PhonemeSequence {
    pub fn new(phonemes: Vec<String>) -> PhonemeSequence {
        PhonemeSequence { phonemes }
    }

    /// Builds a sequence from whitespace-separated phonemes, e.g. `"Y EH1 S"`.
    #[cfg(test)]
    pub fn from_str_parts(text: &str) -> PhonemeSequence {
        PhonemeSequence {
            phonemes: text.split_whitespace().map(String::from).collect(),
        }
    }

    /// Returns the number of syllables, identified by the number of vowel sounds.
    pub fn num_syllables(&self) -> usize {
        self.phonemes.iter().filter(|ph| is_vowel(ph)).count()
    }

    /// Returns the trailing rhyming part of the word: its last vowel through the end.
    ///
    /// Fails with `MalformedPronunciation` if there are no vowels at all.
    pub fn rhyme_unit(&self) -> Result<RhymeUnit> {
        match self.phonemes.iter().rposition(|ph| is_vowel(ph)) {
            Some(start) => Ok(RhymeUnit {
                phonemes: self.phonemes[start..].to_vec(),
            }),
            None => Err(Error::MalformedPronunciation(self.to_string())),
        }
    }

    /// Returns how many phonemes the two sequences share at their ends.
    ///
    /// Higher scores are more similar, e.g. `F AA1 N D UW0 Z` and `V ER1 CH UW0 Z` score 2.
    pub fn similarity_score(&self, other: &PhonemeSequence) -> usize {
        self.phonemes
            .iter()
            .rev()
            .zip(other.phonemes.iter().rev())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl std::fmt::Display for PhonemeSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.phonemes.join(" "))
    }
}

/// The suffix of a word's phonemes that has to match for two words to rhyme.
///
/// It always starts with a vowel sound. Stress digits are kept here; use `key()` to compare.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RhymeUnit {
    pub phonemes: Vec<String>,
}

impl RhymeUnit {
    /// Returns the unit with stress digits removed, e.g. `EH1 S` -> `EH S`.
    ///
    /// Two words rhyme exactly when their keys are equal.
    pub fn key(&self) -> String {
        self.phonemes
            .iter()
            .map(|ph| strip_stress(ph))
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

impl std::fmt::Display for RhymeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.phonemes.join(" "))
    }
}
