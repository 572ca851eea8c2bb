//! Rhyme scheme inference.
//!
//! Each line is labeled by the sound of its last word. Lines whose last words rhyme share a
//! letter, and letters are handed out in order of first appearance: `A`, then `B`, and so on.
//! If no two lines in the whole poem rhyme, every line is labeled `*` instead.
use std::collections::HashMap;

use log::debug;

use crate::poet::error::{Error, Result};
use crate::poet::pronunciation::PoemPronunciation;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The label for one line of a rhyme scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RhymeLabel {
    /// An uppercase letter, `A` through `Z`.
    Letter(char),
    /// `*`: no rhyme relationship.
    Wildcard,
}

impl RhymeLabel {
    /// Parses a single label character. Returns None for anything but `A`-`Z` and `*`.
    pub fn from_char(c: char) -> Option<RhymeLabel> {
        match c {
            'A'..='Z' => Some(RhymeLabel::Letter(c)),
            '*' => Some(RhymeLabel::Wildcard),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            RhymeLabel::Letter(c) => c,
            RhymeLabel::Wildcard => '*',
        }
    }
}

impl std::fmt::Display for RhymeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// One label per line of the poem.
pub type RhymeScheme = Vec<RhymeLabel>;

/// Renders a scheme compactly, e.g. `ABAB`.
pub fn scheme_to_string(scheme: &[RhymeLabel]) -> String {
    scheme.iter().map(|l| l.to_char()).collect()
}

/// Infers the rhyme scheme of the poem from the last word of each line.
///
/// Two line endings rhyme when their rhyme units match with stress ignored, so `EH1 S` and
/// `EH0 S` are the same sound.
///
/// Lines are labeled in two passes. First, each distinct ending sound gets the next letter in
/// order of first appearance. Then, if no letter was used twice, every label becomes `*`.
/// Otherwise the letters stand as they are, including on lines that rhyme with nothing.
///
/// Fails with:
/// - `MalformedInput` if there are no lines, or a line has no words.
/// - `MalformedPronunciation` if a line's last word has no vowel.
/// - `TooManyRhymeGroups` if more than 26 letters would be needed.
pub fn infer_scheme(pronunciation: &PoemPronunciation) -> Result<RhymeScheme> {
    if pronunciation.lines.is_empty() {
        return Err(Error::MalformedInput);
    }

    // Group the lines by ending sound. group_ids[i] is the 0-based group of the i-th line.
    let mut key_to_group: HashMap<String, usize> = HashMap::new();
    let mut group_ids = Vec::with_capacity(pronunciation.lines.len());
    for line in &pronunciation.lines {
        let last_word = line.last().ok_or(Error::MalformedInput)?;
        let key = last_word.rhyme_unit()?.key();
        let next_group = key_to_group.len();
        group_ids.push(*key_to_group.entry(key).or_insert(next_group));
    }

    // Nothing rhymes with anything, so letters would be meaningless.
    let num_groups = key_to_group.len();
    if num_groups == group_ids.len() {
        debug!("No rhymes among {} lines.", group_ids.len());
        return Ok(vec![RhymeLabel::Wildcard; group_ids.len()]);
    }
    if num_groups > ALPHABET.len() {
        return Err(Error::TooManyRhymeGroups(num_groups));
    }

    Ok(group_ids
        .into_iter()
        .map(|g| RhymeLabel::Letter(ALPHABET[g] as char))
        .collect())
}
