//! A phonetic dictionary.
//!
//! This provides a wrapper around the CMU pronouncing dictionary, in either its original
//! upper-case form or the lower-case `cmusphinx` form. Entries in the dictionary have a term
//! and a pronunciation, with the option of having several different pronunciations for a word:
//!
//! ```raw
//! ;;; Comment line
//! ALUMINIUM  AH0 L UW1 M IH0 N AH0 M
//! ALUMINIUM(2)  AE2 L Y UW1 M IH0 N AH0 M
//! achill AE1 K IH0 L # place, irish
//! ```
//!
//! In this module, the main object is Dictionary, which provides lookups for individual words,
//! and also the ability to search for words that rhyme with a given word.
//!
//! Related references:
//!
//! * <https://github.com/cmusphinx/cmudict>
//! * <http://www.speech.cs.cmu.edu/cgi-bin/cmudict>
//!
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use log::{debug, info};
use regex::Regex;

use crate::poet::error::{self, Error, Result};
use crate::poet::phonemes::PhonemeSequence;
use crate::poet::pronunciation::Pronunciations;

/// An Entry represents a single word or variant with its associated metadata.
///
/// This corresponds to one line in the dictionary file.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// The term, upper-cased and without the variant suffix, e.g. "FLOWER", "LET'S", "A.M.".
    pub word: String,
    /// The individual phonemes as listed, in the original order.
    pub phonemes: PhonemeSequence,
    /// The variant, e.g. 2 for the term `aluminium(2)`. Default 1.
    pub variant: u32,
}

impl Entry {
    /// Parses the given line, assumed to be in cmudict format.
    ///
    /// Returns `Ok(None)` for comments and blank lines.
    ///
    /// Example inputs:
    /// ```raw
    /// 'twas T W AH1 Z
    /// a(2) EY1
    /// A.M.  EY2 EH1 M
    /// (PAREN  P ER0 EH1 N
    /// achill AE1 K IH0 L # place, irish
    /// ;;; a comment
    /// ```
    pub fn parse(line: &str) -> std::result::Result<Option<Entry>, String> {
        lazy_static! {
            // This matches the term and optional (N) suffix, e.g. from "aalborg(2)".
            // Capture group 1 has the term text and capture 3 has the integer, if any. Other
            // parentheses are part of the term, e.g. "(PAREN" and ")CLOSE-PAREN".
            static ref TERM_RE: Regex = Regex::new(r"^(.+?)(\(([0-9]+)\))?$").unwrap();
            // This matches phonemes like "AA1", "N" and "AH0". If there is a digit, it's a
            // vowel sound.
            static ref PHONEME_RE: Regex = Regex::new(r"^[A-Z]+[0-2]?$").unwrap();
        }

        if line.starts_with(';') {
            return Ok(None);
        }
        // Strip comments if present ('#' through the end of line).
        let trimmed_line = match line.find('#') {
            Some(comment_start) => &line[..comment_start],
            None => line,
        };
        let mut tokens = trimmed_line.split_whitespace();
        let term = match tokens.next() {
            Some(t) => t,
            None => return Ok(None),
        };

        let term_cap = TERM_RE
            .captures(term)
            .ok_or_else(|| format!("can't parse term {:?}", term))?;
        let variant = match term_cap.get(3) {
            Some(n) => n
                .as_str()
                .parse()
                .map_err(|_| format!("bad variant number in {:?}", term))?,
            None => 1,
        };

        let mut phonemes = vec![];
        for ph in tokens {
            if !PHONEME_RE.is_match(ph) {
                return Err(format!("bad phoneme {:?} for {:?}", ph, term));
            }
            phonemes.push(String::from(ph));
        }
        if phonemes.is_empty() {
            return Err(format!("no phonemes for {:?}", term));
        }

        return Ok(Some(Entry {
            word: term_cap[1].to_uppercase(),
            phonemes: PhonemeSequence::new(phonemes),
            variant,
        }));
    }

    /// Returns the key of the entry as it would appear in the dictionary, e.g. "A(2)".
    pub fn dict_key(&self) -> String {
        if self.variant == 1 {
            self.word.clone()
        } else {
            format!("{}({})", self.word, self.variant)
        }
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.dict_key(), self.phonemes)
    }
}

/// A container for a collection of entries.
///
/// Either construct one and populate it with individual entries, or initialize one from
/// a text file in cmudict format. It is not modified after loading.
#[derive(Debug, Default)]
pub struct Dictionary {
    // All the variants of each word, in file order.
    entries: HashMap<String, Vec<Entry>>,

    // Stress-free rhyme unit of each word's first pronunciation to the words that have it,
    // e.g. ("EH D", ["BLED", "RED"]).
    rhyme_index: BTreeMap<String, Vec<String>>,
}

/// Represents a single word along with associated meta-data.
#[derive(Debug, Eq)]
pub struct SimilarWord {
    /// The word.
    pub word: String,

    /// Larger scores represent higher similarity.
    pub score: usize,
}

impl Ord for SimilarWord {
    fn cmp(&self, other: &Self) -> Ordering {
        // Descending by score, then ascending by the word text.
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for SimilarWord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SimilarWord {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word && self.score == other.score
    }
}

impl Dictionary {
    /// Creates a new empty Dictionary.
    pub fn new() -> Dictionary {
        Dictionary::default()
    }

    /// Creates a new dictionary from the contents of a cmudict file.
    pub fn parse(text: &str) -> Result<Dictionary> {
        let mut dict = Dictionary::new();
        let mut skipped = 0;
        for (i, line) in text.lines().enumerate() {
            match Entry::parse(line.trim()) {
                Ok(Some(entry)) => dict.insert(entry),
                Ok(None) => skipped += 1,
                Err(message) => return Err(Error::parse(i + 1, message)),
            }
        }
        debug!("Skipped {} comment or blank lines.", skipped);
        return Ok(dict);
    }

    /// Creates a new dictionary, populated from the given text file.
    pub fn from_file(path: &std::path::Path) -> Result<Dictionary> {
        let text = error::read_to_string(path)?;
        let dict = Dictionary::parse(&text).map_err(|e| e.in_file(path))?;
        info!(
            "Loaded {} words ({} rhyme sounds) from {}.",
            dict.len(),
            dict.rhyme_index.len(),
            path.display()
        );
        return Ok(dict);
    }

    /// Inserts a single entry. Later variants of a word don't replace earlier ones.
    pub fn insert(&mut self, entry: Entry) {
        let variants = self.entries.entry(entry.word.clone()).or_default();
        if variants.is_empty() {
            // Only the primary pronunciation is indexed for rhyming. Words without vowels
            // don't rhyme with anything.
            if let Ok(unit) = entry.phonemes.rhyme_unit() {
                self.rhyme_index
                    .entry(unit.key())
                    .or_default()
                    .push(entry.word.clone());
            }
        }
        variants.push(entry);
    }

    /// Inserts all of the lines as though they were parsed from a file.
    #[cfg(test)]
    pub fn insert_all(&mut self, lines: &[&str]) {
        for line in lines {
            if let Some(entry) = Entry::parse(line).unwrap() {
                self.insert(entry);
            }
        }
    }

    /// Returns all the entries for the given word, or None.
    pub fn lookup(&self, word: &str) -> Option<&Vec<Entry>> {
        self.entries.get(word)
    }

    /// Returns the number of distinct words in the dictionary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the other words whose first pronunciation rhymes with that of `word`.
    ///
    /// The most similar words come first: those sharing the most phonemes at the end.
    pub fn rhymes(&self, word: &str) -> Vec<SimilarWord> {
        let entry = match self.lookup(word).and_then(|v| v.first()) {
            Some(e) => e,
            None => return vec![],
        };
        let key = match entry.phonemes.rhyme_unit() {
            Ok(unit) => unit.key(),
            Err(_) => return vec![],
        };

        let mut result: Vec<SimilarWord> = vec![];
        for other in self.rhyme_index.get(&key).into_iter().flatten() {
            if other == word {
                continue;
            }
            if let Some(other_phonemes) = self.pronunciation(other) {
                result.push(SimilarWord {
                    word: other.clone(),
                    score: entry.phonemes.similarity_score(other_phonemes),
                });
            }
        }
        result.sort();
        return result;
    }
}

/// Looks up the first (primary) pronunciation of the word.
impl Pronunciations for Dictionary {
    fn pronunciation(&self, word: &str) -> Option<&PhonemeSequence> {
        self.entries
            .get(word)
            .and_then(|v| v.first())
            .map(|e| &e.phonemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(line: &str) -> Entry {
        Entry::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parser_handles_basic_entries() {
        let entry = entry("ampersand AE1 M P ER0 S AE2 N D");
        assert_eq!(entry.word, "AMPERSAND");
        assert_eq!(
            entry.phonemes.phonemes,
            vec!["AE1", "M", "P", "ER0", "S", "AE2", "N", "D"]
        );
        assert_eq!(entry.variant, 1);
    }

    #[test]
    fn test_parser_handles_upper_case_format() {
        let entry = entry("ABSINTHE  AE1 B S IH0 N TH");
        assert_eq!(entry.word, "ABSINTHE");
        assert_eq!(entry.phonemes.to_string(), "AE1 B S IH0 N TH");
    }

    #[test]
    fn test_parser_ignores_comments() {
        // Everything after # should be ignored.
        let entry = entry("gdp G IY1 D IY1 P IY1 # abbrev ## IGN");
        assert_eq!(entry.word, "GDP");
        assert_eq!(entry.phonemes.phonemes, vec!["G", "IY1", "D", "IY1", "P", "IY1"]);

        assert_eq!(Entry::parse(";;; Comment line"), Ok(None));
        assert_eq!(Entry::parse("; single semicolon"), Ok(None));
        assert_eq!(Entry::parse("# only a comment"), Ok(None));
        assert_eq!(Entry::parse(""), Ok(None));
    }

    #[test]
    fn test_parser_with_punctuation_in_terms() {
        assert_eq!(entry("'frisco F R IH1 S K OW0").word, "'FRISCO");
        assert_eq!(entry("a.m. EY2 EH1 M").word, "A.M.");
        assert_eq!(entry("bad(x) AH0").word, "BAD(X)");
    }

    #[test]
    fn test_parser_with_parentheses_in_terms() {
        let open = entry("(PAREN  P ER0 EH1 N");
        assert_eq!(open.word, "(PAREN");
        assert_eq!(open.variant, 1);
        assert_eq!(entry("(PAREN(2)  P ER0 EH1 N").dict_key(), "(PAREN(2)");
        assert_eq!(entry(")CLOSE-PAREN  K L OW1 Z P ER0 EH1 N").word, ")CLOSE-PAREN");

        let text = ";;; # CMUdict  --  Major Version: 0.07
                    ;  another comment
                    (BEGIN-PARENS  B IH0 G IH1 N P ER0 EH1 N Z
                    (PAREN  P ER0 EH1 N
                    )CLOSE-PAREN  K L OW1 Z P ER0 EH1 N
                    YES  Y EH1 S
";
        let dict = Dictionary::parse(text).unwrap();
        assert_eq!(dict.len(), 4);
        assert_eq!(dict.pronunciation("(PAREN").unwrap().to_string(), "P ER0 EH1 N");
        assert_eq!(
            dict.pronunciation(")CLOSE-PAREN").unwrap().to_string(),
            "K L OW1 Z P ER0 EH1 N"
        );
        assert_eq!(dict.lookup("(BEGIN-PARENS").unwrap().len(), 1);
    }

    #[test]
    fn test_parser_with_alternate_words() {
        let entry = entry("amounted(2) AH0 M AW1 N IH0 D");
        assert_eq!(entry.word, "AMOUNTED");
        assert_eq!(entry.variant, 2);
        assert_eq!(entry.dict_key(), "AMOUNTED(2)");
        assert_eq!(entry.to_string(), "AMOUNTED(2) AH0 M AW1 N IH0 D");
    }

    #[test]
    fn test_parser_rejects_malformed_lines() {
        assert!(Entry::parse("lonely").is_err());
        assert!(Entry::parse("bad AH0 b").is_err());
        assert!(Entry::parse("bad AH7").is_err());
    }

    #[test]
    fn test_parse_reports_line_number() {
        let text = ";;; header\nHEART  HH AA1 R T\nFONDER\n";
        match Dictionary::parse(text) {
            Err(Error::Parse { line, file, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(file, None);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_dictionary_parse() {
        let text = ";;; Comment line\n\
                    ABSINTHE  AE1 B S IH0 N TH\n\
                    HEART  HH AA1 R T\n\
                    FONDER  F AA1 N D ER0\n";
        let dict = Dictionary::parse(text).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(
            dict.pronunciation("HEART").unwrap().phonemes,
            vec!["HH", "AA1", "R", "T"]
        );
        assert_eq!(dict.pronunciation("heart"), None);
    }

    #[test]
    fn test_first_variant_is_primary() {
        let mut dict = Dictionary::new();
        dict.insert_all(&["the DH AH0", "the(2) DH AH1", "the(3) DH IY0"]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.lookup("THE").unwrap().len(), 3);
        assert_eq!(dict.pronunciation("THE").unwrap().to_string(), "DH AH0");
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "YES  Y EH1 S\nNO  N OW1").unwrap();
        let dict = Dictionary::from_file(file.path()).unwrap();
        assert_eq!(dict.len(), 2);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "YES  Y EH1 S\nNO  n ow1").unwrap();
        match Dictionary::from_file(bad.path()) {
            Err(Error::Parse { line, file, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(file.as_deref(), Some(bad.path()));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    // This helper calls `dict.rhymes(query)` and checks that the returned words are `expected`.
    fn assert_rhymes_are(dict: &Dictionary, query: &str, expected: &[&str]) {
        let result: Vec<String> = dict.rhymes(query).into_iter().map(|w| w.word).collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_rhymes() {
        let mut dict = Dictionary::new();
        dict.insert_all(&[
            // These words rhyme.
            "bayous B AY1 UW0 Z",
            "fondues F AA1 N D UW0 Z",
            "virtues V ER1 CH UW0 Z",
            // These do too, but not with the first ones.
            "diagram D AY1 AH0 G R AE2 M",
            "polygram P AA1 L IY2 G R AE2 M",
            "program P R OW1 G R AE2 M",
            "programme P R OW1 G R AE2 M",
            "telegram T EH1 L AH0 G R AE2 M",
            // Stress doesn't matter.
            "ram R AE1 M",
            // These are other unrelated words to pad out the dictionary.
            "apple AE1 P AH0 L",
            "apples AE1 P AH0 L Z",
            "guava G W AA1 V AH0",
            "mango M AE1 NG G OW0",
            "hmm HH M",
        ]);

        assert_rhymes_are(&dict, "BAYOUS", &["FONDUES", "VIRTUES"]);
        assert_rhymes_are(
            &dict,
            "PROGRAM",
            &["PROGRAMME", "DIAGRAM", "POLYGRAM", "TELEGRAM", "RAM"],
        );
        assert!(dict.rhymes("GUAVA").is_empty());
        assert!(dict.rhymes("HMM").is_empty());
        assert!(dict.rhymes("UNKNOWN").is_empty());
    }

    #[test]
    fn test_rhymes_with_homonyms() {
        let mut dict = Dictionary::new();
        dict.insert_all(&["read R EH1 D", "reade R EH1 D", "red R EH1 D", "redd R EH1 D"]);
        assert_rhymes_are(&dict, "RED", &["READ", "READE", "REDD"]);
        assert_eq!(dict.rhymes("RED")[0].score, 3);
    }

    #[test]
    #[ignore] // It's slow, and needs the real file.
    fn test_can_read_entire_cmudict() {
        let _dict = Dictionary::from_file(std::path::Path::new("./cmudict.dict")).unwrap();
        // The test is successful if it doesn't crash.
    }
}
