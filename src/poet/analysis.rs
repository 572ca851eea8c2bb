//! Whole-poem analysis: runs the pipeline and reports on the results.
//!
//! The pipeline is `segment` -> `resolve` -> `count_syllables` and `infer_scheme`. Each step
//! produces a new value, and all of them are kept here for reporting.
use log::{debug, info};

use crate::poet::error::Result;
use crate::poet::forms::{FormCatalog, FormMismatch};
use crate::poet::poem::{self, Poem};
use crate::poet::pronunciation::{self, PoemPronunciation, Pronunciations};
use crate::poet::scheme::{self, RhymeScheme};

/// A poem and everything derived from it.
#[derive(Debug)]
pub struct Analysis {
    pub poem: Poem,
    pub pronunciation: PoemPronunciation,
    /// Syllables per line.
    pub syllables: Vec<usize>,
    pub scheme: RhymeScheme,
}

impl Analysis {
    /// Analyzes `raw_text` using the pronunciations in `dict`.
    pub fn new<D: Pronunciations + ?Sized>(raw_text: &str, dict: &D) -> Result<Analysis> {
        let poem = poem::segment(raw_text)?;
        let pronunciation = pronunciation::resolve(&poem, dict)?;
        let syllables = pronunciation::count_syllables(&pronunciation);
        let scheme = scheme::infer_scheme(&pronunciation)?;
        debug!(
            "Analyzed {} lines: syllables {:?}, scheme {}",
            poem.num_lines(),
            syllables,
            scheme::scheme_to_string(&scheme)
        );
        Ok(Analysis {
            poem,
            pronunciation,
            syllables,
            scheme,
        })
    }

    /// Checks the poem against the named form in `catalog`.
    ///
    /// The outer `Result` fails if there is no such form. The inner one has the mismatches.
    pub fn check_form(
        &self,
        catalog: &FormCatalog,
        form_name: &str,
    ) -> Result<std::result::Result<(), Vec<FormMismatch>>> {
        let form = catalog.get(form_name)?;
        Ok(form.check(&self.syllables, &self.scheme))
    }

    /// Returns the names of all the forms in `catalog` that the poem fits.
    pub fn conforming_forms<'a>(&self, catalog: &'a FormCatalog) -> Vec<&'a str> {
        catalog
            .conforming(&self.syllables, &self.scheme)
            .into_iter()
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Generates a summary of the poem and its analysis in a text format.
    ///
    /// Each line is shown with its rhyme label and syllable count, followed by the phonemes
    /// of its words. The format is targeted for printing to a terminal or put in a `<pre>`
    /// html block.
    pub fn summarize_to_text(&self) -> String {
        let mut out = String::with_capacity(8192); // Arbitrary.
        for (i, line) in self.poem.lines.iter().enumerate() {
            out.push_str(&format!(
                "{:02}. [{}] ({:2}) {}\n",
                line.num, self.scheme[i], self.syllables[i], &line.raw_text
            ));
            let words: Vec<String> = self.pronunciation.lines[i]
                .iter()
                .map(|w| w.to_string())
                .collect();
            out.push_str(&format!("    . {}\n", words.join(" | ")));
        }
        out.push_str(&format!(
            "Rhyme scheme: {}\n",
            scheme::scheme_to_string(&self.scheme)
        ));
        let counts: Vec<String> = self.syllables.iter().map(|n| n.to_string()).collect();
        out.push_str(&format!("Syllables: {}\n", counts.join(" ")));
        return out;
    }
}

/// Analyzes the poem file at `path`, printing the results to the terminal.
///
/// # Arguments
///
/// * `path` - The text file to analyze.
/// * `dict` - The dictionary to use.
/// * `catalog` - The known poetry forms.
/// * `form_name` - If given, the form the poem is supposed to have.
///
/// Returns whether the poem fits `form_name`, or true if there's no form to check.
pub fn analyze_one_file_to_terminal<D: Pronunciations + ?Sized>(
    path: &std::path::Path,
    dict: &D,
    catalog: &FormCatalog,
    form_name: Option<&str>,
) -> Result<bool> {
    let text = poem::read_poem_file(path)?;
    let analysis = Analysis::new(&text, dict)?;
    info!("Analyzed {}.", path.display());

    println!("====== {} ======\n{}", path.display(), analysis.summarize_to_text());
    match form_name {
        Some(name) => match analysis.check_form(catalog, name)? {
            Ok(()) => {
                println!("This is a valid {}!", name);
                Ok(true)
            }
            Err(mismatches) => {
                println!("This isn't a {} because:", name);
                for m in &mismatches {
                    println!("  {}", m);
                }
                Ok(false)
            }
        },
        None => {
            let forms = analysis.conforming_forms(catalog);
            if forms.is_empty() {
                println!("No matching poetry forms.");
            } else {
                println!("Matching poetry forms: {}", forms.join(", "));
            }
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poet::dictionary::Dictionary;
    use crate::poet::error::Error;
    use crate::poet::scheme::RhymeLabel;

    fn limerick_dict() -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert_all(&[
            "a AH0",
            "and AH0 N D",
            "caught K AA1 T",
            "do D UW1",
            "flaw F L AO1",
            "flea F L IY1",
            "flee F L IY1",
            "flew F L UW1",
            "flue F L UW1",
            "fly F L AY1",
            "in IH0 N",
            "let L EH1 T",
            "said S EH1 D",
            "so S OW1",
            "the DH AH0",
            "they DH EY1",
            "through TH R UW1",
            "us AH1 S",
            "were W ER1",
            "what W AH1 T",
        ]);
        dict
    }

    const LIMERICK: &str = "A flea and a fly in a flue\n\
                            Were caught, so what could they do?\n\
                            Said the fly, let us flee!\n\
                            Let us fly, said the flea.\n\
                            So they flew through a flaw in the flue.";

    const CATALOG: &str = "Limerick\n8 A\n8 A\n5 B\n5 B\n8 A\n\nHaiku\n5 *\n7 *\n5 *\n";

    #[test]
    fn test_unknown_word_stops_analysis() {
        match Analysis::new(LIMERICK, &limerick_dict()) {
            Err(Error::UnknownWord(w)) => assert_eq!(w, "COULD"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_limerick() {
        let mut dict = limerick_dict();
        dict.insert_all(&["could K UH1 D"]);
        let analysis = Analysis::new(LIMERICK, &dict).unwrap();

        assert_eq!(analysis.syllables, vec![8, 7, 6, 6, 9]);
        assert_eq!(scheme::scheme_to_string(&analysis.scheme), "AABBA");

        let catalog = FormCatalog::parse(CATALOG).unwrap();
        let mismatches = analysis.check_form(&catalog, "Limerick").unwrap().unwrap_err();
        assert_eq!(mismatches.len(), 4);
        assert!(analysis.conforming_forms(&catalog).is_empty());
        assert!(matches!(
            analysis.check_form(&catalog, "Villanelle"),
            Err(Error::UnknownForm(_))
        ));
    }

    #[test]
    fn test_conforming_haiku() {
        let mut dict = Dictionary::new();
        dict.insert_all(&["a AH0", "be B IY1"]);
        let text = "a a a a a\na a a a a a be\na a a a a";
        let analysis = Analysis::new(text, &dict).unwrap();
        assert_eq!(
            analysis.scheme,
            vec![
                RhymeLabel::Letter('A'),
                RhymeLabel::Letter('B'),
                RhymeLabel::Letter('A')
            ]
        );
        let catalog = FormCatalog::parse(CATALOG).unwrap();
        assert_eq!(analysis.conforming_forms(&catalog), vec!["Haiku"]);
    }

    #[test]
    fn test_summarize_to_text() {
        let mut dict = Dictionary::new();
        dict.insert_all(&["yes Y EH1 S", "no N OW1"]);
        let analysis = Analysis::new("Yes!\n\nNo, yes.", &dict).unwrap();
        assert_eq!(
            analysis.summarize_to_text(),
            "01. [A] ( 1) Yes!\n\
             \x20   . Y EH1 S\n\
             03. [A] ( 2) No, yes.\n\
             \x20   . N OW1 | Y EH1 S\n\
             Rhyme scheme: AA\n\
             Syllables: 1 2\n"
        );
    }

    #[test]
    fn test_analyze_file() {
        use std::io::Write;
        let mut dict = Dictionary::new();
        dict.insert_all(&["a AH0"]);
        let catalog = FormCatalog::parse(CATALOG).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  a a a a a\n\na a a a a a a\na a a a a\n").unwrap();
        let check = |form: Option<&str>| {
            analyze_one_file_to_terminal(file.path(), &dict, &catalog, form).unwrap()
        };
        assert!(check(Some("Haiku")));
        assert!(!check(Some("Limerick")));
        assert!(check(None));
    }
}
