//! Poetry forms, e.g. haiku and limerick, and checking poems against them.
//!
//! A form is a named pattern with an expected syllable count and rhyme label per line. Forms
//! are read from a catalog file of blank-line-separated blocks:
//!
//! ```raw
//! Limerick
//! 8 A
//! 8 A
//! 5 B
//! 5 B
//! 8 A
//!
//! Haiku
//! 5 *
//! 7 *
//! 5 *
//! ```
//!
//! A syllable count of `0` means any number of syllables, and a `*` label means the line's
//! rhyme doesn't matter. The blank line between forms is optional: a line that doesn't start
//! with a syllable count, directly after pattern lines, names the next form.
use std::cmp::Ordering;

use log::info;

use crate::poet::error::{self, Error, Result};
use crate::poet::scheme::RhymeLabel;

/// A named poetry form.
#[derive(Clone, Debug, PartialEq)]
pub struct PoetryForm {
    pub name: String,
    /// Expected syllables per line. Zero matches any count.
    pub syllables: Vec<usize>,
    /// Expected rhyme label per line. `*` matches any label.
    pub scheme: Vec<RhymeLabel>,
}

/// Describes one way a poem fails to match a form.
#[derive(Clone, Debug, Eq)]
pub enum FormMismatch {
    /// A problem with the poem as a whole, e.g. that it has the wrong number of lines.
    PoemError(String),
    /// A problem on a specific line. The line is an index into the poem's lines.
    LineError(usize, String),
}

impl std::fmt::Display for FormMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use FormMismatch::LineError;
        use FormMismatch::PoemError;
        match self {
            PoemError(s) => write!(f, "Poem: {}", &s),
            LineError(index, s) => write!(f, "Line {}: {}", index + 1, &s),
        }
    }
}

impl Ord for FormMismatch {
    fn cmp(&self, other: &Self) -> Ordering {
        use FormMismatch::LineError;
        use FormMismatch::PoemError;
        match (self, other) {
            (PoemError(e1), PoemError(e2)) => e1.cmp(e2),
            (PoemError(_), _) => Ordering::Less,
            (_, PoemError(_)) => Ordering::Greater,
            (LineError(i1, e1), LineError(i2, e2)) => i1.cmp(i2).then_with(|| e1.cmp(e2)),
        }
    }
}

impl PartialOrd for FormMismatch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FormMismatch {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PoetryForm {
    /// Returns the number of lines the form has.
    pub fn num_lines(&self) -> usize {
        self.syllables.len()
    }

    /// Checks a poem's syllable counts and rhyme scheme against this form.
    ///
    /// Returns:
    /// - `Ok(())` if the poem fits.
    /// - `Err(mismatches)` if not, sorted with poem-level problems first and then by line.
    pub fn check(
        &self,
        syllables: &[usize],
        scheme: &[RhymeLabel],
    ) -> std::result::Result<(), Vec<FormMismatch>> {
        if syllables.len() != self.num_lines() || scheme.len() != self.num_lines() {
            return Err(vec![FormMismatch::PoemError(format!(
                "A {} has {} lines but the poem has {}.",
                self.name,
                self.num_lines(),
                syllables.len()
            ))]);
        }

        let mut errors = vec![];
        for (i, (&expected, &actual)) in self.syllables.iter().zip(syllables).enumerate() {
            if expected != 0 && expected != actual {
                errors.push(FormMismatch::LineError(
                    i,
                    format!("has {} syllables but should have {}.", actual, expected),
                ));
            }
        }
        for (i, (&expected, &actual)) in self.scheme.iter().zip(scheme).enumerate() {
            if expected != RhymeLabel::Wildcard && expected != actual {
                errors.push(FormMismatch::LineError(
                    i,
                    format!("has rhyme {} but should have {}.", actual, expected),
                ));
            }
        }
        if errors.is_empty() {
            return Ok(());
        }
        errors.sort();
        return Err(errors);
    }
}

/// All the known poetry forms, in catalog order.
#[derive(Debug, Default)]
pub struct FormCatalog {
    forms: Vec<PoetryForm>,
}

impl FormCatalog {
    /// Parses a catalog of forms. See the module docs for the format.
    pub fn parse(text: &str) -> Result<FormCatalog> {
        let mut catalog = FormCatalog::default();
        // The form currently being read, along with the line number of its name.
        let mut current: Option<(PoetryForm, usize)> = None;

        for (i, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                if let Some((form, num)) = current.take() {
                    catalog.push(form, num)?;
                }
                continue;
            }
            let starts_form = match &current {
                None => true,
                Some((form, _)) => {
                    form.num_lines() > 0 && !line.starts_with(|c: char| c.is_ascii_digit())
                }
            };
            if starts_form {
                if let Some((form, num)) = current.take() {
                    catalog.push(form, num)?;
                }
                let form = PoetryForm {
                    name: line.to_string(),
                    syllables: vec![],
                    scheme: vec![],
                };
                current = Some((form, i + 1));
            } else if let Some((form, _)) = current.as_mut() {
                let (syllables, label) = parse_pattern_line(line)
                    .ok_or_else(|| Error::parse(i + 1, format!("bad pattern line {:?}", line)))?;
                form.syllables.push(syllables);
                form.scheme.push(label);
            }
        }
        if let Some((form, num)) = current.take() {
            catalog.push(form, num)?;
        }
        return Ok(catalog);
    }

    /// Reads the catalog from the given text file.
    pub fn from_file(path: &std::path::Path) -> Result<FormCatalog> {
        let text = error::read_to_string(path)?;
        let catalog = FormCatalog::parse(&text).map_err(|e| e.in_file(path))?;
        info!("Loaded {} poetry forms from {}.", catalog.forms.len(), path.display());
        return Ok(catalog);
    }

    fn push(&mut self, form: PoetryForm, line_num: usize) -> Result<()> {
        if form.num_lines() == 0 {
            return Err(Error::parse(
                line_num,
                format!("the form {:?} has no lines", form.name),
            ));
        }
        self.forms.push(form);
        Ok(())
    }

    /// Returns the form with exactly the given name.
    pub fn get(&self, name: &str) -> Result<&PoetryForm> {
        self.forms
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::UnknownForm(name.to_string()))
    }

    /// Returns every form in the catalog, in order.
    pub fn forms(&self) -> &[PoetryForm] {
        &self.forms
    }

    /// Returns all the forms that the poem fits.
    pub fn conforming(&self, syllables: &[usize], scheme: &[RhymeLabel]) -> Vec<&PoetryForm> {
        self.forms
            .iter()
            .filter(|f| f.check(syllables, scheme).is_ok())
            .collect()
    }
}

// Parses "8 A" into (8, A).
fn parse_pattern_line(line: &str) -> Option<(usize, RhymeLabel)> {
    let mut parts = line.split_whitespace();
    let syllables = parts.next()?.parse().ok()?;
    let mut label_chars = parts.next()?.chars();
    let label = RhymeLabel::from_char(label_chars.next()?)?;
    if label_chars.next().is_some() || parts.next().is_some() {
        return None;
    }
    Some((syllables, label))
}
