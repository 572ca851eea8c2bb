//! poetform: finds the rhyme scheme and syllable counts of poems, and checks them against
//! poetry forms like haiku and limerick.
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

mod poet;

use std::io::Write;
use std::path::Path;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{warn, LevelFilter};

use poet::analysis;
use poet::dictionary::Dictionary;
use poet::error::{Error, Result};
use poet::forms::FormCatalog;
use poet::pronunciation::Pronunciations;

/// How many rhyming words `lookup` prints per word.
const MAX_RHYMES_SHOWN: usize = 20;

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("poetform")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds the rhyme scheme and syllable counts of poems and checks their form.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("dict")
                .long("dict")
                .value_name("PATH")
                .env("POETFORM_DICT")
                .default_value("./cmudict.dict")
                .help("The pronouncing dictionary, in CMU format"),
        )
        .arg(
            Arg::with_name("forms")
                .long("forms")
                .value_name("PATH")
                .env("POETFORM_FORMS")
                .default_value("./poetry_forms.txt")
                .help("The catalog of poetry forms"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Logs more details. Repeat for even more"),
        )
        .subcommand(
            SubCommand::with_name("analyze")
                .about("Analyzes poems and reports which forms they fit")
                .arg(
                    Arg::with_name("form")
                        .long("form")
                        .value_name("NAME")
                        .help("Checks the poems against this form only"),
                )
                .arg(
                    Arg::with_name("POEM")
                        .required(true)
                        .multiple(true)
                        .help("Text files with one poem each"),
                ),
        )
        .subcommand(
            SubCommand::with_name("lookup")
                .about("Shows the pronunciation and rhymes of words")
                .arg(Arg::with_name("WORD").required(true).multiple(true)),
        )
        .subcommand(SubCommand::with_name("serve").about("Starts the web interface"))
}

fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env() // RUST_LOG wins over -v.
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

/// Loads the form catalog. A missing catalog is only an error if a form has to be checked.
fn load_forms(path: &Path, required: bool) -> Result<FormCatalog> {
    match FormCatalog::from_file(path) {
        Err(e @ Error::Io { .. }) if !required => {
            warn!("{}. Continuing without poetry forms.", e);
            Ok(FormCatalog::default())
        }
        result => result,
    }
}

/// Analyzes each poem file, returning the process exit status.
///
/// The status is 1 if any poem couldn't be analyzed, otherwise 2 if any poem doesn't fit the
/// form, otherwise 0.
fn analyze(matches: &ArgMatches, dict: &Dictionary, forms: &FormCatalog) -> Result<i32> {
    let form_name = matches.value_of("form");
    if let Some(name) = form_name {
        // Fail once up front rather than once per poem.
        forms.get(name)?;
    }

    let mut num_errors = 0;
    let mut num_nonconforming = 0;
    for path in matches.values_of("POEM").into_iter().flatten() {
        match analysis::analyze_one_file_to_terminal(Path::new(path), dict, forms, form_name) {
            Ok(true) => {}
            Ok(false) => num_nonconforming += 1,
            Err(e) => {
                // Report it and carry on with the next poem.
                eprintln!("Error analyzing {}: {}", path, e);
                num_errors += 1;
            }
        }
    }
    if num_errors > 0 {
        return Ok(1);
    }
    if num_nonconforming > 0 {
        return Ok(2);
    }
    Ok(0)
}

/// Prints what the dictionary knows about each word, returning the process exit status.
fn lookup(matches: &ArgMatches, dict: &Dictionary) -> i32 {
    let mut status = 0;
    for term in matches.values_of("WORD").into_iter().flatten() {
        let word = poet::poem::normalize(term);
        let entries = match dict.lookup(&word) {
            Some(entries) => entries,
            None => {
                println!("{}: not in the dictionary.", word);
                status = 1;
                continue;
            }
        };
        for entry in entries {
            println!("{}", entry);
        }
        if let Some(phonemes) = dict.pronunciation(&word) {
            println!("  syllables: {}", phonemes.num_syllables());
            match phonemes.rhyme_unit() {
                Ok(unit) => println!("  rhymes on: {}", unit),
                Err(e) => println!("  {}", e),
            }
        }
        let rhymes: Vec<String> = dict
            .rhymes(&word)
            .into_iter()
            .take(MAX_RHYMES_SHOWN)
            .map(|w| format!("{} ({})", w.word, w.score))
            .collect();
        if !rhymes.is_empty() {
            println!("  rhymes: {}", rhymes.join(", "));
        }
    }
    status
}

async fn run(matches: &ArgMatches<'_>) -> Result<i32> {
    let dict_path = Path::new(matches.value_of("dict").unwrap_or("./cmudict.dict"));
    let forms_path = Path::new(matches.value_of("forms").unwrap_or("./poetry_forms.txt"));

    match matches.subcommand() {
        ("analyze", Some(sub)) => {
            let dict = Dictionary::from_file(dict_path)?;
            let forms = load_forms(forms_path, sub.is_present("form"))?;
            analyze(sub, &dict, &forms)
        }
        ("lookup", Some(sub)) => {
            let dict = Dictionary::from_file(dict_path)?;
            Ok(lookup(sub, &dict))
        }
        ("serve", Some(_)) => {
            let state = poet::server::ServerState {
                dict: Dictionary::from_file(dict_path)?,
                forms: load_forms(forms_path, false)?,
            };
            if let Err(e) = poet::server::run(state).await {
                eprintln!("***** Failed to launch web server: {} *****", e);
                return Ok(1);
            }
            Ok(0)
        }
        // SubcommandRequiredElseHelp means clap has already handled this.
        _ => Ok(0),
    }
}

#[rocket::main]
async fn main() {
    let matches = app().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    match run(&matches).await {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
