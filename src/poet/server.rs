//! HTTP server components for poetform.

use rocket::form::Form;
use rocket::serde::Serialize;
use rocket::{Build, Rocket, State};
use rocket_dyn_templates::Template;
use std::collections::HashMap;

use crate::poet::analysis::Analysis;
use crate::poet::dictionary::Dictionary;
use crate::poet::forms::FormCatalog;
use crate::poet::pronunciation::Pronunciations;
use crate::poet::scheme::scheme_to_string;

/// A container for data owned by web server that's available for all requests.
///
/// Both members are read-only after startup, so sharing them between requests is safe.
pub struct ServerState {
    pub dict: Dictionary,
    pub forms: FormCatalog,
}

/// A Context for populating the index template.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct IndexTemplateContext<'a> {
    form_names: Vec<&'a str>,
}

/// A Context for populating the lookup template.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct LookupTemplateContext<'a> {
    query: &'a str,
    pronunciations: Vec<String>,
    syllables: Option<usize>,
    rhyme_unit: Option<String>,
    rhymes: Vec<String>,
}

/// A Context for populating the analyze template.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
struct AnalyzeTemplateContext {
    error: Option<String>,
    raw_analysis: Option<String>,
    rhyme_scheme: Option<String>,
    form_name: Option<String>,
    form_errors: Vec<String>,
    conforming_forms: Vec<String>,
}

/// Handler for querying the dictionary for a single word.
#[get("/lookup?<term>")]
fn lookup(state: &State<ServerState>, term: &str) -> Template {
    let word = crate::poet::poem::normalize(term);
    let mut context = LookupTemplateContext {
        query: term,
        pronunciations: vec![],
        syllables: None,
        rhyme_unit: None,
        rhymes: vec![],
    };

    if let Some(entries) = state.dict.lookup(&word) {
        context.pronunciations = entries.iter().map(|e| e.to_string()).collect();
    }
    if let Some(phonemes) = state.dict.pronunciation(&word) {
        context.syllables = Some(phonemes.num_syllables());
        context.rhyme_unit = phonemes.rhyme_unit().ok().map(|u| u.to_string());
        context.rhymes = state.dict.rhymes(&word).into_iter().map(|w| w.word).collect();
    }
    return Template::render("lookup", context);
}

/// Describes the parameters and types for /analyze POST requests.
///
/// This is used by Rocket to validate incoming requests and to pass the values to
/// the `analyze` handler.
#[derive(FromForm)]
struct AnalyzeRequest<'a> {
    /// The poem to analyze.
    text: &'a str,

    /// The name of a poetry form to check the poem against. Empty means none.
    form: Option<&'a str>,
}

/// Handler for a POST form to analyze a poem.
#[post("/analyze", data = "<req>")]
fn analyze(state: &State<ServerState>, req: Form<AnalyzeRequest<'_>>) -> Template {
    let mut context = AnalyzeTemplateContext {
        error: None,
        raw_analysis: None,
        rhyme_scheme: None,
        form_name: None,
        form_errors: vec![],
        conforming_forms: vec![],
    };

    let analysis = match Analysis::new(req.text, &state.dict) {
        Ok(a) => a,
        Err(e) => {
            context.error = Some(e.to_string());
            return Template::render("analyze", context);
        }
    };
    context.raw_analysis = Some(analysis.summarize_to_text());
    context.rhyme_scheme = Some(scheme_to_string(&analysis.scheme));
    context.conforming_forms = analysis
        .conforming_forms(&state.forms)
        .into_iter()
        .map(String::from)
        .collect();

    if let Some(name) = req.form.filter(|n| !n.is_empty()) {
        context.form_name = Some(name.to_string());
        match analysis.check_form(&state.forms, name) {
            Ok(Ok(())) => {}
            Ok(Err(mismatches)) => {
                context.form_errors = mismatches.iter().map(|m| m.to_string()).collect();
            }
            Err(e) => context.error = Some(e.to_string()),
        }
    }
    return Template::render("analyze", context);
}

/// Handler for the root (/) page.
#[rocket::get("/")]
fn index(state: &State<ServerState>) -> Template {
    let context = IndexTemplateContext {
        form_names: state.forms.forms().iter().map(|f| f.name.as_str()).collect(),
    };
    return Template::render("index", context);
}

/// Handler for unknown pages.
#[catch(404)]
fn not_found() -> Template {
    let context = HashMap::<&str, &str>::new();
    return Template::render("not_found", context);
}

/// Assembles the server without launching it.
pub fn build(state: ServerState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .attach(Template::fairing())
        .mount("/", routes![index, lookup, analyze])
        .mount("/static", rocket::fs::FileServer::from("static/"))
        .register("/", catchers![not_found])
}

/// Starts the Rocket HTTP server and awaits until the server shuts down.
///
/// Args:
///
/// * `state` - An already-initialized dictionary and form catalog to use for all requests.
pub async fn run(state: ServerState) -> Result<(), rocket::Error> {
    println!("*****************************************************************");
    println!("*                                                               *");
    println!("*  Launching Web Server.                                        *");
    println!("*                                                               *");
    println!("*  Type Control-C in the Terminal to stop the server.           *");
    println!("*                                                               *");
    println!("*****************************************************************");

    build(state).launch().await?;
    Ok(())
}
