//! Implementation of the `lingo eval` command.

use std::path::PathBuf;

use clap::Args;
use lingo::{parse, EvalError, Locale, ParseOptions, Value};
use miette::{miette, IntoDiagnostic, Report, Result};
use serde::Serialize;
use tracing::debug;

use crate::output::MessageDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Language code for evaluation (e.g., en, fi, ru)
    #[arg(long, env = "LINGO_LOCALE", default_value = "en")]
    pub locale: String,

    /// Template string to evaluate
    #[arg(long, required_unless_present = "key", conflicts_with = "key")]
    pub template: Option<String>,

    /// Catalog key to look up and render
    #[arg(long, requires = "messages")]
    pub key: Option<String>,

    /// Directory of `<locale>.json` catalogs
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// Positional parameter for `$1`, `$2`, ... (repeatable)
    #[arg(short = 'p', long = "param")]
    pub params: Vec<String>,

    /// Enable `[[wiki links]]` and `[external links]`
    #[arg(long)]
    pub wikilinks: bool,

    /// Print the parsed tree instead of rendering
    #[arg(long)]
    pub ast: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub locale: String,
    pub result: String,
}

/// Interpret a parameter: integers become numbers, anything else a string.
fn parse_param(raw: &str) -> Value {
    raw.parse::<i64>()
        .map_or_else(|_| Value::from(raw), Value::from)
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let mut locale = Locale::builder()
        .language(args.locale.clone())
        .wikilinks(args.wikilinks)
        .build();

    if let Some(dir) = &args.messages {
        let count = locale.load_dir(dir).into_diagnostic()?;
        debug!(count, dir = %dir.display(), "loaded catalogs");
    }

    let template = match (&args.key, &args.template) {
        (Some(key), _) => locale
            .message(key)
            .ok_or_else(|| {
                miette!(
                    "no message '{key}' for '{}' or its fallbacks {:?}",
                    args.locale,
                    locale.fallback_locales()
                )
            })?
            .to_string(),
        (None, Some(template)) => template.clone(),
        (None, None) => return Err(miette!("either --template or --key is required")),
    };
    let origin = args.key.as_deref().unwrap_or("template");

    if args.ast {
        let options = ParseOptions {
            wikilinks: args.wikilinks,
        };
        return match parse(&template, options) {
            Ok(ast) => {
                println!("{}", serde_json::to_string_pretty(&ast).into_diagnostic()?);
                Ok(exitcode::OK)
            }
            Err(e) => {
                let diagnostic = MessageDiagnostic::from_parse_error("eval", origin, &e);
                eprintln!("{:?}", Report::new(diagnostic));
                Ok(exitcode::DATAERR)
            }
        };
    }

    let params: Vec<Value> = args.params.iter().map(String::as_str).map(parse_param).collect();

    match locale.render(&template, &params) {
        Ok(result) => {
            if args.json {
                let output = EvalResult {
                    locale: args.locale,
                    result,
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else if let EvalError::Parse(parse_error) = &e {
                let diagnostic = MessageDiagnostic::from_parse_error("eval", origin, parse_error);
                eprintln!("{:?}", Report::new(diagnostic));
            } else {
                eprintln!("Evaluation error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}
