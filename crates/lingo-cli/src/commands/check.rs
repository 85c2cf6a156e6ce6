//! Implementation of the `lingo check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::Args;
use lingo::{parse, LoadError, MessageStore, ParseOptions};
use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use crate::output::MessageDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Catalog files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Parse messages with `[[wiki links]]` enabled
    #[arg(long)]
    pub wikilinks: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One failing message, or a file that could not be loaded.
#[derive(Debug, Serialize)]
struct CheckFailure {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<usize>,
    message: String,
}

/// JSON output for the check command.
#[derive(Debug, Serialize)]
struct CheckReport {
    checked: usize,
    failures: Vec<CheckFailure>,
}

/// Read a catalog file. Its stem names the locale of top-level strings.
fn load_catalog(path: &Path) -> Result<MessageStore, LoadError> {
    let content = read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let json: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: Some(path.to_path_buf()),
            source,
        })?;
    let locale = path.file_stem().and_then(|s| s.to_str()).unwrap_or("en");
    let mut store = MessageStore::new();
    store.load(&json, Some(locale))?;
    Ok(store)
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let options = ParseOptions {
        wikilinks: args.wikilinks,
    };
    let mut checked = 0;
    let mut failures = Vec::new();

    for path in &args.files {
        let file = path.display().to_string();
        let store = match load_catalog(path) {
            Ok(store) => store,
            Err(e) => {
                if !args.json {
                    eprintln!("{} {file}: {e}", "error:".red().bold());
                }
                failures.push(CheckFailure {
                    file,
                    locale: None,
                    key: None,
                    offset: None,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for locale in store.locales() {
            for key in store.keys(locale) {
                let Some(template) = store.get(key, locale) else {
                    continue;
                };
                checked += 1;
                let Err(e) = parse(template, options) else {
                    continue;
                };
                let diagnostic =
                    MessageDiagnostic::from_parse_error(&format!("{file} [{locale}]"), key, &e);
                failures.push(CheckFailure {
                    file: file.clone(),
                    locale: Some(locale.to_string()),
                    key: Some(key.to_string()),
                    offset: Some(e.offset()),
                    message: diagnostic.message().to_string(),
                });
                if !args.json {
                    eprintln!("{:?}", Report::new(diagnostic));
                }
            }
        }
        debug!(file = %file, "checked catalog");
    }

    let failed = !failures.is_empty();
    if args.json {
        let report = CheckReport { checked, failures };
        println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    } else if failed {
        eprintln!(
            "{} {} of {checked} messages failed",
            "✗".red().bold(),
            failures.len()
        );
    } else {
        println!("{} {checked} messages OK", "✓".green().bold());
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
