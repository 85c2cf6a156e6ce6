//! Coverage command implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use lingo::{normalize_tag, Locale};
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;

use crate::output::table::{format_coverage_table, LanguageCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Directory of `<locale>.json` catalogs.
    #[arg(long)]
    pub messages: PathBuf,

    /// Source language whose keys define the full set.
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Languages to check coverage for (comma-separated). Defaults to every
    /// other loaded locale.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let mut locale = Locale::new();
    locale.load_dir(&args.messages).into_diagnostic()?;
    let store = locale.store();

    let source = normalize_tag(&args.source);
    if !store.has_locale(&source) {
        return Err(miette!(
            "no catalog for source language '{}' in {}",
            args.source,
            args.messages.display()
        ));
    }
    let source_keys = store.keys(&source);
    let source_count = source_keys.len();

    let languages: Vec<String> = if args.lang.is_empty() {
        store
            .locales()
            .into_iter()
            .filter(|tag| *tag != source)
            .map(str::to_string)
            .collect()
    } else {
        args.lang.iter().map(|tag| normalize_tag(tag)).collect()
    };

    // Only keys present in the source count towards coverage.
    let coverage_data: Vec<LanguageCoverage> = languages
        .into_iter()
        .map(|language| {
            let translated: BTreeSet<&str> = store.keys(&language).into_iter().collect();
            let missing: Vec<String> = source_keys
                .iter()
                .filter(|key| !translated.contains(*key))
                .map(|key| (*key).to_string())
                .collect();
            LanguageCoverage {
                translated: source_count - missing.len(),
                language,
                missing,
            }
        })
        .collect();

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{json_output}");
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{table}");

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for name in &lang_coverage.missing {
                    println!("  - {name}");
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
