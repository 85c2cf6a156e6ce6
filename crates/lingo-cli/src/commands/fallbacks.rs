//! Implementation of the `lingo fallbacks` command.

use std::path::PathBuf;

use clap::Args;
use lingo::{FallbackResolver, FallbackTable, DEFAULT_FINAL_FALLBACK};
use miette::{IntoDiagnostic, Result};

use crate::output::table::format_fallback_table;

/// Arguments for the fallbacks command.
#[derive(Debug, Args)]
pub struct FallbacksArgs {
    /// Locale to resolve (e.g., fi-Latn-FI, dsb)
    pub locale: String,

    /// Locale that ends every chain
    #[arg(long, default_value = DEFAULT_FINAL_FALLBACK)]
    pub final_fallback: String,

    /// JSON fallback table replacing the built-in one
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the fallbacks command.
pub fn run_fallbacks(args: FallbacksArgs) -> Result<i32> {
    let custom = args
        .table
        .as_ref()
        .map(FallbackTable::from_file)
        .transpose()
        .into_diagnostic()?;
    let table = custom.as_ref().unwrap_or(FallbackTable::builtin());
    let chain = FallbackResolver::new(table, &args.final_fallback).resolve(&args.locale);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chain).into_diagnostic()?);
    } else {
        println!("{}", format_fallback_table(&chain));
    }
    Ok(exitcode::OK)
}
