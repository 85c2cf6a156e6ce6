//! Lingo CLI entry point.
//!
//! Provides command-line tools for working with message catalogs:
//! - `lingo eval` - Render a template or catalog message
//! - `lingo check` - Validate message syntax in catalog files
//! - `lingo coverage` - Report translation coverage across languages
//! - `lingo fallbacks` - Print the fallback chain for a locale

mod commands;
mod output;

use std::io;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_coverage, run_eval, run_fallbacks, CheckArgs, CoverageArgs, EvalArgs,
    FallbacksArgs,
};
use tracing_subscriber::EnvFilter;

/// Message catalog tools.
#[derive(Debug, Parser)]
#[command(name = "lingo")]
#[command(about = "Wiki-style message catalog tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check message syntax in catalog files
    Check(CheckArgs),
    /// Report translation coverage across languages
    Coverage(CoverageArgs),
    /// Render a template or a catalog message
    Eval(EvalArgs),
    /// Print the fallback chain for a locale
    Fallbacks(FallbacksArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Install the log subscriber. `--verbose` wins over `RUST_LOG`.
fn setup_logging(verbose: bool, color_when: ColorWhen) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!matches!(color_when, ColorWhen::Never))
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose, cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Fallbacks(args) => run_fallbacks(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
