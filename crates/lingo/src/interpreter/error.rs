//! Error types for loading catalogs and evaluating messages.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parser::ParseError;

/// Errors that occur while loading catalogs or fallback tables.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a catalog.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source is not valid JSON.
    #[error("invalid JSON{}: {source}", in_path(path.as_deref()))]
    Json {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON does not have the shape of a catalog.
    #[error("invalid message source: {message}")]
    InvalidSource { message: String },

    /// A locale key contains characters other than letters, digits, `-`
    /// and `_`.
    #[error("invalid locale tag '{locale}'")]
    InvalidLocale { locale: String },
}

fn in_path(path: Option<&Path>) -> String {
    path.map(|p| format!(" in '{}'", p.display()))
        .unwrap_or_default()
}

/// An error that occurred while rendering a message.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The message could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A template names an operation that is neither built in nor
    /// registered.
    #[error("unknown operation '{name}'{}", did_you_mean(suggestions))]
    UnknownOperation {
        name: String,
        suggestions: Vec<String>,
    },

    /// The tree contains a node the evaluator cannot render, such as a
    /// hand-built element outside the HTML allowlist.
    #[error("unexpected node in message tree: {description}")]
    UnexpectedNode { description: String },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Names from `available` within a small edit distance of `key`, closest
/// first, at most three.
///
/// Keys of three characters or fewer allow distance 1, longer keys allow 2.
pub fn compute_suggestions(key: &str, available: &[String]) -> Vec<String> {
    let max_distance = if key.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(key, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
