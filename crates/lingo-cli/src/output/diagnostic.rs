//! Miette diagnostic wrapper for message parse errors.
//!
//! Note: miette derive macros read struct fields in generated code that
//! rustc cannot track.
#![expect(unused_assignments)]

use lingo::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for a message that failed to parse.
///
/// The source shown is the message template itself, named after the
/// catalog entry it came from.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error in '{key}': {message}")]
#[diagnostic(code(lingo::syntax))]
pub struct MessageDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    key: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl MessageDiagnostic {
    /// Create a diagnostic from a ParseError for the message `key`.
    ///
    /// `origin` names where the message came from, such as a file path and
    /// locale.
    pub fn from_parse_error(origin: &str, key: &str, err: &ParseError) -> Self {
        let ParseError::Syntax { input, message, .. } = err;
        let offset = err.byte_offset().min(input.len());
        let length = input[offset..].chars().next().map_or(0, char::len_utf8);

        let help = if message.contains("end of input") {
            Some("a '{{' template or '<' tag is never closed".to_string())
        } else {
            None
        };

        MessageDiagnostic {
            src: NamedSource::new(format!("{origin}: {key}"), input.clone()),
            span: (offset, length).into(),
            key: key.to_string(),
            message: message.clone(),
            help,
        }
    }

    /// Byte offset of the failure inside the message.
    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Parser message without the location prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}
