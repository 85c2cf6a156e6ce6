//! Parse error types.

use thiserror::Error;

/// An error that occurred while parsing a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar could not consume the whole input.
    ///
    /// `offset` counts characters, not bytes, from the start of `input`.
    #[error("syntax error at offset {offset} in message \"{input}\": {message}")]
    Syntax {
        offset: usize,
        input: String,
        message: String,
    },
}

impl ParseError {
    /// Build a syntax error from the original input and the unconsumed rest.
    pub(crate) fn at(original: &str, remaining: &str) -> Self {
        let consumed = original.len().saturating_sub(remaining.len());
        let offset = original.get(..consumed).map_or(0, |s| s.chars().count());
        let message = match remaining.chars().next() {
            Some(c) => format!("unexpected character '{c}'"),
            None => "unexpected end of input".to_string(),
        };
        ParseError::Syntax {
            offset,
            input: original.to_string(),
            message,
        }
    }

    /// Character offset of the failure.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. } => *offset,
        }
    }

    /// Byte offset of the failure within the original input.
    pub fn byte_offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, input, .. } => input
                .char_indices()
                .nth(*offset)
                .map_or(input.len(), |(index, _)| index),
        }
    }
}
