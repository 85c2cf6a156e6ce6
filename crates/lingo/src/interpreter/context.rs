//! Evaluation context passed to every operation.

use crate::interpreter::Language;
use crate::types::Value;

/// State shared by one evaluation: the caller's positional parameters and
/// the language driving locale-sensitive operations.
///
/// The context is read-only; evaluation never mutates it.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// Positional parameters. `$1` is index 0.
    params: &'a [Value],
    language: &'a Language,
}

impl<'a> EvalContext<'a> {
    /// Create a context over parameters and a language.
    pub fn new(params: &'a [Value], language: &'a Language) -> Self {
        Self { params, language }
    }

    /// Get a parameter by zero-based index.
    pub fn param(&self, index: usize) -> Option<&'a Value> {
        self.params.get(index)
    }

    /// All parameters, as handed to plugin operations.
    pub fn params(&self) -> &'a [Value] {
        self.params
    }

    /// The language of this evaluation.
    pub fn language(&self) -> &'a Language {
        self.language
    }
}
