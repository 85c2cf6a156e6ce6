//! Message interpreter.
//!
//! This module provides the evaluation engine that takes parsed messages and
//! produces formatted strings, the locale-sensitive operations it relies on
//! (plural selection, grammar, digits, number formatting, bidi isolation),
//! and the catalog layer that finds a message for a locale.

mod bidi;
mod builtins;
mod catalog;
mod context;
mod digits;
mod error;
mod evaluator;
mod grammar;
mod language;
mod locale;
mod number;
mod plural;
mod registry;

pub use bidi::{Direction, bidi_isolate, strong_direction};
pub use builtins::Builtin;
pub use catalog::MessageStore;
pub use context::EvalContext;
pub use digits::{digit_table, to_latin_digits, to_native_digits};
pub use error::{EvalError, LoadError, compute_suggestions};
pub use evaluator::Evaluator;
pub use grammar::{GrammarFn, convert_grammar, grammar_rule};
pub use language::Language;
pub use locale::{Locale, TEMPLATE_CACHE_CAPACITY};
pub use number::{format_number, parse_formatted_number};
pub use plural::{operands, plural_category, plural_form_index};
pub use registry::{OperationFn, OperationRegistry};
