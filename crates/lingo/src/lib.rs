//! Wiki-style message formatting.
//!
//! Messages are written in a small markup language: `$1` placeholders,
//! `{{PLURAL:$1|one|many}}` style template calls, optional `[[wiki links]]`
//! and a sanitized subset of inline HTML. This crate parses messages,
//! evaluates them with locale-aware plural, gender, grammar and number
//! rules, and resolves locale fallback chains for catalog lookups.

mod fallback;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use fallback::{
    DEFAULT_FINAL_FALLBACK, FallbackResolver, FallbackTable, normalize_tag, resolve_fallbacks,
    truncations,
};
pub use interpreter::{
    EvalContext, EvalError, Evaluator, Language, LoadError, Locale, MessageStore,
    OperationRegistry, compute_suggestions,
};
pub use parser::{Node, ParseError, ParseOptions};
pub use types::Value;

/// Parse a message into an AST rooted at a `Concat` node.
///
/// # Example
///
/// ```
/// use lingo::{Node, ParseOptions};
///
/// let ast = lingo::parse("\\{{X}}", ParseOptions::default()).unwrap();
/// assert_eq!(ast, Node::Concat(vec![Node::Literal("{{X}}".into())]));
/// ```
pub fn parse(message: &str, options: ParseOptions) -> Result<Node, ParseError> {
    parser::parse_message(message, options)
}

/// Parse and evaluate a message with the built-in operations.
///
/// Link syntax is off; use [`Evaluator::render`] to enable it.
///
/// # Example
///
/// ```
/// use lingo::params;
///
/// let text = lingo::render("{{PLURAL:$1|$1 car|$1 cars}}", &params![5], "en").unwrap();
/// assert_eq!(text, "5 cars");
/// ```
pub fn render(template: &str, params: &[Value], locale: &str) -> Result<String, EvalError> {
    Evaluator::new().render(template, params, locale, ParseOptions::default())
}

/// Creates a `Vec<Value>` of positional parameters.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats, strings, or `Option`s directly.
///
/// # Example
///
/// ```
/// use lingo::{params, Value};
///
/// let p = params![3, "Alice"];
/// assert_eq!(p.len(), 2);
/// assert_eq!(p[0].as_number(), Some(3));
/// assert_eq!(p[1].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$(::std::convert::Into::<$crate::Value>::into($value)),+]
    };
}
