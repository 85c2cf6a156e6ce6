//! Message evaluation engine.
//!
//! The evaluator walks a parsed message bottom-up. Every child is evaluated
//! first, left to right, and the results are handed to the operation named
//! by the parent node. Plugin operations registered on the evaluator take
//! precedence over the built-ins.

use tracing::trace;

use crate::interpreter::builtins::{Builtin, concat};
use crate::interpreter::error::compute_suggestions;
use crate::interpreter::registry::OperationRegistry;
use crate::interpreter::{EvalContext, EvalError, Language};
use crate::parser::{Node, ParseOptions, escape_html, is_allowed_element, parse_message};
use crate::types::Value;

/// Renders message trees to text.
///
/// An evaluator is cheap to clone and can be shared across threads once
/// all plugins are registered.
///
/// # Example
///
/// ```
/// use lingo::{Evaluator, ParseOptions, Value};
///
/// let mut evaluator = Evaluator::new();
/// evaluator.register_operation("upper", |args, _params| {
///     Value::from(args.iter().map(|a| a.to_string().to_uppercase()).collect::<String>())
/// });
///
/// let text = evaluator
///     .render("{{UPPER:$1}}!", &[Value::from("hi")], "en", ParseOptions::default())
///     .unwrap();
/// assert_eq!(text, "HI!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    operations: OperationRegistry,
}

impl Evaluator {
    /// Create an evaluator with only the built-in operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a plugin operation. Names are case-insensitive.
    ///
    /// The handler receives the evaluated arguments of the call and the
    /// raw positional parameters of the evaluation.
    pub fn register_operation(
        &mut self,
        name: &str,
        operation: impl Fn(&[Value], &[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.operations.insert(name, operation);
    }

    /// The plugin operations registered on this evaluator.
    pub fn operations(&self) -> &OperationRegistry {
        &self.operations
    }

    /// Evaluate a message tree for a locale, using the built-in fallback
    /// table for locale data.
    pub fn evaluate(&self, node: &Node, params: &[Value], locale: &str) -> Result<String, EvalError> {
        self.evaluate_in(node, params, &Language::new(locale))
    }

    /// Evaluate a message tree for an already-resolved language.
    pub fn evaluate_in(
        &self,
        node: &Node,
        params: &[Value],
        language: &Language,
    ) -> Result<String, EvalError> {
        let ctx = EvalContext::new(params, language);
        Ok(self.emit(node, &ctx)?.to_string())
    }

    /// Parse and evaluate a message in one step.
    pub fn render(
        &self,
        template: &str,
        params: &[Value],
        locale: &str,
        options: ParseOptions,
    ) -> Result<String, EvalError> {
        let ast = parse_message(template, options)?;
        self.evaluate(&ast, params, locale)
    }

    /// Evaluate one node. Parameters substituted for `$N` are returned as
    /// given, not converted to text.
    pub fn emit(&self, node: &Node, ctx: &EvalContext<'_>) -> Result<Value, EvalError> {
        match node {
            Node::Literal(text) => Ok(Value::String(text.clone())),
            Node::Replace(index) => Ok(ctx
                .param(*index)
                .cloned()
                .unwrap_or_else(|| Value::String(format!("${}", index + 1)))),
            Node::Concat(children) => {
                let args = self.emit_all(children, ctx)?;
                self.call(Builtin::Concat.name(), &args, ctx)
            }
            Node::Operation { name, args } => {
                let args = self.emit_all(args, ctx)?;
                self.call(name, &args, ctx)
            }
            Node::Wikilink { target, label } => {
                let mut args = vec![self.emit(target, ctx)?];
                if let Some(label) = label {
                    args.push(self.emit(label, ctx)?);
                }
                self.call(Builtin::Wikilink.name(), &args, ctx)
            }
            Node::Extlink { target, label } => {
                let args = [self.emit(target, ctx)?, self.emit(label, ctx)?];
                self.call(Builtin::Extlink.name(), &args, ctx)
            }
            Node::HtmlElement {
                tag,
                attributes,
                children,
            } => {
                if !is_allowed_element(tag, attributes) {
                    return Err(EvalError::UnexpectedNode {
                        description: format!("HTML element <{tag}> outside the allowlist"),
                    });
                }
                let inner = concat(&self.emit_all(children, ctx)?);
                Ok(Value::String(render_element(tag, attributes, &inner)))
            }
        }
    }

    fn emit_all(&self, nodes: &[Node], ctx: &EvalContext<'_>) -> Result<Vec<Value>, EvalError> {
        nodes.iter().map(|node| self.emit(node, ctx)).collect()
    }

    /// Dispatch an operation by name: plugins first, then built-ins.
    fn call(&self, name: &str, args: &[Value], ctx: &EvalContext<'_>) -> Result<Value, EvalError> {
        if let Some(operation) = self.operations.get(name) {
            trace!(name, "calling plugin operation");
            return Ok(operation(args, ctx.params()));
        }
        match Builtin::from_name(name) {
            Some(builtin) => Ok(builtin.apply(args, ctx)),
            None => Err(EvalError::UnknownOperation {
                name: name.to_string(),
                suggestions: compute_suggestions(&name.to_lowercase(), &self.operations.names()),
            }),
        }
    }
}

/// Render an allowlisted element with escaped attribute values.
fn render_element(tag: &str, attributes: &[(String, String)], inner: &str) -> String {
    let tag = tag.to_lowercase();
    let attrs: String = attributes
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name.to_lowercase(), escape_html(value)))
        .collect();
    format!("<{tag}{attrs}>{inner}</{tag}>")
}
