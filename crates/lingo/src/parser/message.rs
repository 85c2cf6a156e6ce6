//! Message grammar using winnow.
//!
//! Parses message source into an AST. Handles:
//! - Literal text, with `\` escaping the next character
//! - `$N` placeholders
//! - `{{name:arg|arg}}` template calls with nested expressions
//! - `[[target|label]]` and `[url label]` links (opt-in)
//! - Inline HTML, see the `html` module
//!
//! Every rule is a plain function over the cursor plus a [`Scope`] value, so
//! each rule can be driven on its own in tests.

use winnow::ascii::{digit1, multispace1};
use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::ast::Node;
use super::error::ParseError;
use super::html::html_element;

/// Options controlling which constructs the parser recognizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Recognize `[[wiki links]]` and `[external links]`. When off,
    /// brackets are ordinary text.
    pub wikilinks: bool,
}

impl ParseOptions {
    /// Options with link syntax enabled.
    pub fn with_wikilinks() -> Self {
        ParseOptions { wikilinks: true }
    }
}

/// Parse a message into an AST rooted at a `Concat` node.
///
/// Fails if any part of the input cannot be consumed; there is no partial
/// result.
///
/// # Example
///
/// ```
/// use lingo::parser::{Node, ParseOptions, parse_message};
///
/// let ast = parse_message("Hello $1", ParseOptions::default()).unwrap();
/// assert_eq!(
///     ast,
///     Node::Concat(vec![Node::Literal("Hello ".into()), Node::Replace(0)])
/// );
/// ```
pub fn parse_message(input: &str, options: ParseOptions) -> Result<Node, ParseError> {
    let scope = Scope::new(options);
    let mut remaining = input;
    let parsed: ModalResult<Vec<Node>> =
        repeat(0.., |i: &mut &str| expression(i, scope)).parse_next(&mut remaining);
    match parsed {
        Ok(nodes) if remaining.is_empty() => Ok(Node::concat(nodes)),
        _ => Err(ParseError::at(input, remaining)),
    }
}

/// Where in the grammar a rule is being applied.
///
/// Nested constructs change which characters terminate a literal run, so the
/// scope is threaded through every rule by value.
#[derive(Debug, Clone, Copy)]
pub(super) struct Scope {
    wikilinks: bool,
    html: bool,
    link: bool,
    param: bool,
    /// Somewhere inside a link, at any depth. Links do not nest.
    no_links: bool,
}

impl Scope {
    fn new(options: ParseOptions) -> Self {
        Scope {
            wikilinks: options.wikilinks,
            html: false,
            link: false,
            param: false,
            no_links: false,
        }
    }

    /// Inside the children of an HTML element.
    pub(super) fn in_html(self) -> Self {
        Scope { html: true, ..self }
    }

    /// Inside a link label, where `]` closes the link.
    fn in_link(self) -> Self {
        Scope {
            link: true,
            param: false,
            no_links: true,
            ..self
        }
    }

    /// Inside a link target, where no other link may start.
    fn in_link_target(self) -> Self {
        Scope {
            no_links: true,
            ..self
        }
    }

    /// Inside a template parameter, where `|` separates arguments.
    fn in_param(self) -> Self {
        Scope {
            param: true,
            html: false,
            link: false,
            ..self
        }
    }

    /// Whether `c` may appear unescaped in a literal run.
    fn is_literal(self, c: char) -> bool {
        match c {
            '{' | '}' | '$' | '\\' | '<' => false,
            '[' | ']' => !self.wikilinks,
            '|' => !self.param,
            _ => true,
        }
    }
}

/// Any single construct, tried in precedence order.
pub(super) fn expression(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    alt((
        |i: &mut &str| template(i, scope),
        replacement,
        |i: &mut &str| wikilink(i, scope),
        |i: &mut &str| extlink(i, scope),
        |i: &mut &str| html_element(i, scope),
        |i: &mut &str| literal(i, scope),
        |i: &mut &str| stray(i, scope),
    ))
    .parse_next(input)
}

/// Consumes an exact token.
pub(super) fn token(input: &mut &str, expected: &'static str) -> ModalResult<()> {
    expected.void().parse_next(input)
}

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

// =============================================================================
// Templates and placeholders
// =============================================================================

/// `{{name}}`, `{{name:first|second}}`, `{{name|first}}`.
fn template(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    delimited("{{", |i: &mut &str| template_body(i, scope), "}}").parse_next(input)
}

fn template_body(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    let name = template_name(input)?.trim().to_string();
    let param_scope = scope.in_param();

    let mut args = Vec::new();
    if opt(|i: &mut &str| token(i, ":")).parse_next(input)?.is_some() {
        args.push(parameter(input, param_scope)?);
    }
    let rest: Vec<Node> = repeat(
        0..,
        preceded('|', |i: &mut &str| parameter(i, param_scope)),
    )
    .parse_next(input)?;
    args.extend(rest);

    Ok(Node::Operation { name, args })
}

/// Title-like characters; excludes `:` and `|` so both can separate
/// arguments.
fn template_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_template_name_char).parse_next(input)
}

fn is_template_name_char(c: char) -> bool {
    matches!(c,
        ' ' | '!' | '"' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/'
        | '0'..='9' | ';' | '=' | '?' | '@' | 'A'..='Z' | '^' | '_' | '`' | 'a'..='z' | '~'
        | '\u{80}'..='\u{FF}')
}

/// One template argument: zero or more expressions up to the next `|` or
/// `}}`.
fn parameter(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    let nodes: Vec<Node> = repeat(0.., |i: &mut &str| expression(i, scope)).parse_next(input)?;
    Ok(Node::collapse(nodes))
}

/// `$N` with N >= 1. `$0` and out-of-range numbers are not placeholders.
fn replacement(input: &mut &str) -> ModalResult<Node> {
    preceded('$', digit1)
        .verify_map(|digits: &str| digits.parse::<usize>().ok()?.checked_sub(1))
        .map(Node::Replace)
        .parse_next(input)
}

// =============================================================================
// Links
// =============================================================================

/// `[[target]]` or `[[target|label]]`.
fn wikilink(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    if !scope.wikilinks || scope.no_links {
        return backtrack();
    }
    token(input, "[[")?;
    let target: Vec<Node> =
        repeat(1.., |i: &mut &str| link_target(i, scope.in_link_target())).parse_next(input)?;

    let label = if opt(|i: &mut &str| token(i, "|")).parse_next(input)?.is_some() {
        let nodes: Vec<Node> =
            repeat(1.., |i: &mut &str| expression(i, scope.in_link())).parse_next(input)?;
        Some(Box::new(Node::collapse(nodes)))
    } else {
        None
    };
    token(input, "]]")?;

    Ok(Node::Wikilink {
        target: Box::new(Node::collapse(target)),
        label,
    })
}

fn link_target(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    alt((
        |i: &mut &str| template(i, scope),
        replacement,
        |i: &mut &str| literal(i, scope.in_param()),
    ))
    .parse_next(input)
}

/// `[url label]`. A bare `[url]` is not a link.
fn extlink(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    if !scope.wikilinks || scope.no_links {
        return backtrack();
    }
    token(input, "[")?;
    let target: Vec<Node> =
        repeat(1.., |i: &mut &str| link_url(i, scope.in_link_target())).parse_next(input)?;
    whitespace(input)?;
    let label: Vec<Node> =
        repeat(1.., |i: &mut &str| expression(i, scope.in_link())).parse_next(input)?;
    token(input, "]")?;

    Ok(Node::Extlink {
        target: Box::new(Node::collapse(target)),
        label: Box::new(Node::collapse(label)),
    })
}

fn link_url(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    alt((
        |i: &mut &str| template(i, scope),
        replacement,
        |i: &mut &str| literal_run(i, move |c| scope.is_literal(c) && !c.is_whitespace()),
    ))
    .parse_next(input)
}

fn whitespace(input: &mut &str) -> ModalResult<()> {
    multispace1.void().parse_next(input)
}

// =============================================================================
// Literals
// =============================================================================

/// A run of ordinary or escaped characters.
fn literal(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    literal_run(input, move |c| scope.is_literal(c))
}

/// `<` only reaches a run through an escape and is kept escaped, so no
/// literal can open a tag that bypassed sanitizing.
fn literal_run(input: &mut &str, accept: impl Fn(char) -> bool + Copy) -> ModalResult<Node> {
    let text = repeat(1.., alt((escaped_char, one_of(accept))))
        .fold(String::new, |mut text: String, c: char| {
            if c == '<' {
                text.push_str("&lt;");
            } else {
                text.push(c);
            }
            text
        })
        .parse_next(input)?;
    Ok(Node::Literal(text))
}

/// `\x` stands for `x`.
fn escaped_char(input: &mut &str) -> ModalResult<char> {
    preceded('\\', any).parse_next(input)
}

/// A sigil that did not start a construct is plain text.
///
/// `<` is emitted pre-escaped. Inside HTML a `</` is left for the closing
/// tag rule, and inside a link label `]` is left to close the link. A `{{`
/// that failed to parse as a template is an error, as is a `}` that may
/// close one.
fn stray(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    let accepted = match input.chars().next() {
        Some('$' | '[') => true,
        Some('{') => !input.starts_with("{{"),
        Some('}') => !scope.param,
        Some('<') => !(scope.html && input.starts_with("</")),
        Some(']') => !scope.link,
        _ => false,
    };
    if !accepted {
        return backtrack();
    }
    any.map(|c: char| {
        Node::Literal(if c == '<' {
            "&lt;".to_string()
        } else {
            c.to_string()
        })
    })
    .parse_next(input)
}
