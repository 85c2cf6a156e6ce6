//! Inline HTML recognition and allowlist sanitizing.
//!
//! An element is kept only when it is closed by a tag of the same name, the
//! tag and every attribute name are on the allowlist, and no `style` value
//! contains a dangerous construct. Anything else is emitted as escaped text,
//! with the element's children still parsed so placeholders inside keep
//! working.

use tracing::debug;
use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{alt, delimited, opt, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use super::ast::Node;
use super::message::{Scope, expression, token};

/// Elements that survive sanitizing.
pub const ALLOWED_ELEMENTS: &[&str] = &[
    "b", "bdi", "del", "i", "ins", "u", "font", "big", "small", "sub", "sup", "h1", "h2", "h3",
    "h4", "h5", "h6", "cite", "code", "em", "s", "strike", "strong", "tt", "var", "div", "center",
    "blockquote", "ol", "ul", "dl", "table", "caption", "pre", "ruby", "rb", "rp", "rt", "rtc", "p",
    "span", "abbr", "dfn", "kbd", "samp", "data", "time", "mark", "li", "dt", "dd",
];

/// Attributes allowed on every element.
pub const COMMON_ATTRIBUTES: &[&str] = &[
    "id",
    "class",
    "style",
    "lang",
    "dir",
    "title",
    "aria-describedby",
    "aria-flowto",
    "aria-hidden",
    "aria-label",
    "aria-labelledby",
    "aria-owns",
    "role",
    "about",
    "property",
    "resource",
    "datatype",
    "typeof",
    "itemid",
    "itemprop",
    "itemref",
    "itemscope",
    "itemtype",
];

/// Attributes allowed only on a specific element.
fn element_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "font" => &["color", "size", "face"],
        "data" => &["value"],
        "time" => &["datetime"],
        "bdo" => &["dir"],
        _ => &[],
    }
}

/// Style fragments that enable script or remote loads, each as a keyword
/// and the punctuation that must follow it (after optional whitespace).
const DANGEROUS_STYLE: &[(&str, char)] = &[
    ("filter", ':'),
    ("accelerator", ':'),
    ("-o-link", ':'),
    ("-o-link-source", ':'),
    ("-o-replace", ':'),
    ("url", '('),
    ("image", '('),
    ("image-set", '('),
];

/// Escape `& < > " '` for HTML text and attribute values.
///
/// # Example
///
/// ```
/// use lingo::parser::escape_html;
///
/// assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#039;x&#039;&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Whether an element with these attributes may be emitted as markup.
///
/// Names are compared case-insensitively.
pub fn is_allowed_element(tag: &str, attributes: &[(String, String)]) -> bool {
    let tag = tag.to_ascii_lowercase();
    if !ALLOWED_ELEMENTS.contains(&tag.as_str()) {
        return false;
    }
    let per_element = element_attributes(&tag);
    attributes.iter().all(|(name, value)| {
        let name = name.to_ascii_lowercase();
        let known =
            COMMON_ATTRIBUTES.contains(&name.as_str()) || per_element.contains(&name.as_str());
        known && !(name == "style" && is_dangerous_style(value))
    })
}

/// Whether a `style` value contains control characters or constructs that
/// can execute script or fetch resources.
pub fn is_dangerous_style(value: &str) -> bool {
    let has_control = value
        .chars()
        .any(|c| matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{E}'..='\u{1F}' | '\u{7F}'));
    if has_control {
        return true;
    }
    let lower = value.to_lowercase();
    lower.contains("expression")
        || DANGEROUS_STYLE
            .iter()
            .any(|(keyword, punct)| keyword_followed_by(&lower, keyword, *punct))
}

fn keyword_followed_by(haystack: &str, keyword: &str, punct: char) -> bool {
    haystack.match_indices(keyword).any(|(index, _)| {
        haystack
            .get(index + keyword.len()..)
            .is_some_and(|rest| rest.trim_start().starts_with(punct))
    })
}

// =============================================================================
// Grammar
// =============================================================================

/// A recognized opening tag.
struct OpenTag {
    name: String,
    attributes: Vec<(String, String)>,
}

/// `<name attr="v">children</name>`, sanitized.
pub(super) fn html_element(input: &mut &str, scope: Scope) -> ModalResult<Node> {
    let (open, open_text) = open_tag.with_taken().parse_next(input)?;
    let children: Vec<Node> =
        repeat(0.., |i: &mut &str| expression(i, scope.in_html())).parse_next(input)?;

    let Some((close_name, close_text)) = opt(close_tag.with_taken()).parse_next(input)? else {
        debug!(tag = %open.name, "unclosed html tag, escaping");
        let mut nodes = vec![Node::Literal(escape_html(open_text))];
        nodes.extend(children);
        return Ok(Node::concat(nodes));
    };

    if open.name == close_name.to_ascii_lowercase()
        && is_allowed_element(&open.name, &open.attributes)
    {
        return Ok(Node::HtmlElement {
            tag: open.name,
            attributes: open.attributes,
            children,
        });
    }

    debug!(tag = %open.name, close = close_name, "disallowed or mismatched html, escaping");
    let mut nodes = vec![Node::Literal(escape_html(open_text))];
    nodes.extend(children);
    nodes.push(Node::Literal(escape_html(close_text)));
    Ok(Node::concat(nodes))
}

fn open_tag(input: &mut &str) -> ModalResult<OpenTag> {
    token(input, "<")?;
    let name = tag_name(input)?.to_ascii_lowercase();
    let attributes: Vec<(String, String)> = repeat(0.., attribute).parse_next(input)?;
    optional_whitespace(input)?;
    opt(|i: &mut &str| token(i, "/")).parse_next(input)?;
    token(input, ">")?;
    Ok(OpenTag { name, attributes })
}

fn close_tag<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    token(input, "</")?;
    let name = tag_name(input)?;
    optional_whitespace(input)?;
    token(input, ">")?;
    Ok(name)
}

fn tag_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric()),
    )
        .take()
        .parse_next(input)
}

/// ` name="value"` or ` name='value'`.
fn attribute(input: &mut &str) -> ModalResult<(String, String)> {
    required_whitespace(input)?;
    let name = attribute_name(input)?.to_ascii_lowercase();
    optional_whitespace(input)?;
    token(input, "=")?;
    optional_whitespace(input)?;
    let value = quoted_value(input)?.to_string();
    Ok((name, value))
}

fn attribute_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic()),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '-'),
    )
        .take()
        .parse_next(input)
}

fn quoted_value<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((
        delimited('"', take_while(0.., |c: char| c != '"'), '"'),
        delimited('\'', take_while(0.., |c: char| c != '\''), '\''),
    ))
    .parse_next(input)
}

fn required_whitespace(input: &mut &str) -> ModalResult<()> {
    multispace1.void().parse_next(input)
}

fn optional_whitespace(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}
