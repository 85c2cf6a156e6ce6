//! Built-in template operations.
//!
//! Each built-in is a variant of [`Builtin`], selected by name and applied
//! to already-evaluated arguments. Missing arguments are treated as empty.

use tracing::debug;

use crate::interpreter::EvalContext;
use crate::interpreter::bidi::bidi_isolate;
use crate::parser::escape_html;
use crate::types::Value;

/// The operations every evaluator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Concat,
    Plural,
    Gender,
    Grammar,
    Bidi,
    FormatNum,
    Wikilink,
    Extlink,
}

impl Builtin {
    pub const ALL: &'static [Builtin] = &[
        Builtin::Concat,
        Builtin::Plural,
        Builtin::Gender,
        Builtin::Grammar,
        Builtin::Bidi,
        Builtin::FormatNum,
        Builtin::Wikilink,
        Builtin::Extlink,
    ];

    /// The lower-case name used in templates.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Concat => "concat",
            Builtin::Plural => "plural",
            Builtin::Gender => "gender",
            Builtin::Grammar => "grammar",
            Builtin::Bidi => "bidi",
            Builtin::FormatNum => "formatnum",
            Builtin::Wikilink => "wikilink",
            Builtin::Extlink => "extlink",
        }
    }

    /// Look up a built-in by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Builtin> {
        let name = name.to_lowercase();
        Builtin::ALL.iter().copied().find(|b| b.name() == name)
    }

    /// Apply this operation to evaluated arguments.
    pub fn apply(self, args: &[Value], ctx: &EvalContext<'_>) -> Value {
        let language = ctx.language();
        match self {
            Builtin::Concat => Value::String(concat(args)),
            Builtin::Plural => {
                let Some((count, forms)) = args.split_first() else {
                    return Value::String(String::new());
                };
                Value::String(language.convert_plural(count, &texts(forms)))
            }
            Builtin::Gender => {
                let gender = text(args, 0);
                let forms = args.get(1..).map(texts).unwrap_or_default();
                Value::String(language.gender(&gender, &forms))
            }
            Builtin::Grammar => {
                let form = text(args, 0);
                let word = args.get(1).cloned().unwrap_or_default();
                if form.is_empty() || word.is_empty() {
                    return word;
                }
                Value::String(language.convert_grammar(&word.to_string(), &form))
            }
            Builtin::Bidi => Value::String(bidi_isolate(&text(args, 0))),
            Builtin::FormatNum => {
                let number = args.first().cloned().unwrap_or_default();
                if text(args, 1) == "R" {
                    language.parse_number(&number)
                } else {
                    language.format_number(&number)
                }
            }
            Builtin::Wikilink => {
                Value::String(wikilink(&text(args, 0), args.get(1).map(ToString::to_string)))
            }
            Builtin::Extlink => Value::String(extlink(&text(args, 0), &text(args, 1))),
        }
    }
}

/// Join values in order. Empty values contribute nothing.
pub(crate) fn concat(values: &[Value]) -> String {
    values.iter().map(ToString::to_string).collect()
}

fn text(args: &[Value], index: usize) -> String {
    args.get(index).map(ToString::to_string).unwrap_or_default()
}

fn texts(values: &[Value]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Render an internal link. A leading `:` on the target is dropped; an
/// unpiped link shows the target itself.
pub(crate) fn wikilink(target: &str, label: Option<String>) -> String {
    let title = target.strip_prefix(':').unwrap_or(target).trim();
    let href = format!("./{}", title.replace(' ', "_"));
    let label = label.unwrap_or_else(|| title.to_string());
    format!(
        "<a href=\"{}\" title=\"{}\">{label}</a>",
        escape_html(&href),
        escape_html(title)
    )
}

/// URL schemes an external link may use. Relative and scheme-relative
/// URLs are always allowed.
const LINK_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "sftp", "mailto", "news", "irc", "ircs", "tel", "geo",
];

/// Render an external link. A URL with a scheme outside [`LINK_SCHEMES`],
/// such as `javascript:`, renders as its label alone.
pub(crate) fn extlink(url: &str, label: &str) -> String {
    let url = url.trim();
    if !is_safe_url(url) {
        debug!(url, "external link with disallowed scheme, dropping anchor");
        return label.to_string();
    }
    format!("<a href=\"{}\">{label}</a>", escape_html(url))
}

/// Whether `url` is relative or uses an allowed scheme. Whitespace and
/// control characters are ignored, as browsers ignore them in schemes.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme {
        // A ':' after a path, query or fragment character is not a scheme.
        return true;
    }
    LINK_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
}
