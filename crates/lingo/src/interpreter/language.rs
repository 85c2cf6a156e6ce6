//! Locale-sensitive behavior used by the built-in operations.

use crate::fallback::{normalize_tag, resolve_fallbacks};
use crate::interpreter::digits::to_latin_digits;
use crate::interpreter::grammar::convert_grammar;
use crate::interpreter::number::{format_number, parse_formatted_number};
use crate::interpreter::plural::plural_form_index;
use crate::types::Value;

/// A normalized locale tag and the chain used when its data is missing.
///
/// Plural selection, grammar, digit handling and number formatting for one
/// evaluation all go through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    tag: String,
    fallbacks: Vec<String>,
}

impl Language {
    /// A language whose fallback chain comes from the built-in table.
    pub fn new(tag: &str) -> Self {
        let tag = normalize_tag(tag);
        let fallbacks = resolve_fallbacks(&tag);
        Language { tag, fallbacks }
    }

    /// A language with an explicit fallback chain.
    pub fn with_fallbacks(tag: &str, fallbacks: Vec<String>) -> Self {
        Language {
            tag: normalize_tag(tag),
            fallbacks,
        }
    }

    /// The normalized tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Tags tried for number formatting, most specific first.
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// Replace this language's native digits with ASCII digits.
    pub fn to_latin_digits(&self, text: &str) -> String {
        to_latin_digits(text, &self.tag)
    }

    /// Render a count as Latin-digit text for plural matching.
    pub fn count_text(&self, count: &Value) -> String {
        match count {
            Value::String(text) => to_latin_digits(text.trim(), &self.tag),
            other => other.to_string(),
        }
    }

    /// Select a plural form for `count`.
    ///
    /// Forms written `N=text` match the count exactly and are tried first;
    /// they are then removed before the remaining forms are indexed by
    /// plural category. The index is clamped to the last form.
    pub fn convert_plural(&self, count: &Value, forms: &[String]) -> String {
        let number = self.count_text(count);
        let numeric = number.parse::<f64>().ok();

        let mut positional = Vec::with_capacity(forms.len());
        for form in forms {
            match explicit_form(form) {
                Some((value, text)) => {
                    if numeric == Some(value) {
                        return text.to_string();
                    }
                }
                None => positional.push(form),
            }
        }

        let Some(last) = positional.len().checked_sub(1) else {
            return String::new();
        };
        let index = plural_form_index(&self.tag, &number).min(last);
        positional
            .get(index)
            .map(|form| (*form).clone())
            .unwrap_or_default()
    }

    /// Select a gender form: `male` is the first, `female` the second, and
    /// anything else the third when exactly three forms are given, else the
    /// first. A single form is used for everything.
    pub fn gender(&self, gender: &str, forms: &[String]) -> String {
        let Some(last) = forms.last() else {
            return String::new();
        };
        let index = match gender {
            "male" => 0,
            "female" => 1,
            _ if forms.len() == 3 => 2,
            _ => 0,
        };
        forms.get(index).unwrap_or(last).clone()
    }

    /// Inflect a word. Identity for languages without grammar rules.
    pub fn convert_grammar(&self, word: &str, form: &str) -> String {
        convert_grammar(&self.tag, word, form)
    }

    /// Format a number with locale digits and separators. Non-numeric
    /// input is returned unchanged.
    pub fn format_number(&self, number: &Value) -> Value {
        let text = self.count_text(number);
        match format_number(&text, &self.fallbacks) {
            Some(formatted) => Value::String(formatted),
            None => number.clone(),
        }
    }

    /// Parse a locale-formatted number back into a value. Non-numeric
    /// input is returned unchanged.
    #[expect(clippy::cast_possible_truncation)]
    pub fn parse_number(&self, text: &Value) -> Value {
        match text {
            Value::Number(_) | Value::Float(_) => text.clone(),
            Value::Empty => Value::Empty,
            Value::String(s) => match parse_formatted_number(s, &self.tag) {
                Some(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Value::Number(n as i64),
                Some(n) => Value::Float(n),
                None => text.clone(),
            },
        }
    }
}

/// Split an explicit plural form `N=text` into its number and text.
fn explicit_form(form: &str) -> Option<(f64, &str)> {
    let (digits, text) = form.split_once('=')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, text))
}
