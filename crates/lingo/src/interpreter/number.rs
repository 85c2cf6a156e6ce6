//! Locale-aware number formatting for `{{formatnum:...}}`.
//!
//! Formatting goes through ICU decimal data. Malformed numbers are passed
//! through unchanged in both directions.

use fixed_decimal::Decimal;
use icu_decimal::DecimalFormatter;
use icu_locale_core::Locale;
use tracing::debug;

use super::digits::{to_latin_digits, to_native_digits};

/// Format a Latin-digit decimal string for the first tag in `candidates`
/// the formatting backend accepts.
///
/// Returns `None` if `number` is not a decimal number. If no candidate is
/// usable, the number is returned with the first candidate's native digits
/// and no grouping.
///
/// # Example
///
/// ```
/// use lingo::interpreter::format_number;
///
/// let tags = ["en".to_string()];
/// assert_eq!(format_number("1234567.5", &tags).as_deref(), Some("1,234,567.5"));
/// assert_eq!(format_number("abc", &tags), None);
/// ```
pub fn format_number(number: &str, candidates: &[String]) -> Option<String> {
    let trimmed = number.trim();
    let decimal: Decimal = trimmed.parse().ok()?;
    let formatted = candidates.iter().find_map(|tag| {
        let locale = Locale::try_from_str(tag).ok()?;
        let formatter = DecimalFormatter::try_new(locale.into(), Default::default()).ok()?;
        Some(formatter.format(&decimal).to_string())
    });
    formatted.or_else(|| {
        debug!(number, ?candidates, "no usable number format, keeping digits only");
        let tag = candidates.first().map_or("", String::as_str);
        Some(to_native_digits(trimmed, tag))
    })
}

/// Undo formatting: native digits become Latin, the locale's grouping
/// separator is dropped, its decimal separator becomes `.`, and the result
/// is parsed.
///
/// Returns `None` when the text is not a number after cleanup.
///
/// # Example
///
/// ```
/// use lingo::interpreter::parse_formatted_number;
///
/// assert_eq!(parse_formatted_number("١٬٢٣٤٫٥", "ar"), Some(1234.5));
/// assert_eq!(parse_formatted_number("1,234", "en"), Some(1234.0));
/// assert_eq!(parse_formatted_number("1.234,5", "de"), Some(1234.5));
/// assert_eq!(parse_formatted_number("many", "en"), None);
/// ```
pub fn parse_formatted_number(text: &str, tag: &str) -> Option<f64> {
    let (grouping, decimal) = separators(tag).unwrap_or_else(|| {
        debug!(tag, "no number symbols for locale, assuming ',' and '.'");
        (Some(','), '.')
    });
    let latin: String = to_latin_digits(text.trim(), tag)
        .chars()
        .filter_map(|c| match c {
            c if Some(c) == grouping => None,
            c if c == decimal => Some('.'),
            '\u{066C}' | '\u{00A0}' | '\u{202F}' => None,
            '\u{066B}' => Some('.'),
            _ => Some(c),
        })
        .collect();
    latin.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Grouping and decimal separators of a locale, read off a formatted
/// sample. Grouping is `None` for locales that do not group.
fn separators(tag: &str) -> Option<(Option<char>, char)> {
    let locale = Locale::try_from_str(tag).ok()?;
    let formatter = DecimalFormatter::try_new(locale.into(), Default::default()).ok()?;
    let sample: Decimal = "1234567.5".parse().ok()?;
    let formatted = to_latin_digits(&formatter.format(&sample).to_string(), tag);
    let marks: Vec<char> = formatted.chars().filter(|c| !c.is_ascii_digit()).collect();
    match marks.as_slice() {
        [decimal] => Some((None, *decimal)),
        [grouping, .., decimal] => Some((Some(*grouping), *decimal)),
        [] => None,
    }
}
