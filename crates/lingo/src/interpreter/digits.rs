//! Native digit tables.
//!
//! Languages that write numbers with their own digit characters list them
//! here, zero through nine. Counts written with these digits are converted
//! back to Latin before plural selection and `formatnum:...|R`.

use crate::fallback::truncations;

/// Digits zero through nine for a language code.
fn table(lang: &str) -> Option<&'static str> {
    match lang {
        "ar" => Some("٠١٢٣٤٥٦٧٨٩"),
        "fa" => Some("۰۱۲۳۴۵۶۷۸۹"),
        "ml" => Some("൦൧൨൩൪൫൬൭൮൯"),
        "kn" => Some("೦೧೨೩೪೫೬೭೮೯"),
        "lo" => Some("໐໑໒໓໔໕໖໗໘໙"),
        "or" => Some("୦୧୨୩୪୫୬୭୮୯"),
        "km" => Some("០១២៣៤៥៦៧៨៩"),
        "nqo" => Some("߀߁߂߃߄߅߆߇߈߉"),
        "pa" => Some("੦੧੨੩੪੫੬੭੮੯"),
        "gu" => Some("૦૧૨૩૪૫૬૭૮૯"),
        "hi" => Some("०१२३४५६७८९"),
        "my" => Some("၀၁၂၃၄၅၆၇၈၉"),
        "ta" => Some("௦௧௨௩௪௫௬௭௮௯"),
        "te" => Some("౦౧౨౩౪౫౬౭౮౯"),
        "th" => Some("๐๑๒๓๔๕๖๗๘๙"),
        "bo" => Some("༠༡༢༣༤༥༦༧༨༩"),
        _ => None,
    }
}

/// The native digits for a tag, trying progressively shorter prefixes
/// (`ar-eg` falls back to `ar`).
pub fn digit_table(tag: &str) -> Option<&'static str> {
    truncations(tag).find_map(|prefix| table(&prefix.to_ascii_lowercase()))
}

/// Replace native digits with Latin ones. Other characters are kept.
///
/// # Example
///
/// ```
/// use lingo::interpreter::to_latin_digits;
///
/// assert_eq!(to_latin_digits("١٢٣", "ar"), "123");
/// assert_eq!(to_latin_digits("42", "ar"), "42");
/// assert_eq!(to_latin_digits("١٢", "en"), "١٢");
/// ```
pub fn to_latin_digits(text: &str, tag: &str) -> String {
    let Some(digits) = digit_table(tag) else {
        return text.to_string();
    };
    text.chars()
        .map(|c| {
            digits
                .chars()
                .position(|d| d == c)
                .and_then(|index| u32::try_from(index).ok())
                .and_then(|index| char::from_digit(index, 10))
                .unwrap_or(c)
        })
        .collect()
}

/// Replace Latin digits with the language's native ones.
pub fn to_native_digits(text: &str, tag: &str) -> String {
    let Some(digits) = digit_table(tag) else {
        return text.to_string();
    };
    text.chars()
        .map(|c| {
            c.to_digit(10)
                .and_then(|d| usize::try_from(d).ok())
                .and_then(|d| digits.chars().nth(d))
                .unwrap_or(c)
        })
        .collect()
}
