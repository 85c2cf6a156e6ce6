//! CLDR plural category resolution.
//!
//! Different languages distinguish different plural categories: English has
//! "one" and "other", Russian has "one", "few", "many" and "other", Arabic
//! uses all six. Message forms are listed in CLDR order restricted to the
//! categories a language actually has, so selection needs both the category
//! of a number and the position of that category among the language's own.
//!
//! Plural rules are cached per thread per language tag.

use std::cell::RefCell;
use std::str::FromStr;

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules};
use tracing::debug;

/// CLDR category order used for positional plural forms.
const CATEGORY_ORDER: [PluralCategory; 6] = [
    PluralCategory::Zero,
    PluralCategory::One,
    PluralCategory::Two,
    PluralCategory::Few,
    PluralCategory::Many,
    PluralCategory::Other,
];

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by language tag.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Build cardinal rules for a tag, using English rules for tags ICU cannot
/// parse or has no data for.
fn build_rules(lang: &str) -> Option<PluralRules> {
    let loc = Locale::try_from_str(lang).unwrap_or_else(|_| {
        debug!(lang, "unparseable locale for plural rules, using en");
        locale!("en")
    });
    PluralRules::try_new(loc.into(), PluralRuleType::Cardinal.into())
        .or_else(|_| PluralRules::try_new(locale!("en").into(), PluralRuleType::Cardinal.into()))
        .ok()
}

/// Run `f` with the cached rules for `lang`.
fn with_rules<R>(lang: &str, f: impl FnOnce(&PluralRules) -> R) -> Option<R> {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, rules)) = cache.iter().find(|(code, _)| code == lang) {
            return Some(f(rules));
        }
        let rules = build_rules(lang)?;
        let result = f(&rules);
        cache.push((lang.to_string(), rules));
        Some(result)
    })
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Parse a Latin-digit number string into plural operands.
///
/// Returns `None` for anything that is not a plain decimal number.
pub fn operands(number: &str) -> Option<PluralOperands> {
    PluralOperands::from_str(number.trim()).ok()
}

/// Get the CLDR plural category for a number in a given language.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other". Input that
/// is not a number is "other".
///
/// # Examples
///
/// ```
/// use lingo::interpreter::plural_category;
///
/// assert_eq!(plural_category("en", "1"), "one");
/// assert_eq!(plural_category("en", "2"), "other");
/// assert_eq!(plural_category("ru", "2"), "few");
/// assert_eq!(plural_category("ru", "5"), "many");
/// assert_eq!(plural_category("en", "1.0"), "other");
/// ```
pub fn plural_category(lang: &str, number: &str) -> &'static str {
    let Some(operands) = operands(number) else {
        return "other";
    };
    with_rules(lang, |rules| category_str(rules.category_for(operands))).unwrap_or("other")
}

/// Position of a number's category among the categories `lang` uses, in
/// CLDR order. This is the index of the positional form to select.
///
/// Unparseable numbers select the "other" position.
pub fn plural_form_index(lang: &str, number: &str) -> usize {
    with_rules(lang, |rules| {
        let category = operands(number).map_or(PluralCategory::Other, |op| rules.category_for(op));
        let available: Vec<PluralCategory> = rules.categories().collect();
        CATEGORY_ORDER
            .iter()
            .filter(|c| available.contains(*c))
            .position(|c| *c == category)
            .unwrap_or(0)
    })
    .unwrap_or(0)
}
