//! Tests for the locale-sensitive engine: grammar rules, plural categories,
//! digit tables, number formatting and bidi isolation.

use lingo::interpreter::{
    bidi_isolate, convert_grammar, digit_table, format_number, grammar_rule,
    parse_formatted_number, plural_category, plural_form_index, to_latin_digits, to_native_digits,
};
use lingo::{Language, Value};

// =============================================================================
// Grammar rules
// =============================================================================

#[test]
fn finnish_vowel_harmony() {
    assert_eq!(convert_grammar("fi", "talo", "elative"), "talosta");
    assert_eq!(convert_grammar("fi", "talo", "inessive"), "talossa");
    assert_eq!(convert_grammar("fi", "Yle", "elative"), "Ylestä");
    assert_eq!(convert_grammar("fi", "Yle", "partitive"), "Yleä");
    assert_eq!(convert_grammar("fi", "Wikipedia", "genitive"), "Wikipedian");
    assert_eq!(convert_grammar("fi", "Wikipedia", "elative"), "Wikipediasta");
}

#[test]
fn finnish_wiki_suffix_forces_front_vowels() {
    assert_eq!(convert_grammar("fi", "Lingowiki", "elative"), "Lingowikistä");
}

#[test]
fn finnish_consonant_final_words_get_i() {
    assert_eq!(convert_grammar("fi", "Linux", "genitive"), "Linuxin");
    assert_eq!(convert_grammar("fi", "Linux", "elative"), "Linuxista");
}

#[test]
fn finnish_illative_doubles_last_letter() {
    assert_eq!(convert_grammar("fi", "talo", "illative"), "taloon");
    assert_eq!(convert_grammar("fi", "Yle", "illative"), "Yleen");
}

#[test]
fn russian_and_ukrainian_genitive() {
    assert_eq!(convert_grammar("ru", "Википедия", "genitive"), "Википедии");
    assert_eq!(convert_grammar("ru", "Викисловарь", "genitive"), "Викисловаря");
    assert_eq!(convert_grammar("uk", "Вікіпедія", "genitive"), "Вікіпедії");
    assert_eq!(convert_grammar("uk", "Вікіпедія", "accusative"), "Вікіпедію");
}

#[test]
fn latin_declensions() {
    assert_eq!(convert_grammar("la", "Vicipaedia", "genitive"), "Vicipaediae");
    assert_eq!(convert_grammar("la", "Vicipaedia", "accusative"), "Vicipaediam");
    assert_eq!(convert_grammar("la", "Vicilibri", "genitive"), "Vicilibrorum");
    assert_eq!(convert_grammar("la", "Vicinuntii", "ablative"), "Vicinuntiis");
}

#[test]
fn prefix_languages() {
    assert_eq!(convert_grammar("bs", "Wikipedia", "instrumental"), "s Wikipedia");
    assert_eq!(convert_grammar("hsb", "Wikipedija", "lokatiw"), "wo Wikipedija");
    assert_eq!(convert_grammar("dsb", "Wikipedija", "instrumental"), "z Wikipedija");
    assert_eq!(convert_grammar("sl", "Wikipedija", "mestnik"), "o Wikipedija");
}

#[test]
fn armenian_genitive() {
    assert_eq!(convert_grammar("hy", "Վիքիպեդիա", "genitive"), "Վիքիպեդիայի");
}

#[test]
fn irish_weekdays() {
    assert_eq!(convert_grammar("ga", "an Domhnach", "ainmlae"), "Dé Domhnaigh");
    assert_eq!(convert_grammar("ga", "an Aoine", "ainmlae"), "Dé hAoine");
    assert_eq!(convert_grammar("ga", "Vicipéid", "ainmlae"), "Vicipéid");
}

#[test]
fn hebrew_prefixed_form() {
    assert_eq!(convert_grammar("he", "ויקיפדיה", "prefixed"), "וויקיפדיה");
    assert_eq!(convert_grammar("he", "הספר", "prefixed"), "ספר");
    assert_eq!(convert_grammar("he", "Wikipedia", "תחילית"), "־Wikipedia");
}

#[test]
fn ossetian_cases() {
    assert_eq!(convert_grammar("os", "Википеди", "genitive"), "Википедийы");
    assert_eq!(convert_grammar("os", "Википеди", "dative"), "Википедийæн");
    assert_eq!(convert_grammar("os", "Wikipedia", "genitive"), "Wikipedia-ы");
}

#[test]
fn unknown_form_returns_word() {
    assert_eq!(convert_grammar("fi", "talo", "vocative"), "talo");
    assert_eq!(convert_grammar("ru", "Википедия", "Genitive"), "Википедия");
}

#[test]
fn grammar_rule_lookup_uses_prefixes() {
    assert!(grammar_rule("fi").is_some());
    assert!(grammar_rule("fi-FI").is_some());
    assert!(grammar_rule("RU").is_some());
    assert!(grammar_rule("en").is_none());
    assert_eq!(convert_grammar("fi-FI", "talo", "elative"), "talosta");
}

#[test]
fn grammar_is_deterministic() {
    let first = convert_grammar("os", "Википеди", "ablative");
    for _ in 0..10 {
        assert_eq!(convert_grammar("os", "Википеди", "ablative"), first);
    }
}

// =============================================================================
// Plural categories
// =============================================================================

#[test]
fn plural_categories() {
    assert_eq!(plural_category("en", "1"), "one");
    assert_eq!(plural_category("en", "0"), "other");
    assert_eq!(plural_category("ru", "22"), "few");
    assert_eq!(plural_category("ar", "0"), "zero");
    assert_eq!(plural_category("ja", "1"), "other");
    assert_eq!(plural_category("en", "abc"), "other");
}

#[test]
fn plural_form_index_follows_language_categories() {
    // Russian forms are one, few, many (other last).
    assert_eq!(plural_form_index("ru", "1"), 0);
    assert_eq!(plural_form_index("ru", "2"), 1);
    assert_eq!(plural_form_index("ru", "5"), 2);
    // Japanese has only "other".
    assert_eq!(plural_form_index("ja", "1"), 0);
}

#[test]
fn unparseable_tag_uses_english_rules() {
    assert_eq!(plural_category("not a tag!", "1"), "one");
}

// =============================================================================
// Digits and numbers
// =============================================================================

#[test]
fn digit_tables() {
    assert_eq!(digit_table("fa").and_then(|d| d.chars().next()), Some('\u{6F0}'));
    assert_eq!(digit_table("ar-EG"), digit_table("ar"));
    assert_eq!(digit_table("en"), None);
}

#[test]
fn digit_conversion() {
    assert_eq!(to_latin_digits("\u{6F1}\u{6F2}\u{6F3}", "fa"), "123");
    assert_eq!(to_native_digits("123", "hi"), "\u{967}\u{968}\u{969}");
    assert_eq!(to_native_digits("1.5", "th"), "\u{E51}.\u{E55}");
    assert_eq!(to_native_digits("123", "en"), "123");
}

#[test]
fn number_formatting() {
    let en = ["en".to_string()];
    assert_eq!(format_number("1234567", &en).as_deref(), Some("1,234,567"));
    assert_eq!(format_number("-42.5", &en).as_deref(), Some("-42.5"));
    assert_eq!(format_number("12abc", &en), None);
}

#[test]
fn number_formatting_falls_through_candidates() {
    let candidates = ["!!".to_string(), "de".to_string()];
    assert_eq!(format_number("1000", &candidates).as_deref(), Some("1.000"));
}

#[test]
fn number_parsing() {
    assert_eq!(parse_formatted_number("1,234.5", "en"), Some(1234.5));
    assert_eq!(parse_formatted_number("\u{6F1}\u{6F2}\u{6F3}", "fa"), Some(123.0));
    assert_eq!(parse_formatted_number("", "en"), None);
    assert_eq!(parse_formatted_number("inf", "en"), None);
}

#[test]
fn number_parsing_follows_locale_separators() {
    assert_eq!(parse_formatted_number("1.234,5", "de"), Some(1234.5));
    assert_eq!(parse_formatted_number("1,5", "de"), Some(1.5));
    assert_eq!(parse_formatted_number("1\u{202F}234,5", "fr"), Some(1234.5));
    assert_eq!(parse_formatted_number("1,234.5", "en-GB"), Some(1234.5));
}

#[test]
fn language_number_round_trip() {
    let language = Language::new("en");
    assert_eq!(
        language.format_number(&Value::from(9876)),
        Value::from("9,876")
    );
    assert_eq!(
        language.parse_number(&Value::from("9,876")),
        Value::Number(9876)
    );
    assert_eq!(language.parse_number(&Value::from("0.5")), Value::Float(0.5));
}

// =============================================================================
// Language
// =============================================================================

#[test]
fn language_normalizes_tag_and_resolves_fallbacks() {
    let language = Language::new("DSB");
    assert_eq!(language.tag(), "dsb");
    assert_eq!(language.fallbacks(), ["dsb", "hsb", "de", "en"]);
}

#[test]
fn language_convert_plural_with_explicit_forms() {
    let language = Language::new("en");
    let forms: Vec<String> = ["5=five", "one", "other"]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(language.convert_plural(&Value::from(5), &forms), "five");
    assert_eq!(language.convert_plural(&Value::from(1), &forms), "one");
    assert_eq!(language.convert_plural(&Value::from(6), &forms), "other");
    assert_eq!(language.convert_plural(&Value::from(5), &[]), "");
}

// =============================================================================
// Bidi
// =============================================================================

#[test]
fn bidi_isolation() {
    assert_eq!(bidi_isolate("Hello"), "\u{2066}Hello\u{2069}");
    assert_eq!(bidi_isolate("123 مرحبا"), "\u{2067}123 مرحبا\u{2069}");
    assert_eq!(bidi_isolate("..."), "...");
    assert_eq!(bidi_isolate(""), "");
}
