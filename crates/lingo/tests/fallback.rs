//! Integration tests for locale fallback resolution.

use lingo::{FallbackResolver, FallbackTable, LoadError, normalize_tag, resolve_fallbacks, truncations};

#[test]
fn truncation_chain_without_table_entry() {
    assert_eq!(
        resolve_fallbacks("fi-Latn-FI"),
        ["fi-Latn-FI", "fi-Latn", "fi", "en"]
    );
}

#[test]
fn underscore_separates_subtags() {
    assert_eq!(
        truncations("zh_Hant_TW").collect::<Vec<_>>(),
        ["zh-Hant-TW", "zh-Hant", "zh"]
    );
    assert_eq!(resolve_fallbacks("fi_FI"), ["fi-FI", "fi", "en"]);
}

#[test]
fn table_entries_follow_truncations() {
    assert_eq!(resolve_fallbacks("dsb"), ["dsb", "hsb", "de", "en"]);
    assert_eq!(resolve_fallbacks("pt"), ["pt", "pt-br", "en"]);
}

#[test]
fn duplicates_are_kept() {
    assert_eq!(resolve_fallbacks("de-AT"), ["de-AT", "de", "de", "en"]);
    assert_eq!(resolve_fallbacks("en"), ["en", "en"]);
}

#[test]
fn table_lookup_is_case_insensitive() {
    assert_eq!(resolve_fallbacks("DSB"), ["DSB", "hsb", "de", "en"]);
}

#[test]
fn custom_table_and_final_fallback() {
    let table = FallbackTable::from_entries([("xx".to_string(), vec!["yy".to_string()])]);
    let resolver = FallbackResolver::new(&table, "fr");
    assert_eq!(resolver.resolve("xx-YY"), ["xx-YY", "xx", "fr"]);
    assert_eq!(resolver.resolve("xx"), ["xx", "yy", "fr"]);
    assert_eq!(resolver.final_fallback(), "fr");
}

#[test]
fn table_from_json() {
    let table = FallbackTable::from_json(r#"{"Sh": ["sh-latn", "bs"], "gsw": ["de"]}"#).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("sh"), ["sh-latn", "bs"]);
    assert!(table.get("fi").is_empty());
}

#[test]
fn table_from_invalid_json() {
    let err = FallbackTable::from_json(r#"{"sh": "bs"}"#).unwrap_err();
    assert!(matches!(err, LoadError::Json { path: None, .. }));
}

#[test]
fn table_insert_replaces() {
    let mut table = FallbackTable::new();
    assert!(table.is_empty());
    table.insert("ab", vec!["ru".into()]);
    table.insert("AB", vec!["uk".into()]);
    assert_eq!(table.get("ab"), ["uk"]);
}

#[test]
fn builtin_table_is_populated() {
    assert!(FallbackTable::builtin().len() > 100);
    assert_eq!(FallbackTable::builtin().get("zh-hk"), ["zh-hant", "zh-hans"]);
}

#[test]
fn tag_helpers() {
    assert_eq!(normalize_tag(" zh_Hant_TW "), "zh-hant-tw");
    assert_eq!(
        truncations("zh-Hant-TW").collect::<Vec<_>>(),
        ["zh-Hant-TW", "zh-Hant", "zh"]
    );
    assert_eq!(truncations("").count(), 0);
}
