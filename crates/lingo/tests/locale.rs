//! Integration tests for Locale management.

use std::fs;
use std::io::Write;

use lingo::interpreter::TEMPLATE_CACHE_CAPACITY;
use lingo::{EvalError, FallbackTable, LoadError, Locale, MessageStore, Value, params};
use serde_json::json;
use tempfile::{NamedTempFile, TempDir};

// =========================================================================
// Builder and Basic API
// =========================================================================

#[test]
fn locale_default_is_english() {
    let locale = Locale::new();
    assert_eq!(locale.language(), "en");
    assert_eq!(locale.fallback_locales(), ["en", "en"]);
}

#[test]
fn locale_builder_sets_language() {
    let locale = Locale::builder().language("ru").build();
    assert_eq!(locale.language(), "ru");
}

#[test]
fn locale_with_language_shorthand() {
    let locale = Locale::with_language("de");
    assert_eq!(locale.language(), "de");
}

#[test]
fn locale_set_language_changes_current() {
    let mut locale = Locale::new();
    locale.set_language("fi");
    assert_eq!(locale.language(), "fi");
    assert_eq!(locale.fallback_locales(), ["fi", "en"]);
}

#[test]
fn locale_custom_fallbacks() {
    let table = FallbackTable::from_entries([("se".to_string(), vec!["nb".to_string()])]);
    let locale = Locale::builder()
        .language("se")
        .final_fallback("fi")
        .fallback_table(table)
        .build();
    assert_eq!(locale.fallback_locales(), ["se", "nb", "fi"]);
}

// =========================================================================
// Loading from strings and values
// =========================================================================

#[test]
fn load_into_current_language() {
    let mut locale = Locale::with_language("fi");
    let count = locale.load(&json!({"hello": "Hei"}), None).unwrap();
    assert_eq!(count, 1);
    assert_eq!(locale.message("hello"), Some("Hei"));
}

#[test]
fn load_str_with_locale_sections() {
    let mut locale = Locale::new();
    let count = locale
        .load_str(
            r#"{"en": {"hello": "Hello"}, "fi": {"hello": "Hei", "@metadata": {"authors": []}}}"#,
            None,
        )
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(locale.store().locales(), ["en", "fi"]);
}

#[test]
fn load_skips_metadata_keys() {
    let mut locale = Locale::new();
    let count = locale
        .load(&json!({"@metadata": {"authors": ["x"]}, "a": "A"}), Some("en"))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(locale.store().keys("en"), ["a"]);
}

#[test]
fn load_merges_entries() {
    let mut locale = Locale::new();
    locale.load(&json!({"a": "1", "b": "2"}), Some("en")).unwrap();
    locale.load(&json!({"b": "two", "c": "3"}), Some("en")).unwrap();
    assert_eq!(locale.store().keys("en"), ["a", "b", "c"]);
    assert_eq!(locale.message("b"), Some("two"));
}

#[test]
fn load_rejects_non_objects() {
    let mut locale = Locale::new();
    let err = locale.load(&json!(["a"]), None).unwrap_err();
    assert!(matches!(err, LoadError::InvalidSource { .. }));

    let err = locale.load(&json!({"a": 1}), Some("en")).unwrap_err();
    assert!(matches!(err, LoadError::InvalidSource { .. }));
}

#[test]
fn load_rejects_invalid_locale() {
    let mut locale = Locale::new();
    let err = locale.load(&json!({"a": "b"}), Some("en/../x")).unwrap_err();
    assert!(matches!(err, LoadError::InvalidLocale { ref locale } if locale == "en/../x"));
}

#[test]
fn load_str_invalid_json() {
    let mut locale = Locale::new();
    let err = locale.load_str("{not json", None).unwrap_err();
    assert!(matches!(err, LoadError::Json { path: None, .. }));
}

#[test]
fn store_normalizes_locale_tags() {
    let mut store = MessageStore::new();
    store.load(&json!({"a": "A"}), Some("pt_BR")).unwrap();
    assert!(store.has_locale("pt-br"));
    assert_eq!(store.get("a", "PT-br"), Some("A"));
}

// =========================================================================
// Message lookup and rendering
// =========================================================================

#[test]
fn message_falls_back_along_chain() {
    let mut locale = Locale::with_language("dsb");
    locale
        .load(
            &json!({
                "de": {"only-de": "Nur Deutsch"},
                "hsb": {"greeting": "Witaj"},
                "en": {"greeting": "Hello", "only-en": "English"}
            }),
            None,
        )
        .unwrap();
    assert_eq!(locale.message("greeting"), Some("Witaj"));
    assert_eq!(locale.message("only-de"), Some("Nur Deutsch"));
    assert_eq!(locale.message("only-en"), Some("English"));
    assert_eq!(locale.message("nowhere"), None);
}

#[test]
fn underscore_locale_falls_back_to_language() {
    let mut locale = Locale::builder().language("fi_FI").build();
    locale
        .load(&json!({"fi": {"k": "Hei"}, "en": {"k": "Hello"}}), None)
        .unwrap();
    assert_eq!(locale.fallback_locales(), ["fi-FI", "fi", "en"]);
    assert_eq!(locale.i18n("k", &[]), "Hei");
}

#[test]
fn format_renders_message() {
    let mut locale = Locale::with_language("ru");
    locale
        .load(
            &json!({"files": "$1 {{PLURAL:$1|файл|файла|файлов}}"}),
            None,
        )
        .unwrap();
    assert_eq!(locale.format("files", &params![2]).unwrap(), "2 файла");
}

#[test]
fn missing_key_renders_key() {
    let locale = Locale::new();
    assert_eq!(locale.i18n("no-such-key", &[]), "no-such-key");
    assert_eq!(locale.format("Hello $1", &params!["you"]).unwrap(), "Hello you");
}

#[test]
fn i18n_returns_raw_template_on_error() {
    let mut locale = Locale::new();
    locale
        .load(&json!({"broken": "{{NOPE:$1}}", "bad": "x {{"}), None)
        .unwrap();
    assert_eq!(locale.i18n("broken", &params![1]), "{{NOPE:$1}}");
    assert_eq!(locale.i18n("bad", &[]), "x {{");
    assert!(matches!(
        locale.format("broken", &params![1]),
        Err(EvalError::UnknownOperation { .. })
    ));
}

#[test]
fn render_caches_templates() {
    let locale = Locale::new();
    assert_eq!(locale.template_cache_len(), 0);
    locale.render("Hi $1", &params!["a"]).unwrap();
    locale.render("Hi $1", &params!["b"]).unwrap();
    assert_eq!(locale.template_cache_len(), 1);
    locale.clear_template_cache();
    assert_eq!(locale.template_cache_len(), 0);
}

#[test]
fn template_cache_is_bounded() {
    let locale = Locale::new();
    for i in 0..TEMPLATE_CACHE_CAPACITY + 10 {
        assert_eq!(locale.render(&format!("t{i}"), &[]).unwrap(), format!("t{i}"));
    }
    assert!(locale.template_cache_len() <= TEMPLATE_CACHE_CAPACITY);
    assert!(locale.template_cache_len() > 0);
}

#[test]
fn wikilinks_are_opt_in() {
    let plain = Locale::new();
    assert_eq!(plain.render("[[Page]]", &[]).unwrap(), "[[Page]]");

    let links = Locale::builder().wikilinks(true).build();
    assert_eq!(
        links.render("[[Page]]", &[]).unwrap(),
        r#"<a href="./Page" title="Page">Page</a>"#
    );
}

#[test]
fn registered_operation_is_used() {
    let mut locale = Locale::new();
    locale.register_operation("SITENAME", |_, _| Value::from("Lingo"));
    locale
        .load(&json!({"welcome": "Welcome to {{SITENAME}}"}), None)
        .unwrap();
    assert_eq!(locale.i18n("welcome", &[]), "Welcome to Lingo");
    assert!(locale.evaluator().operations().contains("sitename"));
}

#[test]
fn number_formatting_uses_current_language() {
    let locale = Locale::with_language("de");
    assert_eq!(
        locale.render("{{FORMATNUM:$1}}", &params![1_000_000]).unwrap(),
        "1.000.000"
    );
}

// =========================================================================
// Loading from disk
// =========================================================================

#[test]
fn load_file_with_locale() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"hello": "Hallo $1"}}"#).unwrap();

    let mut locale = Locale::with_language("de");
    let count = locale.load_file(file.path(), Some("de")).unwrap();
    assert_eq!(count, 1);
    assert_eq!(locale.i18n("hello", &params!["Welt"]), "Hallo Welt");
}

#[test]
fn load_file_missing() {
    let mut locale = Locale::new();
    let err = locale
        .load_file("/nonexistent/messages.json", None)
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn load_file_invalid_json_reports_path() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[1, 2").unwrap();

    let mut locale = Locale::new();
    let err = locale.load_file(file.path(), Some("en")).unwrap_err();
    match err {
        LoadError::Json { path, .. } => assert_eq!(path.as_deref(), Some(file.path())),
        other => panic!("expected Json error, got {other:?}"),
    }
}

#[test]
fn load_dir_reads_one_file_per_locale() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"cars": "{{PLURAL:$1|car|cars}}"}"#).unwrap();
    fs::write(dir.path().join("fi.json"), r#"{"cars": "{{PLURAL:$1|auto|autoa}}"}"#).unwrap();
    fs::write(dir.path().join("README.md"), "not a catalog").unwrap();

    let mut locale = Locale::with_language("fi");
    assert_eq!(locale.load_dir(dir.path()).unwrap(), 2);
    assert_eq!(locale.store().locales(), ["en", "fi"]);
    assert_eq!(locale.i18n("cars", &params![3]), "autoa");

    locale.set_language("en");
    assert_eq!(locale.i18n("cars", &params![1]), "car");
}
