//! In-memory message catalogs keyed by locale.

use std::collections::HashMap;

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::fallback::normalize_tag;
use crate::interpreter::LoadError;

/// Message templates per locale.
///
/// Locale tags are stored normalized, so `en_GB`, `en-GB` and `EN-gb` name
/// the same catalog. Loading into a locale that already has messages merges
/// the new entries over the old ones.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    catalogs: HashMap<String, HashMap<String, String>>,
}

impl MessageStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load messages from a JSON object.
    ///
    /// With a locale, `source` holds that locale's messages; nested objects
    /// inside it are loaded as sections for the locale named by their key.
    /// Without a locale, every entry must be an object of messages keyed by
    /// locale. Keys starting with `@` are metadata and skipped.
    ///
    /// Returns the number of messages loaded.
    ///
    /// # Example
    ///
    /// ```
    /// use lingo::MessageStore;
    /// use serde_json::json;
    ///
    /// let mut store = MessageStore::new();
    /// let count = store
    ///     .load(&json!({"en": {"hello": "Hello"}, "fi": {"hello": "Hei"}}), None)
    ///     .unwrap();
    /// assert_eq!(count, 2);
    /// assert_eq!(store.get("hello", "fi"), Some("Hei"));
    /// ```
    pub fn load(&mut self, source: &Json, locale: Option<&str>) -> Result<usize, LoadError> {
        let Json::Object(entries) = source else {
            return Err(LoadError::InvalidSource {
                message: format!("expected a JSON object, found {}", json_kind(source)),
            });
        };
        match locale {
            Some(locale) => self.load_locale(entries, locale),
            None => {
                let mut count = 0;
                for (locale, messages) in entries {
                    if locale.starts_with('@') {
                        continue;
                    }
                    let Json::Object(messages) = messages else {
                        return Err(LoadError::InvalidSource {
                            message: format!(
                                "messages for locale '{locale}' must be an object, found {}",
                                json_kind(messages)
                            ),
                        });
                    };
                    count += self.load_locale(messages, locale)?;
                }
                Ok(count)
            }
        }
    }

    fn load_locale(&mut self, entries: &Map<String, Json>, locale: &str) -> Result<usize, LoadError> {
        validate_locale(locale)?;
        let tag = normalize_tag(locale);
        let mut count = 0;
        for (key, value) in entries {
            if key.starts_with('@') {
                continue;
            }
            match value {
                Json::String(template) => {
                    self.catalogs
                        .entry(tag.clone())
                        .or_default()
                        .insert(key.clone(), template.clone());
                    count += 1;
                }
                Json::Object(section) => count += self.load_locale(section, key)?,
                other => {
                    return Err(LoadError::InvalidSource {
                        message: format!(
                            "message '{key}' for locale '{locale}' must be a string, found {}",
                            json_kind(other)
                        ),
                    });
                }
            }
        }
        debug!(locale = %tag, count, "loaded messages");
        Ok(count)
    }

    /// The template for `key` in exactly `locale`, without fallback.
    pub fn get(&self, key: &str, locale: &str) -> Option<&str> {
        self.catalogs
            .get(&normalize_tag(locale))
            .and_then(|messages| messages.get(key))
            .map(String::as_str)
    }

    /// Whether `locale` has any messages.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.catalogs.contains_key(&normalize_tag(locale))
    }

    /// Message keys of a locale, sorted.
    pub fn keys(&self, locale: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .catalogs
            .get(&normalize_tag(locale))
            .map(|messages| messages.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Loaded locale tags, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.catalogs.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }
}

/// Locale tags may hold only ASCII letters, digits, `-` and `_`.
fn validate_locale(locale: &str) -> Result<(), LoadError> {
    let valid = !locale.is_empty()
        && locale
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(LoadError::InvalidLocale {
            locale: locale.to_string(),
        })
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
