//! Locale management for message catalogs.
//!
//! The Locale struct is the user-facing API: it selects a language, loads
//! catalogs, finds the best available message along the fallback chain and
//! renders it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bon::Builder;
use serde_json::Value as Json;
use tracing::{debug, warn};

use crate::fallback::{DEFAULT_FINAL_FALLBACK, FallbackResolver, FallbackTable};
use crate::interpreter::{EvalError, Evaluator, Language, LoadError, MessageStore};
use crate::parser::{Node, ParseOptions, parse_message};
use crate::types::Value;

/// Most parsed templates kept by one [`Locale`]. The cache is emptied when
/// it fills up.
pub const TEMPLATE_CACHE_CAPACITY: usize = 1024;

/// User-facing message lookup and rendering.
///
/// A message missing in the current language is looked up along the
/// language's fallback chain; a message missing everywhere renders its key.
///
/// # Example
///
/// ```
/// use lingo::{Locale, Value};
///
/// let mut locale = Locale::builder().language("fi").build();
/// locale
///     .load_str(r#"{"en": {"cars": "{{PLURAL:$1|$1 car|$1 cars}}"}}"#, None)
///     .unwrap();
///
/// // No Finnish catalog: the English message is used.
/// assert_eq!(locale.i18n("cars", &[Value::from(2)]), "2 cars");
/// assert_eq!(locale.i18n("missing-key", &[]), "missing-key");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Locale {
    /// Current language code (e.g., "en", "fi", "pt-BR").
    #[builder(default = DEFAULT_FINAL_FALLBACK.to_string())]
    language: String,

    /// Last entry of every fallback chain.
    #[builder(default = DEFAULT_FINAL_FALLBACK.to_string())]
    final_fallback: String,

    /// Whether messages may contain `[[wiki links]]` and `[external links]`.
    #[builder(default)]
    wikilinks: bool,

    /// Fallback table replacing the built-in one.
    fallback_table: Option<FallbackTable>,

    #[builder(skip)]
    store: MessageStore,

    #[builder(skip)]
    evaluator: Evaluator,

    /// Cache of parsed templates, keyed by source string, holding at most
    /// [`TEMPLATE_CACHE_CAPACITY`] entries.
    ///
    /// Uses `RefCell` for interior mutability so `render` can remain `&self`.
    #[builder(skip)]
    template_cache: RefCell<HashMap<String, Node>>,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::builder().build()
    }
}

impl Locale {
    /// Create a new Locale with default settings (English).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Locale with the specified language.
    pub fn with_language(language: impl Into<String>) -> Self {
        Locale::builder().language(language.into()).build()
    }

    // =========================================================================
    // Language Management
    // =========================================================================

    /// Get the current language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Change the current language. Loaded catalogs are kept.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// The tags tried for the current language, most specific first.
    pub fn fallback_locales(&self) -> Vec<String> {
        let table = self
            .fallback_table
            .as_ref()
            .unwrap_or(FallbackTable::builtin());
        FallbackResolver::new(table, &self.final_fallback).resolve(&self.language)
    }

    /// Locale data for the current language.
    fn current_language(&self) -> Language {
        Language::with_fallbacks(&self.language, self.fallback_locales())
    }

    // =========================================================================
    // Catalog Loading
    // =========================================================================

    /// Load messages from JSON, into the current language when `locale` is
    /// `None`. See [`MessageStore::load`] for the accepted shapes.
    pub fn load(&mut self, source: &Json, locale: Option<&str>) -> Result<usize, LoadError> {
        let locale = locale.unwrap_or(&self.language).to_string();
        self.store.load(source, Some(&locale))
    }

    /// Load messages from a JSON string.
    pub fn load_str(&mut self, json: &str, locale: Option<&str>) -> Result<usize, LoadError> {
        let source: Json =
            serde_json::from_str(json).map_err(|source| LoadError::Json { path: None, source })?;
        self.load(&source, locale)
    }

    /// Load messages from a JSON file.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        locale: Option<&str>,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source: Json = serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: Some(path.to_path_buf()),
            source,
        })?;
        self.load(&source, locale)
    }

    /// Load every `<locale>.json` file in a directory.
    ///
    /// Files are loaded in name order; other files are ignored.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        let io_error = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut count = 0;
        for path in paths {
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                continue;
            };
            count += self.load_file(&path, Some(&locale))?;
        }
        Ok(count)
    }

    /// The loaded catalogs.
    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Register or replace a template operation.
    pub fn register_operation(
        &mut self,
        name: &str,
        operation: impl Fn(&[Value], &[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.evaluator.register_operation(name, operation);
    }

    /// The evaluator used for rendering.
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    // =========================================================================
    // Message Rendering
    // =========================================================================

    /// The template for `key` from the first locale in the fallback chain
    /// that has it.
    pub fn message(&self, key: &str) -> Option<&str> {
        self.fallback_locales().iter().find_map(|tag| {
            let found = self.store.get(key, tag);
            if found.is_none() {
                debug!(key, locale = %tag, "message not found, trying next fallback");
            }
            found
        })
    }

    /// Render the message for `key`. A key with no message anywhere is
    /// rendered as a template itself.
    pub fn format(&self, key: &str, params: &[Value]) -> Result<String, EvalError> {
        self.render(self.message(key).unwrap_or(key), params)
    }

    /// Render the message for `key`, never failing.
    ///
    /// On a parse or evaluation error the raw template is returned and a
    /// warning is logged.
    pub fn i18n(&self, key: &str, params: &[Value]) -> String {
        let template = self.message(key).unwrap_or(key);
        match self.render(template, params) {
            Ok(text) => text,
            Err(error) => {
                warn!(key, %error, "failed to render message, using raw template");
                template.to_string()
            }
        }
    }

    /// Render a template string in the current language.
    ///
    /// Parsed templates are cached so repeated calls skip parsing. The
    /// cache is bounded by [`TEMPLATE_CACHE_CAPACITY`].
    pub fn render(&self, template: &str, params: &[Value]) -> Result<String, EvalError> {
        let ast = self.cached_template(template)?;
        self.evaluator
            .evaluate_in(&ast, params, &self.current_language())
    }

    /// Clear the template cache.
    pub fn clear_template_cache(&self) {
        self.template_cache.borrow_mut().clear();
    }

    /// Return the number of cached template ASTs.
    pub fn template_cache_len(&self) -> usize {
        self.template_cache.borrow().len()
    }

    /// Look up or parse and cache a template string.
    fn cached_template(&self, template: &str) -> Result<Node, EvalError> {
        if let Some(ast) = self.template_cache.borrow().get(template) {
            return Ok(ast.clone());
        }
        let options = ParseOptions {
            wikilinks: self.wikilinks,
        };
        let ast = parse_message(template, options)?;
        let mut cache = self.template_cache.borrow_mut();
        if cache.len() >= TEMPLATE_CACHE_CAPACITY {
            debug!(capacity = TEMPLATE_CACHE_CAPACITY, "template cache full, clearing");
            cache.clear();
        }
        cache.insert(template.to_string(), ast.clone());
        Ok(ast)
    }
}
