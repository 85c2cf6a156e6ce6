//! Locale fallback resolution.
//!
//! A lookup for `fi-Latn-FI` tries `fi-Latn-FI`, `fi-Latn` and `fi`, then
//! whatever the fallback table lists for the requested tag, then a single
//! final fallback (`en` by default). The chain may contain duplicates;
//! callers stop at the first catalog hit.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use std::{fs, iter};

use serde::Deserialize;

use crate::interpreter::LoadError;

/// Locale used when nothing more specific has a message.
pub const DEFAULT_FINAL_FALLBACK: &str = "en";

/// Built-in fallback lists, from MediaWiki language metadata.
const BUILTIN_FALLBACKS: &[(&str, &[&str])] = &[
    ("ab", &["ru"]),
    ("ace", &["id"]),
    ("aln", &["sq"]),
    ("als", &["gsw", "de"]),
    ("an", &["es"]),
    ("anp", &["hi"]),
    ("arn", &["es"]),
    ("arz", &["ar"]),
    ("av", &["ru"]),
    ("ay", &["es"]),
    ("ba", &["ru"]),
    ("bar", &["de"]),
    ("bat-smg", &["sgs", "lt"]),
    ("bcc", &["fa"]),
    ("be-x-old", &["be-tarask"]),
    ("bh", &["bho"]),
    ("bjn", &["id"]),
    ("bm", &["fr"]),
    ("bpy", &["bn"]),
    ("bqi", &["fa"]),
    ("br", &["fr"]),
    ("bug", &["id"]),
    ("cbk-zam", &["es"]),
    ("ce", &["ru"]),
    ("crh", &["crh-latn"]),
    ("crh-cyrl", &["ru"]),
    ("csb", &["pl"]),
    ("cv", &["ru"]),
    ("de-at", &["de"]),
    ("de-ch", &["de"]),
    ("de-formal", &["de"]),
    ("dsb", &["hsb", "de"]),
    ("dtp", &["ms"]),
    ("egl", &["it"]),
    ("eml", &["it"]),
    ("en-ca", &["en"]),
    ("en-gb", &["en"]),
    ("es-formal", &["es"]),
    ("ff", &["fr"]),
    ("fit", &["fi"]),
    ("frc", &["fr"]),
    ("frp", &["fr"]),
    ("frr", &["de"]),
    ("fur", &["it"]),
    ("gag", &["tr"]),
    ("gan", &["gan-hant", "zh-hant", "zh-hans"]),
    ("gl", &["pt"]),
    ("glk", &["fa"]),
    ("gn", &["es"]),
    ("gsw", &["de"]),
    ("hif", &["hif-latn"]),
    ("hsb", &["dsb", "de"]),
    ("ht", &["fr"]),
    ("hu-formal", &["hu"]),
    ("ii", &["zh-cn", "zh-hans"]),
    ("inh", &["ru"]),
    ("iu", &["ike-cans"]),
    ("jut", &["da"]),
    ("jv", &["id"]),
    ("kaa", &["kk-latn", "kk-cyrl"]),
    ("kbd", &["kbd-cyrl"]),
    ("khw", &["ur"]),
    ("kiu", &["tr"]),
    ("kk", &["kk-cyrl"]),
    ("kk-arab", &["kk-cyrl"]),
    ("kk-cn", &["kk-arab", "kk-cyrl"]),
    ("kk-kz", &["kk-cyrl"]),
    ("kk-latn", &["kk-cyrl"]),
    ("kk-tr", &["kk-latn", "kk-cyrl"]),
    ("kl", &["da"]),
    ("koi", &["ru"]),
    ("krc", &["ru"]),
    ("ksh", &["de"]),
    ("ku", &["ku-latn"]),
    ("kv", &["ru"]),
    ("lad", &["es"]),
    ("lb", &["de"]),
    ("lbe", &["ru"]),
    ("lez", &["ru"]),
    ("li", &["nl"]),
    ("lij", &["it"]),
    ("liv", &["et"]),
    ("lmo", &["it"]),
    ("ln", &["fr"]),
    ("ltg", &["lv"]),
    ("lzz", &["tr"]),
    ("mai", &["hi"]),
    ("mdf", &["myv", "ru"]),
    ("mg", &["fr"]),
    ("mhr", &["mrj", "ru"]),
    ("min", &["id"]),
    ("mo", &["ro"]),
    ("mrj", &["mhr", "ru"]),
    ("mwl", &["pt"]),
    ("myv", &["ru"]),
    ("mzn", &["fa"]),
    ("nah", &["es"]),
    ("nap", &["it"]),
    ("nds", &["de"]),
    ("nds-nl", &["nl"]),
    ("nl-informal", &["nl"]),
    ("nrm", &["fr"]),
    ("oc", &["fr"]),
    ("olo", &["fi"]),
    ("os", &["ru"]),
    ("pcd", &["fr"]),
    ("pdc", &["de"]),
    ("pdt", &["de"]),
    ("pfl", &["de"]),
    ("pms", &["it"]),
    ("pt", &["pt-br"]),
    ("pt-br", &["pt"]),
    ("qu", &["es"]),
    ("qug", &["qu", "es"]),
    ("rgn", &["it"]),
    ("rmy", &["ro"]),
    ("roa-tara", &["it"]),
    ("rue", &["uk", "ru"]),
    ("rup", &["ro"]),
    ("ruq", &["ruq-latn", "ro"]),
    ("sa", &["hi"]),
    ("sah", &["ru"]),
    ("scn", &["it"]),
    ("sg", &["fr"]),
    ("sgs", &["lt"]),
    ("sli", &["de"]),
    ("sr", &["sr-ec"]),
    ("srn", &["nl"]),
    ("stq", &["de"]),
    ("su", &["id"]),
    ("szl", &["pl"]),
    ("tcy", &["kn"]),
    ("tg", &["tg-cyrl"]),
    ("tt", &["tt-cyrl", "ru"]),
    ("tt-cyrl", &["ru"]),
    ("ty", &["fr"]),
    ("tyv", &["ru"]),
    ("udm", &["ru"]),
    ("ug", &["ug-arab"]),
    ("uk", &["ru"]),
    ("vec", &["it"]),
    ("vep", &["et"]),
    ("vls", &["nl"]),
    ("vmf", &["de"]),
    ("vot", &["fi"]),
    ("vro", &["et"]),
    ("wa", &["fr"]),
    ("wo", &["fr"]),
    ("wuu", &["zh-hans"]),
    ("xal", &["ru"]),
    ("xmf", &["ka"]),
    ("yi", &["he"]),
    ("yue", &["zh-hk", "zh-hant", "zh-hans"]),
    ("za", &["zh-hans"]),
    ("zea", &["nl"]),
    ("zh", &["zh-hans"]),
    ("zh-classical", &["lzh"]),
    ("zh-cn", &["zh-hans"]),
    ("zh-hant", &["zh-hans"]),
    ("zh-hk", &["zh-hant", "zh-hans"]),
    ("zh-min-nan", &["nan"]),
    ("zh-mo", &["zh-hk", "zh-hant", "zh-hans"]),
    ("zh-my", &["zh-sg", "zh-hans"]),
    ("zh-sg", &["zh-hans"]),
    ("zh-tw", &["zh-hant", "zh-hans"]),
    ("zh-yue", &["yue"]),
];

static BUILTIN: LazyLock<FallbackTable> = LazyLock::new(|| {
    FallbackTable::from_entries(
        BUILTIN_FALLBACKS
            .iter()
            .map(|(tag, fallbacks)| {
                let fallbacks = fallbacks.iter().map(ToString::to_string).collect();
                (ToString::to_string(tag), fallbacks)
            }),
    )
});

/// Normalize a locale tag for lookups: trimmed, lower-case, `_` as `-`.
///
/// # Example
///
/// ```
/// use lingo::normalize_tag;
///
/// assert_eq!(normalize_tag(" pt_BR "), "pt-br");
/// ```
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace('_', "-")
}

/// A tag followed by its progressively truncated prefixes, most specific
/// first. Case is preserved; `_` separates subtags like `-`, and the
/// results always use `-`.
///
/// `fi-Latn-FI` yields `fi-Latn-FI`, `fi-Latn`, `fi`; `fi_FI` yields
/// `fi-FI`, `fi`.
pub fn truncations(tag: &str) -> impl Iterator<Item = String> + '_ {
    let subtags: Vec<&str> = tag
        .trim()
        .split(['-', '_'])
        .filter(|s| !s.is_empty())
        .collect();
    (1..=subtags.len()).rev().map(move |end| subtags[..end].join("-"))
}

/// Mapping from locale tag to its ordered fallback tags.
///
/// Keys are stored normalized, so lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, Vec<String>>")]
pub struct FallbackTable {
    entries: HashMap<String, Vec<String>>,
}

impl From<HashMap<String, Vec<String>>> for FallbackTable {
    fn from(entries: HashMap<String, Vec<String>>) -> Self {
        FallbackTable::from_entries(entries)
    }
}

impl FallbackTable {
    /// An empty table: chains hold only truncations and the final fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table compiled into the crate.
    pub fn builtin() -> &'static FallbackTable {
        &BUILTIN
    }

    /// Build a table from `(tag, fallbacks)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<String>)>) -> Self {
        FallbackTable {
            entries: entries
                .into_iter()
                .map(|(tag, fallbacks)| (normalize_tag(&tag), fallbacks))
                .collect(),
        }
    }

    /// Parse a table from JSON of the form `{"tag": ["fallback", ...]}`.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|source| LoadError::Json { path: None, source })
    }

    /// Read a JSON table from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Fallbacks listed for `tag`, or an empty slice.
    pub fn get(&self, tag: &str) -> &[String] {
        self.entries
            .get(&normalize_tag(tag))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Add or replace the fallbacks for a tag.
    pub fn insert(&mut self, tag: &str, fallbacks: Vec<String>) {
        self.entries.insert(normalize_tag(tag), fallbacks);
    }

    /// Number of tags with fallbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no tag has fallbacks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Produces fallback chains from a table and a final fallback.
///
/// Holds no catalog state; the same resolver serves any number of lookups.
#[derive(Debug, Clone, Copy)]
pub struct FallbackResolver<'a> {
    table: &'a FallbackTable,
    final_fallback: &'a str,
}

impl Default for FallbackResolver<'static> {
    fn default() -> Self {
        FallbackResolver::new(FallbackTable::builtin(), DEFAULT_FINAL_FALLBACK)
    }
}

impl<'a> FallbackResolver<'a> {
    /// Create a resolver over `table`, ending every chain in `final_fallback`.
    pub fn new(table: &'a FallbackTable, final_fallback: &'a str) -> Self {
        FallbackResolver {
            table,
            final_fallback,
        }
    }

    /// The ordered chain of tags to try for `locale`.
    ///
    /// # Example
    ///
    /// ```
    /// use lingo::{FallbackResolver, FallbackTable};
    ///
    /// let table = FallbackTable::new();
    /// let resolver = FallbackResolver::new(&table, "en");
    /// assert_eq!(
    ///     resolver.resolve("fi-Latn-FI"),
    ///     ["fi-Latn-FI", "fi-Latn", "fi", "en"]
    /// );
    /// ```
    pub fn resolve(&self, locale: &str) -> Vec<String> {
        truncations(locale)
            .chain(self.table.get(locale).iter().cloned())
            .chain(iter::once(self.final_fallback.to_string()))
            .collect()
    }

    /// The final fallback tag.
    pub fn final_fallback(&self) -> &str {
        self.final_fallback
    }
}

/// Resolve a chain with the built-in table and `en` as final fallback.
///
/// # Example
///
/// ```
/// use lingo::resolve_fallbacks;
///
/// assert_eq!(resolve_fallbacks("dsb"), ["dsb", "hsb", "de", "en"]);
/// ```
pub fn resolve_fallbacks(locale: &str) -> Vec<String> {
    FallbackResolver::default().resolve(locale)
}
