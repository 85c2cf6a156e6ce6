//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single language.
pub struct LanguageCoverage {
    /// Language code (e.g., "fi", "pt-br").
    pub language: String,
    /// Number of source keys with a message in this language.
    pub translated: usize,
    /// Source keys missing from this language.
    pub missing: Vec<String>,
}

impl LanguageCoverage {
    /// Translated share in percent, 100 for an empty source.
    #[expect(clippy::cast_precision_loss)]
    pub fn percent(&self, source_count: usize) -> f64 {
        if source_count == 0 {
            100.0
        } else {
            self.translated as f64 * 100.0 / source_count as f64
        }
    }
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LanguageCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Percent", "Missing"]);

    for lang in coverage {
        table.add_row(vec![
            lang.language.clone(),
            format!("{}/{}", lang.translated, source_count),
            format!("{:.1}%", lang.percent(source_count)),
            lang.missing.len().to_string(),
        ]);
    }

    table
}

/// Format a fallback chain as a numbered table.
pub fn format_fallback_table(chain: &[String]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Locale"]);
    for (index, tag) in chain.iter().enumerate() {
        table.add_row(vec![index.to_string(), tag.clone()]);
    }
    table
}
