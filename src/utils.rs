//! Text formatting helpers shared by the report generators.

use std::path::Path;

use crate::labels::translate;
use crate::metrics::FrequencyTable;

/// Format a proportion as a percentage with one decimal, e.g. `0.705` → `70.5%`.
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Capitalize the first character and lower-case the rest (`social_media_usage` → `Social_media_usage`).
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Markdown image link with a forward-slash relative path.
pub fn markdown_image(alt: &str, path: &Path) -> String {
    let target = path
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("![{alt}]({target})")
}

/// Fixed-width listing of a frequency table for fenced report blocks.
///
/// Raw labels are shown beside their display label when the two differ.
pub fn frequency_listing(table: &FrequencyTable) -> String {
    let rows: Vec<(String, String)> = table
        .entries()
        .iter()
        .map(|entry| {
            let display = translate(&entry.label);
            let label = if display == entry.label {
                entry.label.clone()
            } else {
                format!("{} ({display})", entry.label)
            };
            (label, format!("{:.6}", entry.proportion))
        })
        .collect();
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (label, value) in rows {
        let pad = width - label.chars().count();
        out.push_str(&label);
        out.push_str(&" ".repeat(pad + 4));
        out.push_str(&value);
        out.push('\n');
    }
    out.push_str(&format!("total responses: {}", table.total()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn percent_uses_one_decimal() {
        assert_eq!(percent(0.7), "70.0%");
        assert_eq!(percent(0.12345), "12.3%");
    }

    #[test]
    fn capitalize_matches_heading_style() {
        assert_eq!(capitalize("awareness"), "Awareness");
        assert_eq!(capitalize("social_media_usage"), "Social_media_usage");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn markdown_image_uses_forward_slashes() {
        let path: PathBuf = ["plots", "sense_awareness.svg"].iter().collect();
        assert_eq!(
            markdown_image("sense_awareness", &path),
            "![sense_awareness](plots/sense_awareness.svg)"
        );
    }

    #[test]
    fn listing_shows_translation_and_total() {
        let table = FrequencyTable::single_select(["是", "否", "是"]);
        let listing = frequency_listing(&table);
        assert!(listing.starts_with("是 (Yes)"));
        assert!(listing.contains("0.666667"));
        assert!(listing.ends_with("total responses: 3"));
    }
}
