use indexmap::IndexMap;
use serde::Serialize;

use crate::labels::translate_all;
use crate::types::CategoryLabel;

/// Count and share of one answer label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrequencyEntry {
    /// Raw category label.
    pub label: CategoryLabel,
    /// Number of occurrences.
    pub count: usize,
    /// Share of the table total.
    pub proportion: f64,
}

/// Answer counts ordered by count descending, ties by first appearance.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    total: usize,
}

impl FrequencyTable {
    /// Count one label per response.
    pub fn single_select<'a, I>(responses: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_labels(responses)
    }

    /// Split each response on `delimiter` and count every segment.
    ///
    /// Segments are trimmed; empty segments and any segment equal to `skip`
    /// are dropped. Proportions are relative to the flattened segment count.
    pub fn multi_select<'a, I>(responses: I, delimiter: char, skip: Option<&str>) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_labels(
            responses
                .into_iter()
                .flat_map(|response| response.split(delimiter))
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .filter(|segment| skip != Some(*segment)),
        )
    }

    fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for label in labels {
            *counts.entry(label).or_default() += 1;
        }
        let total: usize = counts.values().sum();
        let mut entries: Vec<FrequencyEntry> = counts
            .into_iter()
            .map(|(label, count)| FrequencyEntry {
                label: label.to_string(),
                count,
                proportion: count as f64 / total as f64,
            })
            .collect();
        // stable: equal counts keep first-appearance order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries, total }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Number of counted labels (responses or segments).
    pub fn total(&self) -> usize {
        self.total
    }

    /// True when nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entry for `label`, if it occurred.
    pub fn get(&self, label: &str) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// Proportion of `label`, zero when it never occurred.
    pub fn proportion(&self, label: &str) -> f64 {
        self.get(label).map_or(0.0, |entry| entry.proportion)
    }

    /// Summed proportion of several labels.
    pub fn sum_of(&self, labels: &[&str]) -> f64 {
        labels.iter().map(|label| self.proportion(label)).sum()
    }

    /// First `n` entries.
    pub fn top(&self, n: usize) -> &[FrequencyEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Most frequent entry.
    pub fn mode(&self) -> Option<&FrequencyEntry> {
        self.entries.first()
    }
}

/// Counts of one categorical column against another.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CrossTab {
    /// Row categories in display order.
    pub row_labels: Vec<CategoryLabel>,
    /// Column categories in display order.
    pub col_labels: Vec<CategoryLabel>,
    /// `counts[row][col]`.
    pub counts: Vec<Vec<usize>>,
}

impl CrossTab {
    /// Tabulate `(row, col)` pairs; labels keep first-appearance order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut rows: IndexMap<&str, IndexMap<&str, usize>> = IndexMap::new();
        let mut cols: IndexMap<&str, ()> = IndexMap::new();
        for (row, col) in pairs {
            *rows.entry(row).or_default().entry(col).or_default() += 1;
            cols.insert(col, ());
        }
        let col_labels: Vec<CategoryLabel> = cols.keys().map(|c| c.to_string()).collect();
        let counts = rows
            .values()
            .map(|row| {
                cols.keys()
                    .map(|col| row.get(col).copied().unwrap_or(0))
                    .collect()
            })
            .collect();
        Self {
            row_labels: rows.keys().map(|r| r.to_string()).collect(),
            col_labels,
            counts,
        }
    }

    /// Reorder rows so labels in `order` come first, in that order.
    pub fn with_row_order(mut self, order: &[&str]) -> Self {
        let rank = |label: &str| order.iter().position(|o| *o == label).unwrap_or(order.len());
        let mut indices: Vec<usize> = (0..self.row_labels.len()).collect();
        indices.sort_by_key(|&idx| rank(&self.row_labels[idx]));
        self.row_labels = indices.iter().map(|&i| self.row_labels[i].clone()).collect();
        self.counts = indices.iter().map(|&i| self.counts[i].clone()).collect();
        self
    }

    /// Reorder columns so labels in `order` come first, in that order.
    pub fn with_col_order(mut self, order: &[&str]) -> Self {
        let rank = |label: &str| order.iter().position(|o| *o == label).unwrap_or(order.len());
        let mut indices: Vec<usize> = (0..self.col_labels.len()).collect();
        indices.sort_by_key(|&idx| rank(&self.col_labels[idx]));
        self.col_labels = indices.iter().map(|&i| self.col_labels[i].clone()).collect();
        self.counts = self
            .counts
            .iter()
            .map(|row| indices.iter().map(|&i| row[i]).collect())
            .collect();
        self
    }

    /// Copy with both label axes passed through the display translation.
    pub fn translated(&self) -> Self {
        Self {
            row_labels: translate_all(self.row_labels.iter().map(String::as_str)),
            col_labels: translate_all(self.col_labels.iter().map(String::as_str)),
            counts: self.counts.clone(),
        }
    }

    /// True when either axis has no labels.
    pub fn is_empty(&self) -> bool {
        self.row_labels.is_empty() || self.col_labels.is_empty()
    }

    /// Total count of one row.
    pub fn row_total(&self, row: usize) -> usize {
        self.counts.get(row).map_or(0, |cells| cells.iter().sum())
    }

    /// Counts as `f64`, each row divided by its total (zero rows stay zero).
    pub fn row_normalized(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let total: usize = row.iter().sum();
                row.iter()
                    .map(|&count| {
                        if total == 0 {
                            0.0
                        } else {
                            count as f64 / total as f64
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Counts as `f64` without normalization.
    pub fn as_f64(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| row.iter().map(|&count| count as f64).collect())
            .collect()
    }

    /// Row-normalized share of `col` within `row`, if both exist.
    pub fn share(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|label| label == row)?;
        let c = self.col_labels.iter().position(|label| label == col)?;
        Some(self.row_normalized()[r][c])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_select_orders_by_count_then_first_appearance() {
        let table = FrequencyTable::single_select(["b", "a", "a", "c", "b", "d"]);
        let labels: Vec<_> = table.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a", "c", "d"]);
        assert_eq!(table.total(), 6);
        let sum: f64 = table.entries().iter().map(|e| e.proportion).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_segment_multi_select_matches_single_select() {
        let responses = ["微博", "小红书", "微博", "抖音"];
        let single = FrequencyTable::single_select(responses);
        let multi = FrequencyTable::multi_select(responses, '┋', None);
        assert_eq!(single, multi);
    }

    #[test]
    fn multi_select_flattens_and_skips_marker() {
        let table = FrequencyTable::multi_select(
            ["价格过高┋推广较少", "(跳过)", "价格过高"],
            '┋',
            Some("(跳过)"),
        );
        assert_eq!(table.total(), 3);
        assert_eq!(table.get("价格过高").unwrap().count, 2);
        assert!(table.get("(跳过)").is_none());
        assert!((table.proportion("推广较少") - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = FrequencyTable::single_select(std::iter::empty());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.proportion("x"), 0.0);
        assert!(table.mode().is_none());
    }

    #[test]
    fn crosstab_normalizes_rows() {
        let tab = CrossTab::from_pairs([("男", "是"), ("男", "否"), ("女", "是"), ("男", "是")]);
        assert_eq!(tab.row_labels, vec!["男", "女"]);
        assert_eq!(tab.col_labels, vec!["是", "否"]);
        assert_eq!(tab.counts, vec![vec![2, 1], vec![1, 0]]);
        let share = tab.share("男", "是").unwrap();
        assert!((share - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(tab.share("女", "否"), Some(0.0));
    }

    #[test]
    fn crosstab_reorders_rows_and_columns() {
        let tab = CrossTab::from_pairs([("46+", "否"), ("18-25", "是"), ("26-35", "否")])
            .with_row_order(&["18-25", "26-35", "46+"])
            .with_col_order(&["是", "否"]);
        assert_eq!(tab.row_labels, vec!["18-25", "26-35", "46+"]);
        assert_eq!(tab.col_labels, vec!["是", "否"]);
        assert_eq!(tab.counts, vec![vec![1, 0], vec![0, 1], vec![0, 1]]);
    }
}
