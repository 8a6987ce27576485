//! Survey sources and the in-memory response table.
//!
//! Ownership model:
//! - `SurveySource` is the pipeline-facing interface that yields a table.
//! - `SurveyTable` owns every cell for the duration of one run; analyzers
//!   borrow columns from it and never mutate it.
//! - Column names are cleaned once, right after loading.

use crate::errors::SurveyError;
use crate::types::{ColumnName, EncodingName};

/// Column-name cleanup helpers.
pub mod columns;
/// Encoding-fallback CSV loader.
pub mod loader;

pub use columns::clean_column_name;
pub use loader::{CsvFileSource, SourceEncoding, load_survey};

/// Pipeline-facing survey source.
///
/// Implementations read the whole dataset at once; there is no paging.
pub trait SurveySource {
    /// Human-readable identifier used in logs (typically the file path).
    fn id(&self) -> &str;
    /// Load the full response table with cleaned column names.
    fn load(&self) -> Result<SurveyTable, SurveyError>;
}

/// One row per respondent, one column per survey question.
///
/// Cells are `None` when the respondent left the question blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurveyTable {
    columns: Vec<ColumnName>,
    rows: Vec<Vec<Option<String>>>,
    encoding: Option<EncodingName>,
}

impl SurveyTable {
    /// Build a table from a header and raw rows.
    ///
    /// Rows shorter than the header are padded with missing cells; extra
    /// trailing cells are dropped. Empty strings become missing.
    pub fn new<S>(columns: Vec<ColumnName>, rows: Vec<Vec<S>>) -> Self
    where
        S: AsRef<str>,
    {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<Option<String>> = row
                    .iter()
                    .take(width)
                    .map(|cell| normalize_cell(cell.as_ref()))
                    .collect();
                cells.resize(width, None);
                cells
            })
            .collect();
        Self {
            columns,
            rows,
            encoding: None,
        }
    }

    /// Record the encoding the table was decoded with.
    pub fn with_encoding(mut self, encoding: EncodingName) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Encoding that decoded the source file, when loaded from disk.
    pub fn encoding(&self) -> Option<EncodingName> {
        self.encoding
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no respondents.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when a column with exactly this (cleaned) name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of the first column named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Cells of column `name` in row order, or `None` when the column is absent.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = Option<&str>> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_deref()))
    }

    /// Non-missing cells of column `name`.
    pub fn present_values(&self, name: &str) -> Option<Vec<&str>> {
        self.column(name).map(|cells| cells.flatten().collect())
    }

    /// Cell at (`row`, `column`), `None` when missing or out of range.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    /// Apply `clean_column_name` to every header in place.
    pub fn clean_columns(&mut self) {
        for column in &mut self.columns {
            *column = clean_column_name(column);
        }
    }

    /// Consuming variant of [`SurveyTable::clean_columns`].
    pub fn cleaned(mut self) -> Self {
        self.clean_columns();
        self
    }
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Source backed by an already-built table (tests and embedding callers).
pub struct InMemorySource {
    id: String,
    table: SurveyTable,
}

impl InMemorySource {
    /// Create an in-memory source; columns are cleaned on every load.
    pub fn new(id: impl Into<String>, table: SurveyTable) -> Self {
        Self {
            id: id.into(),
            table,
        }
    }
}

impl SurveySource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<SurveyTable, SurveyError> {
        Ok(self.table.clone().cleaned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SurveyTable {
        SurveyTable::new(
            vec!["1、您的性别".to_string(), "2、您的年龄：".to_string()],
            vec![vec!["男", "18-25岁"], vec!["女", ""], vec!["  "]],
        )
    }

    #[test]
    fn new_pads_short_rows_and_treats_blank_as_missing() {
        let table = table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(1, "2、您的年龄："), None);
        assert_eq!(table.cell(2, "1、您的性别"), None);
        assert_eq!(table.cell(2, "2、您的年龄："), None);
    }

    #[test]
    fn in_memory_source_cleans_columns() {
        let source = InMemorySource::new("fixture", table());
        let loaded = source.load().unwrap();
        assert_eq!(loaded.columns(), &["您的性别", "您的年龄"]);
        assert_eq!(
            loaded.present_values("您的性别").unwrap(),
            vec!["男", "女"]
        );
    }

    #[test]
    fn column_lookup_is_none_for_absent_columns() {
        let table = table().cleaned();
        assert!(table.column("不存在").is_none());
        assert!(!table.has_column("不存在"));
    }
}
