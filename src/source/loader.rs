//! Encoding-fallback CSV loader.
//!
//! The survey platform exports in whatever code page the operator's machine
//! uses, so the loader walks a fixed list of encodings and keeps the first
//! one that both decodes cleanly and parses as CSV with a header row. When
//! every attempt fails it retries once with lossy UTF-8 before giving up.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, GB18030, GBK, UTF_8, UTF_16BE, UTF_16LE, WINDOWS_1252};
use tracing::{debug, info, warn};

use super::{SurveySource, SurveyTable};
use crate::constants::loader::{DEFAULT_INPUT_FILE, ENCODING_ORDER};
use crate::errors::SurveyError;
use crate::types::EncodingName;

/// Encodings the loader knows how to try.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceEncoding {
    /// UTF-8, with an optional byte-order mark.
    Utf8,
    /// GBK (simplified Chinese).
    Gbk,
    /// GB18030 (superset of GBK).
    Gb18030,
    /// UTF-16; byte order from the BOM, little-endian when absent.
    Utf16,
    /// Windows code page 936 (GBK in practice).
    Cp936,
    /// ISO-8859-1, decoded through its windows-1252 superset.
    Latin1,
}

impl SourceEncoding {
    /// Display name used in logs and the loaded table.
    pub fn name(self) -> EncodingName {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Gbk => "gbk",
            SourceEncoding::Gb18030 => "gb18030",
            SourceEncoding::Utf16 => "utf-16",
            SourceEncoding::Cp936 => "cp936",
            SourceEncoding::Latin1 => "iso-8859-1",
        }
    }

    /// Strictly decode `bytes`, returning `None` on any malformed sequence.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        let (encoding, payload) = self.resolve(bytes);
        if (encoding == UTF_16LE || encoding == UTF_16BE) && payload.len() % 2 != 0 {
            return None;
        }
        encoding
            .decode_without_bom_handling_and_without_replacement(payload)
            .map(Cow::into_owned)
    }

    fn resolve(self, bytes: &[u8]) -> (&'static Encoding, &[u8]) {
        match self {
            SourceEncoding::Utf8 => (UTF_8, bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)),
            SourceEncoding::Gbk | SourceEncoding::Cp936 => (GBK, bytes),
            SourceEncoding::Gb18030 => (GB18030, bytes),
            SourceEncoding::Utf16 => {
                if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
                    (UTF_16LE, rest)
                } else if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
                    (UTF_16BE, rest)
                } else {
                    (UTF_16LE, bytes)
                }
            }
            SourceEncoding::Latin1 => (WINDOWS_1252, bytes),
        }
    }
}

/// Survey source reading a CSV file from disk.
#[derive(Clone, Debug)]
pub struct CsvFileSource {
    path: PathBuf,
    id: String,
}

impl CsvFileSource {
    /// Create a source for the CSV file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.display().to_string();
        Self { path, id }
    }

    /// Path of the backing CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for CsvFileSource {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_FILE)
    }
}

impl SurveySource for CsvFileSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn load(&self) -> Result<SurveyTable, SurveyError> {
        Ok(load_survey(&self.path)?.cleaned())
    }
}

/// Load the CSV at `path`, trying each encoding in `ENCODING_ORDER`.
///
/// Column names are returned as exported; call [`SurveyTable::cleaned`] (or
/// load through [`CsvFileSource`]) to strip question numbering.
pub fn load_survey(path: &Path) -> Result<SurveyTable, SurveyError> {
    let bytes = std::fs::read(path).map_err(|err| SurveyError::UnreadableInput {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;

    for encoding in ENCODING_ORDER {
        debug!("[sicas:loader] trying encoding {}", encoding.name());
        let Some(text) = encoding.decode(&bytes) else {
            continue;
        };
        match parse_csv(&text) {
            Ok(table) => {
                info!(
                    "[sicas:loader] loaded {} rows x {} columns from {} as {}",
                    table.len(),
                    table.columns().len(),
                    path.display(),
                    encoding.name()
                );
                return Ok(table.with_encoding(encoding.name()));
            }
            Err(err) => {
                debug!(
                    "[sicas:loader] encoding {} decoded but did not parse: {}",
                    encoding.name(),
                    err
                );
            }
        }
    }

    warn!(
        "[sicas:loader] no encoding parsed {} cleanly; retrying with replacement characters",
        path.display()
    );
    let (text, _, _) = UTF_8.decode(&bytes);
    parse_csv(&text)
        .map(|table| table.with_encoding("utf-8 (lossy)"))
        .map_err(|err| SurveyError::UnreadableInput {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
}

fn parse_csv(text: &str) -> Result<SurveyTable, SurveyError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(SurveyError::Configuration(
            "csv input has no header row".to_string(),
        ));
    }
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }
    Ok(SurveyTable::new(columns, rows))
}
