use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::constants::output::{
    ADDITIONAL_PLOTS_DIR, FUNNEL_PLOTS_DIR, THESIS_PLOTS_DIR, VALIDATION_PLOTS_DIR,
};
use crate::errors::SurveyError;

/// Chart directories resolved against one output root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output root itself; reports are written here.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) path of a chart directory such as `plots`.
    pub fn dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path of a report file at the output root.
    pub fn report(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Every chart directory a pipeline may write into.
    pub fn chart_dirs() -> [&'static str; 4] {
        [
            FUNNEL_PLOTS_DIR,
            VALIDATION_PLOTS_DIR,
            THESIS_PLOTS_DIR,
            ADDITIONAL_PLOTS_DIR,
        ]
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<PathBuf, SurveyError> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// Write a finished report as UTF-8, replacing any previous file.
pub fn write_report(path: &Path, contents: &str) -> Result<PathBuf, SurveyError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| SurveyError::report(&name, err))?;
    }
    fs::write(path, contents).map_err(|err| SurveyError::report(&name, err))?;
    info!("[sicas:report] wrote {}", path.display());
    Ok(path.to_path_buf())
}

/// Pretty-print `value` as JSON at `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, SurveyError> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    info!("[sicas:report] wrote summary {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_report_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.md");
        write_report(&path, "# Title\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Title\n");
    }

    #[test]
    fn write_report_into_a_file_fails_as_report_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let err = write_report(&blocker.join("report.md"), "body").unwrap_err();
        assert!(matches!(err, SurveyError::Report { ref name, .. } if name == "report.md"));
    }

    #[test]
    fn layout_joins_against_root() {
        let layout = OutputLayout::new("out");
        assert_eq!(layout.dir("plots"), Path::new("out").join("plots"));
        assert_eq!(layout.report("a.md"), Path::new("out").join("a.md"));
        assert_eq!(OutputLayout::default().root(), Path::new("."));
    }

    #[test]
    fn json_summary_round_trips_through_serde_json() {
        let dir = tempdir().unwrap();
        let path = write_json(&dir.path().join("summary.json"), &vec![1, 2, 3]).unwrap();
        let parsed: Vec<u32> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);
    }
}
