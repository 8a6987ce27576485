/// Output directories and report files.
pub mod fs;
/// Optional `git` staging, commit and push of pipeline outputs.
pub mod vcs;

pub use fs::{OutputLayout, ensure_dir, write_json, write_report};
pub use vcs::{SyncOutcome, SyncRequest, sync_outputs};
