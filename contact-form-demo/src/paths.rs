//! Where the demo keeps its log and looks for its config.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows, and the working
//! directory when no home directory can be determined.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "moneyweb";
const APPLICATION: &str = "contact-form";

/// Name of the log for the running session.
const CURRENT_LOG: &str = "contact-form.log";

/// Archived session logs are `contact-form-<timestamp>.log`.
const ARCHIVE_PREFIX: &str = "contact-form-";

/// Archived session logs kept per directory.
const KEEP_ARCHIVED: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for session logs, created on demand.
///
/// - Linux: `$XDG_CACHE_HOME/contact-form` or `~/.cache/contact-form`
/// - macOS: `~/Library/Caches/dev.moneyweb.contact-form`
/// - Windows: `C:\Users\<User>\AppData\Local\moneyweb\contact-form\cache`
///
/// Falls back to the working directory.
pub fn log_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .filter(|dir| fs::create_dir_all(dir).is_ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Archive the previous session's log in `dir`, prune old archives and
/// return the path the new session should log to.
///
/// The archive is stamped with the previous log's modification time, so it
/// is named after the session it records.
pub fn start_session_log(dir: &Path) -> PathBuf {
    let current = dir.join(CURRENT_LOG);

    if let Ok(modified) = fs::metadata(&current).and_then(|m| m.modified()) {
        let stamp = DateTime::<Local>::from(modified).format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&current, dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log")));
    }

    prune_archives(dir, KEEP_ARCHIVED);
    current
}

/// Delete all but the newest `keep` archived logs. Other files in `dir` are
/// never touched.
fn prune_archives(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| is_archive(path))
        .collect();

    if archived.len() <= keep {
        return;
    }

    // timestamped names sort oldest first
    archived.sort();
    for path in &archived[..archived.len() - keep] {
        let _ = fs::remove_file(path);
    }
}

fn is_archive(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
}

/// The config file to load: an explicit path wins, otherwise `config.json`
/// in the platform config directory if it exists.
pub fn resolve_config(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
            .filter(|path| path.exists())
    })
}
