//! Log setup. The terminal is owned by the UI, so records go to a file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter, e.g. `MOTE_LOG=debug`.
const FILTER_ENV: &str = "MOTE_LOG";
const DEFAULT_FILTER: &str = "info";

/// Where log records are written, if the platform has a data directory.
pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "mote").map(|dirs| dirs.data_local_dir().join("mote.log"))
}

/// Install the global logger. Without a writable log file logging is
/// disabled rather than drawn over the UI.
pub fn init() {
    let Some(file) = log_path().and_then(|path| open(&path)) else {
        return;
    };
    let _ = Builder::from_env(Env::default().filter_or(FILTER_ENV, DEFAULT_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .try_init();
}

fn open(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::create(path).ok()
}
