use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SHIPBOARD_DIR: &str = ".shipboard";
pub const CONFIG_FILE: &str = ".shipboard/config.yaml";
pub const SNAPSHOT_FILE: &str = ".shipboard/snapshot.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn shipboard_dir(root: &Path) -> PathBuf {
    root.join(SHIPBOARD_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn snapshot_path(root: &Path) -> PathBuf {
    root.join(SNAPSHOT_FILE)
}
