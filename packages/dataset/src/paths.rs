#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for the bundled dataset.
//!
//! All paths are relative to the project root's `data/` directory.

use std::path::{Path, PathBuf};

/// File name of the processed trip dataset.
pub const DATASET_FILE_NAME: &str = "bikes_data.csv";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the default location of the trip dataset.
#[must_use]
pub fn default_dataset_path() -> PathBuf {
    data_dir().join(DATASET_FILE_NAME)
}
