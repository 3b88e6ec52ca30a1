// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DATABASE_FILE: &str = "database.json";
pub const UPLOADS_DIR: &str = "uploads";

#[must_use]
pub fn default_database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

#[must_use]
pub fn default_upload_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(UPLOADS_DIR)
}

/// Sibling path a document is staged at before the atomic rename.
pub(crate) fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}
