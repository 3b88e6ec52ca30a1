// SPDX-License-Identifier: Apache-2.0

use crate::paths::staging_path;
use crate::{StoreError, StoreErrorCode};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Stages `bytes` next to `target`, fsyncs, then renames over it. Readers see
/// either the previous content or the new content.
pub(crate) fn write_atomically(target: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let parent = target.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(&e))?;
    }
    let staged = staging_path(target);
    if let Err(err) = write_and_sync(&staged, bytes) {
        let _ = fs::remove_file(&staged);
        return Err(err);
    }
    if let Err(e) = fs::rename(&staged, target) {
        let _ = fs::remove_file(&staged);
        return Err(StoreError::new(
            StoreErrorCode::Io,
            format!("rename {} failed: {e}", staged.display()),
        ));
    }
    if let Some(dir) = parent {
        sync_dir(dir)?;
    }
    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(path).map_err(|e| StoreError::io(&e))?;
    file.write_all(bytes).map_err(|e| StoreError::io(&e))?;
    file.sync_all().map_err(|e| StoreError::io(&e))
}

fn sync_dir(dir: &Path) -> Result<(), StoreError> {
    let f = OpenOptions::new()
        .read(true)
        .open(dir)
        .map_err(|e| StoreError::io(&e))?;
    f.sync_all().map_err(|e| StoreError::io(&e))
}
