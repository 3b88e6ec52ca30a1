// SPDX-License-Identifier: Apache-2.0

use crate::atomic::write_atomically;
use crate::{StoreError, StoreErrorCode};
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Last path component of a client-supplied filename, accepting either
/// separator. `None` when nothing usable remains.
#[must_use]
pub fn client_basename(raw: &str) -> Option<&str> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();
    if base.is_empty() || base == "." || base == ".." {
        None
    } else {
        Some(base)
    }
}

/// A single path component inside the upload directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadName(String);

impl UploadName {
    pub fn parse(input: &str) -> Result<Self, StoreError> {
        if input.is_empty() {
            return Err(StoreError::new(
                StoreErrorCode::Validation,
                "upload name must not be empty",
            ));
        }
        if input.contains(['/', '\\', '\0']) {
            return Err(StoreError::new(
                StoreErrorCode::Validation,
                "upload name must not contain path separators",
            ));
        }
        if input == "." || input == ".." {
            return Err(StoreError::new(
                StoreErrorCode::Validation,
                "upload name must not be a directory reference",
            ));
        }
        Ok(Self(input.to_string()))
    }

    /// `<record_id>_<basename>`, the stored name of a report upload.
    pub fn for_record(record_id: &str, client_filename: &str) -> Result<Self, StoreError> {
        let base = client_basename(client_filename).ok_or_else(|| {
            StoreError::new(StoreErrorCode::Validation, "uploaded file has no name")
        })?;
        Self::parse(&format!("{record_id}_{base}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_pdf(&self) -> bool {
        Path::new(&self.0)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}

impl Display for UploadName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat directory holding uploaded report files.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn path_of(&self, name: &UploadName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Writes the file, creating the directory on first use. An existing file
    /// with the same name is replaced.
    pub fn write(&self, name: &UploadName, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let path = self.path_of(name);
        write_atomically(&path, bytes)?;
        Ok(path)
    }

    pub fn read(&self, name: &UploadName) -> Result<Vec<u8>, StoreError> {
        let path = self.path_of(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::new(
                StoreErrorCode::NotFound,
                format!("upload not found: {name}"),
            )),
            Err(e) => Err(StoreError::io(&e)),
        }
    }

    /// Best-effort delete; a missing file is not an error.
    pub fn remove(&self, name: &UploadName) -> bool {
        match fs::remove_file(self.path_of(name)) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!(upload = %name, error = %e, "failed to remove upload");
                false
            }
        }
    }
}
