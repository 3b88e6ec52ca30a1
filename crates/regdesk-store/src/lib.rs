// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod atomic;
mod error;
mod json_file;
mod memory;
mod paths;
mod uploads;

pub use error::{StoreError, StoreErrorCode};
pub use json_file::{CorruptionPolicy, JsonFileStore};
pub use memory::MemoryStore;
pub use paths::{
    default_database_path, default_upload_dir, DATABASE_FILE, DEFAULT_DATA_DIR, UPLOADS_DIR,
};
pub use uploads::{client_basename, UploadDir, UploadName};

use regdesk_model::DbState;

pub const CRATE_NAME: &str = "regdesk-store";

/// Whole-document persistence. `save` replaces everything `load` returned;
/// there is no partial write and no cross-call locking.
pub trait StateStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str {
        "unknown"
    }

    fn load(&self) -> Result<DbState, StoreError>;

    fn save(&self, state: &DbState) -> Result<(), StoreError>;
}
