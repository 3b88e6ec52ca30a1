// SPDX-License-Identifier: Apache-2.0

use crate::atomic::write_atomically;
use crate::{StateStore, StoreError, StoreErrorCode};
use regdesk_model::{Cpf, DbState};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What `load` does with a document that exists but does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptionPolicy {
    /// Log and serve an empty state. The next successful write replaces the
    /// unreadable file.
    #[default]
    ServeEmpty,
    /// Surface the failure so the caller can refuse the request.
    Fail,
}

/// The database as a single pretty-printed JSON document on local disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    policy: CorruptionPolicy,
    bootstrap_users: Vec<Cpf>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: CorruptionPolicy::default(),
            bootstrap_users: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: CorruptionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// CPFs written into the allow-list when the document is first created.
    #[must_use]
    pub fn with_bootstrap_users(mut self, users: Vec<Cpf>) -> Self {
        self.bootstrap_users = users;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn policy(&self) -> CorruptionPolicy {
        self.policy
    }

    fn initialise(&self) -> Result<DbState, StoreError> {
        let state = DbState::seeded(&self.bootstrap_users);
        self.save(&state)?;
        info!(
            path = %self.path.display(),
            users = state.users.len(),
            "initialised database document"
        );
        Ok(state)
    }

    fn unreadable(&self, reason: &str) -> Result<DbState, StoreError> {
        match self.policy {
            CorruptionPolicy::ServeEmpty => {
                warn!(
                    path = %self.path.display(),
                    reason,
                    "database document unreadable; serving empty state"
                );
                Ok(DbState::empty())
            }
            CorruptionPolicy::Fail => Err(StoreError::new(
                StoreErrorCode::Corrupt,
                format!("{}: {reason}", self.path.display()),
            )),
        }
    }
}

impl StateStore for JsonFileStore {
    fn backend_tag(&self) -> &'static str {
        "json-file"
    }

    fn load(&self) -> Result<DbState, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.initialise(),
            Err(e) => return Err(StoreError::io(&e)),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return self.unreadable("document is empty");
        }
        match serde_json::from_slice::<DbState>(&raw) {
            Ok(state) => Ok(state),
            Err(e) => self.unreadable(&e.to_string()),
        }
    }

    fn save(&self, state: &DbState) -> Result<(), StoreError> {
        let bytes = encode_document(state)?;
        write_atomically(&self.path, &bytes)
    }
}

/// Four-space indented JSON; non-ASCII text is written as-is.
pub(crate) fn encode_document(state: &DbState) -> Result<Vec<u8>, StoreError> {
    let mut out = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    state
        .serialize(&mut ser)
        .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_uses_four_space_indent_and_raw_utf8() {
        let mut state = DbState::empty();
        state
            .add_user(Cpf::parse("00011122233").expect("cpf"))
            .expect("user");
        state.reguladores.push(regdesk_model::Document {
            id: "regulador_1".into(),
            fields: serde_json::json!({"nome": "São João"})
                .as_object()
                .cloned()
                .expect("object"),
        });
        let text = String::from_utf8(encode_document(&state).expect("encode")).expect("utf8");
        assert!(text.contains("\n    \"providers\": []"));
        assert!(text.contains("São João"));
        assert!(!text.contains("\\u"));
    }
}
