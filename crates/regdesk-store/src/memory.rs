// SPDX-License-Identifier: Apache-2.0

use crate::{StateStore, StoreError, StoreErrorCode};
use regdesk_model::{Cpf, DbState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// In-process store with the same first-open seeding as the file backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<DbState>>,
    bootstrap_users: Vec<Cpf>,
    saves: AtomicU64,
    fail_saves: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: DbState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bootstrap_users(mut self, users: Vec<Cpf>) -> Self {
        self.bootstrap_users = users;
        self
    }

    /// Every `save` fails with an I/O error; `load` keeps working.
    #[must_use]
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    #[must_use]
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<DbState>>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "memory store lock poisoned"))
    }
}

impl StateStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<DbState, StoreError> {
        let mut guard = self.lock()?;
        let state = guard.get_or_insert_with(|| DbState::seeded(&self.bootstrap_users));
        Ok(state.clone())
    }

    fn save(&self, state: &DbState) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::new(StoreErrorCode::Io, "simulated write failure"));
        }
        let mut guard = self.lock()?;
        *guard = Some(state.clone());
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
