// SPDX-License-Identifier: Apache-2.0

use crate::config::ServerConfig;
use crate::http::errors::HttpError;
use regdesk_api::ApiError;
use regdesk_model::{DbState, IdGenerator, RandomIds};
use regdesk_store::{StateStore, UploadDir};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handler state. Every mutation runs load, modify, save while
/// holding `write_gate`, so writers inside one process never interleave.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub(crate) store: Arc<dyn StateStore>,
    pub(crate) uploads: UploadDir,
    pub(crate) ids: Arc<dyn IdGenerator>,
    pub(crate) write_gate: Arc<Mutex<()>>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>, config: ServerConfig) -> Self {
        Self {
            uploads: UploadDir::new(config.upload_dir.clone()),
            config: Arc::new(config),
            store,
            ids: Arc::new(RandomIds),
            write_gate: Arc::new(Mutex::new(())),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn StateStore> {
        &self.store
    }

    /// Loads the document on the blocking pool and projects it. Reads are
    /// not gated.
    pub(crate) async fn read<T, F>(&self, project: F) -> Result<T, HttpError>
    where
        F: FnOnce(DbState) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        run_blocking(move || Ok(project(store.load()?))).await
    }

    /// Load, apply `change`, save. A failing `change` leaves the store
    /// untouched.
    pub(crate) async fn mutate<T, F>(&self, change: F) -> Result<T, HttpError>
    where
        F: FnOnce(&mut DbState, &dyn IdGenerator) -> Result<T, HttpError> + Send + 'static,
        T: Send + 'static,
    {
        self.exclusive(move |store, ids| {
            let mut db = store.load()?;
            let out = change(&mut db, ids)?;
            store.save(&db)?;
            Ok(out)
        })
        .await
    }

    /// Runs `work` under the write gate with direct store access, for flows
    /// that must order side effects around the save themselves.
    pub(crate) async fn exclusive<T, F>(&self, work: F) -> Result<T, HttpError>
    where
        F: FnOnce(&dyn StateStore, &dyn IdGenerator) -> Result<T, HttpError> + Send + 'static,
        T: Send + 'static,
    {
        let _guard = self.write_gate.lock().await;
        let store = Arc::clone(&self.store);
        let ids = Arc::clone(&self.ids);
        run_blocking(move || work(store.as_ref(), ids.as_ref())).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, HttpError>
where
    F: FnOnce() -> Result<T, HttpError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| HttpError::from(ApiError::internal(format!("store task failed: {e}"))))?
}
