// SPDX-License-Identifier: Apache-2.0

use crate::ids::{generate_unique_id, IdGenerator};
use crate::ModelError;

/// A record addressable by its generated id.
pub trait Keyed {
    fn id(&self) -> &str;
    fn assign_id(&mut self, id: String);

    /// Resets server-owned state on a freshly created record.
    fn on_create(&mut self) {}

    /// Copies server-owned state from the record being replaced.
    fn carry_over(&mut self, _previous: &Self) {}
}

/// The id-keyed collections of the database document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Providers,
    Reports,
    Reguladores,
    BloqueioProviders,
    BloqueioAlteracoes,
    WaitingList,
}

impl CollectionKind {
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Providers => "provider",
            Self::Reports => "report_meta",
            Self::Reguladores => "regulador",
            Self::BloqueioProviders => "bloqueio_p",
            Self::BloqueioAlteracoes => "bloqueio_a",
            Self::WaitingList => "wait",
        }
    }

    /// Human label used in not-found errors.
    #[must_use]
    pub const fn record_label(self) -> &'static str {
        match self {
            Self::Providers => "provider",
            Self::Reports => "report",
            Self::Reguladores => "regulador",
            Self::BloqueioProviders => "bloqueio provider",
            Self::BloqueioAlteracoes => "bloqueio alteracao",
            Self::WaitingList => "waiting list item",
        }
    }
}

/// Mutable view over one collection of the document.
pub struct CollectionMut<'a, T> {
    kind: CollectionKind,
    items: &'a mut Vec<T>,
}

impl<'a, T: Keyed + Clone> CollectionMut<'a, T> {
    pub(crate) fn new(kind: CollectionKind, items: &'a mut Vec<T>) -> Self {
        Self { kind, items }
    }

    /// Consumes the view, yielding the record with `id` for in-place edits.
    pub fn into_record_mut(self, id: &str) -> Result<&'a mut T, ModelError> {
        let label = self.kind.record_label();
        let items = self.items;
        items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| ModelError::not_found(label, id))
    }

    /// Assigns a fresh id, appends, and returns the stored record.
    pub fn create(self, mut record: T, ids: &dyn IdGenerator) -> Result<T, ModelError> {
        let id = generate_unique_id(self.kind.id_prefix(), ids, |candidate| {
            self.items.iter().any(|item| item.id() == candidate)
        })?;
        record.assign_id(id);
        record.on_create();
        self.items.push(record.clone());
        Ok(record)
    }

    /// Replaces the record with `id`; the stored id never changes.
    pub fn update(self, id: &str, mut record: T) -> Result<T, ModelError> {
        let label = self.kind.record_label();
        let slot = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| ModelError::not_found(label, id))?;
        record.assign_id(id.to_string());
        record.carry_over(slot);
        *slot = record.clone();
        Ok(record)
    }

    /// Removes the first record with `id`.
    pub fn delete(self, id: &str) -> Result<T, ModelError> {
        let idx = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| ModelError::not_found(self.kind.record_label(), id))?;
        Ok(self.items.remove(idx))
    }
}
