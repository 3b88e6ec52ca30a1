// SPDX-License-Identifier: Apache-2.0

use crate::collection::{CollectionKind, CollectionMut};
use crate::etiqueta::{EtiquetaKind, EtiquetaSeries};
use crate::records::{
    BloqueioAlteracao, BloqueioProvider, Cpf, Provider, Regulador, Report, WaitingListItem,
    WaitingListPatch,
};
use crate::lenient;
use crate::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The whole database document. Every key is optional on read so documents
/// written before a collection existed still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbState {
    pub providers: Vec<Provider>,
    pub reports: Vec<Report>,
    pub reguladores: Vec<Regulador>,
    pub etiquetas: BTreeMap<String, EtiquetaSeries>,
    pub bloqueio_providers: Vec<BloqueioProvider>,
    pub bloqueio_alteracoes: Vec<BloqueioAlteracao>,
    #[serde(deserialize_with = "lenient::cpf_list")]
    pub users: Vec<Cpf>,
    pub waiting_list: Vec<WaitingListItem>,
}

impl DbState {
    /// State handed out when the persisted document cannot be read.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Document written the first time the store is opened.
    #[must_use]
    pub fn seeded(bootstrap_users: &[Cpf]) -> Self {
        let etiquetas = EtiquetaKind::ALL
            .into_iter()
            .map(|kind| (kind.as_str().to_string(), EtiquetaSeries::seeded(kind)))
            .collect();
        let mut users: Vec<Cpf> = Vec::with_capacity(bootstrap_users.len());
        for cpf in bootstrap_users {
            if !users.contains(cpf) {
                users.push(cpf.clone());
            }
        }
        Self {
            etiquetas,
            users,
            ..Self::default()
        }
    }

    pub fn providers_mut(&mut self) -> CollectionMut<'_, Provider> {
        CollectionMut::new(CollectionKind::Providers, &mut self.providers)
    }

    pub fn reports_mut(&mut self) -> CollectionMut<'_, Report> {
        CollectionMut::new(CollectionKind::Reports, &mut self.reports)
    }

    pub fn reguladores_mut(&mut self) -> CollectionMut<'_, Regulador> {
        CollectionMut::new(CollectionKind::Reguladores, &mut self.reguladores)
    }

    pub fn bloqueio_providers_mut(&mut self) -> CollectionMut<'_, BloqueioProvider> {
        CollectionMut::new(CollectionKind::BloqueioProviders, &mut self.bloqueio_providers)
    }

    pub fn bloqueio_alteracoes_mut(&mut self) -> CollectionMut<'_, BloqueioAlteracao> {
        CollectionMut::new(
            CollectionKind::BloqueioAlteracoes,
            &mut self.bloqueio_alteracoes,
        )
    }

    pub fn waiting_list_mut(&mut self) -> CollectionMut<'_, WaitingListItem> {
        CollectionMut::new(CollectionKind::WaitingList, &mut self.waiting_list)
    }

    /// Writes `data` under `month_key`, creating the entry or overwriting it.
    pub fn set_execution(
        &mut self,
        provider_id: &str,
        month_key: String,
        data: Value,
    ) -> Result<(), ModelError> {
        let provider = self.providers_mut().into_record_mut(provider_id)?;
        provider.execution.insert(month_key, data);
        Ok(())
    }

    pub fn remove_execution(
        &mut self,
        provider_id: &str,
        month_key: &str,
    ) -> Result<Value, ModelError> {
        let provider = self
            .providers
            .iter_mut()
            .find(|p| p.id == provider_id)
            .ok_or_else(|| ModelError::not_found("execution data", month_key))?;
        provider
            .execution
            .remove(month_key)
            .ok_or_else(|| ModelError::not_found("execution data", month_key))
    }

    pub fn patch_waiting_list_item(
        &mut self,
        id: &str,
        patch: WaitingListPatch,
    ) -> Result<WaitingListItem, ModelError> {
        let item = self.waiting_list_mut().into_record_mut(id)?;
        patch.apply(item);
        Ok(item.clone())
    }

    /// Appends `entry` to the named series and moves its cursor to `next_start`.
    pub fn advance_etiqueta(
        &mut self,
        kind: &str,
        entry: Value,
        next_start: String,
    ) -> Result<&EtiquetaSeries, ModelError> {
        let kind: EtiquetaKind = kind.parse()?;
        let series = self.etiquetas.get_mut(kind.as_str()).ok_or_else(|| {
            ModelError::validation("type", format!("etiqueta series {kind} is not initialised"))
        })?;
        series.advance(entry, next_start);
        Ok(series)
    }

    #[must_use]
    pub fn is_authorized(&self, cpf: &str) -> bool {
        self.users.iter().any(|u| u.as_str() == cpf.trim())
    }

    pub fn add_user(&mut self, cpf: Cpf) -> Result<(), ModelError> {
        if self.users.contains(&cpf) {
            return Err(ModelError::validation("cpf", format!("{cpf} is already allowed")));
        }
        self.users.push(cpf);
        Ok(())
    }

    pub fn remove_user(&mut self, cpf: &str) -> Result<Cpf, ModelError> {
        let idx = self
            .users
            .iter()
            .position(|u| u.as_str() == cpf)
            .ok_or_else(|| ModelError::not_found("cpf", cpf))?;
        Ok(self.users.remove(idx))
    }
}
