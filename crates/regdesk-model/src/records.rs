// SPDX-License-Identifier: Apache-2.0

use crate::collection::Keyed;
use crate::lenient;
use crate::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Open extension map carrying record fields the backend does not interpret.
pub type Fields = Map<String, Value>;

/// Allow-listed taxpayer number. Opaque beyond being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(input: &str) -> Result<Self, ModelError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ModelError::validation("cpf", "must not be empty"));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Cpf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A provider contract. `execution` maps a month key such as `2024-01` to
/// that month's figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::object_map")]
    pub execution: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Keyed for Provider {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn on_create(&mut self) {
        self.execution.clear();
    }

    // Execution figures are only edited through the execution sub-resource.
    fn carry_over(&mut self, previous: &Self) {
        self.execution.clone_from(&previous.execution);
    }
}

/// Metadata of an uploaded report; the bytes live in the upload directory
/// under `filename`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub filename: String,
}

impl Keyed for Report {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Schemaless record: an id plus whatever the client sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Keyed for Document {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }
}

pub type Regulador = Document;
pub type BloqueioProvider = Document;
pub type BloqueioAlteracao = Document;

/// Waiting-list entry. `name` and `count` are stored exactly as sent, so a
/// form posting `"count": "12"` round-trips unchanged.
pub type WaitingListItem = Document;

/// Waiting-list update: absent fields keep their stored value, an explicit
/// `null` is written through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingListPatch {
    #[serde(
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub count: Option<Value>,
}

impl WaitingListPatch {
    pub fn apply(self, item: &mut WaitingListItem) {
        if let Some(name) = self.name {
            item.fields.insert("name".to_string(), name);
        }
        if let Some(count) = self.count {
            item.fields.insert("count".to_string(), count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cpf_is_trimmed_and_must_not_be_empty() {
        assert_eq!(Cpf::parse(" 123 ").expect("cpf").as_str(), "123");
        assert!(Cpf::parse("   ").is_err());
    }

    #[test]
    fn provider_keeps_unknown_fields_next_to_execution() {
        let raw = json!({
            "id": "provider_1",
            "nome": "Hospital A",
            "valor": 10.5,
            "execution": {"2024-01": {"total": 3}}
        });
        let provider: Provider = serde_json::from_value(raw.clone()).expect("provider");
        assert_eq!(provider.fields.get("nome"), Some(&json!("Hospital A")));
        assert_eq!(provider.execution.len(), 1);
        assert_eq!(serde_json::to_value(&provider).expect("json"), raw);
    }

    #[test]
    fn provider_without_execution_defaults_to_empty_map() {
        let provider: Provider =
            serde_json::from_value(json!({"id": "provider_1"})).expect("provider");
        assert!(provider.execution.is_empty());
    }

    #[test]
    fn waiting_list_patch_only_touches_present_fields() {
        let mut item: WaitingListItem =
            serde_json::from_value(json!({"id": "wait_1", "name": "Cardiologia", "count": 4}))
                .expect("item");
        let patch: WaitingListPatch =
            serde_json::from_value(json!({"count": "9"})).expect("patch");
        patch.apply(&mut item);
        assert_eq!(item.fields.get("name"), Some(&json!("Cardiologia")));
        assert_eq!(item.fields.get("count"), Some(&json!("9")));

        let patch: WaitingListPatch = serde_json::from_value(json!({"name": null})).expect("patch");
        assert_eq!(patch.name, Some(Value::Null));
        patch.apply(&mut item);
        assert_eq!(item.fields.get("name"), Some(&Value::Null));
    }

    #[test]
    fn off_type_ids_and_execution_do_not_fail_a_record() {
        let provider: Provider =
            serde_json::from_value(json!({"id": 7, "nome": "B", "execution": null}))
                .expect("provider");
        assert_eq!(provider.id, "7");
        assert!(provider.execution.is_empty());
        assert_eq!(provider.fields.get("nome"), Some(&json!("B")));
    }
}
