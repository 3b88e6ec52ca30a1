// SPDX-License-Identifier: Apache-2.0

//! Field deserializers for values that form posts and older documents fill
//! with loosely typed JSON. A stray type on one field must never fail the
//! whole document.

use crate::records::Cpf;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Strings pass through and numbers keep their decimal text. Anything else
/// reads as empty.
pub(crate) fn scalar_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub(crate) fn id<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(de).map(scalar_text)
}

/// Objects become the map; null or any other shape reads as empty.
pub(crate) fn object_map<'de, D>(de: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Object(map) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}

/// Arrays pass through, null is empty, a lone value becomes a one-item list.
pub(crate) fn list<'de, D>(de: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    })
}

/// Allow-list entries; numbers are kept as text and blanks are skipped.
pub(crate) fn cpf_list<'de, D>(de: D) -> Result<Vec<Cpf>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(de)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    Ok(raw
        .into_iter()
        .filter_map(|v| Cpf::parse(&scalar_text(v)).ok())
        .collect())
}

/// Distinguishes an explicit `null` (`Some(Value::Null)`) from an absent key
/// (`None`, via `#[serde(default)]`).
pub(crate) fn present<'de, D>(de: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_text_keeps_numbers_as_decimal_text() {
        assert_eq!(scalar_text(json!("provider_1")), "provider_1");
        assert_eq!(scalar_text(json!(282510110844_u64)), "282510110844");
        assert_eq!(scalar_text(Value::Null), "");
    }
}
