// SPDX-License-Identifier: Apache-2.0

use crate::lenient;
use crate::ModelError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The four label series used to number AIH/APAC document batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EtiquetaKind {
    AihMac,
    AihFaec,
    ApacMac,
    ApacFaec,
}

impl EtiquetaKind {
    pub const ALL: [Self; 4] = [Self::AihMac, Self::AihFaec, Self::ApacMac, Self::ApacFaec];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AihMac => "aih-mac",
            Self::AihFaec => "aih-faec",
            Self::ApacMac => "apac-mac",
            Self::ApacFaec => "apac-faec",
        }
    }

    /// Cursor a freshly initialised database starts from.
    #[must_use]
    pub const fn initial_start(self) -> &'static str {
        match self {
            Self::AihMac => "282510110834",
            Self::AihFaec => "282550000201",
            Self::ApacMac => "282520119134",
            Self::ApacFaec => "282560000251",
        }
    }
}

impl FromStr for EtiquetaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModelError::validation("type", format!("unknown etiqueta type {s}")))
    }
}

impl Display for EtiquetaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtiquetaSeries {
    #[serde(default, deserialize_with = "lenient::list")]
    pub history: Vec<Value>,
    /// Kept as stored; older documents hold numeric cursors.
    #[serde(default)]
    pub current_start: Value,
}

impl EtiquetaSeries {
    #[must_use]
    pub fn seeded(kind: EtiquetaKind) -> Self {
        Self {
            history: Vec::new(),
            current_start: Value::from(kind.initial_start()),
        }
    }

    /// Records a printed batch and moves the cursor to the caller-computed value.
    pub fn advance(&mut self, entry: Value, next_start: String) {
        self.history.push(entry);
        self.current_start = Value::String(next_start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_parse_from_their_wire_names() {
        for kind in EtiquetaKind::ALL {
            assert_eq!(kind.as_str().parse::<EtiquetaKind>(), Ok(kind));
        }
        assert!("aih".parse::<EtiquetaKind>().is_err());
    }

    #[test]
    fn advance_appends_history_and_overwrites_cursor() {
        let mut series = EtiquetaSeries::seeded(EtiquetaKind::ApacFaec);
        assert_eq!(series.current_start, "282560000251");
        series.advance(json!({"start": "282560000251", "qty": 50}), "282560000301".into());
        series.advance(json!({"start": "282560000301", "qty": 10}), "282560000311".into());
        assert_eq!(series.history.len(), 2);
        assert_eq!(series.history[0]["qty"], json!(50));
        assert_eq!(series.current_start, "282560000311");
    }

    #[test]
    fn numeric_cursor_from_an_older_document_is_kept() {
        let series: EtiquetaSeries =
            serde_json::from_value(json!({"history": [], "current_start": 282510110844_u64}))
                .expect("series");
        assert_eq!(series.current_start, json!(282510110844_u64));
    }
}
