// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    NotFound { what: &'static str, key: String },
    Validation { field: &'static str, reason: String },
    IdSpaceExhausted { prefix: &'static str },
}

impl ModelError {
    #[must_use]
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { what, key } => write!(f, "{what} not found: {key}"),
            Self::Validation { field, reason } => write!(f, "invalid {field}: {reason}"),
            Self::IdSpaceExhausted { prefix } => {
                write!(f, "could not generate a free id for prefix {prefix}")
            }
        }
    }
}

impl std::error::Error for ModelError {}
