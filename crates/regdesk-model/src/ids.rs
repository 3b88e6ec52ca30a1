// SPDX-License-Identifier: Apache-2.0

//! Record identifiers of the form `<prefix>_<8 lowercase hex digits>`.

use crate::ModelError;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

pub const ID_SUFFIX_LEN: usize = 8;
pub const MAX_ID_ATTEMPTS: usize = 16;

/// Source of the random part of generated ids.
pub trait IdGenerator: Send + Sync {
    fn next_suffix(&self) -> String;
}

/// Suffixes taken from the head of a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_suffix(&self) -> String {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(ID_SUFFIX_LEN);
        hex
    }
}

/// Deterministic suffixes `00000001`, `00000002`, ...; used by fixtures and tests.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_suffix(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{:08x}", n & 0xffff_ffff)
    }
}

#[must_use]
pub fn generate_id(prefix: &str, ids: &dyn IdGenerator) -> String {
    format!("{prefix}_{}", ids.next_suffix())
}

/// Generates an id that `taken` does not already claim.
pub fn generate_unique_id(
    prefix: &'static str,
    ids: &dyn IdGenerator,
    taken: impl Fn(&str) -> bool,
) -> Result<String, ModelError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = generate_id(prefix, ids);
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(ModelError::IdSpaceExhausted { prefix })
}
