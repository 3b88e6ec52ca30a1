// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod collection;
mod error;
mod etiqueta;
mod ids;
mod lenient;
mod records;
mod state;

pub use collection::{CollectionKind, CollectionMut, Keyed};
pub use error::ModelError;
pub use etiqueta::{EtiquetaKind, EtiquetaSeries};
pub use ids::{
    generate_id, generate_unique_id, IdGenerator, RandomIds, SequentialIds, ID_SUFFIX_LEN,
    MAX_ID_ATTEMPTS,
};
pub use records::{
    BloqueioAlteracao, BloqueioProvider, Cpf, Document, Fields, Provider, Regulador, Report,
    WaitingListItem, WaitingListPatch,
};
pub use state::DbState;

pub const CRATE_NAME: &str = "regdesk-model";
