// SPDX-License-Identifier: Apache-2.0

pub(crate) mod auth;
pub(crate) mod collections;
pub(crate) mod errors;
pub(crate) mod etiquetas;
pub(crate) mod extract;
pub(crate) mod operational;
pub(crate) mod providers;
pub(crate) mod reports;
pub(crate) mod request_trace;
