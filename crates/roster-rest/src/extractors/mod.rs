//! Custom Axum extractors.
//!
//! Every rejection is an [`AppError`](crate::responses::AppError), so malformed
//! input produces the same error body as a failed operation.

mod hypermedia;
mod pagination;
mod path;
mod validated;

pub use hypermedia::*;
pub use pagination::*;
pub use path::*;
pub use validated::*;

use crate::responses::AppError;
use axum::{extract::Query, http::Uri};
use roster_core::RosterError;
use serde::de::DeserializeOwned;

/// Deserializes the query string of `uri`, mapping failures to 400.
pub(crate) fn parse_query<T: DeserializeOwned>(uri: &Uri) -> Result<T, AppError> {
    Query::<T>::try_from_uri(uri)
        .map(|Query(value)| value)
        .map_err(|rejection| AppError(RosterError::validation(rejection.body_text())))
}
