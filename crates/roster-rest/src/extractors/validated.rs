//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body and validates it with the
//! `validator` crate. Both failure modes answer 400 Bad Request.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use roster_core::{RosterError, ValidateExt};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

/// Message returned when the body is missing or not valid JSON for `T`.
pub const UNREADABLE_BODY: &str = "Data not provided or incorrect!";

/// JSON extractor that automatically validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use roster_rest::extractors::ValidatedJson;
/// use roster_service::UserRequest;
///
/// async fn create_user(ValidatedJson(request): ValidatedJson<UserRequest>) {
///     // request is guaranteed to be valid here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!("Rejected request body: {}", rejection.body_text());
            AppError(RosterError::validation(UNREADABLE_BODY))
        })?;

        value.validate_request()?;

        Ok(ValidatedJson(value))
    }
}
