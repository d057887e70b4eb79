//! Hypermedia extractor.

use super::parse_query;
use crate::{responses::AppError, state::AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HOST, request::Parts},
};
use roster_core::{LinkBuilder, RosterError};
use serde::Deserialize;

/// Path of the user collection, relative to the public base URL.
pub const USERS_PATH: &str = "/api/v1/users";

#[derive(Debug, Default, Deserialize)]
struct HateoasQuery {
    #[serde(default)]
    hateoas: bool,
}

/// A [`LinkBuilder`] for the current request when `hateoas=true`.
///
/// Links are resolved against `server.public_base_url` when configured,
/// otherwise against the request's `Host` header. The builder carries the
/// request's query pairs so page links can echo parameters they do not own.
#[derive(Debug, Clone, Default)]
pub struct Hypermedia(pub Option<LinkBuilder>);

impl Hypermedia {
    /// The builder, if links were requested.
    #[must_use]
    pub fn links(&self) -> Option<&LinkBuilder> {
        self.0.as_ref()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Hypermedia {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let query: HateoasQuery = parse_query(&parts.uri)?;
        if !query.hateoas {
            return Ok(Self(None));
        }

        let builder = match &state.public_base_url {
            Some(base) => LinkBuilder::from_parts(base, USERS_PATH)?,
            None => {
                let host = parts
                    .headers
                    .get(HOST)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("localhost");
                // a client-supplied host is a bad request, not a server fault
                LinkBuilder::from_parts(&format!("http://{}", host), USERS_PATH).map_err(|_| {
                    RosterError::validation(format!("Invalid Host header '{}'", host))
                })?
            }
        };

        let pairs = url::form_urlencoded::parse(parts.uri.query().unwrap_or_default().as_bytes())
            .into_owned();
        let builder = builder.with_query(pairs);

        Ok(Self(Some(builder)))
    }
}
