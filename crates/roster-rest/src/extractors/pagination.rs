//! Pagination extractor.

use super::parse_query;
use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use roster_core::{PageRequest, Sort};
use serde::Deserialize;

/// Raw query parameters of the paged listing.
///
/// `page` is unsigned, so a negative value fails deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<i64>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl TryFrom<PaginationQuery> for PageQuery {
    type Error = AppError;

    fn try_from(query: PaginationQuery) -> Result<Self, Self::Error> {
        let sort = match query.sort.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<Sort>()?,
            _ => Sort::default(),
        };
        // sizes below one fall back to the default
        let size = query
            .size
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or(PageRequest::DEFAULT_SIZE);

        Ok(Self {
            filter: query.name,
            page: PageRequest::new(query.page.unwrap_or(0), size).with_sort(sort),
        })
    }
}

/// Name filter and page request for `GET /users/paged`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub filter: String,
    pub page: PageRequest,
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_query::<PaginationQuery>(&parts.uri)?.try_into()
    }
}
