//! User-related DTOs.

use roster_core::{Links, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or replacing a user.
///
/// Fields are optional so that a missing value surfaces as a validation
/// failure rather than a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "roster_core::rules::not_blank")
    )]
    #[schema(example = "Alice")]
    pub name: Option<String>,

    #[validate(
        required(message = "Age is required"),
        range(min = 16, message = "Age must be at least 16")
    )]
    #[schema(example = 25, minimum = 16)]
    pub age: Option<i32>,
}

impl UserRequest {
    /// Convenience constructor for a fully populated request.
    #[must_use]
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
        }
    }
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: UserId,
    pub name: String,
    pub age: i32,
    /// Hypermedia links; omitted unless requested.
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl UserResponse {
    /// Attaches hypermedia links.
    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = links;
        self
    }
}

/// Users embedded in a HAL collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddedUsers {
    pub users: Vec<UserResponse>,
}

/// The unpaged user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserCollectionResponse {
    /// Omitted when there are no users.
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedUsers>,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    #[schema(value_type = Object)]
    pub links: Links,
}

impl UserCollectionResponse {
    /// The embedded users, or an empty slice.
    #[must_use]
    pub fn users(&self) -> &[UserResponse] {
        self.embedded
            .as_ref()
            .map(|e| e.users.as_slice())
            .unwrap_or_default()
    }
}

/// Page metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: usize,
}

/// One page of the filtered user listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPageResponse {
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedUsers>,
    #[serde(rename = "_links", default, skip_serializing_if = "Links::is_empty")]
    #[schema(value_type = Object)]
    pub links: Links,
    pub page: PageMetadata,
}

impl UserPageResponse {
    /// The embedded users, or an empty slice.
    #[must_use]
    pub fn users(&self) -> &[UserResponse] {
        self.embedded
            .as_ref()
            .map(|e| e.users.as_slice())
            .unwrap_or_default()
    }
}
