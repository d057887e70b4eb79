//! User service trait definition.

use crate::dto::{UserCollectionResponse, UserPageResponse, UserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{LinkBuilder, PageRequest, RosterResult, UserId};

/// User service trait.
///
/// Every operation that returns a body takes an optional [`LinkBuilder`];
/// hypermedia links are attached only when one is supplied.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Gets a user by ID.
    async fn find_by_id(
        &self,
        id: UserId,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserResponse>;

    /// Lists every user, ordered by name.
    async fn find_all(&self, links: Option<&LinkBuilder>) -> RosterResult<UserCollectionResponse>;

    /// Lists one page of users whose name contains `filter`, ignoring case.
    async fn find_page(
        &self,
        filter: &str,
        page: PageRequest,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserPageResponse>;

    /// Creates a new user.
    async fn create(
        &self,
        request: UserRequest,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserResponse>;

    /// Replaces a user's name and age.
    async fn update(
        &self,
        id: UserId,
        request: UserRequest,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserResponse>;

    /// Deletes a user.
    async fn delete(&self, id: UserId) -> RosterResult<()>;
}
