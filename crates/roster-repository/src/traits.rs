//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Page, PageRequest, RosterResult, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Returns every user, ordered by name.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Finds one page of users whose name contains `filter`, ignoring case.
    /// An empty filter matches everyone.
    async fn find_by_name_containing(
        &self,
        filter: &str,
        page: PageRequest,
    ) -> RosterResult<Page<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> RosterResult<User>;

    /// Updates an existing user.
    async fn update(&self, user: &User) -> RosterResult<User>;

    /// Deletes a user by ID. Returns false if nothing was deleted.
    async fn delete(&self, id: UserId) -> RosterResult<bool>;
}
