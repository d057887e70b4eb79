//! User service implementation.

use crate::dto::{UserCollectionResponse, UserPageResponse, UserRequest, UserResponse};
use crate::mappers::UserFields;
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{
    LinkBuilder, Page, PageRequest, RosterError, RosterResult, User, UserId, ValidateExt,
};
use roster_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// User service backed by a [`UserRepository`].
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    async fn load(&self, id: UserId) -> RosterResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))
    }
}

/// Converts a user, attaching its links when a builder is given.
fn to_response(user: User, links: Option<&LinkBuilder>) -> RosterResult<UserResponse> {
    let id = user.id;
    let response = UserResponse::from(user);
    match links {
        Some(builder) => Ok(response.with_links(builder.resource_links(&id.to_string())?)),
        None => Ok(response),
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn find_by_id(
        &self,
        id: UserId,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserResponse> {
        debug!("Getting user: {}", id);

        let user = self.load(id).await?;
        to_response(user, links)
    }

    async fn find_all(&self, links: Option<&LinkBuilder>) -> RosterResult<UserCollectionResponse> {
        debug!("Listing all users");

        let users = self
            .user_repository
            .find_all()
            .await?
            .into_iter()
            .map(|user| to_response(user, links))
            .collect::<RosterResult<Vec<_>>>()?;

        let mut response = UserCollectionResponse::from(users);
        if let Some(builder) = links {
            response.links = builder.collection_links();
        }
        Ok(response)
    }

    async fn find_page(
        &self,
        filter: &str,
        page: PageRequest,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserPageResponse> {
        debug!(
            "Listing users matching '{}', page: {}, size: {}",
            filter, page.page, page.size
        );

        let users = self
            .user_repository
            .find_by_name_containing(filter, page)
            .await?;
        let info = users.info;

        let content = users
            .content
            .into_iter()
            .map(|user| to_response(user, links))
            .collect::<RosterResult<Vec<_>>>()?;
        let mut response = UserPageResponse::from(Page { content, info });
        if let Some(builder) = links {
            response.links = builder.page_links(filter, &page, &info)?;
        }
        Ok(response)
    }

    async fn create(
        &self,
        request: UserRequest,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserResponse> {
        debug!("Creating user: {:?}", request.name);

        let user = UserFields::try_from(request)?.into_user();
        user.validate_request()?;

        let saved = self.user_repository.save(&user).await?;

        info!("User created: {}", saved.id);
        to_response(saved, links)
    }

    async fn update(
        &self,
        id: UserId,
        request: UserRequest,
        links: Option<&LinkBuilder>,
    ) -> RosterResult<UserResponse> {
        debug!("Updating user: {}", id);

        let fields = UserFields::try_from(request)?;
        let mut user = self.load(id).await?;
        fields.apply(&mut user);
        user.validate_request()?;

        let updated = self.user_repository.update(&user).await?;

        info!("User updated: {}", id);
        to_response(updated, links)
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        let user = self.load(id).await?;
        if !self.user_repository.delete(user.id).await? {
            return Err(RosterError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
