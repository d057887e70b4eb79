//! Entity-DTO mappers.

use crate::dto::{
    EmbeddedUsers, PageMetadata, UserCollectionResponse, UserPageResponse, UserRequest,
    UserResponse,
};
use roster_core::{Links, Page, RosterError, User, ValidateExt};

/// The validated contents of a [`UserRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub age: i32,
}

impl TryFrom<UserRequest> for UserFields {
    type Error = RosterError;

    fn try_from(request: UserRequest) -> Result<Self, Self::Error> {
        request.validate_request()?;
        match (request.name, request.age) {
            (Some(name), Some(age)) => Ok(Self { name, age }),
            _ => Err(RosterError::validation("name and age are required")),
        }
    }
}

impl UserFields {
    /// Builds a new user with a fresh identifier.
    #[must_use]
    pub fn into_user(self) -> User {
        User::new(self.name, self.age)
    }

    /// Copies the fields onto an existing user, keeping its identifier.
    pub fn apply(self, user: &mut User) {
        user.rename(self.name, self.age);
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            age: user.age,
            links: Links::new(),
        }
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            age: user.age,
            links: Links::new(),
        }
    }
}

fn embed(users: Vec<UserResponse>) -> Option<EmbeddedUsers> {
    if users.is_empty() {
        None
    } else {
        Some(EmbeddedUsers { users })
    }
}

impl From<Vec<UserResponse>> for UserCollectionResponse {
    fn from(users: Vec<UserResponse>) -> Self {
        Self {
            embedded: embed(users),
            links: Links::new(),
        }
    }
}

/// Converts a page of users to a page response without collection links.
impl From<Page<UserResponse>> for UserPageResponse {
    fn from(page: Page<UserResponse>) -> Self {
        Self {
            page: PageMetadata {
                size: page.info.size,
                total_elements: page.info.total_elements,
                total_pages: page.info.total_pages,
                number: page.info.page,
            },
            embedded: embed(page.content),
            links: Links::new(),
        }
    }
}
