//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A person registered in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier for the user, assigned once on creation.
    pub id: UserId,

    /// Display name, never blank.
    #[validate(length(min = 1, max = 255), custom(function = "crate::validation::rules::not_blank"))]
    pub name: String,

    /// Age in years.
    #[validate(range(min = 16))]
    pub age: i32,
}

impl User {
    /// The youngest age a user may register with.
    pub const MIN_AGE: i32 = 16;

    /// Creates a new user with a freshly generated identifier.
    #[must_use]
    pub fn new(name: String, age: i32) -> Self {
        Self::with_id(UserId::new(), name, age)
    }

    /// Creates a user with a known identifier (e.g. loaded from storage).
    #[must_use]
    pub const fn with_id(id: UserId, name: String, age: i32) -> Self {
        Self { id, name, age }
    }

    /// Overwrites the mutable attributes, keeping the identifier.
    pub fn rename(&mut self, name: String, age: i32) {
        self.name = name;
        self.age = age;
    }
}
