//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use roster_core::{Page, PageRequest, RosterError, RosterResult, Sort, User, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const SELECT_USERS: &str = "SELECT user_id, name, age FROM users";

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    user_id: String, // CHAR(36)
    name: String,
    age: i32,
}

impl TryFrom<UserRow> for User {
    type Error = RosterError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.user_id)
            .map_err(|e| RosterError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(User::with_id(UserId::from_uuid(id), row.name, row.age))
    }
}

/// ORDER BY clause for a sort. Columns come from a fixed enum, never from
/// user input; the id breaks ties so pages never overlap.
fn order_by(sort: Sort) -> String {
    format!(
        "ORDER BY {} {}, user_id ASC",
        sort.field.column(),
        sort.direction.sql()
    )
}

/// Escapes LIKE wildcards so the filter matches literally.
fn escape_like(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len());
    for c in filter.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn into_users(rows: Vec<UserRow>) -> RosterResult<Vec<User>> {
    rows.into_iter().map(User::try_from).collect()
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("{} WHERE user_id = ?", SELECT_USERS))
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} {}",
            SELECT_USERS,
            order_by(Sort::default())
        ))
        .fetch_all(self.pool.inner())
        .await?;

        into_users(rows)
    }

    async fn find_by_name_containing(
        &self,
        filter: &str,
        page: PageRequest,
    ) -> RosterResult<Page<User>> {
        debug!(
            "Finding users by name containing '{}', page: {}, size: {}, sort: {}",
            filter, page.page, page.size, page.sort
        );

        let pattern = escape_like(filter);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE LOWER(name) LIKE CONCAT('%', LOWER(?), '%')",
        )
        .bind(&pattern)
        .fetch_one(self.pool.inner())
        .await?;

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{} WHERE LOWER(name) LIKE CONCAT('%', LOWER(?), '%') {} LIMIT ? OFFSET ?",
            SELECT_USERS,
            order_by(page.sort)
        ))
        .bind(&pattern)
        .bind(page.limit() as i64)
        // past the end MySQL simply returns no rows
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(Page::new(into_users(rows)?, page.page, page.size, total as u64))
    }

    async fn save(&self, user: &User) -> RosterResult<User> {
        debug!("Saving new user: {}", user.id);

        sqlx::query("INSERT INTO users (user_id, name, age) VALUES (?, ?, ?)")
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(user.age)
            .execute(self.pool.inner())
            .await?;

        // MySQL doesn't support RETURNING, so insert then select
        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RosterError::Internal("Failed to fetch inserted user".to_string()))
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        debug!("Updating user: {}", user.id);

        sqlx::query("UPDATE users SET name = ?, age = ? WHERE user_id = ?")
            .bind(&user.name)
            .bind(user.age)
            .bind(user.id.to_string())
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| RosterError::not_found("User", user.id))
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
