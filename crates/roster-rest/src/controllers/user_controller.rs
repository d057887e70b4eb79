//! User management controller.

use crate::{
    extractors::{Hypermedia, PageQuery, UserIdPath, ValidatedJson},
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::ErrorResponse;
use roster_service::{UserCollectionResponse, UserPageResponse, UserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/paged", get(list_users_paged))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User id (UUID)"),
        ("hateoas" = Option<bool>, Query, description = "Attach hypermedia links")
    ),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    hypermedia: Hypermedia,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let response = state.user_service.find_by_id(id, hypermedia.links()).await?;
    ok(response)
}

/// List all users, ordered by name.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("hateoas" = Option<bool>, Query, description = "Attach hypermedia links")
    ),
    responses(
        (status = 200, description = "Every user", body = UserCollectionResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    hypermedia: Hypermedia,
) -> ApiResult<UserCollectionResponse> {
    debug!("List users request");

    let response = state.user_service.find_all(hypermedia.links()).await?;
    ok(response)
}

/// List one page of users whose name contains `name`.
#[utoipa::path(
    get,
    path = "/users/paged",
    tag = "users",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive name filter"),
        ("page" = Option<usize>, Query, description = "Zero-based page index"),
        ("size" = Option<usize>, Query, description = "Page size, 1 to 100"),
        ("sort" = Option<String>, Query, description = "`field[,asc|desc]` with field one of id, name, age"),
        ("hateoas" = Option<bool>, Query, description = "Attach hypermedia links")
    ),
    responses(
        (status = 200, description = "One page of users", body = UserPageResponse),
        (status = 400, description = "Invalid paging parameters", body = ErrorResponse)
    )
)]
pub async fn list_users_paged(
    State(state): State<AppState>,
    query: PageQuery,
    hypermedia: Hypermedia,
) -> ApiResult<UserPageResponse> {
    debug!(
        "List users page request: filter='{}', page={}, size={}",
        query.filter, query.page.page, query.page.size
    );

    let response = state
        .user_service
        .find_page(&query.filter, query.page, hypermedia.links())
        .await?;
    ok(response)
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserRequest,
    params(
        ("hateoas" = Option<bool>, Query, description = "Attach hypermedia links")
    ),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    hypermedia: Hypermedia,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    debug!("Create user request: {:?}", request.name);

    let response = state.user_service.create(request, hypermedia.links()).await?;
    Ok(created(response))
}

/// Replace a user's name and age.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    request_body = UserRequest,
    params(
        ("id" = String, Path, description = "User id (UUID)"),
        ("hateoas" = Option<bool>, Query, description = "Attach hypermedia links")
    ),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    hypermedia: Hypermedia,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update user request: {}", id);

    let response = state
        .user_service
        .update(id, request, hypermedia.links())
        .await?;
    ok(response)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User id (UUID)")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    state.user_service.delete(id).await?;
    Ok(no_content())
}
