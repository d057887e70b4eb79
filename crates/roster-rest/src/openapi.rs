//! OpenAPI documentation configuration.

use crate::controllers::{HealthResponse, ReadinessResponse};
use roster_core::ErrorResponse;
use roster_service::{
    EmbeddedUsers, PageMetadata, UserCollectionResponse, UserPageResponse, UserRequest,
    UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "User registry with optional HAL hypermedia links",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::list_users_paged,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            UserRequest,
            UserResponse,
            EmbeddedUsers,
            UserCollectionResponse,
            PageMetadata,
            UserPageResponse,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
