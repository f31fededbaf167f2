//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{categories, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "University Library Backend REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Book categories
        categories::create_category,
        categories::get_category_by_id,
        categories::get_category_by_title,
        categories::list_categories,
        categories::update_category_by_id,
        categories::delete_category_by_id,
        // Users
        users::register,
        users::login,
        users::logout,
        users::me,
    ),
    components(
        schemas(
            // Book categories
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            categories::DeletedCategory,
            // Users
            crate::models::user::UserInfo,
            crate::models::user::RegisterUser,
            crate::models::user::LoginUser,
            users::RegisteredUser,
            users::LoginData,
            // Health
            health::HealthResponse,
            // Envelope
            crate::api::MessageEnvelope,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "book-category", description = "Book category management"),
        (name = "user", description = "Registration and authentication")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
