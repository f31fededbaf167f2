//! Book category endpoints

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::category::{Category, CategoryQuery, CreateCategory, TitleQuery, UpdateCategory},
    models::user::AccessLevel,
};

use super::{AppJson, AppPath, AppQuery, AuthenticatedUser, Envelope};

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: Serialize + for<'a> ToSchema<'a>,
{
    /// List of records on this page
    pub items: Vec<T>,
    /// Total number of records
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Records per page
    pub per_page: i64,
}

/// Create a new book category
#[utoipa::path(
    post,
    path = "/book-category",
    tag = "book-category",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Envelope<Category>),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 409, description = "Title already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppJson(req): AppJson<CreateCategory>,
) -> AppResult<Envelope<Category>> {
    claims.require_level(AccessLevel::User)?;

    let created = state.services.categories.create(req).await?;
    Ok(Envelope::created("created book category", created))
}

/// Get a book category by id
#[utoipa::path(
    get,
    path = "/book-category/{id}",
    tag = "book-category",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category details", body = Envelope<Category>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_category_by_id(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Envelope<Category>> {
    claims.require_level(AccessLevel::User)?;

    let category = state.services.categories.get_by_id(id).await?;
    Ok(Envelope::ok("fetched book category", category))
}

/// Get a book category by title
#[utoipa::path(
    get,
    path = "/book-category/title",
    tag = "book-category",
    params(TitleQuery),
    responses(
        (status = 200, description = "Category details", body = Envelope<Category>),
        (status = 400, description = "Missing title", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_category_by_title(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<TitleQuery>,
) -> AppResult<Envelope<Category>> {
    let category = state.services.categories.get_by_title(query).await?;
    Ok(Envelope::ok("fetched book category", category))
}

/// List book categories in storage order
#[utoipa::path(
    get,
    path = "/book-category",
    tag = "book-category",
    params(CategoryQuery),
    responses(
        (status = 200, description = "List of categories", body = Envelope<PaginatedResponse<Category>>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<CategoryQuery>,
) -> AppResult<Envelope<PaginatedResponse<Category>>> {
    let (items, total, page, per_page) = state.services.categories.list(&query).await?;

    Ok(Envelope::ok(
        "fetched book categories",
        PaginatedResponse {
            items,
            total,
            page,
            per_page,
        },
    ))
}

/// Rename a book category
#[utoipa::path(
    patch,
    path = "/book-category/{id}",
    tag = "book-category",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Envelope<Category>),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Title already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_category_by_id(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppPath(id): AppPath<i32>,
    AppJson(req): AppJson<UpdateCategory>,
) -> AppResult<Envelope<Category>> {
    claims.require_level(AccessLevel::User)?;

    let updated = state.services.categories.update_by_id(id, req).await?;
    Ok(Envelope::ok("updated book category", updated))
}

/// Payload returned after deleting a category
#[derive(Serialize, ToSchema)]
pub struct DeletedCategory {
    pub id: i32,
}

/// Delete a book category (admin only)
#[utoipa::path(
    delete,
    path = "/book-category/{id}",
    tag = "book-category",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted", body = Envelope<DeletedCategory>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Admin level required", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_category_by_id(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppPath(id): AppPath<i32>,
) -> AppResult<Envelope<DeletedCategory>> {
    claims.require_level(AccessLevel::Admin)?;

    state.services.categories.delete_by_id(id).await?;
    Ok(Envelope::ok("deleted book category", DeletedCategory { id }))
}
