//! User registration, login and profile endpoints

use axum::{extract::State, http::StatusCode};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::user::{AccessLevel, LoginUser, RegisterUser, UserInfo},
};

use super::{AppJson, AuthenticatedUser, Envelope, MessageEnvelope, ACCESS_TOKEN_COOKIE};

/// Payload returned after a successful registration
#[derive(Serialize, ToSchema)]
pub struct RegisteredUser {
    pub id: Uuid,
}

/// Payload returned after a successful login
#[derive(Serialize, ToSchema)]
pub struct LoginData {
    pub token: String,
    pub token_type: String,
    pub user: UserInfo,
}

/// Register a new library user
#[utoipa::path(
    post,
    path = "/user/register",
    tag = "user",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = Envelope<RegisteredUser>),
        (status = 400, description = "Invalid email or weak password", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    AppJson(req): AppJson<RegisterUser>,
) -> AppResult<Envelope<RegisteredUser>> {
    let user = state.services.users.register(req).await?;
    Ok(Envelope::created(
        "registered user",
        RegisteredUser { id: user.id },
    ))
}

/// Login and receive an access token
///
/// The token is returned in the body and also set as an HttpOnly
/// `access_token` cookie.
#[utoipa::path(
    post,
    path = "/user/login",
    tag = "user",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Login successful", body = Envelope<LoginData>),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    jar: CookieJar,
    AppJson(req): AppJson<LoginUser>,
) -> AppResult<(CookieJar, Envelope<LoginData>)> {
    let (token, user) = state.services.users.login(req).await?;

    let hours = state.services.users.token_expiration_hours();
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(hours as i64))
        .build();

    Ok((
        jar.add(cookie),
        Envelope::ok(
            "successful login",
            LoginData {
                token,
                token_type: "Bearer".to_string(),
                user,
            },
        ),
    ))
}

/// Logout: clear the access token cookie
///
/// Tokens are stateless, so logout only removes the cookie; an already
/// issued bearer token stays valid until it expires.
#[utoipa::path(
    post,
    path = "/user/logout",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Logout successful", body = MessageEnvelope),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn logout(
    AuthenticatedUser(claims): AuthenticatedUser,
    jar: CookieJar,
) -> AppResult<(CookieJar, MessageEnvelope)> {
    claims.require_level(AccessLevel::User)?;

    let removal = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .build();

    Ok((
        jar.remove(removal),
        MessageEnvelope::new("successful logout", StatusCode::OK),
    ))
}

/// Profile of the authenticated user
#[utoipa::path(
    get,
    path = "/user/me",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = Envelope<UserInfo>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Envelope<UserInfo>> {
    let profile = state.services.users.profile(&claims.sub).await?;
    Ok(Envelope::ok("fetched user profile", profile))
}
