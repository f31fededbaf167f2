//! API handlers for the Libris REST endpoints

pub mod categories;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Uniform response envelope returned by every endpoint
#[derive(Serialize, ToSchema)]
pub struct Envelope<T>
where
    T: Serialize,
{
    /// Human-readable outcome of the operation
    pub message: String,
    /// Payload, omitted when there is none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// HTTP status code, mirrored in the body
    pub status: u16,
}

impl<T> Envelope<T>
where
    T: Serialize,
{
    pub fn new(message: impl Into<String>, data: T, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status: status.as_u16(),
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(message, data, StatusCode::OK)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(message, data, StatusCode::CREATED)
    }
}

impl<T> IntoResponse for Envelope<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Envelope for endpoints that carry no payload
#[derive(Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub message: String,
    pub status: u16,
}

impl MessageEnvelope {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for MessageEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// JSON extractor whose rejection uses the response envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query extractor whose rejection uses the response envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path extractor whose rejection uses the response envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Extractor for the authenticated user's verified claims.
///
/// Accepts a bearer `Authorization` header, falling back to the
/// `access_token` cookie.
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.to_string());

        let token = match bearer {
            Some(token) => token,
            None => CookieJar::from_headers(&parts.headers)
                .get(ACCESS_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| {
                    AppError::Authentication("missing or empty access token".to_string())
                })?,
        };

        // Validate JWT token using the secret from configuration
        let claims = UserClaims::from_token(&token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_envelope_has_no_data() {
        let envelope = MessageEnvelope::new("successful logout", StatusCode::OK);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["message"], "successful logout");
        assert_eq!(json["status"], 200);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_envelope_carries_data() {
        let envelope = Envelope::created("service is healthy", "0.1.0".to_string());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], 201);
        assert_eq!(json["data"], "0.1.0");
    }
}
