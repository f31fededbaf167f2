//! User model, access levels and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Access levels used to gate route authorization.
///
/// A caller with a level numerically greater than or equal to the route's
/// required level is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum AccessLevel {
    User = 50,
    Admin = 100,
}

impl AccessLevel {
    /// Whether this level satisfies the given required level
    pub fn permits(self, required: AccessLevel) -> bool {
        self as i16 >= required as i16
    }
}

impl From<i16> for AccessLevel {
    fn from(v: i16) -> Self {
        if v >= AccessLevel::Admin as i16 {
            AccessLevel::Admin
        } else {
            AccessLevel::User
        }
    }
}

// Access levels travel as plain integers in JSON and JWT claims
impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i16(*self as i16)
    }
}

impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = i16::deserialize(deserializer)?;
        Ok(AccessLevel::from(v))
    }
}

// SQLx conversion for AccessLevel (stored as SMALLINT)
impl sqlx::Type<Postgres> for AccessLevel {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i16 as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for AccessLevel {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let v: i16 = Decode::<Postgres>::decode(value)?;
        Ok(AccessLevel::from(v))
    }
}

impl Encode<'_, Postgres> for AccessLevel {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <i16 as Encode<Postgres>>::encode(*self as i16, buf)
    }
}

/// A library user as stored
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub joined_at: DateTime<Utc>,
    pub access_level: AccessLevel,
}

/// Public view of a user, safe to return to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub joined_at: DateTime<Utc>,
    #[schema(value_type = i16)]
    pub access_level: AccessLevel,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            joined_at: user.joined_at,
            access_level: user.access_level,
        }
    }
}

/// Request body for registration
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(email(message = "wrong email format"))]
    pub email: String,
    pub password: String,
}

/// Request body for login
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// JWT claim set embedded in access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject: the user's email
    pub sub: String,
    pub access_level: AccessLevel,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn new(email: &str, access_level: AccessLevel, expiration_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: email.to_string(),
            access_level,
            iat: now,
            exp: now + expiration_hours as i64 * 3600,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Permit the request only if the caller's level satisfies the route's
    pub fn require_level(&self, required: AccessLevel) -> Result<(), AppError> {
        if self.access_level.permits(required) {
            Ok(())
        } else {
            Err(AppError::Authorization("no permission for action".to_string()))
        }
    }
}
