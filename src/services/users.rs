//! Registration, login and token issuance

use std::time::Duration;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{AccessLevel, LoginUser, RegisterUser, User, UserClaims, UserInfo},
    repository::Repository,
};

use super::{first_validation_message, with_db_timeout};

/// Symbols accepted by the password policy
const PASSWORD_SYMBOLS: &str = "@#$%&/?.,-_+=)(^;:!";

/// Check a candidate password against the strength policy. The first failed
/// rule wins.
pub fn validate_password_strength(password: &str, min_len: usize) -> Result<(), String> {
    if password.chars().count() < min_len {
        return Err(format!(
            "password is too short, minimum length is {}",
            min_len
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("password must contain at least one digit".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("password must contain at least one uppercase letter".to_string());
    }

    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err(format!(
            "password must contain at least one special symbol from {}",
            PASSWORD_SYMBOLS
        ));
    }

    Ok(())
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
    db_timeout: Duration,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig, db_timeout: Duration) -> Self {
        Self {
            repository,
            config,
            db_timeout,
        }
    }

    /// Register a new library user at the base access level
    pub async fn register(&self, req: RegisterUser) -> AppResult<User> {
        req.validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        validate_password_strength(&req.password, self.config.password_min_len)
            .map_err(AppError::Validation)?;

        let password_hash = hash_password(&req.password)?;

        with_db_timeout(
            self.db_timeout,
            self.repository
                .users
                .create(&req.email, &password_hash, AccessLevel::User),
        )
        .await
    }

    /// Authenticate by email and password and issue a JWT token
    pub async fn login(&self, req: LoginUser) -> AppResult<(String, UserInfo)> {
        let user = with_db_timeout(self.db_timeout, self.repository.users.get_by_email(&req.email))
            .await?
            .ok_or_else(|| AppError::Authentication("invalid email or password".to_string()))?;

        if !verify_password(&user.password_hash, &req.password)? {
            return Err(AppError::Authentication(
                "invalid email or password".to_string(),
            ));
        }

        let claims = UserClaims::new(
            &user.email,
            user.access_level,
            self.config.jwt_expiration_hours,
        );
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, UserInfo::from(user)))
    }

    /// Public profile of the user behind the given email
    pub async fn profile(&self, email: &str) -> AppResult<UserInfo> {
        let user = with_db_timeout(self.db_timeout, self.repository.users.get_by_email(email))
            .await?
            .ok_or_else(|| AppError::NotFound("user with this email does not exist".to_string()))?;

        Ok(UserInfo::from(user))
    }

    /// Cookie/token lifetime in hours, as configured
    pub fn token_expiration_hours(&self) -> u64 {
        self.config.jwt_expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let err = validate_password_strength("Ab1!", 10).unwrap_err();
        assert!(err.contains("too short"));
    }

    #[test]
    fn test_password_needs_digit() {
        let err = validate_password_strength("Abcdefghij!", 10).unwrap_err();
        assert!(err.contains("digit"));
    }

    #[test]
    fn test_password_needs_uppercase() {
        let err = validate_password_strength("abcdefghi1!", 10).unwrap_err();
        assert!(err.contains("uppercase"));
    }

    #[test]
    fn test_password_needs_symbol() {
        let err = validate_password_strength("Abcdefghi1x", 10).unwrap_err();
        assert!(err.contains("special symbol"));
    }

    #[test]
    fn test_first_failed_rule_wins() {
        // Short and missing everything else: length is reported
        let err = validate_password_strength("abc", 10).unwrap_err();
        assert!(err.contains("too short"));
    }

    #[test]
    fn test_valid_password_accepted() {
        assert!(validate_password_strength("Str0ng-enough", 10).is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("Str0ng-enough").unwrap();
        assert!(verify_password(&hash, "Str0ng-enough").unwrap());
        assert!(!verify_password(&hash, "wrong-password").unwrap());
    }
}
