//! Business logic services

pub mod categories;
pub mod users;

use std::future::Future;
use std::time::Duration;

use validator::ValidationErrors;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: categories::CategoriesService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let db_timeout = Duration::from_secs(config.database.operation_timeout_secs);

        Self {
            categories: categories::CategoriesService::new(
                repository.clone(),
                config.pagination.clone(),
                db_timeout,
            ),
            users: users::UsersService::new(repository, config.auth.clone(), db_timeout),
        }
    }
}

/// Bound a database operation with the configured timeout. Hitting the limit
/// cancels the in-flight query future.
pub(crate) async fn with_db_timeout<T>(
    limit: Duration,
    fut: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Internal("database operation timed out".to_string())),
    }
}

/// First failed rule from a validator error set
pub(crate) fn first_validation_message(errors: &ValidationErrors) -> String {
    for (field, field_errors) in errors.field_errors() {
        if let Some(error) = field_errors.first() {
            if let Some(message) = &error.message {
                return message.to_string();
            }
            return format!("invalid value for field '{}'", field);
        }
    }
    "invalid input".to_string()
}
