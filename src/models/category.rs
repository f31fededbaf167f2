//! Book category model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A book category as stored in the catalog
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Category {
    /// Identifier assigned by storage
    pub id: i32,
    /// Category title, unique across the catalog
    pub title: String,
    /// Creation timestamp assigned by storage
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

/// Request body for renaming a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

/// Query parameters for listing categories
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CategoryQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Query parameters for the lookup-by-title endpoint
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct TitleQuery {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_rejected() {
        let req = CreateCategory {
            title: String::new(),
        };
        assert!(req.validate().is_err());

        let req = CreateCategory {
            title: "Science Fiction".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
