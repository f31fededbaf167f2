//! Book category service

use std::time::Duration;

use validator::Validate;

use crate::{
    config::PaginationConfig,
    error::{AppError, AppResult},
    models::category::{Category, CategoryQuery, CreateCategory, TitleQuery, UpdateCategory},
    repository::Repository,
};

use super::{first_validation_message, with_db_timeout};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
    pagination: PaginationConfig,
    db_timeout: Duration,
}

impl CategoriesService {
    pub fn new(repository: Repository, pagination: PaginationConfig, db_timeout: Duration) -> Self {
        Self {
            repository,
            pagination,
            db_timeout,
        }
    }

    /// Create a new category
    pub async fn create(&self, req: CreateCategory) -> AppResult<Category> {
        req.validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        with_db_timeout(self.db_timeout, self.repository.categories.create(&req.title)).await
    }

    /// Get a category by id
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        with_db_timeout(self.db_timeout, self.repository.categories.get_by_id(id)).await
    }

    /// Get a category by title
    pub async fn get_by_title(&self, query: TitleQuery) -> AppResult<Category> {
        query
            .validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        with_db_timeout(
            self.db_timeout,
            self.repository.categories.get_by_title(&query.title),
        )
        .await
    }

    /// Rename a category
    pub async fn update_by_id(&self, id: i32, req: UpdateCategory) -> AppResult<Category> {
        req.validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        with_db_timeout(
            self.db_timeout,
            self.repository.categories.update_by_id(id, &req.title),
        )
        .await
    }

    /// Delete a category by id
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        with_db_timeout(self.db_timeout, self.repository.categories.delete_by_id(id)).await
    }

    /// List categories in storage order
    pub async fn list(&self, query: &CategoryQuery) -> AppResult<(Vec<Category>, i64, i64, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query
            .per_page
            .unwrap_or(self.pagination.page_size)
            .clamp(1, self.pagination.page_size_large);

        let (categories, total) = with_db_timeout(
            self.db_timeout,
            self.repository.categories.list(page, per_page),
        )
        .await?;

        Ok((categories, total, page, per_page))
    }
}
