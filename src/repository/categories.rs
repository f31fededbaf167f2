//! Book categories repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::Category,
};

use super::conflict_on_unique;

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new category and return the stored record
    pub async fn create(&self, title: &str) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO book_categories (title)
            VALUES ($1)
            RETURNING id, title, created_at
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                &format!("book category with title '{}' already exists", title),
            )
        })?;

        Ok(category)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, title, created_at FROM book_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no book category found with id = {}", id)))?;

        Ok(category)
    }

    /// Get category by title
    pub async fn get_by_title(&self, title: &str) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, title, created_at FROM book_categories WHERE title = $1",
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("no book category found with title = {}", title))
        })?;

        Ok(category)
    }

    /// Rename a category and return the updated record
    pub async fn update_by_id(&self, id: i32, title: &str) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE book_categories
            SET title = $1
            WHERE id = $2
            RETURNING id, title, created_at
            "#,
        )
        .bind(title)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_unique(
                e,
                &format!("book category with title '{}' already exists", title),
            )
        })?
        .ok_or_else(|| AppError::NotFound(format!("no book category found with id = {}", id)))?;

        Ok(category)
    }

    /// Delete a category by ID
    pub async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no book category found with id = {}",
                id
            )));
        }

        Ok(())
    }

    /// List categories in storage order with pagination
    pub async fn list(&self, page: i64, per_page: i64) -> AppResult<(Vec<Category>, i64)> {
        let offset = (page - 1) * per_page;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_categories")
            .fetch_one(&self.pool)
            .await?;

        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, created_at
            FROM book_categories
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((categories, total))
    }
}
