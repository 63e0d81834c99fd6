use color_eyre::Result;

use super::models::Category;
use super::Db;

impl Db {
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(categories)
    }

    pub async fn get_category(&self, category_id: i32) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    pub async fn insert_category(&self, kind: &str) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (type) VALUES (?) RETURNING id, type",
        )
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new category created with id: {}", category.id);
        Ok(category)
    }

    /// Questions keep their category reference; nothing cascades.
    pub async fn delete_category(&self, category_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(category_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
