use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::Category;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: AsyncDbPool,
}

impl CategoryRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Lists all categories ordered by id.
    pub async fn list_all(&self) -> Result<Vec<Category>, AppError> {
        use crate::schema::categories::dsl::*;
        let mut conn = self.pool.get().await?;

        categories
            .order(id.asc())
            .select(Category::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
