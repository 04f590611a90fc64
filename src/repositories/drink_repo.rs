//! Drink repository for async database operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Drink, NewDrink, UpdateDrink};

#[derive(Clone)]
pub struct DrinkRepository {
    pool: AsyncDbPool,
}

impl DrinkRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &AsyncDbPool {
        &self.pool
    }

    /// Lists all drinks ordered by id.
    pub async fn list_all(&self) -> Result<Vec<Drink>, AppError> {
        use crate::schema::drinks::dsl::*;
        let mut conn = self.pool.get().await?;

        drinks
            .order(id.asc())
            .select(Drink::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn insert(conn: &mut AsyncPgConnection, new_drink: &NewDrink) -> QueryResult<Drink> {
        use crate::schema::drinks::dsl::*;

        diesel::insert_into(drinks)
            .values(new_drink)
            .returning(Drink::as_returning())
            .get_result(conn)
            .await
    }

    /// Applies `changes` and returns the updated row, or `None` if the id is unknown.
    pub async fn update(
        conn: &mut AsyncPgConnection,
        drink_id: i32,
        changes: &UpdateDrink,
    ) -> QueryResult<Option<Drink>> {
        use crate::schema::drinks::dsl::*;

        diesel::update(drinks.filter(id.eq(drink_id)))
            .set(changes)
            .returning(Drink::as_returning())
            .get_result(conn)
            .await
            .optional()
    }

    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(conn: &mut AsyncPgConnection, drink_id: i32) -> QueryResult<usize> {
        use crate::schema::drinks::dsl::*;

        diesel::delete(drinks.filter(id.eq(drink_id))).execute(conn).await
    }
}
