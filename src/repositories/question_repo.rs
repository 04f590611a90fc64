//! Question repository: paging, category filters, search and quiz eligibility.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewQuestion, Question};

#[derive(Clone)]
pub struct QuestionRepository {
    pool: AsyncDbPool,
}

impl QuestionRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &AsyncDbPool {
        &self.pool
    }

    /// One window of the id-ordered question list, plus the total count.
    ///
    /// # Arguments
    /// * `offset` - Number of records to skip
    /// * `limit` - Maximum number of records to return
    pub async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Question>, i64), AppError> {
        use crate::schema::questions::dsl::*;
        let mut conn = self.pool.get().await?;

        let page = questions
            .order(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Question::as_select())
            .load(&mut conn)
            .await?;

        let total = questions.count().get_result::<i64>(&mut conn).await?;

        Ok((page, total))
    }

    /// One window of a category's id-ordered questions, plus the category's
    /// total count.
    pub async fn by_category_paginated(
        &self,
        category_id: i32,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Question>, i64), AppError> {
        use crate::schema::questions::dsl::*;
        let mut conn = self.pool.get().await?;

        let page = questions
            .filter(category.eq(category_id))
            .order(id.asc())
            .offset(offset)
            .limit(limit)
            .select(Question::as_select())
            .load(&mut conn)
            .await?;

        let total = questions
            .filter(category.eq(category_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await?;

        Ok((page, total))
    }

    /// Case-insensitive substring search over the question text.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, AppError> {
        use crate::schema::questions::dsl::*;
        let mut conn = self.pool.get().await?;

        questions
            .filter(question.ilike(super::contains_pattern(term)))
            .order(id.asc())
            .select(Question::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Questions in `category_filter` (any category when `None`) whose ids
    /// are not in `served`.
    pub async fn eligible(
        &self,
        category_filter: Option<i32>,
        served: &[i32],
    ) -> Result<Vec<Question>, AppError> {
        use crate::schema::questions::dsl::*;
        let mut conn = self.pool.get().await?;

        let mut query = questions
            .filter(id.ne_all(served))
            .order(id.asc())
            .select(Question::as_select())
            .into_boxed();
        if let Some(wanted) = category_filter {
            query = query.filter(category.eq(wanted));
        }

        query.load(&mut conn).await.map_err(AppError::from)
    }

    pub async fn insert(
        conn: &mut AsyncPgConnection,
        new_question: &NewQuestion,
    ) -> QueryResult<Question> {
        use crate::schema::questions::dsl::*;

        diesel::insert_into(questions)
            .values(new_question)
            .returning(Question::as_returning())
            .get_result(conn)
            .await
    }

    /// # Returns
    /// The number of affected rows (0 or 1)
    pub async fn delete(conn: &mut AsyncPgConnection, question_id: i32) -> QueryResult<usize> {
        use crate::schema::questions::dsl::*;

        diesel::delete(questions.filter(id.eq(question_id)))
            .execute(conn)
            .await
    }
}
