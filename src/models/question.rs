use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::questions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i32,
}

/// `difficulty` and `category` are left optional so a missing value reaches
/// the store and fails its NOT NULL constraint inside the write transaction.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::questions)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: Option<i32>,
    pub category: Option<i32>,
}
