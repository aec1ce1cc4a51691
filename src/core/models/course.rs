use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Course {
    pub id: i32,
    pub name: String,
    pub price_cents: i64,
}
