use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Reconciliation row written when an approved request has no matching user
/// account yet. Drained by signup for the same email.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PendingEnrollment {
    pub id: i32,
    pub email: String,
    pub course_id: i32,
    pub course_name: String,
    pub request_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PendingEnrollmentInsert {
    pub email: String,
    pub course_id: i32,
    pub course_name: String,
    pub request_id: i32,
}
