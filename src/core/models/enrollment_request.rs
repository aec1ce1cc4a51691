use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A submitted enrollment request. Course name and price are denormalized at
/// submission time and may go stale if the course record changes later.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EnrollmentRequest {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub course_id: i32,
    pub course_name: String,
    pub course_price_cents: i64,
    pub payment_method: String,
    pub transaction_ref: String,
    pub payment_proof: String,
    pub is_guest: bool,
    pub user_id: Option<i32>,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EnrollmentRequestInsert {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub course_id: i32,
    pub course_name: String,
    pub course_price_cents: i64,
    pub payment_method: String,
    pub transaction_ref: String,
    pub payment_proof: String,
    pub is_guest: bool,
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestQuery {
    pub status_eq: Option<RequestStatus>,
}
