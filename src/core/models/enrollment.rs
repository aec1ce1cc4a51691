use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "enrollment_status", rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

/// An active enrollment. Independent aggregate from the request it may have
/// originated from; deleting one never touches the other.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Enrollment {
    pub id: i32,
    pub user_id: i32,
    pub course_id: i32,
    pub user_name: String,
    pub course_name: String,
    pub progress: i32,
    pub status: EnrollmentStatus,
    pub enrolled_on: NaiveDate,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct EnrollmentInsert {
    pub user_id: i32,
    pub course_id: i32,
    pub user_name: String,
    pub course_name: String,
    pub progress: i32,
    pub status: EnrollmentStatus,
    pub enrolled_on: NaiveDate,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct EnrollmentUpdate {
    pub status: EnrollmentStatus,
    pub progress: i32,
    pub completed_on: Option<NaiveDate>,
}
