use crate::core::models::enrollment::{Enrollment, EnrollmentStatus};
use crate::core::ports::repository::EnrollmentStore;
use crate::core::services::enrollment::{self, EnrollmentPatch};
use crate::database::sqlx::PgStoreManager;
use crate::error::Error;
use crate::response::{DeleteResponse, List, UpdateResponse};
use actix_web::web::{Data, Json, Path};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

pub async fn list(manager: Data<PgStoreManager>) -> Result<Json<List<Enrollment>>, Error> {
    let mut store = manager.store().await?;
    let enrollments = EnrollmentStore::list_enrollments(&mut store).await?;
    let total = enrollments.len() as i64;
    Ok(Json(List::new(enrollments, total)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    status: EnrollmentStatus,
    progress: i32,
    completed_on: Option<NaiveDate>,
}

pub async fn update(enrollment_id: Path<(i32,)>, Json(req): Json<UpdateRequest>, manager: Data<PgStoreManager>) -> Result<Json<UpdateResponse>, Error> {
    let id = enrollment_id.into_inner().0;
    let mut store = manager.store().await?;
    enrollment::update_enrollment(
        &mut store,
        id,
        EnrollmentPatch {
            status: req.status,
            progress: req.progress,
            completed_on: req.completed_on,
        },
        Utc::now().date_naive(),
    )
    .await?;
    Ok(Json(UpdateResponse::new(1)))
}

pub async fn remove(enrollment_id: Path<(i32,)>, manager: Data<PgStoreManager>) -> Result<Json<DeleteResponse>, Error> {
    let id = enrollment_id.into_inner().0;
    let mut store = manager.store().await?;
    enrollment::delete_enrollment(&mut store, id).await?;
    Ok(Json(DeleteResponse::new(1)))
}
