use crate::core::models::enrollment::{EnrollmentStatus, EnrollmentUpdate};
use crate::core::ports::repository::{EnrollmentStore, Store};
use crate::error::Error;
use chrono::NaiveDate;

/// Admin edit as it arrives over HTTP; completion date is optional and only
/// meaningful when the status moves to completed.
#[derive(Debug, Clone)]
pub struct EnrollmentPatch {
    pub status: EnrollmentStatus,
    pub progress: i32,
    pub completed_on: Option<NaiveDate>,
}

/// Applies an admin edit, enforcing the write-boundary invariants: progress
/// stays within 0..=100 and a completion date is present exactly when the
/// status is completed (defaulted to today if the admin left it out).
pub async fn update_enrollment<D>(db: &mut D, id: i32, patch: EnrollmentPatch, today: NaiveDate) -> Result<(), Error>
where
    D: Store,
{
    if !(0..=100).contains(&patch.progress) {
        return Err(Error::Validation(format!("progress must be between 0 and 100, got {}", patch.progress)));
    }
    let completed_on = match (patch.status, patch.completed_on) {
        (EnrollmentStatus::Completed, Some(date)) => Some(date),
        (EnrollmentStatus::Completed, None) => Some(today),
        (_, Some(_)) => {
            return Err(Error::Validation("completion date is only valid on a completed enrollment".into()));
        }
        (_, None) => None,
    };
    let updated = EnrollmentStore::update_enrollment(
        db,
        id,
        EnrollmentUpdate {
            status: patch.status,
            progress: patch.progress,
            completed_on,
        },
    )
    .await?;
    if updated == 0 {
        return Err(Error::NotFound(format!("enrollment {}", id)));
    }
    Ok(())
}

/// Unconditional removal. The originating request, if still around, is not
/// touched.
pub async fn delete_enrollment<D>(db: &mut D, id: i32) -> Result<(), Error>
where
    D: Store,
{
    let deleted = EnrollmentStore::delete_enrollment(db, id).await?;
    if deleted == 0 {
        return Err(Error::NotFound(format!("enrollment {}", id)));
    }
    Ok(())
}
