use crate::core::models::enrollment::{EnrollmentInsert, EnrollmentStatus};
use crate::core::models::pending_enrollment::PendingEnrollmentInsert;
use crate::core::ports::repository::{EnrollmentRequestStore, EnrollmentStore, PendingEnrollmentStore, Store, TxStore, UserStore};
use crate::error::Error;
use chrono::NaiveDate;

/// Which branch an approval took, so the caller can tell the admin whether
/// the enrollment exists already or waits for the submitter to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    Linked { enrollment_id: i32 },
    Deferred,
}

/// Approves a pending request. The status flip is a compare-and-set on
/// `pending`, so a request leaves pending exactly once and at most one
/// enrollment is ever created for it, even under concurrent approvals. The
/// flip and the enrollment (or reconciliation row) commit together.
pub async fn approve_request<T>(mut tx: T, id: i32, today: NaiveDate) -> Result<ApprovalOutcome, Error>
where
    T: TxStore,
{
    let req = EnrollmentRequestStore::get_request(&mut tx, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("enrollment request {}", id)))?;
    let flipped = EnrollmentRequestStore::mark_approved(&mut tx, id).await?;
    if flipped == 0 {
        return Err(Error::Validation(format!("enrollment request {} has already been decided", id)));
    }
    let outcome = match UserStore::get_user_by_email(&mut tx, &req.email).await? {
        Some(user) => {
            let enrollment_id = EnrollmentStore::insert_enrollment(
                &mut tx,
                EnrollmentInsert {
                    user_id: user.id,
                    course_id: req.course_id,
                    user_name: user.name,
                    course_name: req.course_name,
                    progress: 0,
                    status: EnrollmentStatus::Active,
                    enrolled_on: today,
                    completed_on: None,
                },
            )
            .await?;
            ApprovalOutcome::Linked { enrollment_id }
        }
        None => {
            PendingEnrollmentStore::insert_pending(
                &mut tx,
                PendingEnrollmentInsert {
                    email: req.email,
                    course_id: req.course_id,
                    course_name: req.course_name,
                    request_id: req.id,
                },
            )
            .await?;
            ApprovalOutcome::Deferred
        }
    };
    tx.commit().await?;
    Ok(outcome)
}

/// Rejects a pending request, storing the optional reason. Never creates or
/// touches an enrollment. Same pending-only precondition as approval.
pub async fn reject_request<D>(db: &mut D, id: i32, reason: Option<&str>) -> Result<(), Error>
where
    D: Store,
{
    EnrollmentRequestStore::get_request(db, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("enrollment request {}", id)))?;
    let flipped = EnrollmentRequestStore::mark_rejected(db, id, reason).await?;
    if flipped == 0 {
        return Err(Error::Validation(format!("enrollment request {} has already been decided", id)));
    }
    Ok(())
}

/// Removes a request regardless of status. Enrollments created from it are
/// left alone.
pub async fn delete_request<D>(db: &mut D, id: i32) -> Result<(), Error>
where
    D: Store,
{
    let deleted = EnrollmentRequestStore::delete_request(db, id).await?;
    if deleted == 0 {
        return Err(Error::NotFound(format!("enrollment request {}", id)));
    }
    Ok(())
}
