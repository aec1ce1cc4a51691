use crate::core::models::enrollment_request::EnrollmentRequestInsert;
use crate::core::ports::repository::{CourseStore, EnrollmentRequestStore, Store};
use crate::error::Error;

/// A new enrollment request as received from the public intake form. The
/// payment proof has already been written to file storage by the handler;
/// `payment_proof` is the stored name.
#[derive(Debug, Clone)]
pub struct RequestSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub course_id: i32,
    pub payment_method: String,
    pub transaction_ref: String,
    pub payment_proof: String,
    pub user_id: Option<i32>,
}

/// Persists a new request with status pending. No de-duplication: a second
/// submission for the same email/course pair produces a second record.
pub async fn submit_request<D>(db: &mut D, sub: RequestSubmission) -> Result<i32, Error>
where
    D: Store,
{
    for (name, value) in [
        ("full_name", &sub.full_name),
        ("email", &sub.email),
        ("phone", &sub.phone),
        ("address", &sub.address),
        ("city", &sub.city),
        ("state", &sub.state),
        ("postal_code", &sub.postal_code),
        ("payment_method", &sub.payment_method),
        ("transaction_ref", &sub.transaction_ref),
        ("payment_proof", &sub.payment_proof),
    ] {
        if value.trim().is_empty() {
            return Err(Error::Validation(format!("{} is required", name)));
        }
    }
    let course = CourseStore::get_course(db, sub.course_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("course {}", sub.course_id)))?;
    let id = EnrollmentRequestStore::insert_request(
        db,
        EnrollmentRequestInsert {
            full_name: sub.full_name,
            email: sub.email,
            phone: sub.phone,
            address: sub.address,
            city: sub.city,
            state: sub.state,
            postal_code: sub.postal_code,
            course_id: course.id,
            course_name: course.name,
            course_price_cents: course.price_cents,
            payment_method: sub.payment_method,
            transaction_ref: sub.transaction_ref,
            payment_proof: sub.payment_proof,
            is_guest: sub.user_id.is_none(),
            user_id: sub.user_id,
        },
    )
    .await?;
    Ok(id)
}
