use crate::context::MaybeUser;
use crate::core::models::enrollment_request::{EnrollmentRequest, RequestQuery, RequestStatus};
use crate::core::ports::repository::EnrollmentRequestStore;
use crate::core::ports::storer::FileStorer;
use crate::core::services::decision::{self, ApprovalOutcome};
use crate::core::services::intake::{self, RequestSubmission};
use crate::database::sqlx::PgStoreManager;
use crate::error::Error;
use crate::handlers::upload::{file_extension, read_capped};
use crate::response::{CreateResponse, DeleteResponse, List, UpdateResponse};
use actix_multipart::Multipart;
use actix_web::web::{Data, Json, Path, Query};
use chrono::Utc;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
struct IntakeForm {
    full_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    postal_code: Option<String>,
    course_id: Option<String>,
    payment_method: Option<String>,
    transaction_ref: Option<String>,
}

impl IntakeForm {
    fn set(&mut self, name: &str, value: String) {
        match name {
            "full_name" => self.full_name = Some(value),
            "email" => self.email = Some(value),
            "phone" => self.phone = Some(value),
            "address" => self.address = Some(value),
            "city" => self.city = Some(value),
            "state" => self.state = Some(value),
            "postal_code" => self.postal_code = Some(value),
            "course_id" => self.course_id = Some(value),
            "payment_method" => self.payment_method = Some(value),
            "transaction_ref" => self.transaction_ref = Some(value),
            // unknown fields are ignored, like any browser form post
            _ => {}
        }
    }
}

fn require(value: Option<String>, name: &str) -> Result<String, Error> {
    value.ok_or_else(|| Error::Validation(format!("{} is required", name)))
}

/// Public intake: multipart form with the contact/payment fields and the
/// payment-proof image. A valid bearer token marks the request as
/// non-guest; anonymous submissions are guests.
pub async fn submit<F>(mut payload: Multipart, user: MaybeUser, manager: Data<PgStoreManager>, storer: Data<F>) -> Result<Json<CreateResponse>, Error>
where
    F: FileStorer + 'static,
{
    let mut form = IntakeForm::default();
    let mut proof: Option<(Vec<u8>, Option<String>)> = None;
    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().to_owned();
        if name == "payment_proof" {
            let is_image = field.content_type().map(|m| m.type_().as_str() == "image").unwrap_or(false);
            if !is_image {
                return Err(Error::Validation("payment proof must be an image".into()));
            }
            let ext = file_extension(&field);
            let content = read_capped(&mut field, "payment proof").await?;
            proof = Some((content, ext));
        } else {
            let content = read_capped(&mut field, &name).await?;
            let value = String::from_utf8(content).map_err(|_| Error::Validation(format!("{} is not valid utf-8", name)))?;
            form.set(&name, value);
        }
    }
    let course_id = require(form.course_id, "course_id")?.parse::<i32>()?;
    let full_name = require(form.full_name, "full_name")?;
    let email = require(form.email, "email")?;
    let phone = require(form.phone, "phone")?;
    let address = require(form.address, "address")?;
    let city = require(form.city, "city")?;
    let state = require(form.state, "state")?;
    let postal_code = require(form.postal_code, "postal_code")?;
    let payment_method = require(form.payment_method, "payment_method")?;
    let transaction_ref = require(form.transaction_ref, "transaction_ref")?;
    let (content, ext) = proof.ok_or_else(|| Error::Validation("payment_proof is required".into()))?;
    // the proof only touches disk once the form is valid
    let stored = storer.write(&content, ext.as_deref())?;
    let submission = RequestSubmission {
        full_name,
        email,
        phone,
        address,
        city,
        state,
        postal_code,
        course_id,
        payment_method,
        transaction_ref,
        payment_proof: stored.clone(),
        user_id: user.0.map(|u| u.id),
    };
    let mut store = manager.store().await?;
    let id = match intake::submit_request(&mut store, submission).await {
        Ok(id) => id,
        Err(err) => {
            if let Err(e) = storer.remove(&stored) {
                log::warn!("failed to remove unreferenced proof {}: {}", stored, e);
            }
            return Err(err);
        }
    };
    log::info!("enrollment request {} submitted for course {}", id, course_id);
    Ok(Json(CreateResponse { id }))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    status: Option<RequestStatus>,
}

/// Admin review queue. Free-text search over name/email/course stays on the
/// caller's side; the full set for the selected status is returned.
pub async fn list(Query(ListParams { status }): Query<ListParams>, manager: Data<PgStoreManager>) -> Result<Json<List<EnrollmentRequest>>, Error> {
    let mut store = manager.store().await?;
    let requests = EnrollmentRequestStore::list_requests(&mut store, &RequestQuery { status_eq: status }).await?;
    let total = requests.len() as i64;
    Ok(Json(List::new(requests, total)))
}

#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub id: i32,
    pub enrollment_id: Option<i32>,
    pub linked: bool,
}

pub async fn approve(request_id: Path<(i32,)>, manager: Data<PgStoreManager>) -> Result<Json<ApproveResponse>, Error> {
    let id = request_id.into_inner().0;
    let tx = manager.tx().await?;
    let outcome = decision::approve_request(tx, id, Utc::now().date_naive()).await?;
    let resp = match outcome {
        ApprovalOutcome::Linked { enrollment_id } => {
            log::info!("request {} approved, enrollment {} created", id, enrollment_id);
            ApproveResponse {
                id,
                enrollment_id: Some(enrollment_id),
                linked: true,
            }
        }
        ApprovalOutcome::Deferred => {
            log::info!("request {} approved, enrollment deferred until the email registers", id);
            ApproveResponse {
                id,
                enrollment_id: None,
                linked: false,
            }
        }
    };
    Ok(Json(resp))
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    reason: Option<String>,
}

pub async fn reject(request_id: Path<(i32,)>, Json(RejectRequest { reason }): Json<RejectRequest>, manager: Data<PgStoreManager>) -> Result<Json<UpdateResponse>, Error> {
    let id = request_id.into_inner().0;
    let mut store = manager.store().await?;
    decision::reject_request(&mut store, id, reason.as_deref()).await?;
    Ok(Json(UpdateResponse::new(1)))
}

pub async fn remove(request_id: Path<(i32,)>, manager: Data<PgStoreManager>) -> Result<Json<DeleteResponse>, Error> {
    let id = request_id.into_inner().0;
    let mut store = manager.store().await?;
    decision::delete_request(&mut store, id).await?;
    Ok(Json(DeleteResponse::new(1)))
}
