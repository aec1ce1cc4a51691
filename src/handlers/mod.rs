pub mod course;
pub mod enrollment;
pub mod enrollment_request;
pub mod upload;

use crate::core::ports::repository::UserStore;
use crate::core::ports::tokener::Tokener;
use crate::core::services::registration::{self, hash_password, Signup};
use crate::database::sqlx::PgStoreManager;
use crate::error::Error;
use crate::impls::tokener::jwt::JWT;
use crate::middlewares::jwt::Claim;
use crate::response::CreateResponse;
use actix_web::web::{Data, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::ops::Add;

#[derive(Debug, Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn login(Json(Login { email, password }): Json<Login>, manager: Data<PgStoreManager>, tokener: Data<JWT>) -> Result<Json<TokenResponse>, Error> {
    let mut store = manager.store().await?;
    let user = UserStore::get_user_by_email(&mut store, &email)
        .await?
        .ok_or_else(|| Error::Unauthorized("invalid email or password".into()))?;
    if hash_password(&password, &user.salt) != user.password {
        return Err(Error::Unauthorized("invalid email or password".into()));
    }
    let claim = Claim {
        user: user.id.to_string(),
        exp: Utc::now().add(chrono::Duration::days(30)).timestamp(),
    };
    let token = tokener.gen_token(&claim)?;
    Ok(Json(TokenResponse { token }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupForm {
    name: String,
    email: String,
    phone: String,
    password: String,
}

/// Creates the account and, in the same transaction, turns any approved
/// guest requests recorded for this email into real enrollments.
pub async fn signup(Json(form): Json<SignupForm>, manager: Data<PgStoreManager>) -> Result<Json<CreateResponse>, Error> {
    let tx = manager.tx().await?;
    let id = registration::register_user(
        tx,
        Signup {
            name: form.name,
            email: form.email,
            phone: form.phone,
            password: form.password,
        },
        Utc::now().date_naive(),
    )
    .await?;
    log::info!("user {} registered", id);
    Ok(Json(CreateResponse { id }))
}
