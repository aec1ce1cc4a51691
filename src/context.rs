use crate::core::ports::tokener::{Payload, Tokener};
use crate::impls::tokener::jwt::JWT;
use crate::middlewares::jwt::Claim;
use actix_web::web::Data;
use actix_web::{self, error::ErrorInternalServerError, error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: i32,
}

impl FromRequest for UserInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<Self>() {
            ready(Ok(user.clone()))
        } else {
            ready(Err(ErrorUnauthorized("unauthorized")))
        }
    }
}

/// Identity on routes that accept both anonymous and authenticated callers.
/// An absent or invalid token is a guest, not an error. Verification goes
/// through the tokener registered as app data at startup.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserInfo>);

impl FromRequest for MaybeUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;
    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<UserInfo>() {
            return ready(Ok(MaybeUser(Some(user.clone()))));
        }
        let header = match req.headers().get("Authorization").and_then(|h| h.to_str().ok()) {
            Some(h) => h.to_owned(),
            None => return ready(Ok(MaybeUser(None))),
        };
        let tokener = match req.app_data::<Data<JWT>>() {
            Some(t) => t,
            None => return ready(Err(ErrorInternalServerError("token verifier not configured"))),
        };
        let token = header.strip_prefix("Bearer ").unwrap_or(&header);
        let user = Tokener::<Claim>::verify_token(tokener.get_ref(), token)
            .ok()
            .and_then(|claim| claim.user().parse::<i32>().ok())
            .map(|id| UserInfo { id });
        ready(Ok(MaybeUser(user)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use std::ops::Add;

    fn tokener() -> JWT {
        JWT::new(b"test-secret".to_vec())
    }

    fn token_for(user: &str) -> String {
        tokener()
            .gen_token(&Claim {
                user: user.into(),
                exp: chrono::Utc::now().add(chrono::Duration::hours(1)).timestamp(),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn bearer_token_resolves_through_the_shared_tokener() {
        let req = TestRequest::default()
            .app_data(Data::new(tokener()))
            .insert_header(("Authorization", format!("Bearer {}", token_for("7"))))
            .to_http_request();
        let user = MaybeUser::from_request(&req, &mut actix_web::dev::Payload::None).await.unwrap();
        assert_eq!(user.0.map(|u| u.id), Some(7));
    }

    #[tokio::test]
    async fn absent_token_is_a_guest() {
        let req = TestRequest::default().app_data(Data::new(tokener())).to_http_request();
        let user = MaybeUser::from_request(&req, &mut actix_web::dev::Payload::None).await.unwrap();
        assert!(user.0.is_none());
    }

    #[tokio::test]
    async fn garbage_token_is_a_guest() {
        let req = TestRequest::default()
            .app_data(Data::new(tokener()))
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_http_request();
        let user = MaybeUser::from_request(&req, &mut actix_web::dev::Payload::None).await.unwrap();
        assert!(user.0.is_none());
    }
}
