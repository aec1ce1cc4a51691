use crate::context::UserInfo;
use crate::core::ports::tokener::{Payload, Tokener};
use crate::impls::tokener::jwt::JWT;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, HttpMessage,
};
use serde::{Deserialize, Serialize};
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::task::{Context, Poll};

pub static JWT_SECRET: &str = "JWT_SECRET";

#[derive(Debug, Deserialize, Serialize)]
pub struct Claim {
    pub user: String,
    pub exp: i64,
}

impl Payload for Claim {
    fn user(&self) -> &str {
        &self.user
    }
}

pub struct Jwt {
    secret: Vec<u8>,
}

impl Jwt {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for Jwt
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error>,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = Error;
    type Transform = JwtMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtMiddleware {
            tokener: JWT::new(self.secret.clone()),
            next_service: service,
        }))
    }
}

pub struct JwtMiddleware<S> {
    tokener: JWT,
    next_service: S,
}

impl<S> Service<ServiceRequest> for JwtMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error>,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = match req.headers().get("Authorization") {
            Some(h) => h.to_owned(),
            None => return Box::pin(async move { Err(ErrorUnauthorized("no token in header")) }),
        };
        match header.to_str() {
            Err(e) => Box::pin(async move { Err(ErrorUnauthorized(e)) }),
            Ok(header) => {
                let token = header.strip_prefix("Bearer ").unwrap_or(header);
                match <JWT as Tokener<Claim>>::verify_token(&self.tokener, token) {
                    Err(e) => Box::pin(async move { Err(ErrorUnauthorized(e)) }),
                    Ok(claim) => match claim.user().parse::<i32>() {
                        Err(e) => Box::pin(async move { Err(ErrorUnauthorized(e)) }),
                        Ok(id) => {
                            req.extensions_mut().insert(UserInfo { id });
                            let res_fut = self.next_service.call(req);
                            Box::pin(res_fut)
                        }
                    },
                }
            }
        }
    }
}
