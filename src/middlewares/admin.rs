use crate::context::UserInfo;
use crate::error::Error;
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    HttpMessage,
};
use sqlx::{query_scalar, PgPool};
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::task::{Context, Poll};

/// Gates a scope to administrators. Must sit inside the JWT middleware: it
/// reads the `UserInfo` extension and checks the admin flag against the
/// store.
pub struct Admin {
    db: PgPool,
}

impl Admin {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl<S> Transform<S, ServiceRequest> for Admin
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Transform = AdminMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminMiddleware { db: self.db.clone(), service }))
    }
}

pub struct AdminMiddleware<S> {
    db: PgPool,
    service: S,
}

impl<S> Service<ServiceRequest> for AdminMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<ServiceResponse, Self::Error>>>>;
    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let user_info = req.extensions().get::<UserInfo>().cloned();
        let uid = match user_info {
            Some(user) => user.id,
            None => return Box::pin(async move { Err(ErrorUnauthorized("unauthorized")) }),
        };
        let db = self.db.clone();
        let next = self.service.call(req);
        Box::pin(async move {
            let mut conn = db.acquire().await.map_err(ErrorInternalServerError)?;
            let is_admin: Option<bool> = query_scalar("SELECT is_admin FROM users WHERE id = $1")
                .bind(uid)
                .fetch_optional(&mut conn)
                .await
                .map_err(ErrorInternalServerError)?;
            if is_admin != Some(true) {
                log::warn!("user {} denied on admin surface", uid);
                return Err(Error::Forbidden("admin only".into()).into());
            }
            next.await
        })
    }
}
