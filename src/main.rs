mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod middlewares;
mod response;

use actix_files::Files;
use actix_web::middleware::Logger;
use actix_web::web::{delete, get, post, put, resource, scope, Data};
use actix_web::{App, HttpServer};
use database::sqlx::PgStoreManager;
use impls::storers::local::LocalStorer;
use impls::tokener::jwt::JWT;
use middlewares::admin::Admin;
use middlewares::jwt::{Jwt, JWT_SECRET};
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> Result<(), std::io::Error> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let database_url = dotenv::var("DATABASE_URL").expect("environment variable DATABASE_URL not been set");
    let secret = dotenv::var(JWT_SECRET).expect("environment variable JWT_SECRET not been set").into_bytes();
    let upload_path = dotenv::var("UPLOAD_PATH").expect("environment variable UPLOAD_PATH not been set");
    let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("failed to connect to database");
    log::info!("listening on {}", bind_addr);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(PgStoreManager::new(pool.clone())))
            .app_data(Data::new(LocalStorer::new(&upload_path)))
            .app_data(Data::new(JWT::new(secret.clone())))
            .service(Files::new("/static", &upload_path))
            .service(
                scope("api")
                    .service(resource("signup").route(post().to(handlers::signup)))
                    .service(resource("login").route(post().to(handlers::login)))
                    .service(resource("courses").route(get().to(handlers::course::list)))
                    .service(resource("enrollment-requests").route(post().to(handlers::enrollment_request::submit::<LocalStorer>)))
                    .service(
                        scope("")
                            .wrap(Jwt::new(secret.clone()))
                            .service(scope("uploads").route("", post().to(handlers::upload::create::<LocalStorer>)))
                            .service(
                                scope("admin")
                                    .wrap(Admin::new(pool.clone()))
                                    .service(
                                        scope("enrollment-requests")
                                            .route("", get().to(handlers::enrollment_request::list))
                                            .service(
                                                scope("{request_id}")
                                                    .route("approve", post().to(handlers::enrollment_request::approve))
                                                    .route("reject", post().to(handlers::enrollment_request::reject))
                                                    .route("", delete().to(handlers::enrollment_request::remove)),
                                            ),
                                    )
                                    .service(
                                        scope("enrollments")
                                            .route("", get().to(handlers::enrollment::list))
                                            .service(
                                                scope("{enrollment_id}")
                                                    .route("", put().to(handlers::enrollment::update))
                                                    .route("", delete().to(handlers::enrollment::remove)),
                                            ),
                                    ),
                            ),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
