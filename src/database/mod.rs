pub mod sqlx;
