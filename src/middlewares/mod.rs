pub mod admin;
pub mod jwt;
