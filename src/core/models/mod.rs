pub mod course;
pub mod enrollment;
pub mod enrollment_request;
pub mod pending_enrollment;
pub mod user;
