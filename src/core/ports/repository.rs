use crate::core::models::{
    course::Course,
    enrollment::{Enrollment, EnrollmentInsert, EnrollmentUpdate},
    enrollment_request::{EnrollmentRequest, EnrollmentRequestInsert, RequestQuery},
    pending_enrollment::{PendingEnrollment, PendingEnrollmentInsert},
    user::{User, UserInsert},
};
use crate::error::Error;

pub trait UserStore {
    async fn insert_user(&mut self, data: UserInsert) -> Result<i32, Error>;
    async fn get_user_by_email(&mut self, email: &str) -> Result<Option<User>, Error>;
}

pub trait CourseStore {
    async fn get_course(&mut self, id: i32) -> Result<Option<Course>, Error>;
    async fn list_courses(&mut self) -> Result<Vec<Course>, Error>;
}

pub trait EnrollmentRequestStore {
    async fn insert_request(&mut self, data: EnrollmentRequestInsert) -> Result<i32, Error>;
    async fn get_request(&mut self, id: i32) -> Result<Option<EnrollmentRequest>, Error>;
    async fn list_requests(&mut self, query: &RequestQuery) -> Result<Vec<EnrollmentRequest>, Error>;
    /// Compare-and-set: flips the status to approved only while it is still
    /// pending. Returns the number of affected rows.
    async fn mark_approved(&mut self, id: i32) -> Result<u64, Error>;
    /// Same precondition as `mark_approved`; stores the optional reason.
    async fn mark_rejected(&mut self, id: i32, reason: Option<&str>) -> Result<u64, Error>;
    async fn delete_request(&mut self, id: i32) -> Result<u64, Error>;
}

pub trait EnrollmentStore {
    async fn insert_enrollment(&mut self, data: EnrollmentInsert) -> Result<i32, Error>;
    async fn list_enrollments(&mut self) -> Result<Vec<Enrollment>, Error>;
    async fn update_enrollment(&mut self, id: i32, data: EnrollmentUpdate) -> Result<u64, Error>;
    async fn delete_enrollment(&mut self, id: i32) -> Result<u64, Error>;
}

pub trait PendingEnrollmentStore {
    async fn insert_pending(&mut self, data: PendingEnrollmentInsert) -> Result<i32, Error>;
    /// Removes and returns every reconciliation row recorded for the email.
    async fn take_pending_by_email(&mut self, email: &str) -> Result<Vec<PendingEnrollment>, Error>;
}

pub trait Store: UserStore + CourseStore + EnrollmentRequestStore + EnrollmentStore + PendingEnrollmentStore {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}
