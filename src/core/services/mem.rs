//! In-memory store used by the service tests. A cloned handle shares the
//! same data, so a test can hand one clone to a transactional service and
//! inspect the result through another.

use crate::core::models::{
    course::Course,
    enrollment::{Enrollment, EnrollmentInsert, EnrollmentStatus, EnrollmentUpdate},
    enrollment_request::{EnrollmentRequest, EnrollmentRequestInsert, RequestQuery, RequestStatus},
    pending_enrollment::{PendingEnrollment, PendingEnrollmentInsert},
    user::{User, UserInsert},
};
use crate::core::ports::repository::{CourseStore, EnrollmentRequestStore, EnrollmentStore, PendingEnrollmentStore, Store, TxStore, UserStore};
use crate::error::Error;
use chrono::{NaiveDate, Utc};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    users: Vec<User>,
    courses: Vec<Course>,
    requests: Vec<EnrollmentRequest>,
    enrollments: Vec<Enrollment>,
    pending: Vec<PendingEnrollment>,
}

#[derive(Debug, Clone, Default)]
pub struct MemStore(Rc<RefCell<Inner>>);

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i32 {
        let mut inner = self.0.borrow_mut();
        inner.next_id += 1;
        inner.next_id
    }

    pub fn add_course(&self, name: &str, price_cents: i64) -> i32 {
        let id = self.next_id();
        self.0.borrow_mut().courses.push(Course {
            id,
            name: name.into(),
            price_cents,
        });
        id
    }

    pub fn add_user(&self, name: &str, email: &str, is_admin: bool) -> i32 {
        let id = self.next_id();
        self.0.borrow_mut().users.push(User {
            id,
            name: name.into(),
            email: email.into(),
            phone: "9876500000".into(),
            password: "hash".into(),
            salt: "salt".into(),
            is_admin,
            avatar: None,
        });
        id
    }

    pub fn add_request(&self, email: &str, course_id: i32) -> i32 {
        let id = self.next_id();
        let course_name = self
            .0
            .borrow()
            .courses
            .iter()
            .find(|c| c.id == course_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        self.0.borrow_mut().requests.push(EnrollmentRequest {
            id,
            full_name: "Asha Rao".into(),
            email: email.into(),
            phone: "9876500001".into(),
            address: "12 Lake Road".into(),
            city: "Pune".into(),
            state: "MH".into(),
            postal_code: "411001".into(),
            course_id,
            course_name,
            course_price_cents: 49_900,
            payment_method: "upi".into(),
            transaction_ref: "TXN-1001".into(),
            payment_proof: "ab12cd.png".into(),
            is_guest: true,
            user_id: None,
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
        });
        id
    }

    pub fn add_enrollment(&self, user_id: i32, course_id: i32) -> i32 {
        let id = self.next_id();
        self.0.borrow_mut().enrollments.push(Enrollment {
            id,
            user_id,
            course_id,
            user_name: "Asha Rao".into(),
            course_name: "Rust Bootcamp".into(),
            progress: 0,
            status: EnrollmentStatus::Active,
            enrolled_on: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            completed_on: None,
        });
        id
    }

    pub fn add_pending(&self, email: &str, course_id: i32, request_id: i32) -> i32 {
        let id = self.next_id();
        let course_name = self
            .0
            .borrow()
            .courses
            .iter()
            .find(|c| c.id == course_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        self.0.borrow_mut().pending.push(PendingEnrollment {
            id,
            email: email.into(),
            course_id,
            course_name,
            request_id,
            created_at: Utc::now(),
        });
        id
    }

    pub fn decide_approved(&self, id: i32) {
        let mut inner = self.0.borrow_mut();
        let req = inner.requests.iter_mut().find(|r| r.id == id).expect("request exists");
        req.status = RequestStatus::Approved;
    }

    pub fn request(&self, id: i32) -> EnrollmentRequest {
        self.0.borrow().requests.iter().find(|r| r.id == id).expect("request exists").clone()
    }

    pub fn request_count(&self) -> usize {
        self.0.borrow().requests.len()
    }

    pub fn enrollment(&self, id: i32) -> Enrollment {
        self.0.borrow().enrollments.iter().find(|e| e.id == id).expect("enrollment exists").clone()
    }

    pub fn enrollment_count(&self) -> usize {
        self.0.borrow().enrollments.len()
    }

    pub fn enrollment_rows(&self) -> Vec<Enrollment> {
        self.0.borrow().enrollments.clone()
    }

    pub fn pending_count(&self) -> usize {
        self.0.borrow().pending.len()
    }

    pub fn pending_rows(&self) -> Vec<PendingEnrollment> {
        self.0.borrow().pending.clone()
    }
}

impl UserStore for MemStore {
    async fn insert_user(&mut self, data: UserInsert) -> Result<i32, Error> {
        let id = self.next_id();
        self.0.borrow_mut().users.push(User {
            id,
            name: data.name,
            email: data.email,
            phone: data.phone,
            password: data.password,
            salt: data.salt,
            is_admin: data.is_admin,
            avatar: data.avatar,
        });
        Ok(id)
    }

    async fn get_user_by_email(&mut self, email: &str) -> Result<Option<User>, Error> {
        Ok(self.0.borrow().users.iter().find(|u| u.email == email).cloned())
    }
}

impl CourseStore for MemStore {
    async fn get_course(&mut self, id: i32) -> Result<Option<Course>, Error> {
        Ok(self.0.borrow().courses.iter().find(|c| c.id == id).cloned())
    }

    async fn list_courses(&mut self) -> Result<Vec<Course>, Error> {
        Ok(self.0.borrow().courses.clone())
    }
}

impl EnrollmentRequestStore for MemStore {
    async fn insert_request(&mut self, data: EnrollmentRequestInsert) -> Result<i32, Error> {
        let id = self.next_id();
        self.0.borrow_mut().requests.push(EnrollmentRequest {
            id,
            full_name: data.full_name,
            email: data.email,
            phone: data.phone,
            address: data.address,
            city: data.city,
            state: data.state,
            postal_code: data.postal_code,
            course_id: data.course_id,
            course_name: data.course_name,
            course_price_cents: data.course_price_cents,
            payment_method: data.payment_method,
            transaction_ref: data.transaction_ref,
            payment_proof: data.payment_proof,
            is_guest: data.is_guest,
            user_id: data.user_id,
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_request(&mut self, id: i32) -> Result<Option<EnrollmentRequest>, Error> {
        Ok(self.0.borrow().requests.iter().find(|r| r.id == id).cloned())
    }

    async fn list_requests(&mut self, query: &RequestQuery) -> Result<Vec<EnrollmentRequest>, Error> {
        Ok(self
            .0
            .borrow()
            .requests
            .iter()
            .filter(|r| query.status_eq.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    async fn mark_approved(&mut self, id: i32) -> Result<u64, Error> {
        let mut inner = self.0.borrow_mut();
        match inner.requests.iter_mut().find(|r| r.id == id && r.status == RequestStatus::Pending) {
            Some(req) => {
                req.status = RequestStatus::Approved;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn mark_rejected(&mut self, id: i32, reason: Option<&str>) -> Result<u64, Error> {
        let mut inner = self.0.borrow_mut();
        match inner.requests.iter_mut().find(|r| r.id == id && r.status == RequestStatus::Pending) {
            Some(req) => {
                req.status = RequestStatus::Rejected;
                req.rejection_reason = reason.map(|r| r.to_owned());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_request(&mut self, id: i32) -> Result<u64, Error> {
        let mut inner = self.0.borrow_mut();
        let before = inner.requests.len();
        inner.requests.retain(|r| r.id != id);
        Ok((before - inner.requests.len()) as u64)
    }
}

impl EnrollmentStore for MemStore {
    async fn insert_enrollment(&mut self, data: EnrollmentInsert) -> Result<i32, Error> {
        let id = self.next_id();
        self.0.borrow_mut().enrollments.push(Enrollment {
            id,
            user_id: data.user_id,
            course_id: data.course_id,
            user_name: data.user_name,
            course_name: data.course_name,
            progress: data.progress,
            status: data.status,
            enrolled_on: data.enrolled_on,
            completed_on: data.completed_on,
        });
        Ok(id)
    }

    async fn list_enrollments(&mut self) -> Result<Vec<Enrollment>, Error> {
        Ok(self.0.borrow().enrollments.clone())
    }

    async fn update_enrollment(&mut self, id: i32, data: EnrollmentUpdate) -> Result<u64, Error> {
        let mut inner = self.0.borrow_mut();
        match inner.enrollments.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.status = data.status;
                e.progress = data.progress;
                e.completed_on = data.completed_on;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_enrollment(&mut self, id: i32) -> Result<u64, Error> {
        let mut inner = self.0.borrow_mut();
        let before = inner.enrollments.len();
        inner.enrollments.retain(|e| e.id != id);
        Ok((before - inner.enrollments.len()) as u64)
    }
}

impl PendingEnrollmentStore for MemStore {
    async fn insert_pending(&mut self, data: PendingEnrollmentInsert) -> Result<i32, Error> {
        let id = self.next_id();
        self.0.borrow_mut().pending.push(PendingEnrollment {
            id,
            email: data.email,
            course_id: data.course_id,
            course_name: data.course_name,
            request_id: data.request_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn take_pending_by_email(&mut self, email: &str) -> Result<Vec<PendingEnrollment>, Error> {
        let mut inner = self.0.borrow_mut();
        let (taken, kept): (Vec<_>, Vec<_>) = inner.pending.drain(..).partition(|p| p.email == email);
        inner.pending = kept;
        Ok(taken)
    }
}

impl Store for MemStore {}

impl TxStore for MemStore {
    async fn commit(self) -> Result<(), Error> {
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        Ok(())
    }
}
