use crate::core::models::{
    course::Course,
    enrollment::{Enrollment, EnrollmentInsert, EnrollmentUpdate},
    enrollment_request::{EnrollmentRequest, EnrollmentRequestInsert, RequestQuery},
    pending_enrollment::{PendingEnrollment, PendingEnrollmentInsert},
    user::{User, UserInsert},
};
use crate::core::ports::repository::{CourseStore, EnrollmentRequestStore, EnrollmentStore, PendingEnrollmentStore, Store, TxStore, UserStore};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::{query, query_as, query_scalar, Executor, PgPool, Postgres, QueryBuilder, Transaction};

pub struct PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    executor: E,
}

impl<E> PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

pub struct PgStoreManager {
    pool: PgPool,
}

impl PgStoreManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn store(&self) -> Result<PgStore<PoolConnection<Postgres>>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgStore::new(conn))
    }

    pub async fn tx(&self) -> Result<PgStore<Transaction<'static, Postgres>>, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgStore::new(tx))
    }
}

impl<E> UserStore for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert_user(&mut self, data: UserInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO users (name, email, phone, password, salt, is_admin, avatar) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id")
            .bind(data.name)
            .bind(data.email)
            .bind(data.phone)
            .bind(data.password)
            .bind(data.salt)
            .bind(data.is_admin)
            .bind(data.avatar)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn get_user_by_email(&mut self, email: &str) -> Result<Option<User>, Error> {
        let user = query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(&mut self.executor).await?;
        Ok(user)
    }
}

impl<E> CourseStore for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn get_course(&mut self, id: i32) -> Result<Option<Course>, Error> {
        let course = query_as("SELECT * FROM courses WHERE id = $1").bind(id).fetch_optional(&mut self.executor).await?;
        Ok(course)
    }

    async fn list_courses(&mut self) -> Result<Vec<Course>, Error> {
        let courses = query_as("SELECT * FROM courses ORDER BY id").fetch_all(&mut self.executor).await?;
        Ok(courses)
    }
}

impl<E> EnrollmentRequestStore for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert_request(&mut self, data: EnrollmentRequestInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO enrollment_requests (
                full_name, email, phone, address, city, state, postal_code,
                course_id, course_name, course_price_cents,
                payment_method, transaction_ref, payment_proof,
                is_guest, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id",
        )
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.address)
        .bind(data.city)
        .bind(data.state)
        .bind(data.postal_code)
        .bind(data.course_id)
        .bind(data.course_name)
        .bind(data.course_price_cents)
        .bind(data.payment_method)
        .bind(data.transaction_ref)
        .bind(data.payment_proof)
        .bind(data.is_guest)
        .bind(data.user_id)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn get_request(&mut self, id: i32) -> Result<Option<EnrollmentRequest>, Error> {
        let req = query_as("SELECT * FROM enrollment_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut self.executor)
            .await?;
        Ok(req)
    }

    async fn list_requests(&mut self, param: &RequestQuery) -> Result<Vec<EnrollmentRequest>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM enrollment_requests WHERE 1 = 1");
        if let Some(status) = param.status_eq {
            stmt.push(" AND status = ").push_bind(status);
        }
        stmt.push(" ORDER BY created_at DESC");
        let requests = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(requests)
    }

    async fn mark_approved(&mut self, id: i32) -> Result<u64, Error> {
        let res = query("UPDATE enrollment_requests SET status = 'approved' WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }

    async fn mark_rejected(&mut self, id: i32, reason: Option<&str>) -> Result<u64, Error> {
        let res = query("UPDATE enrollment_requests SET status = 'rejected', rejection_reason = $2 WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .bind(reason)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_request(&mut self, id: i32) -> Result<u64, Error> {
        let res = query("DELETE FROM enrollment_requests WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }
}

impl<E> EnrollmentStore for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert_enrollment(&mut self, data: EnrollmentInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO enrollments (user_id, course_id, user_name, course_name, progress, status, enrolled_on, completed_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id",
        )
        .bind(data.user_id)
        .bind(data.course_id)
        .bind(data.user_name)
        .bind(data.course_name)
        .bind(data.progress)
        .bind(data.status)
        .bind(data.enrolled_on)
        .bind(data.completed_on)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn list_enrollments(&mut self) -> Result<Vec<Enrollment>, Error> {
        let enrollments = query_as("SELECT * FROM enrollments ORDER BY enrolled_on DESC, id DESC")
            .fetch_all(&mut self.executor)
            .await?;
        Ok(enrollments)
    }

    async fn update_enrollment(&mut self, id: i32, data: EnrollmentUpdate) -> Result<u64, Error> {
        let res = query("UPDATE enrollments SET status = $2, progress = $3, completed_on = $4 WHERE id = $1")
            .bind(id)
            .bind(data.status)
            .bind(data.progress)
            .bind(data.completed_on)
            .execute(&mut self.executor)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_enrollment(&mut self, id: i32) -> Result<u64, Error> {
        let res = query("DELETE FROM enrollments WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(res.rows_affected())
    }
}

impl<E> PendingEnrollmentStore for PgStore<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert_pending(&mut self, data: PendingEnrollmentInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO pending_enrollments (email, course_id, course_name, request_id) VALUES ($1, $2, $3, $4) RETURNING id")
            .bind(data.email)
            .bind(data.course_id)
            .bind(data.course_name)
            .bind(data.request_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn take_pending_by_email(&mut self, email: &str) -> Result<Vec<PendingEnrollment>, Error> {
        let taken = query_as("DELETE FROM pending_enrollments WHERE email = $1 RETURNING *")
            .bind(email)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(taken)
    }
}

impl Store for PgStore<PoolConnection<Postgres>> {}
impl Store for PgStore<Transaction<'static, Postgres>> {}

impl TxStore for PgStore<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}
