use crate::core::models::enrollment::{EnrollmentInsert, EnrollmentStatus};
use crate::core::models::user::UserInsert;
use crate::core::ports::repository::{EnrollmentStore, PendingEnrollmentStore, TxStore, UserStore};
use crate::error::Error;
use chrono::NaiveDate;
use hex::ToHex;
use rand::Rng;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

pub fn hash_password(pass: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pass);
    hasher.update(salt);
    hasher.finalize().encode_hex()
}

pub fn random_salt() -> String {
    const CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::thread_rng();
    (0..32).map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char).collect()
}

/// Creates an account and drains the pending-enrollment reconciliation rows
/// for its email: each one recorded at guest-approval time becomes a real
/// enrollment now, in the same transaction as the account itself.
pub async fn register_user<T>(mut tx: T, signup: Signup, today: NaiveDate) -> Result<i32, Error>
where
    T: TxStore,
{
    for (name, value) in [
        ("name", &signup.name),
        ("email", &signup.email),
        ("phone", &signup.phone),
        ("password", &signup.password),
    ] {
        if value.trim().is_empty() {
            return Err(Error::Validation(format!("{} is required", name)));
        }
    }
    if UserStore::get_user_by_email(&mut tx, &signup.email).await?.is_some() {
        return Err(Error::Validation(format!("email {} is already registered", signup.email)));
    }
    let salt = random_salt();
    let user_id = UserStore::insert_user(
        &mut tx,
        UserInsert {
            name: signup.name.clone(),
            email: signup.email.clone(),
            phone: signup.phone,
            password: hash_password(&signup.password, &salt),
            salt,
            is_admin: false,
            avatar: None,
        },
    )
    .await?;
    let pending = PendingEnrollmentStore::take_pending_by_email(&mut tx, &signup.email).await?;
    for p in pending {
        EnrollmentStore::insert_enrollment(
            &mut tx,
            EnrollmentInsert {
                user_id,
                course_id: p.course_id,
                user_name: signup.name.clone(),
                course_name: p.course_name,
                progress: 0,
                status: EnrollmentStatus::Active,
                enrolled_on: today,
                completed_on: None,
            },
        )
        .await?;
    }
    tx.commit().await?;
    Ok(user_id)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::services::mem::MemStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn signup(email: &str) -> Signup {
        Signup {
            name: "Asha Rao".into(),
            email: email.into(),
            phone: "9876500001".into(),
            password: "hunter2hunter2".into(),
        }
    }

    #[tokio::test]
    async fn signup_materializes_pending_enrollments() {
        let store = MemStore::new();
        let c1 = store.add_course("Rust Bootcamp", 49_900);
        let c2 = store.add_course("Systems Design", 89_900);
        store.add_pending("asha@example.com", c1, 1);
        store.add_pending("asha@example.com", c2, 2);
        store.add_pending("other@example.com", c1, 3);

        let uid = register_user(store.clone(), signup("asha@example.com"), today()).await.unwrap();

        let enrollments = store.enrollment_rows();
        assert_eq!(enrollments.len(), 2);
        assert!(enrollments.iter().all(|e| e.user_id == uid && e.progress == 0 && e.status == EnrollmentStatus::Active));
        // only the matching email is drained
        assert_eq!(store.pending_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemStore::new();
        store.add_user("Asha Rao", "asha@example.com", false);
        let err = register_user(store.clone(), signup("asha@example.com"), today()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn signup_without_pending_rows_creates_no_enrollments() {
        let store = MemStore::new();
        register_user(store.clone(), signup("fresh@example.com"), today()).await.unwrap();
        assert_eq!(store.enrollment_count(), 0);
    }

    #[test]
    fn password_hash_depends_on_salt() {
        let a = hash_password("hunter2", "salt-one");
        let b = hash_password("hunter2", "salt-two");
        assert_ne!(a, b);
        assert_eq!(a, hash_password("hunter2", "salt-one"));
    }
}
