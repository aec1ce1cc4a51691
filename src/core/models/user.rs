use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub salt: String,
    pub is_admin: bool,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub salt: String,
    pub is_admin: bool,
    pub avatar: Option<String>,
}
