use crate::core::models::course::Course;
use crate::core::ports::repository::CourseStore;
use crate::database::sqlx::PgStoreManager;
use crate::error::Error;
use crate::response::List;
use actix_web::web::{Data, Json};

/// Catalogue for the public intake form.
pub async fn list(manager: Data<PgStoreManager>) -> Result<Json<List<Course>>, Error> {
    let mut store = manager.store().await?;
    let courses = CourseStore::list_courses(&mut store).await?;
    let total = courses.len() as i64;
    Ok(Json(List::new(courses, total)))
}
