use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db::{self, Person}, extract::ApiPath, AppError, AppResult};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn person(
    State(db_pool): State<SqlitePool>,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<Person>> {
    db::find_person(&db_pool, id)
        .await?
        .map(Json)
        .ok_or_else(AppError::not_found)
}
