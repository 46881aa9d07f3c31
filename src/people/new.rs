use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{db::{self, Person}, extract::ApiJson, validate, AppResult};

#[derive(Debug, Deserialize)]
pub(crate) struct NewPersonBody {
    name: Option<String>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn new_person(
    State(db_pool): State<SqlitePool>,
    ApiJson(NewPersonBody { name }): ApiJson<NewPersonBody>,
) -> AppResult<(StatusCode, Json<Person>)> {
    let name = validate::char_field("name", name, validate::NAME_MAX_LEN)?;

    let person = db::create_person(&db_pool, &name).await?;
    tracing::info!(id = %person.id, "person created");

    Ok((StatusCode::CREATED, Json(person)))
}
