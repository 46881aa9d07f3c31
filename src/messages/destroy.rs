use axum::{debug_handler, extract::State, http::StatusCode};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db, extract::{ApiJson, ApiPath}, ownership, AppError, AppResult};

use super::ActorBody;

/// The actor is checked before the message id is even parsed.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn destroy_message(
    State(db_pool): State<SqlitePool>,
    ApiPath(id): ApiPath<String>,
    ApiJson(body): ApiJson<ActorBody>,
) -> AppResult<StatusCode> {
    let actor = super::resolve_actor(&db_pool, body).await?;

    let unknown_message = || AppError::NotFound(super::UNKNOWN_MESSAGE.to_owned());

    let id = Uuid::parse_str(&id).map_err(|_| unknown_message())?;
    let Some(message) = db::find_message(&db_pool, id).await? else {
        return Err(unknown_message());
    };

    if !ownership::is_owner(actor.id, message.sender) {
        tracing::warn!(%id, actor = %actor.id, "deletion of someone else's message refused");
        return Err(AppError::Forbidden(super::DELETE_PROHIBITED.to_owned()));
    }

    // deleted between the lookup and the delete
    if !db::delete_message(&db_pool, id).await? {
        return Err(unknown_message());
    }
    tracing::info!(%id, "message deleted");

    Ok(StatusCode::NO_CONTENT)
}
