use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db::{self, Message}, extract::{ApiJson, ApiPath}, ownership, validate, AppError, AppResult};

/// Only `text` is writable; `sender` is the asserted actor. Other keys are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct EditMessageBody {
    text: Option<String>,
    sender: Option<Uuid>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn edit_message(
    State(db_pool): State<SqlitePool>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(EditMessageBody { text, sender }): ApiJson<EditMessageBody>,
) -> AppResult<Json<Message>> {
    let Some(message) = db::find_message(&db_pool, id).await? else {
        return Err(AppError::not_found());
    };

    let text = validate::char_field("text", text, validate::TEXT_MAX_LEN)?;
    let actor = super::referenced_person(&db_pool, "sender", sender).await?;

    if !ownership::is_owner(actor.id, message.sender) {
        tracing::warn!(%id, actor = %actor.id, "update of someone else's message refused");
        return Err(AppError::Forbidden(super::UPDATE_PROHIBITED.to_owned()));
    }

    // deleted between the lookup and the write
    let updated = db::update_message_text(&db_pool, id, &text)
        .await?
        .ok_or_else(AppError::not_found)?;
    tracing::info!(%id, "message updated");

    Ok(Json(updated))
}
