use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db::{self, Message}, extract::ApiJson, validate, AppResult};

#[derive(Debug, Deserialize)]
pub(crate) struct NewMessageBody {
    text: Option<String>,
    sender: Option<Uuid>,
    receiver: Option<Uuid>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn new_message(
    State(db_pool): State<SqlitePool>,
    ApiJson(NewMessageBody { text, sender, receiver }): ApiJson<NewMessageBody>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let text = validate::char_field("text", text, validate::TEXT_MAX_LEN)?;
    let sender = super::referenced_person(&db_pool, "sender", sender).await?;
    let receiver = super::referenced_person(&db_pool, "receiver", receiver).await?;

    let message = db::create_message(&db_pool, &text, sender.id, receiver.id).await?;
    tracing::info!(id = %message.id, sender = %sender.id, receiver = %receiver.id, "message created");

    Ok((StatusCode::CREATED, Json(message)))
}
