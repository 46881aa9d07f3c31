use axum::{debug_handler, extract::State, Json};
use sqlx::SqlitePool;

use crate::{db::{self, Mailbox, Message}, extract::ApiJson, AppResult};

use super::ActorBody;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn received(
    State(db_pool): State<SqlitePool>,
    ApiJson(body): ApiJson<ActorBody>,
) -> AppResult<Json<Vec<Message>>> {
    list(&db_pool, Mailbox::Received, body).await
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn sent(
    State(db_pool): State<SqlitePool>,
    ApiJson(body): ApiJson<ActorBody>,
) -> AppResult<Json<Vec<Message>>> {
    list(&db_pool, Mailbox::Sent, body).await
}

async fn list(db_pool: &SqlitePool, mailbox: Mailbox, body: ActorBody) -> AppResult<Json<Vec<Message>>> {
    let actor = super::resolve_actor(db_pool, body).await?;
    let messages = db::list_messages(db_pool, mailbox, actor.id).await?;

    Ok(Json(messages))
}
