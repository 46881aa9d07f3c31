mod destroy;
mod edit;
mod mailbox;
mod new;

use axum::{routing::{patch, post}, Router};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{db::{self, Person}, validate, AppError, AppResult, AppState};

pub const UNKNOWN_USER: &str = "User with given uuid doesn't exist";
pub const UNKNOWN_MESSAGE: &str = "Message with given uuid doesn't exist";
pub const UPDATE_PROHIBITED: &str = "Updating someone else's message is prohibited";
pub const DELETE_PROHIBITED: &str = "Deleting other's messages is prohibited";

// Reads that need a body are POSTs, since GET and DELETE bodies may be dropped.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages/", post(new::new_message))
        .route("/messages/{id}/", patch(edit::edit_message))
        .route("/messages/received/", post(mailbox::received))
        .route("/messages/sent/", post(mailbox::sent))
        .route("/messages/destroy/{id}/", post(destroy::destroy_message))
}

/// Body naming the person the caller claims to be.
#[derive(Debug, Deserialize)]
pub(crate) struct ActorBody {
    user: Option<Uuid>,
}

/// The asserted actor must be a stored person.
pub(crate) async fn resolve_actor(db_pool: &SqlitePool, ActorBody { user }: ActorBody) -> AppResult<Person> {
    let user = validate::required("user", user)?;

    db::find_person(db_pool, user)
        .await?
        .ok_or_else(|| AppError::Forbidden(UNKNOWN_USER.to_owned()))
}

/// A person referenced from a payload field, checked like a form field.
pub(crate) async fn referenced_person(db_pool: &SqlitePool, field: &str, id: Option<Uuid>) -> AppResult<Person> {
    let id = validate::required(field, id)?;

    db::find_person(db_pool, id)
        .await?
        .ok_or_else(|| AppError::Validation(format!("{field}: Invalid pk \"{id}\" - object does not exist.")))
}
