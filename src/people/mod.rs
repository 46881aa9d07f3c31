mod new;
mod person;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/", post(new::new_person))
        .route("/users/{id}/", get(person::person))
}
