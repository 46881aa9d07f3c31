//! Extractors whose rejections render as `{"detail": ...}` bodies.

use axum::extract::{rejection::{JsonRejection, PathRejection}, FromRequest, FromRequestParts};

use crate::AppError;

/// `axum::Json`, but a bad body is a 400 with a detail message.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path`, but an unparsable segment is a plain 404.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("path rejected: {rejection}");
        AppError::not_found()
    }
}
