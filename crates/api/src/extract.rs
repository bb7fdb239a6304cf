//! Extractors that report rejections as [`AppError`].
//!
//! axum's own `Json` and `Path` answer malformed input with plain-text
//! bodies (and `422` for JSON that does not fit the target type). These
//! wrappers route every rejection through [`AppError::BadRequest`] so all
//! client errors share the `{ "error", "code" }` shape and a `400` status.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Typed query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
