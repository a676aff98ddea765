//! Request body extraction.

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejections render as a 400 [`AppError`]
/// instead of axum's plain-text response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
