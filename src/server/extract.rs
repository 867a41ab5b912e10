use axum::extract::{FromRequestParts, Path, Query};

use super::error::ApiError;

/// `Path` whose rejection renders as the JSON error envelope (404).
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct IdPath<T>(pub T);

/// `Query` whose rejection renders as the JSON error envelope (400).
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);
