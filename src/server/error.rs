use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// What actually went wrong inside a guarded handler. Every variant is reported
/// to the client as 422; the variant itself only reaches the logs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("question {0} does not exist")]
    QuestionMissing(i64),
    #[error("store constraint violated: {0}")]
    Constraint(String),
    #[error("store failure: {0}")]
    Store(sqlx::Error),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("quiz_category is missing")]
    MissingQuizCategory,
    #[error("quiz_category has no id")]
    MissingCategoryId,
    #[error("previous_questions is missing")]
    MissingPreviousQuestions,
    #[error("no questions left to pick from")]
    EmptyPool,
}

impl From<sqlx::Error> for CatalogError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db) if !matches!(db.kind(), sqlx::error::ErrorKind::Other) => {
                CatalogError::Constraint(db.message().to_owned())
            }
            _ => CatalogError::Store(error),
        }
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::MalformedBody(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable: {0}")]
    Unprocessable(#[from] CatalogError),
    #[error("internal server error: {0}")]
    Internal(#[from] sqlx::Error),
}

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad request",
            ApiError::NotFound => "resource not found",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::Internal(_) => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(error) => tracing::error!("Unhandled store error: {error}"),
            ApiError::Unprocessable(cause) => tracing::warn!("Unprocessable request: {cause}"),
            ApiError::BadRequest(reason) => tracing::debug!("Bad request: {reason}"),
            _ => {}
        }
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

// `/questions/abc` has no matching route, as far as the client is concerned
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn every_kind_renders_fixed_envelope() {
        let cases = [
            (ApiError::BadRequest("x".into()), 400, "bad request"),
            (ApiError::NotFound, 404, "resource not found"),
            (ApiError::MethodNotAllowed, 405, "method not allowed"),
            (
                ApiError::Unprocessable(CatalogError::EmptyPool),
                422,
                "unprocessable",
            ),
            (
                ApiError::Internal(sqlx::Error::PoolClosed),
                500,
                "internal server error",
            ),
        ];
        for (error, code, message) in cases {
            let (status, body) = render(error).await;
            assert_eq!(status.as_u16(), code);
            assert_eq!(body["success"], false);
            assert_eq!(body["error"], code);
            assert_eq!(body["message"], message);
        }
    }

    #[tokio::test]
    async fn catalog_causes_do_not_leak_into_body() {
        let (_, body) = render(CatalogError::QuestionMissing(1000).into()).await;
        assert_eq!(body["message"], "unprocessable");
        assert!(!body.to_string().contains("1000"));
    }

    #[test]
    fn non_constraint_store_errors_stay_store_errors() {
        let error = CatalogError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, CatalogError::Store(sqlx::Error::RowNotFound)));
    }
}
