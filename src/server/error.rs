//! Maps handler failures onto the fixed JSON error envelope.
//!
//! Every failure leaving the API has the shape
//! `{"success": false, "error": <status>, "message": <text>}`. The detail
//! string carried by each variant is logged and never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::StoreError;

#[derive(Debug)]
pub enum ApiError {
    /// 400, malformed or incomplete request body.
    BadRequest(String),
    /// 404, missing resource, empty result or missing body.
    NotFound(String),
    /// 405, route exists but not for this method.
    MethodNotAllowed,
    /// 422, the storage layer refused the operation.
    Unprocessable(String),
    /// 500, anything else.
    Internal(String),
}

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
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad request",
            ApiError::NotFound(_) => "resource not found",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::Internal(_) => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            ApiError::Unprocessable(detail) => tracing::warn!("Unprocessable request: {}", detail),
            ApiError::BadRequest(detail) | ApiError::NotFound(detail) => {
                tracing::info!("{}: {}", self.message(), detail)
            }
            ApiError::MethodNotAllowed => {}
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

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> ApiError {
        ApiError::Internal(error.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> ApiError {
        match error {
            StoreError::NotFound(id) => ApiError::NotFound(format!("question {id}")),
            StoreError::Database(error) => error.into(),
        }
    }
}
