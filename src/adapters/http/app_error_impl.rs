use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::app_error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Severity split: misconfiguration and store trouble are operator
        // problems, per-request rejections are not.
        match &self {
            AppError::ProviderAuthError(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
            }
            AppError::ProviderUnavailable { .. } | AppError::StoreUnavailable(_) => {
                tracing::warn!(error = %self, "request failed on a dependency");
            }
            _ => {
                tracing::debug!(error = %self, "request rejected");
            }
        }

        match self {
            AppError::MissingCredential
            | AppError::MalformedCredential(_)
            | AppError::AccountNotFound(_) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                Json(json!({"message": "Invalid authentication credentials"})),
            )
                .into_response(),
            AppError::ProviderUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Identity provider unavailable",
            )
                .into_response(),
            AppError::ProviderAuthError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Identity provider configuration error",
            )
                .into_response(),
            AppError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable").into_response()
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::InvalidInput(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": msg })),
            )
                .into_response(),
            AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
