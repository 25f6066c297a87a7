use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::instructions::InstructionError;
use crate::llm_client::ProviderError;

/// Client-facing message for an empty prompt.
pub const EMPTY_PROMPT_MESSAGE: &str = "Prompt tidak boleh kosong";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only request-fatal conditions live here. Malformed model output never
/// becomes an `AppError`; the parsers degrade instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{EMPTY_PROMPT_MESSAGE}")]
    EmptyPrompt,

    #[error(transparent)]
    Instruction(#[from] InstructionError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::EmptyPrompt => (StatusCode::BAD_REQUEST, EMPTY_PROMPT_MESSAGE.to_string()),
            AppError::Instruction(e) => {
                tracing::warn!("Instruction lookup failed: {e:?}");
                (StatusCode::NOT_FOUND, e.to_string())
            }
            AppError::Provider(e) => {
                tracing::error!("Provider error: {e}");
                // The provider's own message is what the front-end shows.
                (StatusCode::BAD_GATEWAY, e.client_message())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_empty_prompt_maps_to_bad_request() {
        let (status, body) = body_json(AppError::EmptyPrompt).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Prompt tidak boleh kosong");
    }

    #[tokio::test]
    async fn test_missing_instruction_maps_to_not_found() {
        let err = AppError::from(InstructionError::NotFound {
            file_name: "bts.md".to_string(),
        });
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "File instruksi tidak ditemukan");
    }

    #[tokio::test]
    async fn test_provider_error_surfaces_provider_message() {
        let err = AppError::from(ProviderError::Api {
            status: 500,
            message: "500 Internal".to_string(),
        });
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "500 Internal");
    }
}
