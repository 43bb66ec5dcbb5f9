use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cypher::ValidationError;

/// Body returned for every pipeline failure. Details only go to the log.
pub const GENERIC_FAILURE: &str = "Failed to answer the question";

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Generated query rejected: {0}")]
    InvalidQuery(#[from] ValidationError),

    #[error("Query execution failed: {0}")]
    Execution(String),

    #[error("Prompt template error: {0}")]
    Template(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ChainError {
    pub fn status(&self) -> StatusCode {
        match self {
            ChainError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ChainError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ChainError::InvalidRequest(msg) => msg,
            other => {
                tracing::error!("Request failed: {}", other);
                GENERIC_FAILURE.to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ChainError::InvalidRequest("blank".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ChainError::Llm("timeout".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ChainError::InvalidQuery(ValidationError::UnknownLabel("Nope".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_errors_hide_details() {
        let response = ChainError::Database("password rejected for neo4j".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
