//! HTTP mapping for the engine error taxonomy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orgweave::GraphError;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Wire shape shared by ATP and REST error replies.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// REST-side error: the engine error plus its HTTP status.
#[derive(Debug)]
pub struct ApiError(pub GraphError);

impl From<GraphError> for ApiError {
    fn from(err: GraphError) -> Self {
        ApiError(err)
    }
}

fn status_for(err: &GraphError) -> StatusCode {
    match err {
        GraphError::NotFound(_) => StatusCode::NOT_FOUND,
        GraphError::Validation(_) | GraphError::IdCollision(_) | GraphError::Temporal(_) => {
            StatusCode::BAD_REQUEST
        }
        GraphError::SchemaViolation(_) | GraphError::BatchRejected { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        GraphError::NoGraphLoaded => StatusCode::SERVICE_UNAVAILABLE,
        GraphError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        GraphError::Persistence(_) | GraphError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        // Never a stack trace, never echoed input for internal errors.
        let body = Json(json!({
            "error": ErrorBody {
                kind: self.0.kind().to_string(),
                message: self.0.public_message(),
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&GraphError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&GraphError::NoGraphLoaded),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&GraphError::SchemaViolation("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&GraphError::Unsupported("x".into())),
            StatusCode::NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_internal_error_is_generic() {
        let api = ApiError(GraphError::Internal("secret path /etc/passwd".into()));
        // The public message hides the detail.
        assert_eq!(api.0.public_message(), "internal error");
    }
}
