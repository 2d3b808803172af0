//! Error handling for the admin panel

use crate::templates;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use trackquiz_core::GameError;

/// Admin error type rendered as an HTML page
#[derive(Debug)]
pub enum AdminError {
    NotFound(String),
    Validation(String),
    Unavailable(String),
    Internal(String),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The service is temporarily unavailable, please try again later.".to_string(),
                )
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, please try again later.".to_string(),
                )
            }
        };

        (status, Html(templates::error_page(status.as_u16(), &message))).into_response()
    }
}

impl From<GameError> for AdminError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::TrackNotFound(id) => Self::NotFound(format!("Track not found: {id}")),
            GameError::Validation(msg) => Self::Validation(msg),
            GameError::NoTracksAvailable => {
                Self::NotFound("No active tracks available".to_string())
            }
            GameError::StorageUnavailable(msg) => Self::Unavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_mapping() {
        let err: AdminError = GameError::TrackNotFound(5).into();
        match err {
            AdminError::NotFound(msg) => assert!(msg.contains('5')),
            other => panic!("Expected NotFound, got {other:?}"),
        }

        let err: AdminError = GameError::Validation("artist must not be empty".into()).into();
        assert!(matches!(err, AdminError::Validation(_)));

        let err: AdminError = GameError::StorageUnavailable("pool timeout".into()).into();
        assert!(matches!(err, AdminError::Unavailable(_)));
    }
}
