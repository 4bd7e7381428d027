use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use charbook_store::StoreError;

/// Errors surfaced by the HTTP layer.
///
/// The two user-facing variants carry the exact message shown to the
/// browser; everything else collapses to a generic 500 with details kept in
/// the server log.  Bodies are plain text throughout: this server talks to
/// browsers submitting HTML forms, not API clients.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("User already exists. Try a different username.")]
    UsernameTaken,

    #[error("Invalid credentials!")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Store(StoreError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Document export error: {0}")]
    Export(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken => ServerError::UsernameTaken,
            other => ServerError::Store(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::UsernameTaken => (StatusCode::CONFLICT, self.to_string()),
            ServerError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServerError::Store(_)
            | ServerError::Session(_)
            | ServerError::PasswordHash(_)
            | ServerError::Export(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
