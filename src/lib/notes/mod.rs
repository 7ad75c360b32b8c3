//! Module containing everything pertaining to notes.
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::{Request, StatusCode},
    response::IntoResponse,
    Json,
};
use thiserror::Error;
use tracing::warn;

use self::request::NoteRequest;

pub mod request;
pub mod response;
pub mod routes;
pub mod store;

/// An error type for all errors that may happen while handling notes.
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Note {0:?} not found")]
    NotFound(String),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Operation could not be completed")]
    OperationFailed,
}

impl IntoResponse for NoteError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::OperationFailed => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, format!("{self}")).into_response()
    }
}

/// A JSON note body. Any body that can't be read as a [`NoteRequest`],
/// including a missing one, is rejected as a bad request.
#[derive(Debug)]
pub struct NotePayload(pub NoteRequest);

#[async_trait]
impl<S, B> FromRequest<S, B> for NotePayload
where
    Json<NoteRequest>: FromRequest<S, B, Rejection = JsonRejection>,
    S: Send + Sync,
    B: Send + 'static,
{
    type Rejection = NoteError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<NoteRequest>::from_request(req, state)
            .await
            .map_err(|rejection| {
                warn!("rejected note body: {}", rejection.body_text());
                NoteError::InvalidBody(rejection.body_text())
            })?;

        Ok(NotePayload(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (NoteError::NotFound("1".to_string()), StatusCode::NOT_FOUND),
            (
                NoteError::InvalidBody("missing body".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                NoteError::OperationFailed,
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
