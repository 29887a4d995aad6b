use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::store::StoreError;

/// Domain error taxonomy. Produced by the workflow, translated to HTTP
/// status codes in exactly one place: the [`IntoResponse`] impl below.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("PersonID '{0}' is not in the list of ids.")]
    InvalidPersonId(String),
    #[error("PersonID '{0}' is already in use.")]
    PersonIdAlreadyUsed(String),
    #[error("User with ID {0} does not exist.")]
    UserNotFound(i64),
    #[error("{0}")]
    InvalidRequest(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidPersonId(person_id) => {
                tracing::warn!(%person_id, "rejected: personID not whitelisted");
                StatusCode::BAD_REQUEST
            }
            ApiError::PersonIdAlreadyUsed(person_id) => {
                tracing::warn!(%person_id, "rejected: personID already in use");
                StatusCode::CONFLICT
            }
            ApiError::UserNotFound(id) => {
                tracing::warn!(id, "user not found");
                StatusCode::NOT_FOUND
            }
            ApiError::InvalidRequest(reason) => {
                tracing::warn!(reason, "invalid request body");
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(error) => {
                tracing::error!(?error, "store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Unexpected(error) => {
                tracing::error!(?error, "unexpected api error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internals are logged above and never sent to the client.
            (status, "unexpected error").into_response()
        } else {
            (status, self.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (ApiError::InvalidPersonId("X".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::PersonIdAlreadyUsed("X".into()),
                StatusCode::CONFLICT,
            ),
            (ApiError::UserNotFound(7), StatusCode::NOT_FOUND),
            (
                ApiError::InvalidRequest("bad body"),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Store(StoreError::MissingGeneratedId),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Unexpected(anyhow!("boom")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(
            ApiError::UserNotFound(42).to_string(),
            "User with ID 42 does not exist."
        );
    }
}
