use crate::errors::{
    error::ErrorResponse, repository::RepositoryError, service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

#[derive(Debug)]
pub struct AppErrorHttp(pub ServiceError);

impl From<ServiceError> for AppErrorHttp {
    fn from(err: ServiceError) -> Self {
        AppErrorHttp(err)
    }
}

impl IntoResponse for AppErrorHttp {
    fn into_response(self) -> Response {
        let (status, msg) = match self.0 {
            ServiceError::CardNotFound(id) => {
                warn!("card {id} not found");
                (
                    StatusCode::NOT_FOUND,
                    format!("Card not found with id {id}"),
                )
            }

            ServiceError::OwnerNotFound(who) => {
                warn!("owner {who} not found");
                (StatusCode::NOT_FOUND, format!("Owner not found: {who}"))
            }

            ServiceError::InvalidOperation(msg) => (StatusCode::BAD_REQUEST, msg),

            ServiceError::InsufficientFunds(id) => (
                StatusCode::BAD_REQUEST,
                format!("Insufficient funds to perform the operation on card {id}"),
            ),

            ServiceError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }

            ServiceError::Jwt(err) => (StatusCode::UNAUTHORIZED, format!("JWT error: {err}")),

            ServiceError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "Token has expired".to_string())
            }

            ServiceError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
                RepositoryError::Conflict(msg) => (StatusCode::CONFLICT, msg),
                RepositoryError::AlreadyExists(msg) => (StatusCode::CONFLICT, msg),
                RepositoryError::ForeignKey(msg) => (
                    StatusCode::BAD_REQUEST,
                    format!("Foreign key violation: {msg}"),
                ),
                RepositoryError::Sqlx(err) => {
                    error!("database error: {err:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                    )
                }
                RepositoryError::Custom(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            },

            ServiceError::Crypto(err) => {
                error!("card number crypto failure: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }

            ServiceError::IssuanceFailed => {
                error!("card number issuance exhausted retries");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to issue a card number".to_string(),
                )
            }

            ServiceError::Bcrypt(err) => {
                error!("bcrypt error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal authentication error".to_string(),
                )
            }

            ServiceError::Custom(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".to_string(),
            message: msg,
        });

        (status, body).into_response()
    }
}
