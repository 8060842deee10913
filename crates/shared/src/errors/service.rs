use crate::errors::repository::RepositoryError;
use crate::utils::CryptoError;
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Card not found with id {0}")]
    CardNotFound(i64),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error("{0}")]
    InvalidOperation(String),

    #[error("Insufficient funds to perform the operation on card {0}")]
    InsufficientFunds(i64),

    #[error("Exhausted retries generating a unique card number")]
    IssuanceFailed,

    #[error("Card number encryption error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Custom error: {0}")]
    Custom(String),
}
