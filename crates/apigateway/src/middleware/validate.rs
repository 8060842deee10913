use axum::{Json, extract::FromRequest, extract::Request};
use serde::de::DeserializeOwned;
use shared::errors::{AppErrorHttp, ServiceError, format_validation_errors};
use validator::Validate;

/// JSON extractor that runs `validator` rules before the handler sees the
/// payload.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppErrorHttp;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AppErrorHttp(ServiceError::Custom(format!("Invalid JSON payload: {e}")))
        })?;

        value.validate().map_err(|e| {
            AppErrorHttp(ServiceError::Custom(format_validation_errors(&e)))
        })?;

        Ok(SimpleValidatedJson(value))
    }
}
