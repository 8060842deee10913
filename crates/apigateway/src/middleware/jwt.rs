use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shared::{abstract_trait::jwt::DynJwtService, domain::principal::AuthenticatedUser};
use tracing::warn;

#[derive(Debug)]
pub struct AuthError {
    pub status: StatusCode,
    pub message: String,
}

impl AuthError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": "error",
            "message": self.message
        }));
        (self.status, body).into_response()
    }
}

/// Verifies the bearer token and makes the caller available to handlers
/// as an `AuthenticatedUser` request extension.
pub async fn auth(mut req: Request, next: Next) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AuthError::unauthorized("Missing bearer token in Authorization header")
        })?
        .to_string();

    let jwt = req
        .extensions()
        .get::<DynJwtService>()
        .cloned()
        .ok_or_else(|| AuthError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "JWT service is not configured".to_string(),
        })?;

    let claims = jwt.verify_token(&token).map_err(|e| {
        warn!("token verification failed: {e}");
        AuthError::unauthorized("Invalid or expired token")
    })?;

    let principal = AuthenticatedUser {
        user_id: claims.user_id,
        username: claims.sub,
        roles: claims.roles,
    };

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
