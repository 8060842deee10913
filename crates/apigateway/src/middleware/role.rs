use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use shared::domain::principal::{AuthenticatedUser, ROLE_ADMIN, ROLE_USER};
use tracing::warn;

#[derive(Debug)]
pub struct RoleError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for RoleError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": "error",
            "message": self.message
        }));
        (self.status, body).into_response()
    }
}

fn require_role(req: &Request, role: &str) -> Result<(), RoleError> {
    let principal = req
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| RoleError {
            status: StatusCode::UNAUTHORIZED,
            message: "Authentication required".to_string(),
        })?;

    if !principal.has_role(role) {
        warn!(
            "access denied for user={}, missing role {role}",
            principal.username
        );
        return Err(RoleError {
            status: StatusCode::FORBIDDEN,
            message: "Access denied".to_string(),
        });
    }

    Ok(())
}

pub async fn require_user(req: Request, next: Next) -> Result<Response, RoleError> {
    require_role(&req, ROLE_USER)?;
    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Result<Response, RoleError> {
    require_role(&req, ROLE_ADMIN)?;
    Ok(next.run(req).await)
}
