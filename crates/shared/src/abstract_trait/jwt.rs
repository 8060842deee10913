use crate::config::JwtClaims;
use crate::errors::ServiceError;
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

pub trait JwtServiceTrait {
    fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        roles: &[String],
    ) -> Result<String, ServiceError>;

    fn verify_token(&self, token: &str) -> Result<JwtClaims, ServiceError>;
}
