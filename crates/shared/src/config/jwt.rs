use crate::abstract_trait::jwt::JwtServiceTrait;
use crate::errors::ServiceError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

const TOKEN_LIFETIME_HOURS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub user_id: i64,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtConfig {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        roles: &[String],
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: username.to_string(),
            user_id,
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> Result<JwtClaims, ServiceError> {
        let validation = Validation::new(Algorithm::HS256);

        match decode::<JwtClaims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => Err(ServiceError::TokenExpired),
                _ => Err(ServiceError::Jwt(err)),
            },
        }
    }
}
