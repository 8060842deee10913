use crate::{
    abstract_trait::{
        auth::AuthServiceTrait,
        hashing::DynHashing,
        jwt::DynJwtService,
        role::DynRoleQueryRepository,
        user::repository::{command::DynUserCommandRepository, query::DynUserQueryRepository},
    },
    domain::{
        principal::ROLE_USER,
        requests::auth::{AuthRequest, CreateUserRecord, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::{RepositoryError, ServiceError, format_validation_errors},
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};
use validator::Validate;

pub struct AuthService {
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    role_query: DynRoleQueryRepository,
    hashing: DynHashing,
    jwt: DynJwtService,
}

impl AuthService {
    pub async fn new(
        user_query: DynUserQueryRepository,
        user_command: DynUserCommandRepository,
        role_query: DynRoleQueryRepository,
        hashing: DynHashing,
        jwt: DynJwtService,
    ) -> Self {
        Self {
            user_query,
            user_command,
            role_query,
            hashing,
            jwt,
        }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register_user(
        &self,
        input: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        if let Err(validation_errors) = input.validate() {
            let error_msg = format_validation_errors(&validation_errors);
            error!("Validation failed: {error_msg}");
            return Err(ServiceError::Custom(error_msg));
        }

        if self.user_query.exists_by_username(&input.username).await? {
            warn!("user with name={} already exists", input.username);
            return Err(RepositoryError::AlreadyExists(format!(
                "Username {} already exists",
                input.username
            ))
            .into());
        }

        let password = self.hashing.hash_password(&input.password).await?;

        let user = self
            .user_command
            .create(&CreateUserRecord {
                username: input.username.clone(),
                password,
            })
            .await?;

        self.user_command
            .assign_role(user.user_id, ROLE_USER)
            .await?;

        info!("new user registered={}", user.username);

        Ok(ApiResponse {
            status: "success".into(),
            message: "User registered successfully!".into(),
            data: UserResponse::from(user),
        })
    }

    async fn login_user(
        &self,
        input: &AuthRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        if let Err(validation_errors) = input.validate() {
            let error_msg = format_validation_errors(&validation_errors);
            error!("Validation failed: {error_msg}");
            return Err(ServiceError::Custom(error_msg));
        }

        let user = self
            .user_query
            .find_by_username(&input.username)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => {
                    warn!("authentication failed for user={}", input.username);
                    ServiceError::InvalidCredentials
                }
                other => other.into(),
            })?;

        let valid = self
            .hashing
            .verify_password(&user.password, &input.password)
            .await?;
        if !valid {
            warn!("authentication failed for user={}", input.username);
            return Err(ServiceError::InvalidCredentials);
        }

        let roles: Vec<String> = self
            .role_query
            .find_by_user_id(user.user_id)
            .await?
            .into_iter()
            .map(|r| r.role_name)
            .collect();

        let token = self
            .jwt
            .generate_token(user.user_id, &user.username, &roles)?;

        info!("user login success: {}", user.username);

        Ok(ApiResponse {
            status: "success".into(),
            message: "Login successful!".into(),
            data: TokenResponse {
                access_token: token,
                token_type: "Bearer".into(),
                username: user.username,
                roles,
            },
        })
    }
}
