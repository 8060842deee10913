use crate::{
    domain::requests::auth::CreateUserRecord, errors::RepositoryError, model::user::UserModel,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError>;
    async fn assign_role(&self, user_id: i64, role_name: &str) -> Result<(), RepositoryError>;
}
