use crate::{errors::RepositoryError, model::role::RoleModel};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRoleQueryRepository = Arc<dyn RoleQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait RoleQueryRepositoryTrait {
    async fn find_by_name(&self, role_name: &str) -> Result<RoleModel, RepositoryError>;
    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<RoleModel>, RepositoryError>;
}
