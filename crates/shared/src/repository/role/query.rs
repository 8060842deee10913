use crate::{
    abstract_trait::role::RoleQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::role::RoleModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

pub struct RoleQueryRepository {
    db: ConnectionPool,
}

impl RoleQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn get_conn(
        &self,
    ) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, RepositoryError> {
        self.db.acquire().await.map_err(|e| {
            error!("failed to acquire DB connection: {e:?}");
            RepositoryError::from_db(e)
        })
    }
}

#[async_trait]
impl RoleQueryRepositoryTrait for RoleQueryRepository {
    async fn find_by_name(&self, role_name: &str) -> Result<RoleModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, RoleModel>(
            "SELECT role_id, role_name FROM roles WHERE role_name = $1",
        )
        .bind(role_name)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from_db)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<RoleModel>, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let roles = sqlx::query_as::<_, RoleModel>(
            "SELECT r.role_id, r.role_name \
             FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.role_id \
             WHERE ur.user_id = $1 \
             ORDER BY r.role_name",
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from_db)?;

        Ok(roles)
    }
}
