use crate::{
    abstract_trait::user::repository::query::UserQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::user::UserModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
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
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_by_id(&self, user_id: i64) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>(
            "SELECT user_id, username, password, created_at, updated_at \
             FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from_db)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        sqlx::query_as::<_, UserModel>(
            "SELECT user_id, username, password, created_at, updated_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&mut *conn)
        .await
        .map_err(RepositoryError::from_db)?
        .ok_or(RepositoryError::NotFound)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&mut *conn)
                .await
                .map_err(RepositoryError::from_db)?;

        Ok(exists)
    }
}
