use crate::{
    abstract_trait::user::repository::command::UserCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::auth::CreateUserRecord,
    errors::RepositoryError,
    model::user::UserModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
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
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let user = sqlx::query_as::<_, UserModel>(
            "INSERT INTO users (username, password, created_at, updated_at) \
             VALUES ($1, $2, now(), now()) \
             RETURNING user_id, username, password, created_at, updated_at",
        )
        .bind(&req.username)
        .bind(&req.password)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("database error during user creation: {e:?}");
            RepositoryError::from_db(e)
        })?;

        Ok(user)
    }

    async fn assign_role(&self, user_id: i64, role_name: &str) -> Result<(), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let result = sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) \
             SELECT $1, role_id FROM roles WHERE role_name = $2",
        )
        .bind(user_id)
        .bind(role_name)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            error!("database error assigning role {role_name} to user {user_id}: {e:?}");
            RepositoryError::from_db(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Custom(format!(
                "Role {role_name} does not exist"
            )));
        }

        Ok(())
    }
}
