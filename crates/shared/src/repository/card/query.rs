use crate::{
    abstract_trait::card::repository::query::CardQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::card::FindAllCards,
    errors::RepositoryError,
    model::card::CardModel,
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

const SELECT_COLUMNS: &str = "card_id, owner_id, encrypted_number, number_hash, expiry_date, \
                              status, balance, version, created_at, updated_at";

pub struct CardQueryRepository {
    db: ConnectionPool,
}

impl CardQueryRepository {
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
impl CardQueryRepositoryTrait for CardQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllCards,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let offset = (req.page - 1) * req.page_size;

        let (cards, total) = match req.status {
            Some(status) => {
                let sql = format!(
                    "SELECT {SELECT_COLUMNS} FROM cards WHERE status = $1 \
                     ORDER BY card_id LIMIT $2 OFFSET $3"
                );
                let cards = sqlx::query_as::<_, CardModel>(&sql)
                    .bind(status)
                    .bind(req.page_size)
                    .bind(offset)
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(RepositoryError::from_db)?;

                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE status = $1")
                        .bind(status)
                        .fetch_one(&mut *conn)
                        .await
                        .map_err(RepositoryError::from_db)?;

                (cards, total)
            }
            None => {
                let sql = format!(
                    "SELECT {SELECT_COLUMNS} FROM cards ORDER BY card_id LIMIT $1 OFFSET $2"
                );
                let cards = sqlx::query_as::<_, CardModel>(&sql)
                    .bind(req.page_size)
                    .bind(offset)
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(RepositoryError::from_db)?;

                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards")
                    .fetch_one(&mut *conn)
                    .await
                    .map_err(RepositoryError::from_db)?;

                (cards, total)
            }
        };

        Ok((cards, total))
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        req: &FindAllCards,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let offset = (req.page - 1) * req.page_size;

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM cards WHERE owner_id = $1 \
             ORDER BY card_id LIMIT $2 OFFSET $3"
        );
        let cards = sqlx::query_as::<_, CardModel>(&sql)
            .bind(owner_id)
            .bind(req.page_size)
            .bind(offset)
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from_db)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from_db)?;

        Ok((cards, total))
    }

    async fn find_by_id(&self, card_id: i64) -> Result<CardModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = format!("SELECT {SELECT_COLUMNS} FROM cards WHERE card_id = $1");
        sqlx::query_as::<_, CardModel>(&sql)
            .bind(card_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from_db)?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id_and_owner(
        &self,
        card_id: i64,
        owner_id: i64,
    ) -> Result<CardModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql =
            format!("SELECT {SELECT_COLUMNS} FROM cards WHERE card_id = $1 AND owner_id = $2");
        sqlx::query_as::<_, CardModel>(&sql)
            .bind(card_id)
            .bind(owner_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from_db)?
            .ok_or(RepositoryError::NotFound)
    }

    async fn exists_by_number_hash(&self, number_hash: &str) -> Result<bool, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM cards WHERE number_hash = $1)")
                .bind(number_hash)
                .fetch_one(&mut *conn)
                .await
                .map_err(RepositoryError::from_db)?;

        Ok(exists)
    }
}
