use crate::{
    abstract_trait::card::repository::command::CardCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::card::CreateCardRecord,
    domain::requests::transfer::TransferBalances,
    errors::RepositoryError,
    model::card::{CardModel, CardStatus},
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::error;

const RETURNING_COLUMNS: &str = "card_id, owner_id, encrypted_number, number_hash, expiry_date, \
                                 status, balance, version, created_at, updated_at";

pub struct CardCommandRepository {
    db: ConnectionPool,
}

impl CardCommandRepository {
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
impl CardCommandRepositoryTrait for CardCommandRepository {
    async fn create(&self, req: &CreateCardRecord) -> Result<CardModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = format!(
            "INSERT INTO cards (owner_id, encrypted_number, number_hash, expiry_date, \
                                status, balance, version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, 'NEW', 0, 0, now(), now()) \
             RETURNING {RETURNING_COLUMNS}"
        );

        let card = sqlx::query_as::<_, CardModel>(&sql)
            .bind(req.owner_id)
            .bind(&req.encrypted_number)
            .bind(&req.number_hash)
            .bind(req.expiry_date)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("database error during card creation: {e:?}");
                RepositoryError::from_db(e)
            })?;

        Ok(card)
    }

    async fn update_status(
        &self,
        card_id: i64,
        expected_version: i64,
        status: CardStatus,
    ) -> Result<CardModel, RepositoryError> {
        let mut conn = self.get_conn().await?;

        let sql = format!(
            "UPDATE cards \
             SET status = $3, version = version + 1, updated_at = now() \
             WHERE card_id = $1 AND version = $2 \
             RETURNING {RETURNING_COLUMNS}"
        );

        sqlx::query_as::<_, CardModel>(&sql)
            .bind(card_id)
            .bind(expected_version)
            .bind(status)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("database error during status update of card {card_id}: {e:?}");
                RepositoryError::from_db(e)
            })?
            .ok_or_else(|| {
                RepositoryError::Conflict(format!("Card {card_id} was modified concurrently"))
            })
    }

    async fn transfer_balances(&self, req: &TransferBalances) -> Result<(), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("failed to begin transfer transaction: {e:?}");
            RepositoryError::from_db(e)
        })?;

        // The balance guard on the debit leg makes an over-debit
        // impossible even if the engine's read was stale.
        let debit = sqlx::query(
            "UPDATE cards \
             SET balance = balance - $3, version = version + 1, updated_at = now() \
             WHERE card_id = $1 AND version = $2 AND balance >= $3",
        )
        .bind(req.from_card_id)
        .bind(req.from_version)
        .bind(req.amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("database error during debit of card {}: {e:?}", req.from_card_id);
            RepositoryError::from_db(e)
        })?;

        if debit.rows_affected() == 0 {
            tx.rollback().await.ok();
            return Err(RepositoryError::Conflict(format!(
                "Card {} was modified concurrently",
                req.from_card_id
            )));
        }

        let credit = sqlx::query(
            "UPDATE cards \
             SET balance = balance + $3, version = version + 1, updated_at = now() \
             WHERE card_id = $1 AND version = $2",
        )
        .bind(req.to_card_id)
        .bind(req.to_version)
        .bind(req.amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("database error during credit of card {}: {e:?}", req.to_card_id);
            RepositoryError::from_db(e)
        })?;

        if credit.rows_affected() == 0 {
            tx.rollback().await.ok();
            return Err(RepositoryError::Conflict(format!(
                "Card {} was modified concurrently",
                req.to_card_id
            )));
        }

        tx.commit().await.map_err(|e| {
            error!("failed to commit transfer transaction: {e:?}");
            RepositoryError::from_db(e)
        })?;

        Ok(())
    }

    async fn delete(&self, card_id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.get_conn().await?;

        let result = sqlx::query("DELETE FROM cards WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("database error during deletion of card {card_id}: {e:?}");
                RepositoryError::from_db(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
