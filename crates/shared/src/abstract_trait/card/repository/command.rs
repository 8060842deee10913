use crate::{
    domain::requests::card::CreateCardRecord,
    domain::requests::transfer::TransferBalances,
    errors::RepositoryError,
    model::card::{CardModel, CardStatus},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardCommandRepository = Arc<dyn CardCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CardCommandRepositoryTrait {
    async fn create(&self, req: &CreateCardRecord) -> Result<CardModel, RepositoryError>;

    /// Compare-and-swap on `version`; a stale version yields
    /// `RepositoryError::Conflict`, never a silent overwrite.
    async fn update_status(
        &self,
        card_id: i64,
        expected_version: i64,
        status: CardStatus,
    ) -> Result<CardModel, RepositoryError>;

    /// Debit and credit in one store transaction; both legs commit or
    /// neither does.
    async fn transfer_balances(&self, req: &TransferBalances) -> Result<(), RepositoryError>;

    async fn delete(&self, card_id: i64) -> Result<(), RepositoryError>;
}
