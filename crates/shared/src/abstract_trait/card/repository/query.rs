use crate::{
    domain::requests::card::FindAllCards, errors::RepositoryError, model::card::CardModel,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardQueryRepository = Arc<dyn CardQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CardQueryRepositoryTrait {
    async fn find_all(&self, req: &FindAllCards)
    -> Result<(Vec<CardModel>, i64), RepositoryError>;

    async fn find_by_owner(
        &self,
        owner_id: i64,
        req: &FindAllCards,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError>;

    async fn find_by_id(&self, card_id: i64) -> Result<CardModel, RepositoryError>;

    /// Filtered by id AND owner in one query; absent and foreign-owned
    /// cards are indistinguishable to the caller.
    async fn find_by_id_and_owner(
        &self,
        card_id: i64,
        owner_id: i64,
    ) -> Result<CardModel, RepositoryError>;

    async fn exists_by_number_hash(&self, number_hash: &str) -> Result<bool, RepositoryError>;
}
