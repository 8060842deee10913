use crate::{
    abstract_trait::{
        account::AccountServiceTrait,
        card::repository::query::DynCardQueryRepository,
        user::repository::query::DynUserQueryRepository,
    },
    domain::principal::AuthenticatedUser,
    errors::{RepositoryError, ServiceError},
    model::{card::CardModel, user::UserModel},
};
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

pub struct AccountService {
    user_query: DynUserQueryRepository,
    card_query: DynCardQueryRepository,
}

impl AccountService {
    pub async fn new(
        user_query: DynUserQueryRepository,
        card_query: DynCardQueryRepository,
    ) -> Self {
        Self {
            user_query,
            card_query,
        }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn resolve_owner(
        &self,
        principal: &AuthenticatedUser,
    ) -> Result<UserModel, ServiceError> {
        self.user_query
            .find_by_username(&principal.username)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => {
                    warn!("username={} not found", principal.username);
                    ServiceError::OwnerNotFound(principal.username.clone())
                }
                other => other.into(),
            })
    }

    async fn resolve_owned_card(
        &self,
        principal: &AuthenticatedUser,
        card_id: i64,
    ) -> Result<CardModel, ServiceError> {
        let owner = self.resolve_owner(principal).await?;

        self.card_query
            .find_by_id_and_owner(card_id, owner.user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => {
                    warn!(
                        "card={card_id} for user={} not found",
                        owner.user_id
                    );
                    ServiceError::CardNotFound(card_id)
                }
                other => other.into(),
            })
    }
}
