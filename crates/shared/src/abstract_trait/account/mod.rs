use crate::{
    domain::principal::AuthenticatedUser,
    errors::ServiceError,
    model::{card::CardModel, user::UserModel},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAccountService = Arc<dyn AccountServiceTrait + Send + Sync>;

/// The only component allowed to traverse the user-to-cards relationship
/// for authorization purposes.
#[async_trait]
pub trait AccountServiceTrait {
    async fn resolve_owner(
        &self,
        principal: &AuthenticatedUser,
    ) -> Result<UserModel, ServiceError>;

    /// `CardNotFound` whether the card is absent or owned by someone
    /// else; callers cannot tell the two apart.
    async fn resolve_owned_card(
        &self,
        principal: &AuthenticatedUser,
        card_id: i64,
    ) -> Result<CardModel, ServiceError>;
}
