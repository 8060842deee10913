use crate::{
    domain::{
        principal::AuthenticatedUser,
        requests::card::FindAllCards,
        responses::{ApiResponse, ApiResponsePagination, CardBalanceResponse, CardResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardQueryService = Arc<dyn CardQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CardQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError>;

    async fn find_by_owner(
        &self,
        principal: &AuthenticatedUser,
        req: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError>;

    async fn get_balance(
        &self,
        principal: &AuthenticatedUser,
        card_id: i64,
    ) -> Result<ApiResponse<CardBalanceResponse>, ServiceError>;
}
