use crate::{
    domain::{
        principal::AuthenticatedUser,
        requests::card::CreateCardRequest,
        responses::{ApiResponse, CardResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCardCommandService = Arc<dyn CardCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CardCommandServiceTrait {
    async fn create(&self, req: &CreateCardRequest)
    -> Result<ApiResponse<CardResponse>, ServiceError>;

    async fn block(&self, card_id: i64) -> Result<ApiResponse<CardResponse>, ServiceError>;

    async fn activate(&self, card_id: i64) -> Result<ApiResponse<CardResponse>, ServiceError>;

    async fn delete(&self, card_id: i64) -> Result<ApiResponse<()>, ServiceError>;

    async fn request_block(
        &self,
        principal: &AuthenticatedUser,
        card_id: i64,
    ) -> Result<ApiResponse<CardResponse>, ServiceError>;
}
