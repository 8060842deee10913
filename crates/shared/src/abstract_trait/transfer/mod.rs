use crate::{
    domain::{
        principal::AuthenticatedUser,
        requests::transfer::TransferRequest,
        responses::{ApiResponse, TransferResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTransferService = Arc<dyn TransferServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransferServiceTrait {
    async fn transfer(
        &self,
        principal: &AuthenticatedUser,
        req: &TransferRequest,
    ) -> Result<ApiResponse<TransferResponse>, ServiceError>;
}
