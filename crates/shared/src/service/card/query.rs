use crate::{
    abstract_trait::{
        account::DynAccountService,
        card::{
            repository::{command::DynCardCommandRepository, query::DynCardQueryRepository},
            service::query::CardQueryServiceTrait,
        },
    },
    domain::{
        principal::AuthenticatedUser,
        requests::card::FindAllCards,
        responses::{
            ApiResponse, ApiResponsePagination, CardBalanceResponse, CardResponse, Pagination,
        },
    },
    errors::{ServiceError, format_validation_errors},
    model::card::CardModel,
    service::card::refresh_expired,
    utils::CardCipher,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

pub struct CardQueryService {
    query: DynCardQueryRepository,
    command: DynCardCommandRepository,
    account: DynAccountService,
    cipher: Arc<CardCipher>,
}

impl CardQueryService {
    pub async fn new(
        query: DynCardQueryRepository,
        command: DynCardCommandRepository,
        account: DynAccountService,
        cipher: Arc<CardCipher>,
    ) -> Self {
        Self {
            query,
            command,
            account,
            cipher,
        }
    }

    async fn to_responses(
        &self,
        cards: Vec<CardModel>,
    ) -> Result<Vec<CardResponse>, ServiceError> {
        let mut responses = Vec::with_capacity(cards.len());

        for card in cards {
            let card = refresh_expired(&self.query, &self.command, card).await?;
            let number = self.cipher.decrypt(&card.encrypted_number)?;
            responses.push(CardResponse::from_model(card, CardCipher::mask(&number)));
        }

        Ok(responses)
    }
}

#[async_trait]
impl CardQueryServiceTrait for CardQueryService {
    async fn find_all(
        &self,
        req: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError> {
        if let Err(validation_errors) = validator::Validate::validate(req) {
            let error_msg = format_validation_errors(&validation_errors);
            error!("Validation failed: {error_msg}");
            return Err(ServiceError::Custom(error_msg));
        }

        let (cards, total_items) = self.query.find_all(req).await?;

        info!("retrieved {} cards, total {total_items}", cards.len());

        let data = self.to_responses(cards).await?;

        Ok(ApiResponsePagination {
            status: "success".into(),
            message: "Cards retrieved successfully!".into(),
            data,
            pagination: Pagination::new(req.page, req.page_size, total_items),
        })
    }

    async fn find_by_owner(
        &self,
        principal: &AuthenticatedUser,
        req: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError> {
        if let Err(validation_errors) = validator::Validate::validate(req) {
            let error_msg = format_validation_errors(&validation_errors);
            error!("Validation failed: {error_msg}");
            return Err(ServiceError::Custom(error_msg));
        }

        let owner = self.account.resolve_owner(principal).await?;

        let (cards, total_items) = self.query.find_by_owner(owner.user_id, req).await?;

        info!(
            "retrieved {} cards for user={}, total {total_items}",
            cards.len(),
            principal.username
        );

        let data = self.to_responses(cards).await?;

        Ok(ApiResponsePagination {
            status: "success".into(),
            message: "Cards retrieved successfully!".into(),
            data,
            pagination: Pagination::new(req.page, req.page_size, total_items),
        })
    }

    async fn get_balance(
        &self,
        principal: &AuthenticatedUser,
        card_id: i64,
    ) -> Result<ApiResponse<CardBalanceResponse>, ServiceError> {
        let card = self.account.resolve_owned_card(principal, card_id).await?;
        let card = refresh_expired(&self.query, &self.command, card).await?;

        let number = self.cipher.decrypt(&card.encrypted_number)?;

        Ok(ApiResponse {
            status: "success".into(),
            message: "Card balance retrieved successfully!".into(),
            data: CardBalanceResponse {
                id: card.card_id,
                card_number_masked: CardCipher::mask(&number),
                balance: card.balance,
            },
        })
    }
}
