use crate::{
    abstract_trait::{
        account::DynAccountService,
        card::{
            repository::{command::DynCardCommandRepository, query::DynCardQueryRepository},
            service::command::CardCommandServiceTrait,
        },
        user::repository::query::DynUserQueryRepository,
    },
    domain::{
        principal::AuthenticatedUser,
        requests::card::{CreateCardRecord, CreateCardRequest},
        responses::{ApiResponse, CardResponse},
    },
    errors::{RepositoryError, ServiceError, format_validation_errors},
    model::card::{CardModel, CardStatus},
    service::card::refresh_expired,
    utils::{CardCipher, random_card_number},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Bounded retries for drawing a unique 16-digit number.
const MAX_NUMBER_ATTEMPTS: u32 = 5;
/// Bounded retries for optimistic-lock conflicts on status transitions.
const MAX_STATUS_ATTEMPTS: u32 = 3;

pub struct CardCommandService {
    user_query: DynUserQueryRepository,
    query: DynCardQueryRepository,
    command: DynCardCommandRepository,
    account: DynAccountService,
    cipher: Arc<CardCipher>,
}

impl CardCommandService {
    pub async fn new(
        user_query: DynUserQueryRepository,
        query: DynCardQueryRepository,
        command: DynCardCommandRepository,
        account: DynAccountService,
        cipher: Arc<CardCipher>,
    ) -> Self {
        Self {
            user_query,
            query,
            command,
            account,
            cipher,
        }
    }

    fn masked_response(&self, card: CardModel) -> Result<CardResponse, ServiceError> {
        let number = self.cipher.decrypt(&card.encrypted_number)?;
        Ok(CardResponse::from_model(card, CardCipher::mask(&number)))
    }
}

#[async_trait]
impl CardCommandServiceTrait for CardCommandService {
    async fn create(
        &self,
        req: &CreateCardRequest,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        if let Err(validation_errors) = validator::Validate::validate(req) {
            let error_msg = format_validation_errors(&validation_errors);
            error!("Validation failed: {error_msg}");
            return Err(ServiceError::Custom(error_msg));
        }

        info!("🆕 Creating card for owner_id={}", req.owner_id);

        let owner = self.user_query.find_by_id(req.owner_id).await.map_err(|e| {
            warn!("👤 Owner with id {} not found: {e:?}", req.owner_id);
            ServiceError::OwnerNotFound(req.owner_id.to_string())
        })?;

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let number = random_card_number().map_err(|e| {
                error!("card number generation failed: {e}");
                ServiceError::IssuanceFailed
            })?;
            let number_hash = CardCipher::fingerprint(&number);

            if self.query.exists_by_number_hash(&number_hash).await? {
                warn!("card number collision on attempt {attempt}, drawing again");
                continue;
            }

            let encrypted_number = self.cipher.encrypt(&number)?;

            let record = CreateCardRecord {
                owner_id: owner.user_id,
                encrypted_number,
                number_hash,
                expiry_date: req.expire_date,
            };

            match self.command.create(&record).await {
                Ok(card) => {
                    info!("✅ Card created successfully with card_id={}", card.card_id);

                    let response = CardResponse::from_model(card, CardCipher::mask(&number));
                    return Ok(ApiResponse {
                        status: "success".into(),
                        message: "Card created successfully!".into(),
                        data: response,
                    });
                }
                // Unique-constraint race with a concurrent issuance; the
                // next attempt draws a fresh number.
                Err(RepositoryError::AlreadyExists(_)) => {
                    warn!("card number collision at insert on attempt {attempt}");
                    continue;
                }
                Err(e) => {
                    error!("💥 Failed to create card for owner_id {}: {e:?}", owner.user_id);
                    return Err(e.into());
                }
            }
        }

        error!("card number generation exhausted {MAX_NUMBER_ATTEMPTS} attempts");
        Err(ServiceError::IssuanceFailed)
    }

    async fn block(&self, card_id: i64) -> Result<ApiResponse<CardResponse>, ServiceError> {
        info!("⛔ Blocking card id={card_id}");

        for attempt in 1..=MAX_STATUS_ATTEMPTS {
            let card = self.query.find_by_id(card_id).await.map_err(|e| match e {
                RepositoryError::NotFound => ServiceError::CardNotFound(card_id),
                other => other.into(),
            })?;
            let card = refresh_expired(&self.query, &self.command, card).await?;

            if card.status == CardStatus::Expired {
                warn!("card {card_id} is expired");
                return Err(ServiceError::InvalidOperation(
                    "Cannot block expired card".into(),
                ));
            }
            if card.status == CardStatus::Blocked {
                warn!("card {card_id} is already BLOCKED");
                return Err(ServiceError::InvalidOperation("Card already BLOCKED".into()));
            }

            match self
                .command
                .update_status(card.card_id, card.version, CardStatus::Blocked)
                .await
            {
                Ok(updated) => {
                    info!("✅ Card with id={card_id} blocked successfully");

                    let response = self.masked_response(updated)?;
                    return Ok(ApiResponse {
                        status: "success".into(),
                        message: "Card blocked successfully!".into(),
                        data: response,
                    });
                }
                Err(RepositoryError::Conflict(_)) if attempt < MAX_STATUS_ATTEMPTS => {
                    warn!("version conflict blocking card {card_id}, attempt {attempt}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(RepositoryError::Conflict(format!("Card {card_id} was modified concurrently")).into())
    }

    async fn activate(&self, card_id: i64) -> Result<ApiResponse<CardResponse>, ServiceError> {
        info!("🔓 Activating card id={card_id}");

        for attempt in 1..=MAX_STATUS_ATTEMPTS {
            let card = self.query.find_by_id(card_id).await.map_err(|e| match e {
                RepositoryError::NotFound => ServiceError::CardNotFound(card_id),
                other => other.into(),
            })?;
            let card = refresh_expired(&self.query, &self.command, card).await?;

            if card.status == CardStatus::Expired {
                warn!("card {card_id} is expired");
                return Err(ServiceError::InvalidOperation(
                    "Cannot activate expired card".into(),
                ));
            }
            if card.status == CardStatus::Active {
                warn!("card {card_id} is already ACTIVE");
                return Err(ServiceError::InvalidOperation("Card already ACTIVE".into()));
            }

            match self
                .command
                .update_status(card.card_id, card.version, CardStatus::Active)
                .await
            {
                Ok(updated) => {
                    info!("✅ Card with id={card_id} activated successfully");

                    let response = self.masked_response(updated)?;
                    return Ok(ApiResponse {
                        status: "success".into(),
                        message: "Card activated successfully!".into(),
                        data: response,
                    });
                }
                Err(RepositoryError::Conflict(_)) if attempt < MAX_STATUS_ATTEMPTS => {
                    warn!("version conflict activating card {card_id}, attempt {attempt}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(RepositoryError::Conflict(format!("Card {card_id} was modified concurrently")).into())
    }

    async fn delete(&self, card_id: i64) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting card id={card_id}");

        let card = self.query.find_by_id(card_id).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::CardNotFound(card_id),
            other => other.into(),
        })?;
        let card = refresh_expired(&self.query, &self.command, card).await?;

        if !card.status.is_deletable() {
            warn!(
                "card {card_id} cannot be deleted, status={}",
                card.status
            );
            return Err(ServiceError::InvalidOperation(
                "Only cards in EXPIRED or NEW status can be deleted".into(),
            ));
        }

        self.command.delete(card.card_id).await?;

        info!("✅ Card with id={card_id} deleted successfully");

        Ok(ApiResponse {
            status: "success".into(),
            message: "Card deleted successfully!".into(),
            data: (),
        })
    }

    async fn request_block(
        &self,
        principal: &AuthenticatedUser,
        card_id: i64,
    ) -> Result<ApiResponse<CardResponse>, ServiceError> {
        info!(
            "📮 User={} requests block for card={card_id}",
            principal.username
        );

        for attempt in 1..=MAX_STATUS_ATTEMPTS {
            let card = self.account.resolve_owned_card(principal, card_id).await?;
            let card = refresh_expired(&self.query, &self.command, card).await?;

            if card.status == CardStatus::Expired {
                warn!("card {card_id} is expired");
                return Err(ServiceError::InvalidOperation(
                    "Cannot request block for expired card".into(),
                ));
            }

            match self
                .command
                .update_status(card.card_id, card.version, CardStatus::BlockRequested)
                .await
            {
                Ok(updated) => {
                    info!(
                        "✅ User={} requested block for card={card_id}",
                        principal.username
                    );

                    let response = self.masked_response(updated)?;
                    return Ok(ApiResponse {
                        status: "success".into(),
                        message: "Card block requested successfully!".into(),
                        data: response,
                    });
                }
                Err(RepositoryError::Conflict(_)) if attempt < MAX_STATUS_ATTEMPTS => {
                    warn!("version conflict on block request for card {card_id}, attempt {attempt}");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(RepositoryError::Conflict(format!("Card {card_id} was modified concurrently")).into())
    }
}
