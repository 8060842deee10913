use crate::{
    abstract_trait::{
        account::DynAccountService,
        card::repository::{command::DynCardCommandRepository, query::DynCardQueryRepository},
        transfer::TransferServiceTrait,
    },
    domain::{
        principal::AuthenticatedUser,
        requests::transfer::{TransferBalances, TransferRequest},
        responses::{ApiResponse, TransferResponse},
    },
    errors::{RepositoryError, ServiceError, format_validation_errors},
    service::card::refresh_expired,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Bounded retries when a concurrent writer invalidates the versions read
/// for the two legs.
const MAX_TRANSFER_ATTEMPTS: u32 = 3;

pub struct TransferService {
    account: DynAccountService,
    query: DynCardQueryRepository,
    command: DynCardCommandRepository,
}

impl TransferService {
    pub async fn new(
        account: DynAccountService,
        query: DynCardQueryRepository,
        command: DynCardCommandRepository,
    ) -> Self {
        Self {
            account,
            query,
            command,
        }
    }
}

#[async_trait]
impl TransferServiceTrait for TransferService {
    async fn transfer(
        &self,
        principal: &AuthenticatedUser,
        req: &TransferRequest,
    ) -> Result<ApiResponse<TransferResponse>, ServiceError> {
        info!(
            "starting transfer of {} from card {} to card {} for user={}",
            req.amount, req.from_card_id, req.to_card_id, principal.username
        );

        if let Err(validation_errors) = validator::Validate::validate(req) {
            let error_msg = format_validation_errors(&validation_errors);
            error!("Validation failed: {error_msg}");
            return Err(ServiceError::Custom(error_msg));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;

            let from = self
                .account
                .resolve_owned_card(principal, req.from_card_id)
                .await?;
            let to = self
                .account
                .resolve_owned_card(principal, req.to_card_id)
                .await?;

            if from.card_id == to.card_id {
                warn!("transfer rejected, from and to are the same card {}", from.card_id);
                return Err(ServiceError::InvalidOperation(
                    "Cannot transfer to the same card".into(),
                ));
            }

            // Validated upstream as well, but the engine re-asserts the
            // amount before touching any balance.
            if req.amount <= Decimal::ZERO {
                return Err(ServiceError::InvalidOperation(
                    "Transfer amount must be greater than zero".into(),
                ));
            }
            if req.amount.scale() > 2 {
                return Err(ServiceError::InvalidOperation(
                    "Transfer amount is limited to two decimal places".into(),
                ));
            }

            let from = refresh_expired(&self.query, &self.command, from).await?;
            let to = refresh_expired(&self.query, &self.command, to).await?;

            if !from.status.is_transferable() {
                warn!("card {} isn't active, status={}", from.card_id, from.status);
                return Err(ServiceError::InvalidOperation(format!(
                    "The card {} is not active",
                    from.card_id
                )));
            }
            if !to.status.is_transferable() {
                warn!("card {} isn't active, status={}", to.card_id, to.status);
                return Err(ServiceError::InvalidOperation(format!(
                    "The card {} is not active",
                    to.card_id
                )));
            }

            if from.balance < req.amount {
                warn!(
                    "insufficient funds on card {}, requested {}, available {}",
                    from.card_id, req.amount, from.balance
                );
                return Err(ServiceError::InsufficientFunds(from.card_id));
            }

            let balances = TransferBalances {
                from_card_id: from.card_id,
                from_version: from.version,
                to_card_id: to.card_id,
                to_version: to.version,
                amount: req.amount,
            };

            match self.command.transfer_balances(&balances).await {
                Ok(()) => {
                    info!(
                        "user={} transferred {} from card {} to card {}",
                        principal.username, req.amount, from.card_id, to.card_id
                    );

                    let record = TransferResponse {
                        transfer_id: Uuid::new_v4(),
                        from_card_id: from.card_id,
                        to_card_id: to.card_id,
                        amount: req.amount,
                        description: req.description.clone(),
                        processed_at: Utc::now(),
                    };

                    return Ok(ApiResponse {
                        status: "success".into(),
                        message: "Transfer completed successfully!".into(),
                        data: record,
                    });
                }
                Err(RepositoryError::Conflict(msg)) if attempt < MAX_TRANSFER_ATTEMPTS => {
                    warn!("transfer conflict on attempt {attempt}: {msg}, retrying");
                    continue;
                }
                Err(e) => {
                    error!("transfer failed: {e:?}");
                    return Err(e.into());
                }
            }
        }
    }
}
