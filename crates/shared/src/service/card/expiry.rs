use crate::{
    abstract_trait::card::repository::{
        command::DynCardCommandRepository, query::DynCardQueryRepository,
    },
    errors::{RepositoryError, ServiceError},
    model::card::{CardModel, CardStatus},
};
use chrono::Utc;
use tracing::info;

/// Lazily applies the expiry transition. Called before every
/// state-dependent operation so nothing ever runs against a card whose
/// expiry date has passed with a stale status.
pub(crate) async fn refresh_expired(
    query: &DynCardQueryRepository,
    command: &DynCardCommandRepository,
    card: CardModel,
) -> Result<CardModel, ServiceError> {
    let today = Utc::now().date_naive();

    if card.status == CardStatus::Expired || !card.is_past_expiry(today) {
        return Ok(card);
    }

    match command
        .update_status(card.card_id, card.version, CardStatus::Expired)
        .await
    {
        Ok(updated) => {
            info!("card {} expired", updated.card_id);
            Ok(updated)
        }
        Err(RepositoryError::Conflict(_)) => {
            // Lost the race; re-read and, if the winner did not mark the
            // card expired, apply the transition against the fresh version.
            let current = query.find_by_id(card.card_id).await?;
            if current.status != CardStatus::Expired && current.is_past_expiry(today) {
                let updated = command
                    .update_status(current.card_id, current.version, CardStatus::Expired)
                    .await?;
                info!("card {} expired", updated.card_id);
                return Ok(updated);
            }
            Ok(current)
        }
        Err(e) => Err(e.into()),
    }
}
