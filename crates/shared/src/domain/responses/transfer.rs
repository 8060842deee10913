use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Transient record of a completed transfer; not persisted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransferResponse {
    #[serde(rename = "transfer_id")]
    pub transfer_id: Uuid,
    #[serde(rename = "from_card_id")]
    pub from_card_id: i64,
    #[serde(rename = "to_card_id")]
    pub to_card_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    #[serde(rename = "processed_at")]
    pub processed_at: DateTime<Utc>,
}
