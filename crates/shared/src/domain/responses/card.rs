use crate::{model::card::{CardModel, CardStatus}, utils::format_datetime};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardResponse {
    pub id: i64,
    #[serde(rename = "owner_id")]
    pub owner_id: i64,
    /// Masked display form; the plaintext number never leaves the service.
    #[serde(rename = "card_number")]
    pub card_number: String,
    #[serde(rename = "expiry_date")]
    pub expiry_date: NaiveDate,
    pub status: CardStatus,
    pub balance: Decimal,
    #[serde(rename = "created_at")]
    pub created_at: String,
    #[serde(rename = "updated_at")]
    pub updated_at: String,
}

impl CardResponse {
    /// Builds a response from a stored card plus its already-masked number.
    /// Masking requires decryption, so there is no plain `From<CardModel>`.
    pub fn from_model(card: CardModel, masked_number: String) -> Self {
        Self {
            id: card.card_id,
            owner_id: card.owner_id,
            card_number: masked_number,
            expiry_date: card.expiry_date,
            status: card.status,
            balance: card.balance,
            created_at: format_datetime(card.created_at),
            updated_at: format_datetime(card.updated_at),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CardBalanceResponse {
    pub id: i64,
    #[serde(rename = "card_number_masked")]
    pub card_number_masked: String,
    pub balance: Decimal,
}
