use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Lifecycle states of a card. `New` is the only initial state and
/// `Expired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "card_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    New,
    Active,
    Blocked,
    BlockRequested,
    Expired,
}

impl CardStatus {
    pub fn is_deletable(&self) -> bool {
        matches!(self, CardStatus::Expired | CardStatus::New)
    }

    pub fn is_transferable(&self) -> bool {
        matches!(self, CardStatus::Active)
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardStatus::New => "NEW",
            CardStatus::Active => "ACTIVE",
            CardStatus::Blocked => "BLOCKED",
            CardStatus::BlockRequested => "BLOCK_REQUESTED",
            CardStatus::Expired => "EXPIRED",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CardModel {
    pub card_id: i64,
    pub owner_id: i64,
    pub encrypted_number: Vec<u8>,
    pub number_hash: String,
    pub expiry_date: NaiveDate,
    pub status: CardStatus,
    pub balance: Decimal,
    pub version: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CardModel {
    /// A card is considered expired once its expiry date is today or in
    /// the past, regardless of the stored status.
    pub fn is_past_expiry(&self, today: NaiveDate) -> bool {
        self.expiry_date <= today
    }
}
