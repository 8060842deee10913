use crate::model::card::CardStatus;
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct FindAllCards {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "Page size must be 1-100"))]
    pub page_size: i64,

    #[serde(default)]
    pub status: Option<CardStatus>,
}

impl Default for FindAllCards {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            status: None,
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCardRequest {
    #[validate(range(min = 1, message = "Owner ID must be at least 1"))]
    pub owner_id: i64,

    /// Calendar date after which the card is expired.
    pub expire_date: NaiveDate,
}

/// Fully prepared row for the store; the number is already encrypted and
/// fingerprinted by the lifecycle engine.
#[derive(Debug, Clone)]
pub struct CreateCardRecord {
    pub owner_id: i64,
    pub encrypted_number: Vec<u8>,
    pub number_hash: String,
    pub expiry_date: NaiveDate,
}
