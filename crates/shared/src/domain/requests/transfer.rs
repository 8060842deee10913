use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TransferRequest {
    #[validate(range(min = 1, message = "From card ID must be at least 1"))]
    pub from_card_id: i64,

    #[validate(range(min = 1, message = "To card ID must be at least 1"))]
    pub to_card_id: i64,

    /// Positive amount with at most two decimal places; re-asserted by the
    /// transfer engine.
    pub amount: Decimal,

    #[validate(length(max = 255, message = "Description is limited to 255 characters"))]
    pub description: Option<String>,
}

/// Atomic two-leg balance move, guarded by the versions the engine read.
/// Either leg failing its version (or balance) guard aborts the whole
/// transaction.
#[derive(Debug, Clone)]
pub struct TransferBalances {
    pub from_card_id: i64,
    pub from_version: i64,
    pub to_card_id: i64,
    pub to_version: i64,
    pub amount: Decimal,
}
