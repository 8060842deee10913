pub mod auth;
pub mod card;
pub mod transfer;

pub use self::auth::{AuthRequest, CreateUserRecord, RegisterRequest};
pub use self::card::{CreateCardRecord, CreateCardRequest, FindAllCards};
pub use self::transfer::{TransferBalances, TransferRequest};
