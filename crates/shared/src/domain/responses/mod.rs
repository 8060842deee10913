mod api;
mod auth;
mod card;
mod pagination;
mod transfer;
mod user;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::auth::TokenResponse;
pub use self::card::{CardBalanceResponse, CardResponse};
pub use self::pagination::Pagination;
pub use self::transfer::TransferResponse;
pub use self::user::UserResponse;
