pub mod command;
mod expiry;
pub mod query;

pub use self::command::CardCommandService;
pub use self::query::CardQueryService;

pub(crate) use self::expiry::refresh_expired;
