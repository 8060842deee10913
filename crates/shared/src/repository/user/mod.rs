pub mod command;
pub mod query;

pub use self::command::UserCommandRepository;
pub use self::query::UserQueryRepository;
