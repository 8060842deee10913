pub mod command;
pub mod query;

pub use self::command::CardCommandRepository;
pub use self::query::CardQueryRepository;
