pub mod query;

pub use self::query::RoleQueryRepository;
