use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Custom(String),
}

impl RepositoryError {
    /// Classifies a sqlx error using Postgres SQLSTATE codes so that
    /// unique and foreign-key violations surface as their own variants.
    pub fn from_db(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return RepositoryError::NotFound;
        }

        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code().map(|c| c.to_string());
            let constraint = db_err.constraint().map(str::to_string);

            match code.as_deref() {
                Some("23505") => {
                    return RepositoryError::AlreadyExists(
                        constraint.unwrap_or_else(|| "unique constraint".to_string()),
                    );
                }
                Some("23503") => {
                    return RepositoryError::ForeignKey(
                        constraint.unwrap_or_else(|| "foreign key".to_string()),
                    );
                }
                _ => {}
            }
        }

        RepositoryError::Sqlx(err)
    }
}
