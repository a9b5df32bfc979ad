use bizdesk_core::error::CoreError;
use validator::ValidationErrors;

/// Failure of a repository write.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// The input was rejected before reaching the database.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl From<ValidationErrors> for RepoError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(CoreError::Validation(errors.to_string()))
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
