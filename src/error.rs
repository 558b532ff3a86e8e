use thiserror::Error;

/// Caller-facing validation failures.
///
/// Every variant is reported as a 400 and never retried. The display text is
/// the exact message returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid body")]
    InvalidBody,

    #[error("document_ids is required")]
    MissingDocumentIds,

    #[error("reason is required")]
    MissingReason,

    #[error("reason must be at least {min} characters")]
    ReasonTooShort { min: usize },

    #[error("reason must be <= {max} characters")]
    ReasonTooLong { max: usize },

    /// At least one identifier is not a valid ObjectId. The whole request is
    /// refused and the offending token is not reported.
    #[error("invalid document_ids")]
    InvalidDocumentIds,

    #[error("invalid status (PENDING, APPROVED, REJECTED)")]
    InvalidStatus,
}

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    /// Wiping the collection before seeding failed.
    #[error("failed to reset collection: {0}")]
    Reset(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Numeric HTTP status reported to the caller.
    pub const fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::Database(_)
            | AppError::Timeout(_)
            | AppError::Reset(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Message safe to show to the caller. Store and internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Database(_) => "database error".to_string(),
            AppError::Timeout(_) => "store operation timed out".to_string(),
            AppError::Reset(_) => "failed to reset collection".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
