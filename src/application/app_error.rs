use thiserror::Error;

/// Application failure taxonomy.
///
/// The first six variants are the terminal outcomes of the authentication
/// pipeline; the rest cover the profile surface. None of them are retried
/// inside the application — `ProviderUnavailable` and `StoreUnavailable` are
/// transient by nature and may be retried by the caller.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing bearer credential")]
    MissingCredential,

    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    #[error("no active account for subject {0}")]
    AccountNotFound(String),

    #[error("identity provider unavailable for subject {subject}: {reason}")]
    ProviderUnavailable { subject: String, reason: String },

    #[error("identity provider rejected the service credential: {0}")]
    ProviderAuthError(String),

    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("not found")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
