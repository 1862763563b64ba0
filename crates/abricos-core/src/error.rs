use thiserror::Error;

#[derive(Debug, Error)]
pub enum AbricosError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[cfg(feature = "native")]
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rejected user input. Always recovered at the form that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required fields are missing")]
    MissingFields,

    #[error("email address is malformed")]
    InvalidEmail,

    #[error("email or password is wrong")]
    InvalidCredentials,

    #[error("password is too short")]
    PasswordTooShort,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("email is already registered")]
    EmailTaken,

    #[error("rating must be between 1 and 10")]
    RatingOutOfRange,
}

impl AbricosError {
    /// The validation failure behind this error, if that is what it is.
    pub fn validation(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(v) => Some(*v),
            _ => None,
        }
    }
}
