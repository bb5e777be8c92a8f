use auth::AuthenticationError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for SubjectId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubjectIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for registration, login and token verification.
///
/// Every variant above `Password` is terminal and user-facing; the
/// remaining ones are infrastructure failures.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("User already exists")]
    DuplicateIdentity(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token was presented.
    #[error("Unauthorized")]
    Unauthorized,

    /// Token is malformed, expired or signed with another secret.
    #[error("Invalid token")]
    InvalidToken(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(JwtError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AuthenticationError> for IdentityError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => IdentityError::InvalidCredentials,
            AuthenticationError::PasswordError(e) => IdentityError::Password(e),
            AuthenticationError::JwtError(e) => IdentityError::Token(e),
        }
    }
}

