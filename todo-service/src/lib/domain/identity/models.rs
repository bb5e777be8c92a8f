use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::IdentityError;
use crate::identity::errors::SubjectIdError;

/// Identity aggregate entity.
///
/// One registered user: the email it signs in with and the password digest.
/// Immutable after registration.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: SubjectId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Subject unique identifier type.
///
/// Scopes ownership of every resource an identity creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    /// Generate a new random subject ID.
    ///
    /// # Returns
    /// SubjectId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a subject ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SubjectIdError> {
        Uuid::parse_str(s)
            .map(SubjectId)
            .map_err(|e| SubjectIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Only non-emptiness is enforced here; address syntax is the client's
/// concern. Stored and compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address.
    ///
    /// # Errors
    /// * `MissingCredentials` - Email is empty
    pub fn new(email: String) -> Result<Self, IdentityError> {
        if email.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password, non-empty. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `MissingCredentials` - Password is empty
    pub fn new(password: String) -> Result<Self, IdentityError> {
        if password.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new identity with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    /// Construct a register command from raw request fields.
    ///
    /// # Arguments
    /// * `email` - Raw email
    /// * `password` - Plain text password (will be hashed by service)
    ///
    /// # Errors
    /// * `MissingCredentials` - Either field is empty
    pub fn new(email: String, password: String) -> Result<Self, IdentityError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Password::new(password)?,
        })
    }
}

/// Command to log in. Fields are not validated: any mismatch, including
/// empty input, is reported as invalid credentials.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: Password,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self {
            email,
            password: Password(password),
        }
    }
}

/// Bearer token handed out on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub subject_id: SubjectId,
    pub expires_at: DateTime<Utc>,
}

/// Identity attached to a request once its bearer token has been verified.
///
/// Lives in the request extensions for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    subject_id: SubjectId,
    email: String,
}

impl AuthenticatedUser {
    pub fn new(subject_id: SubjectId, email: String) -> Self {
        Self { subject_id, email }
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
