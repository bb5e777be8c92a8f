use async_trait::async_trait;

use crate::identity::errors::IdentityError;
use crate::identity::models::AuthenticatedUser;
use crate::identity::models::Identity;
use crate::identity::models::IssuedToken;
use crate::identity::models::LoginCommand;
use crate::identity::models::RegisterCommand;

/// Port for the authentication gateway.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity. Does not log it in.
    ///
    /// # Arguments
    /// * `command` - Non-empty email and password
    ///
    /// # Returns
    /// Stored identity
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Check credentials and issue a bearer token.
    ///
    /// # Arguments
    /// * `command` - Email and password as submitted
    ///
    /// # Returns
    /// Signed token valid for the configured lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Password` / `Token` - Verification or signing failed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, IdentityError>;

    /// Verify a bearer token and derive the request identity.
    ///
    /// Pure computation; no store lookup.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, expired or wrongly signed token
    fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, IdentityError>;
}

/// Persistence operations for identity records (the credential store).
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist new identity to storage.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by exact email.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;
}
