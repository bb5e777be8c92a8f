use std::sync::Arc;
use std::sync::OnceLock;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::identity::errors::IdentityError;
use crate::identity::models::AuthenticatedUser;
use crate::identity::models::Identity;
use crate::identity::models::IssuedToken;
use crate::identity::models::LoginCommand;
use crate::identity::models::RegisterCommand;
use crate::identity::models::SubjectId;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;

/// Domain service implementing the authentication gateway.
///
/// Stateless apart from the injected authenticator (which holds the
/// signing secret) and a digest used to equalize login timing.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
    decoy_hash: OnceLock<Option<String>>,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hasher and token issuer
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            decoy_hash: OnceLock::new(),
        }
    }

    /// Run one password verification against a throwaway digest so that an
    /// unknown email costs as much as a wrong password.
    fn verify_against_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_init(|| {
                self.authenticator
                    .hash_password("decoy-password")
                    .inspect_err(|e| {
                        tracing::error!(
                            error = %e,
                            "Failed to build decoy digest; unknown-email logins will skip password verification"
                        );
                    })
                    .ok()
            });

        if let Some(hash) = decoy {
            let _ = self.authenticator.verify_password(password, hash);
        }
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        // Not atomic with the insert below; the store's uniqueness
        // constraint settles concurrent registrations.
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::DuplicateIdentity(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(command.password.as_str())?;

        let identity = Identity {
            id: SubjectId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.repository.create(identity).await?;
        tracing::info!(subject_id = %created.id, "Identity registered");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedToken, IdentityError> {
        let Some(identity) = self.repository.find_by_email(&command.email).await? else {
            self.verify_against_decoy(command.password.as_str());
            tracing::debug!("Login rejected: unknown email");
            return Err(IdentityError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(
                command.password.as_str(),
                &identity.password_hash,
                identity.id,
                identity.email.as_str(),
            )
            .map_err(|e| {
                if matches!(e, auth::AuthenticationError::InvalidCredentials) {
                    tracing::debug!(subject_id = %identity.id, "Login rejected: wrong password");
                }
                IdentityError::from(e)
            })?;

        let expires_at = result.claims.expires_at().ok_or_else(|| {
            IdentityError::Unknown(format!("Token expiry out of range: {}", result.claims.exp))
        })?;

        tracing::info!(subject_id = %identity.id, %expires_at, "Token issued");

        Ok(IssuedToken {
            token: result.access_token,
            subject_id: identity.id,
            expires_at,
        })
    }

    fn verify_token(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        let subject_id = SubjectId::from_string(&claims.sub)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        Ok(AuthenticatedUser::new(subject_id, claims.email))
    }
}
