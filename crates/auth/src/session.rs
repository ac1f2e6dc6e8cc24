//! Authentication session state machine.
//!
//! `Initializing -> Authenticated | Unauthenticated`, then
//! `Authenticated <-> Unauthenticated` through sign-in and sign-out.

use std::sync::Arc;

use async_trait::async_trait;
use caseco_core::auth::{
    AuthError as CoreError, AuthStatus, AuthUser, IdentityProvider, SignInOutcome, TokenSource,
};
use tokio::sync::RwLock;

use crate::config::CognitoConfig;
use crate::error::Result;
use crate::providers::CognitoProvider;
use crate::store::TokenStore;

/// Session of the signed-in administrator.
///
/// Owns the local view of the session; the identity provider owns the
/// remote one. Cheap to clone.
#[derive(Clone)]
pub struct AuthSession {
    provider: Arc<dyn IdentityProvider>,
    status: Arc<RwLock<AuthStatus>>,
}

impl AuthSession {
    /// A session in the `Initializing` state. Call [`AuthSession::initialize`] next.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            status: Arc::new(RwLock::new(AuthStatus::Initializing)),
        }
    }

    /// Cognito-backed session that persists tokens to the configured session
    /// file, already initialized from any saved session.
    pub async fn cognito(config: &CognitoConfig) -> Result<Self> {
        let provider =
            CognitoProvider::new(config)?.with_store(TokenStore::new(&config.session_file));
        if let Err(e) = provider.restore().await {
            tracing::warn!(error = %e, "Ignoring unreadable session file");
        }

        let session = Self::new(Arc::new(provider));
        session.initialize().await;
        Ok(session)
    }

    /// Probes the provider for an existing session. Never retries.
    pub async fn initialize(&self) -> AuthStatus {
        let status = match self.load_user().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "Recovered existing session");
                AuthStatus::Authenticated(user)
            }
            Err(e) => {
                tracing::debug!(error = %e, "No existing session");
                AuthStatus::Unauthenticated
            }
        };
        *self.status.write().await = status.clone();
        status
    }

    /// Signs in and loads the user profile.
    ///
    /// On failure the current state is left untouched. A challenge outcome
    /// also leaves the state untouched; the caller must complete it.
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<SignInOutcome> {
        let outcome = self.provider.sign_in(username, password).await.map_err(|e| {
            tracing::warn!(username, error = %e, "Sign-in failed");
            e
        })?;

        if let SignInOutcome::ChallengeRequired { challenge, .. } = &outcome {
            tracing::info!(username, challenge = %challenge, "Sign-in requires another step");
            return Ok(outcome);
        }

        let user = self.load_user().await?;
        tracing::info!(username = %user.username, "Signed in");
        *self.status.write().await = AuthStatus::Authenticated(user);
        Ok(outcome)
    }

    /// Signs out.
    ///
    /// The local session is cleared even when the provider call fails; the
    /// provider error is still returned.
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.provider.sign_out().await;
        *self.status.write().await = AuthStatus::Unauthenticated;

        match result {
            Ok(()) => {
                tracing::info!("Signed out");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Sign-out failed at the provider");
                Err(e.into())
            }
        }
    }

    /// Current id token, or `None` when there is none or the provider failed.
    pub async fn get_token(&self) -> Option<String> {
        match self.provider.session_tokens().await {
            Ok(tokens) => tokens.map(|t| t.id_token),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read session tokens");
                None
            }
        }
    }

    pub async fn status(&self) -> AuthStatus {
        self.status.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.status.read().await.is_authenticated()
    }

    pub async fn is_initializing(&self) -> bool {
        self.status.read().await.is_initializing()
    }

    pub async fn user(&self) -> Option<AuthUser> {
        self.status.read().await.user().cloned()
    }

    /// The signed-in user, or why there is none.
    pub async fn require_authenticated(&self) -> Result<AuthUser> {
        match &*self.status.read().await {
            AuthStatus::Authenticated(user) => Ok(user.clone()),
            AuthStatus::Initializing => Err(CoreError::Initializing.into()),
            AuthStatus::Unauthenticated => Err(CoreError::NotAuthenticated.into()),
        }
    }

    async fn load_user(&self) -> std::result::Result<AuthUser, CoreError> {
        let user = self.provider.current_user().await?;
        let attributes = self.provider.user_attributes().await?;
        Ok(AuthUser::new(user, attributes))
    }
}

#[async_trait]
impl TokenSource for AuthSession {
    async fn id_token(&self) -> Option<String> {
        self.get_token().await
    }
}
