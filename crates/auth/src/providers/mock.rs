//! In-memory identity provider for development and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use caseco_core::auth::{
    AuthError, CurrentUser, IdentityProvider, Result, SessionTokens, SignInOutcome,
    UserAttributes,
};
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct MockUser {
    password: String,
    attributes: UserAttributes,
    /// Challenge returned instead of tokens (e.g. `NEW_PASSWORD_REQUIRED`).
    challenge: Option<String>,
}

/// Identity provider backed by a fixed user table.
///
/// Issues tokens of the form `mock-id-<username>-<n>` so tests can tell
/// sessions apart.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    users: HashMap<String, MockUser>,
    signed_in: RwLock<Option<(String, SessionTokens)>>,
    issued: AtomicUsize,
    token_reads: AtomicUsize,
    fail_sign_out: AtomicBool,
    fail_tokens: AtomicBool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user that can sign in with `password`.
    pub fn with_user(mut self, username: &str, password: &str, attributes: UserAttributes) -> Self {
        self.users.insert(
            username.to_string(),
            MockUser {
                password: password.to_string(),
                attributes,
                challenge: None,
            },
        );
        self
    }

    /// Adds a user whose sign-in stops at `challenge`.
    pub fn with_challenged_user(mut self, username: &str, password: &str, challenge: &str) -> Self {
        self.users.insert(
            username.to_string(),
            MockUser {
                password: password.to_string(),
                attributes: UserAttributes::new(),
                challenge: Some(challenge.to_string()),
            },
        );
        self
    }

    /// Starts with `username` already signed in, as if a session was recovered.
    pub async fn signed_in_as(self, username: &str) -> Self {
        let tokens = self.issue(username);
        *self.signed_in.write().await = Some((username.to_string(), tokens));
        self
    }

    /// Make the remote half of sign-out fail from now on.
    pub fn fail_sign_out(&self, fail: bool) {
        self.fail_sign_out.store(fail, Ordering::SeqCst);
    }

    /// Make token reads fail from now on.
    pub fn fail_tokens(&self, fail: bool) {
        self.fail_tokens.store(fail, Ordering::SeqCst);
    }

    /// Number of times tokens were read.
    pub fn token_reads(&self) -> usize {
        self.token_reads.load(Ordering::SeqCst)
    }

    fn issue(&self, username: &str) -> SessionTokens {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        SessionTokens {
            id_token: format!("mock-id-{username}-{n}"),
            access_token: format!("mock-access-{username}-{n}"),
            refresh_token: None,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    async fn signed_in_user(&self) -> Result<&MockUser> {
        let guard = self.signed_in.read().await;
        let (username, _) = guard.as_ref().ok_or(AuthError::NotAuthenticated)?;
        self.users
            .get(username)
            .ok_or_else(|| AuthError::Provider(format!("unknown user {username}")))
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInOutcome> {
        let user = self
            .users
            .get(username)
            .filter(|user| user.password == password)
            .ok_or_else(|| {
                AuthError::InvalidCredentials("Incorrect username or password.".to_string())
            })?;

        if let Some(challenge) = &user.challenge {
            return Ok(SignInOutcome::ChallengeRequired {
                challenge: challenge.clone(),
                session: Some(format!("mock-session-{username}")),
            });
        }

        let tokens = self.issue(username);
        *self.signed_in.write().await = Some((username.to_string(), tokens));
        Ok(SignInOutcome::SignedIn)
    }

    async fn sign_out(&self) -> Result<()> {
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::Provider("sign-out request failed".to_string()));
        }
        *self.signed_in.write().await = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        let username = self
            .signed_in
            .read()
            .await
            .as_ref()
            .map(|(username, _)| username.clone())
            .ok_or(AuthError::NotAuthenticated)?;
        let user = self.signed_in_user().await?;
        Ok(CurrentUser {
            username: username.clone(),
            user_id: user
                .attributes
                .sub()
                .map(str::to_string)
                .unwrap_or_else(|| username.clone()),
        })
    }

    async fn user_attributes(&self) -> Result<UserAttributes> {
        Ok(self.signed_in_user().await?.attributes.clone())
    }

    async fn session_tokens(&self) -> Result<Option<SessionTokens>> {
        self.token_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_tokens.load(Ordering::SeqCst) {
            return Err(AuthError::Provider("token endpoint unavailable".to_string()));
        }
        Ok(self
            .signed_in
            .read()
            .await
            .as_ref()
            .map(|(_, tokens)| tokens.clone()))
    }
}
