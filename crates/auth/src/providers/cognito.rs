//! Cognito user pool provider speaking the Cognito JSON API.

use std::collections::HashMap;

use async_trait::async_trait;
use caseco_core::auth::{
    calculate_expiry, is_token_expired, AuthError, CurrentUser, IdentityProvider, Result,
    SessionTokens, SignInOutcome, UserAttributes,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use url::Url;

use crate::config::CognitoConfig;
use crate::store::TokenStore;

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: HashMap<&'a str, &'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
    session: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: String,
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AccessTokenRequest<'a> {
    access_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserResponse {
    username: String,
    #[serde(default)]
    user_attributes: Vec<AttributeType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeType {
    name: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(rename = "__type", default)]
    kind: String,
    #[serde(alias = "Message", default)]
    message: String,
}

impl ServiceError {
    /// `com.amazonaws...#NotAuthorizedException` and `NotAuthorizedException` both name the same fault.
    fn short_kind(&self) -> &str {
        self.kind.rsplit('#').next().unwrap_or(&self.kind)
    }

    fn is_not_authorized(&self) -> bool {
        matches!(
            self.short_kind(),
            "NotAuthorizedException" | "UserNotFoundException"
        )
    }
}

enum CallError {
    Service(ServiceError),
    Transport(String),
}

impl CallError {
    /// Maps an authorization fault with `unauthorized`, everything else to a provider error.
    fn into_auth(self, unauthorized: impl FnOnce(String) -> AuthError) -> AuthError {
        match self {
            CallError::Service(err) if err.is_not_authorized() => unauthorized(err.message),
            CallError::Service(err) => {
                AuthError::Provider(format!("{}: {}", err.short_kind(), err.message))
            }
            CallError::Transport(message) => AuthError::Provider(message),
        }
    }
}

/// Cognito user pool identity provider.
///
/// Holds the session tokens in memory and, when a [`TokenStore`] is
/// attached, mirrors them to disk. Expired tokens are refreshed on read.
pub struct CognitoProvider {
    http: reqwest::Client,
    endpoint: Url,
    client_id: String,
    tokens: RwLock<Option<SessionTokens>>,
    store: Option<TokenStore>,
}

impl CognitoProvider {
    /// Create a provider for the configured user pool client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CognitoConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| crate::AuthError::Http(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            client_id: config.client_id.clone(),
            tokens: RwLock::new(None),
            store: None,
        })
    }

    /// Persist tokens to `store` from now on.
    pub fn with_store(mut self, store: TokenStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Loads tokens saved by an earlier run. Returns whether a session was found.
    pub async fn restore(&self) -> Result<bool> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        let restored = store.load().await?;
        let found = restored.is_some();
        *self.tokens.write().await = restored;
        Ok(found)
    }

    async fn call<Req, Resp>(&self, operation: &str, body: &Req) -> std::result::Result<Resp, CallError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|e| CallError::Transport(e.to_string()))?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{operation}"))
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(operation, error = %e, "Cognito request failed");
                CallError::Transport(e.to_string())
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CallError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err: ServiceError = serde_json::from_slice(&bytes).unwrap_or_else(|_| ServiceError {
                kind: format!("HTTP {status}"),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
            tracing::warn!(operation, kind = %err.short_kind(), message = %err.message, "Cognito rejected request");
            return Err(CallError::Service(err));
        }

        serde_json::from_slice(&bytes).map_err(|e| CallError::Transport(e.to_string()))
    }

    async fn initiate_auth(
        &self,
        flow: &str,
        parameters: HashMap<&str, &str>,
    ) -> std::result::Result<InitiateAuthResponse, CallError> {
        let request = InitiateAuthRequest {
            auth_flow: flow,
            client_id: &self.client_id,
            auth_parameters: parameters,
        };
        self.call("InitiateAuth", &request).await
    }

    async fn remember(&self, tokens: SessionTokens) {
        self.persist(&tokens).await;
        *self.tokens.write().await = Some(tokens);
    }

    async fn forget(&self) {
        *self.tokens.write().await = None;
        self.unpersist().await;
    }

    async fn persist(&self, tokens: &SessionTokens) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(tokens).await {
                tracing::warn!(error = %e, "Failed to persist session tokens");
            }
        }
    }

    async fn unpersist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.clear().await {
                tracing::warn!(error = %e, "Failed to clear persisted session");
            }
        }
    }

    async fn refresh(&self, previous: &SessionTokens, refresh_token: &str) -> Result<SessionTokens> {
        let parameters = HashMap::from([("REFRESH_TOKEN", refresh_token)]);
        let response = self
            .initiate_auth("REFRESH_TOKEN_AUTH", parameters)
            .await
            .map_err(|e| e.into_auth(|_| AuthError::SessionExpired))?;

        let result = response
            .authentication_result
            .ok_or_else(|| AuthError::Provider("refresh returned no tokens".to_string()))?;

        tracing::debug!("Refreshed session tokens");
        Ok(SessionTokens {
            id_token: result.id_token,
            access_token: result.access_token,
            // Cognito only issues a new refresh token on full sign-in.
            refresh_token: result
                .refresh_token
                .or_else(|| previous.refresh_token.clone()),
            expires_at: calculate_expiry(Utc::now(), result.expires_in),
        })
    }

    async fn access_token(&self) -> Result<String> {
        self.session_tokens()
            .await?
            .map(|tokens| tokens.access_token)
            .ok_or(AuthError::NotAuthenticated)
    }

    async fn get_user(&self) -> Result<GetUserResponse> {
        let access_token = self.access_token().await?;
        self.call(
            "GetUser",
            &AccessTokenRequest {
                access_token: &access_token,
            },
        )
        .await
        .map_err(|e| e.into_auth(|_| AuthError::SessionExpired))
    }
}

#[async_trait]
impl IdentityProvider for CognitoProvider {
    async fn sign_in(&self, username: &str, password: &str) -> Result<SignInOutcome> {
        let parameters = HashMap::from([("USERNAME", username), ("PASSWORD", password)]);
        let response = self
            .initiate_auth("USER_PASSWORD_AUTH", parameters)
            .await
            .map_err(|e| e.into_auth(AuthError::InvalidCredentials))?;

        if let Some(result) = response.authentication_result {
            self.remember(SessionTokens {
                id_token: result.id_token,
                access_token: result.access_token,
                refresh_token: result.refresh_token,
                expires_at: calculate_expiry(Utc::now(), result.expires_in),
            })
            .await;
            return Ok(SignInOutcome::SignedIn);
        }

        match response.challenge_name {
            Some(challenge) => Ok(SignInOutcome::ChallengeRequired {
                challenge,
                session: response.session,
            }),
            None => Err(AuthError::Provider(
                "sign-in returned neither tokens nor a challenge".to_string(),
            )),
        }
    }

    async fn sign_out(&self) -> Result<()> {
        let access_token = self
            .tokens
            .read()
            .await
            .as_ref()
            .map(|tokens| tokens.access_token.clone());
        self.forget().await;

        let Some(access_token) = access_token else {
            return Ok(());
        };

        self.call::<_, serde_json::Value>(
            "GlobalSignOut",
            &AccessTokenRequest {
                access_token: &access_token,
            },
        )
        .await
        .map(|_| ())
        .map_err(|e| e.into_auth(|_| AuthError::SessionExpired))
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        let user = self.get_user().await?;
        let user_id = user
            .user_attributes
            .iter()
            .find(|attr| attr.name == "sub")
            .map(|attr| attr.value.clone())
            .unwrap_or_else(|| user.username.clone());

        Ok(CurrentUser {
            username: user.username,
            user_id,
        })
    }

    async fn user_attributes(&self) -> Result<UserAttributes> {
        let user = self.get_user().await?;
        Ok(user
            .user_attributes
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect())
    }

    async fn session_tokens(&self) -> Result<Option<SessionTokens>> {
        let Some(current) = self.tokens.read().await.clone() else {
            return Ok(None);
        };
        if !is_token_expired(&current, Utc::now()) {
            return Ok(Some(current));
        }

        // Held across the refresh so concurrent readers wait for one refresh.
        let mut guard = self.tokens.write().await;
        let Some(tokens) = guard.clone() else {
            return Ok(None);
        };
        if !is_token_expired(&tokens, Utc::now()) {
            return Ok(Some(tokens));
        }

        let Some(refresh_token) = tokens.refresh_token.clone() else {
            *guard = None;
            self.unpersist().await;
            return Err(AuthError::SessionExpired);
        };

        match self.refresh(&tokens, &refresh_token).await {
            Ok(fresh) => {
                self.persist(&fresh).await;
                *guard = Some(fresh.clone());
                Ok(Some(fresh))
            }
            Err(e) => {
                *guard = None;
                self.unpersist().await;
                Err(e)
            }
        }
    }
}
