use std::env;
use std::path::PathBuf;

use url::Url;

use crate::error::{AuthError, Result};

/// Default session file used by the admin CLI.
pub const DEFAULT_SESSION_FILE: &str = ".caseco-session.json";

/// Cognito user pool settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoConfig {
    pub region: String,
    pub user_pool_id: Option<String>,
    pub client_id: String,
    /// Cognito JSON API endpoint.
    pub endpoint: Url,
    /// Where session tokens are persisted between invocations.
    pub session_file: PathBuf,
}

impl CognitoConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AWS_REGION`: User pool region (default: `us-east-1`)
    /// - `USER_POOL_ID`: User pool id (optional, informational)
    /// - `USER_POOL_CLIENT_ID`: App client id (required)
    /// - `COGNITO_ENDPOINT`: Override of the Cognito endpoint (default: `https://cognito-idp.{region}.amazonaws.com/`)
    /// - `CASECO_SESSION_FILE`: Session file path (default: `.caseco-session.json`)
    ///
    /// # Errors
    ///
    /// Returns an error if the client id is missing or the endpoint is not a valid URL.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`CognitoConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let region = var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string());

        let client_id = var("USER_POOL_CLIENT_ID")
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AuthError::Config("USER_POOL_CLIENT_ID is not set".to_string()))?;

        let endpoint = var("COGNITO_ENDPOINT")
            .unwrap_or_else(|| default_endpoint(&region));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| AuthError::Config(format!("invalid COGNITO_ENDPOINT '{endpoint}': {e}")))?;

        Ok(Self {
            region,
            user_pool_id: var("USER_POOL_ID").filter(|id| !id.is_empty()),
            client_id,
            endpoint,
            session_file: var("CASECO_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
        })
    }
}

/// Public Cognito identity provider endpoint for a region.
pub fn default_endpoint(region: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com/")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = CognitoConfig::from_vars(lookup(&[("USER_POOL_CLIENT_ID", "client")])).unwrap();

        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.client_id, "client");
        assert_eq!(config.user_pool_id, None);
        assert_eq!(
            config.endpoint.as_str(),
            "https://cognito-idp.us-east-1.amazonaws.com/"
        );
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    fn test_region_drives_endpoint() {
        let config = CognitoConfig::from_vars(lookup(&[
            ("USER_POOL_CLIENT_ID", "client"),
            ("AWS_REGION", "eu-west-1"),
            ("USER_POOL_ID", "eu-west-1_abc"),
        ]))
        .unwrap();

        assert_eq!(
            config.endpoint.as_str(),
            "https://cognito-idp.eu-west-1.amazonaws.com/"
        );
        assert_eq!(config.user_pool_id.as_deref(), Some("eu-west-1_abc"));
    }

    #[test]
    fn test_endpoint_override() {
        let config = CognitoConfig::from_vars(lookup(&[
            ("USER_POOL_CLIENT_ID", "client"),
            ("COGNITO_ENDPOINT", "http://127.0.0.1:9229/"),
            ("CASECO_SESSION_FILE", "/tmp/session.json"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:9229/");
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
    }

    #[test]
    fn test_missing_client_id() {
        let err = CognitoConfig::from_vars(lookup(&[])).unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));

        let err = CognitoConfig::from_vars(lookup(&[("USER_POOL_CLIENT_ID", "")])).unwrap_err();
        assert!(matches!(err, AuthError::Config(_)));
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = CognitoConfig::from_vars(lookup(&[
            ("USER_POOL_CLIENT_ID", "client"),
            ("COGNITO_ENDPOINT", "not a url"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("COGNITO_ENDPOINT"));
    }
}
