use serde::Deserialize;
use std::time::{Duration, SystemTime};

use super::constants::{DEFAULT_TOKEN_LIFETIME_SECS, TOKEN_EXPIRY_SKEW_SECS};

/// Cached bearer token
#[derive(Clone)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl TokenInfo {
    pub fn new(access_token: String, expires_in: Duration) -> Self {
        Self {
            access_token,
            expires_at: SystemTime::now() + expires_in,
        }
    }

    /// Whether the token is still usable, leaving a small margin before expiry
    pub fn is_valid(&self) -> bool {
        match self.expires_at.duration_since(SystemTime::now()) {
            Ok(remaining) => remaining > Duration::from_secs(TOKEN_EXPIRY_SKEW_SECS),
            Err(_) => false,
        }
    }

    /// Time left until the token expires, zero if it already has
    pub fn remaining(&self) -> Duration {
        self.expires_at
            .duration_since(SystemTime::now())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for TokenInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenInfo")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body returned by the v2.0 token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

impl TokenResponse {
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS))
    }
}

/// Graph collection wrapper around user records
#[derive(Debug, Default, Deserialize)]
pub struct UserCollection {
    #[serde(default)]
    pub value: Vec<User>,
}

impl UserCollection {
    /// Principal names of every record that carries one
    pub fn principal_names(&self) -> impl Iterator<Item = &str> {
        self.value
            .iter()
            .filter_map(|user| user.user_principal_name.as_deref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub user_principal_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_collection_skips_missing_principal_names() {
        let body = r#"{
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users",
            "value": [
                {"id": "1", "userPrincipalName": "alice@example.com"},
                {"id": "2", "displayName": "No UPN"},
                {"id": "3", "userPrincipalName": null},
                {"userPrincipalName": "bob@example.com"}
            ]
        }"#;

        let users: UserCollection = serde_json::from_str(body).unwrap();
        let names: Vec<&str> = users.principal_names().collect();
        assert_eq!(names, vec!["alice@example.com", "bob@example.com"]);
    }

    #[test]
    fn test_user_collection_without_value() {
        let users: UserCollection = serde_json::from_str("{}").unwrap();
        assert_eq!(users.principal_names().count(), 0);
    }

    #[test]
    fn test_token_response_default_lifetime() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"access_token":"tok","token_type":"Bearer"}"#).unwrap();
        assert_eq!(response.lifetime(), Duration::from_secs(3600));
    }

    #[test]
    fn test_token_validity() {
        let fresh = TokenInfo::new("tok".to_string(), Duration::from_secs(3600));
        assert!(fresh.is_valid());

        // Inside the skew window counts as expired
        let nearly = TokenInfo::new("tok".to_string(), Duration::from_secs(10));
        assert!(!nearly.is_valid());

        let expired = TokenInfo {
            access_token: "tok".to_string(),
            expires_at: SystemTime::now() - Duration::from_secs(5),
        };
        assert!(!expired.is_valid());
        assert_eq!(expired.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_token_debug_redacts_secret() {
        let token = TokenInfo::new("super-secret".to_string(), Duration::from_secs(60));
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret"));
    }
}
