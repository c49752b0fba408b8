use log::{debug, info};

use super::constants;
use super::error::AuthError;
use super::models::{TokenInfo, TokenResponse};
use crate::auth::Credentials;

/// Obtains and caches app-only tokens via the OAuth2 client-credentials grant
pub struct TokenSource {
    http_client: reqwest::Client,
    credentials: Credentials,
    token_url: String,
    scope: String,
    token: Option<TokenInfo>,
}

impl TokenSource {
    pub fn new(
        http_client: reqwest::Client,
        credentials: Credentials,
        authority_host: &str,
        scope: &str,
    ) -> Self {
        let token_url = constants::token_endpoint(authority_host, &credentials.tenant_id);
        Self {
            http_client,
            credentials,
            token_url,
            scope: scope.to_string(),
            token: None,
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// The cached token, if one has been obtained
    pub fn current(&self) -> Option<&TokenInfo> {
        self.token.as_ref()
    }

    /// Access token for the next request, re-running the grant if the cached
    /// one is missing or about to expire
    pub async fn access_token(&mut self) -> Result<String, AuthError> {
        if let Some(token) = self.token.as_ref().filter(|t| t.is_valid()) {
            return Ok(token.access_token.clone());
        }

        debug!("No valid cached token, requesting a new one");
        Ok(self.authenticate().await?.access_token.clone())
    }

    /// Perform the client-credentials grant unconditionally
    pub async fn authenticate(&mut self) -> Result<&TokenInfo, AuthError> {
        if let Some(missing) = self.credentials.first_missing() {
            return Err(AuthError::MissingCredential(missing));
        }

        info!(
            "Requesting token for client {} in tenant {}",
            self.credentials.client_id, self.credentials.tenant_id
        );

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();
        debug!("Token request status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuthError::Rejected { status, body });
        }

        let body = response.text().await.map_err(AuthError::Transport)?;
        let token_data: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        if let Some(token_type) = token_data.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                return Err(AuthError::MalformedResponse(format!(
                    "unsupported token type '{}'",
                    token_type
                )));
            }
        }

        let access_token = match token_data.access_token.as_deref() {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => {
                return Err(AuthError::MalformedResponse(
                    "no access token in response".to_string(),
                ));
            }
        };

        let token = TokenInfo::new(access_token, token_data.lifetime());
        info!(
            "Token obtained, valid for {}s",
            token.remaining().as_secs()
        );

        let token: &TokenInfo = self.token.insert(token);
        Ok(token)
    }
}
