use log::{debug, info, warn};
use reqwest::StatusCode;
use std::io::Write;

use super::auth::TokenSource;
use super::constants::USER_AGENT;
use super::error::FetchError;
use super::models::{TokenInfo, UserCollection};
use crate::auth::Credentials;
use crate::config::Config;

/// Result of dumping one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub status: StatusCode,
    pub bytes: u64,
}

/// Microsoft Graph client that attaches a bearer token to every request
pub struct GraphClient {
    http_client: reqwest::Client,
    tokens: TokenSource,
}

impl GraphClient {
    /// Authenticate with the client-credentials grant and return a ready client
    pub async fn connect(config: &Config, credentials: Credentials) -> Result<Self, FetchError> {
        let http_client = build_http_client(config)?;
        let mut tokens = TokenSource::new(
            http_client.clone(),
            credentials,
            &config.authority_host,
            &config.scope,
        );
        tokens.authenticate().await?;

        Ok(Self { http_client, tokens })
    }

    /// Currently cached token
    pub fn token(&self) -> Option<&TokenInfo> {
        self.tokens.current()
    }

    async fn get(&mut self, url: &str) -> Result<reqwest::Response, FetchError> {
        let token = self.tokens.access_token().await?;

        debug!("GET {}", url);
        self.http_client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })
    }

    /// GET `url` and copy the body verbatim to `sink`.
    ///
    /// Error responses are copied too; the status is only logged.
    pub async fn fetch_endpoint<W: Write>(
        &mut self,
        url: &str,
        sink: &mut W,
    ) -> Result<FetchOutcome, FetchError> {
        let mut response = self.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            warn!("{} returned {}", url, status);
        }

        let mut bytes = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?
        {
            sink.write_all(&chunk)?;
            bytes += chunk.len() as u64;
        }
        sink.flush()?;

        debug!("Copied {} bytes from {}", bytes, url);
        Ok(FetchOutcome { status, bytes })
    }

    /// GET `url` and decode the body as a Graph user collection
    pub async fn fetch_and_decode(&mut self, url: &str) -> Result<UserCollection, FetchError> {
        let response = self.get(url).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        let users: UserCollection =
            serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;

        info!("Decoded {} user records from {}", users.value.len(), url);
        Ok(users)
    }
}

/// Write one `[*] Found user` line per record with a principal name
pub fn report_users<W: Write>(users: &UserCollection, sink: &mut W) -> std::io::Result<usize> {
    let mut count = 0;
    for name in users.principal_names() {
        writeln!(sink, "[*] Found user {}", name)?;
        count += 1;
    }

    let skipped = users.value.len() - count;
    if skipped > 0 {
        debug!("Skipped {} user records without a principal name", skipped);
    }
    Ok(count)
}

fn build_http_client(config: &Config) -> Result<reqwest::Client, FetchError> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .user_agent(USER_AGENT);

    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(FetchError::ClientBuild)
}
