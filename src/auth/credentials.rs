use anyhow::Result;
use log::{info, warn};
use std::path::Path;

use crate::api::constants::env;

/// App registration secrets for the client-credentials grant
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(tenant_id: &str, client_id: &str, client_secret: &str) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    /// Read the three `AZURE_*` variables from the process environment.
    ///
    /// Unset variables become empty strings; the token request rejects them.
    pub fn from_env() -> Credentials {
        info!("Reading credentials from environment variables");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a specific .env file into the environment, then read from it.
    ///
    /// Values in the file replace variables that are already set.
    pub fn from_env_file(path: &str) -> Result<Credentials> {
        info!("Importing from .env file: {}", path);

        if !Path::new(path).exists() {
            anyhow::bail!("Environment file not found: {}", path);
        }

        dotenvy::from_path_override(path)
            .map_err(|e| anyhow::anyhow!("Failed to load .env file '{}': {}", path, e))?;

        Ok(Self::from_env())
    }

    /// Build credentials from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Credentials
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| match lookup(key) {
            Some(value) => value,
            None => {
                warn!("{} is not set", key);
                String::new()
            }
        };

        Credentials {
            tenant_id: read(env::TENANT_ID),
            client_id: read(env::CLIENT_ID),
            client_secret: read(env::CLIENT_SECRET),
        }
    }

    /// Name of the first credential that is empty, if any
    pub fn first_missing(&self) -> Option<&'static str> {
        [
            (env::TENANT_ID, &self.tenant_id),
            (env::CLIENT_ID, &self.client_id),
            (env::CLIENT_SECRET, &self.client_secret),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
