use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::constants::{
    self, DEFAULT_AUTHORITY_HOST, DEFAULT_GRAPH_HOST, DEFAULT_GRAPH_SCOPE, DEFAULT_USERS_ENDPOINT,
    Endpoint,
};

/// Runtime settings for the fetcher, built once at startup and passed down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_authority_host")]
    pub authority_host: String,
    #[serde(default = "default_graph_host")]
    pub graph_host: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_users_endpoint")]
    pub users_endpoint: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// No overall request timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

fn default_authority_host() -> String {
    DEFAULT_AUTHORITY_HOST.to_string()
}

fn default_graph_host() -> String {
    DEFAULT_GRAPH_HOST.to_string()
}

fn default_scope() -> String {
    DEFAULT_GRAPH_SCOPE.to_string()
}

fn default_users_endpoint() -> String {
    DEFAULT_USERS_ENDPOINT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            authority_host: default_authority_host(),
            graph_host: default_graph_host(),
            scope: default_scope(),
            users_endpoint: default_users_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
            endpoints: Vec::new(),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/graph-dump/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("graph-dump").join("config.toml"))
    }

    /// Load from an explicit path, or from the default path if that file exists,
    /// otherwise fall back to built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(authority) = std::env::var(constants::env::AUTHORITY_HOST) {
            if !authority.trim().is_empty() {
                info!("Using authority host from {}", constants::env::AUTHORITY_HOST);
                config.authority_host = authority;
            }
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        debug!("Loaded config with {} endpoints", config.endpoints.len());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for endpoint in &self.endpoints {
            if endpoint.name.trim().is_empty() || endpoint.path.trim().is_empty() {
                anyhow::bail!("Endpoint entries need both a name and a path");
            }
        }
        let mut names: Vec<&str> = self.endpoints.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            anyhow::bail!("Duplicate endpoint name '{}'", pair[0]);
        }
        Ok(())
    }

    /// The effective catalog: configured endpoints, or the built-in list
    pub fn catalog(&self) -> Vec<Endpoint> {
        if self.endpoints.is_empty() {
            constants::default_catalog()
        } else {
            self.endpoints.clone()
        }
    }

    /// Subset of the catalog by name, keeping catalog order
    pub fn select_endpoints(&self, names: &[String]) -> Result<Vec<Endpoint>> {
        let catalog = self.catalog();
        if names.is_empty() {
            return Ok(catalog);
        }

        if let Some(unknown) = names
            .iter()
            .find(|name| !catalog.iter().any(|e| &e.name == *name))
        {
            anyhow::bail!("Unknown endpoint '{}'", unknown);
        }

        Ok(catalog
            .into_iter()
            .filter(|e| names.contains(&e.name))
            .collect())
    }

    pub fn endpoint_url(&self, endpoint: &Endpoint) -> String {
        endpoint.url(&self.graph_host)
    }

    pub fn users_url(&self) -> String {
        constants::resolve_url(&self.graph_host, &self.users_endpoint)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.authority_host, DEFAULT_AUTHORITY_HOST);
        assert_eq!(config.scope, "https://graph.microsoft.com/.default");
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.catalog(), constants::default_catalog());
    }

    #[test]
    fn test_custom_catalog_replaces_default() {
        let config = Config::from_toml(
            r#"
            graph_host = "http://localhost:8080"
            request_timeout_secs = 30

            [[endpoints]]
            name = "groups"
            path = "v1.0/groups"

            [[endpoints]]
            name = "members"
            path = "https://graph.microsoft.com/v1.0/groups/42/members"
            description = "Members of one group"
            "#,
        )
        .unwrap();

        let catalog = config.catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            config.endpoint_url(&catalog[0]),
            "http://localhost:8080/v1.0/groups"
        );
        assert_eq!(
            config.endpoint_url(&catalog[1]),
            "https://graph.microsoft.com/v1.0/groups/42/members"
        );
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_duplicate_endpoint_names_rejected() {
        let result = Config::from_toml(
            r#"
            [[endpoints]]
            name = "users"
            path = "v1.0/users"

            [[endpoints]]
            name = "users"
            path = "beta/users"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_select_endpoints_keeps_catalog_order() {
        let config = Config::default();
        let selected = config
            .select_endpoints(&["security-alerts".to_string(), "users".to_string()])
            .unwrap();
        let names: Vec<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["users", "security-alerts"]);
    }

    #[test]
    fn test_select_unknown_endpoint() {
        let config = Config::default();
        let err = config
            .select_endpoints(&["nope".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_users_url() {
        let config = Config {
            graph_host: "http://127.0.0.1:9000/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.users_url(), "http://127.0.0.1:9000/v1.0/users");
    }
}
