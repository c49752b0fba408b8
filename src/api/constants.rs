//! API constants and the default Microsoft Graph endpoint catalog

use serde::{Deserialize, Serialize};

/// Identity provider used for the client-credentials grant
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Microsoft Graph host that relative endpoint paths are resolved against
pub const DEFAULT_GRAPH_HOST: &str = "https://graph.microsoft.com";

/// Default scope requested for app-only Graph access
pub const DEFAULT_GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Endpoint decoded by the `users` command
pub const DEFAULT_USERS_ENDPOINT: &str = "v1.0/users";

/// Token lifetime assumed when the identity provider omits `expires_in`
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;

/// A cached token is renewed this long before it actually expires
pub const TOKEN_EXPIRY_SKEW_SECS: u64 = 60;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("graph-dump/", env!("CARGO_PKG_VERSION"));

/// Environment variable names
pub mod env {
    pub const TENANT_ID: &str = "AZURE_TENANT_ID";
    pub const CLIENT_ID: &str = "AZURE_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
    pub const AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
}

/// A named REST resource in the catalog.
///
/// `path` is either relative to the Graph host (`v1.0/users`) or an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Endpoint {
    pub fn new(name: &str, path: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            description: Some(description.to_string()),
        }
    }

    /// Resolve this endpoint to a full URL against the given Graph host
    pub fn url(&self, graph_host: &str) -> String {
        resolve_url(graph_host, &self.path)
    }
}

/// Join a relative path onto a host; absolute URLs pass through untouched
pub fn resolve_url(host: &str, path: &str) -> String {
    if path.starts_with("https://") || path.starts_with("http://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Token endpoint for a tenant on the given authority
pub fn token_endpoint(authority_host: &str, tenant_id: &str) -> String {
    format!(
        "{}/{}/oauth2/v2.0/token",
        authority_host.trim_end_matches('/'),
        tenant_id
    )
}

/// Line written before each dumped response body
pub fn separator(url: &str) -> String {
    format!("\n\n=====> {}\n", url)
}

/// The built-in catalog, in dump order
pub fn default_catalog() -> Vec<Endpoint> {
    vec![
        Endpoint::new("users", "beta/users", "All users in the directory"),
        Endpoint::new("groups", "beta/groups", "All groups in the directory"),
        Endpoint::new(
            "devices",
            "beta/devices",
            "Registered devices, including Intune-managed ones",
        ),
        Endpoint::new(
            "conditional-access",
            "v1.0/identity/conditionalAccess/policies",
            "Conditional Access policies",
        ),
        Endpoint::new(
            "audit-logs",
            "v1.0/auditLogs/directoryaudits",
            "Directory audit log",
        ),
        Endpoint::new("sign-in-logs", "v1.0/auditLogs/signIns", "Sign-in events"),
        // Identity Protection requires a Premium P1/P2 license
        Endpoint::new(
            "risky-users",
            "v1.0/identityProtection/riskyUsers",
            "Users flagged by Identity Protection",
        ),
        Endpoint::new(
            "risk-detections",
            "v1.0/identityProtection/riskDetections",
            "Identity Protection risk detections",
        ),
        Endpoint::new(
            "security-alerts",
            "v1.0/security/alerts",
            "Alerts from the unified security API",
        ),
        Endpoint::new(
            "mobile-apps",
            "beta/deviceAppManagement/mobileApps",
            "Apps managed by Endpoint Manager",
        ),
        Endpoint::new(
            "applications",
            "v1.0/applications",
            "Registered applications",
        ),
    ]
}
