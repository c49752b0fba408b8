#![allow(dead_code)]

use graph_dump::auth::Credentials;
use graph_dump::config::Config;
use httpmock::prelude::*;
use httpmock::Mock;

pub const TENANT: &str = "tenant-1";
pub const TOKEN_PATH: &str = "/tenant-1/oauth2/v2.0/token";

pub fn credentials() -> Credentials {
    Credentials::new(TENANT, "test-client", "test-secret")
}

/// Config pointing the authority and the Graph host at mock servers
pub fn config_for(idp: &MockServer, api: &MockServer) -> Config {
    Config {
        authority_host: idp.base_url(),
        graph_host: api.base_url(),
        ..Config::default()
    }
}

pub fn token_json(token: &str, expires_in: u64) -> String {
    format!(r#"{{"access_token":"{token}","expires_in":{expires_in},"token_type":"Bearer"}}"#)
}

/// Token endpoint that hands out `token` for the test client
pub fn mock_token<'a>(idp: &'a MockServer, token: &str, expires_in: u64) -> Mock<'a> {
    let body = token_json(token, expires_in);
    idp.mock(|when, then| {
        when.method(POST)
            .path(TOKEN_PATH)
            .body_includes("grant_type=client_credentials");
        then.status(200)
            .header("content-type", "application/json")
            .body(body.as_str());
    })
}

/// Graph endpoint that only answers requests carrying `token`
pub fn mock_get<'a>(api: &'a MockServer, path: &str, token: &str, body: &str) -> Mock<'a> {
    let bearer = format!("Bearer {}", token);
    api.mock(|when, then| {
        when.method(GET).path(path).header("authorization", bearer.as_str());
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}
