//! Decoded users listing

mod common;

use graph_dump::api::{FetchError, GraphClient, report_users};
use httpmock::prelude::*;
use reqwest::StatusCode;

use common::{config_for, credentials, mock_get, mock_token};

#[tokio::test]
async fn test_found_user_lines() {
    let idp = MockServer::start();
    let api = MockServer::start();
    mock_token(&idp, "tok-users", 3600);
    let users_mock = mock_get(
        &api,
        "/v1.0/users",
        "tok-users",
        r#"{"value":[{"userPrincipalName":"alice@example.com"}]}"#,
    );

    let config = config_for(&idp, &api);
    let mut client = GraphClient::connect(&config, credentials()).await.unwrap();
    let users = client.fetch_and_decode(&config.users_url()).await.unwrap();

    let mut out = Vec::new();
    report_users(&users, &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.lines().any(|line| line == "[*] Found user alice@example.com"));
    users_mock.assert();
}

#[tokio::test]
async fn test_error_status_reported_not_panicking() {
    let idp = MockServer::start();
    let api = MockServer::start();
    mock_token(&idp, "tok-users", 3600);
    api.mock(|when, then| {
        when.method(GET).path("/v1.0/users");
        then.status(403)
            .header("content-type", "application/json")
            .body(r#"{"error":{"code":"Authorization_RequestDenied"}}"#);
    });

    let config = config_for(&idp, &api);
    let mut client = GraphClient::connect(&config, credentials()).await.unwrap();
    let err = client
        .fetch_and_decode(&config.users_url())
        .await
        .unwrap_err();

    match err {
        FetchError::Status { status, .. } => assert_eq!(status, StatusCode::FORBIDDEN),
        other => panic!("expected Status error, got: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let idp = MockServer::start();
    let api = MockServer::start();
    mock_token(&idp, "tok-users", 3600);
    mock_get(&api, "/v1.0/users", "tok-users", r#"{"value": [oops"#);

    let config = config_for(&idp, &api);
    let mut client = GraphClient::connect(&config, credentials()).await.unwrap();
    let err = client
        .fetch_and_decode(&config.users_url())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
    assert!(!err.is_fatal());
}

#[tokio::test]
async fn test_records_without_principal_are_skipped() {
    let idp = MockServer::start();
    let api = MockServer::start();
    mock_token(&idp, "tok-users", 3600);
    mock_get(
        &api,
        "/v1.0/users",
        "tok-users",
        r#"{"value":[{"displayName":"Printer"},{"userPrincipalName":"bob@example.com"}]}"#,
    );

    let config = config_for(&idp, &api);
    let mut client = GraphClient::connect(&config, credentials()).await.unwrap();
    let users = client.fetch_and_decode(&config.users_url()).await.unwrap();

    let mut out = Vec::new();
    let count = report_users(&users, &mut out).unwrap();

    assert_eq!(count, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "[*] Found user bob@example.com\n");
}
