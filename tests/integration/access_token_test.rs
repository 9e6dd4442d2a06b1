// Integration tests for the client-credentials token exchange

#[path = "../helpers/mod.rs"]
mod helpers;

use daraja_relay::core::{AppError, GatewayStage};
use daraja_relay::payments::services::basic_credential;
use daraja_relay::DarajaClient;
use helpers::*;
use serde_json::json;

#[actix_web::test]
async fn test_returns_access_token_field_verbatim() {
    let gateway = spawn_fake_gateway();
    let client = DarajaClient::new(daraja_config(&gateway.base_url())).unwrap();

    let token = client.access_token().await.unwrap();

    assert_eq!(token, FAKE_ACCESS_TOKEN);
}

#[actix_web::test]
async fn test_sends_basic_credential_and_grant_type() {
    let gateway = spawn_fake_gateway();
    let client = DarajaClient::new(daraja_config(&gateway.base_url())).unwrap();

    client.access_token().await.unwrap();

    let call = gateway.state.last_token_call();
    assert_eq!(
        call.authorization.as_deref(),
        Some(basic_credential(TEST_CONSUMER_KEY, TEST_CONSUMER_SECRET).as_str())
    );
    assert_eq!(
        call.authorization.as_deref(),
        Some("Basic dGVzdC1jb25zdW1lci1rZXk6dGVzdC1jb25zdW1lci1zZWNyZXQ=")
    );
    assert_eq!(call.query, "grant_type=client_credentials");
}

#[actix_web::test]
async fn test_fetches_new_token_on_every_call_by_default() {
    let gateway = spawn_fake_gateway();
    let client = DarajaClient::new(daraja_config(&gateway.base_url())).unwrap();

    client.access_token().await.unwrap();
    client.access_token().await.unwrap();

    assert_eq!(gateway.state.token_call_count(), 2);
}

#[actix_web::test]
async fn test_unauthorized_is_upstream_token_error() {
    let gateway = spawn_fake_gateway_with(
        ScriptedResponse::json(401, json!({"errorMessage": "Invalid credentials"})),
        ScriptedResponse::json(200, default_stk_body()),
    );
    let client = DarajaClient::new(daraja_config(&gateway.base_url())).unwrap();

    let err = client.access_token().await.unwrap_err();

    match err {
        AppError::Upstream { stage, status } => {
            assert_eq!(stage, GatewayStage::Token);
            assert_eq!(status.as_u16(), 401);
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[actix_web::test]
async fn test_empty_access_token_is_malformed() {
    let gateway = spawn_fake_gateway_with(
        ScriptedResponse::json(200, json!({"access_token": "", "expires_in": "3599"})),
        ScriptedResponse::json(200, default_stk_body()),
    );
    let client = DarajaClient::new(daraja_config(&gateway.base_url())).unwrap();

    let err = client.access_token().await.unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[actix_web::test]
async fn test_non_json_token_body_is_malformed() {
    let gateway = spawn_fake_gateway_with(
        ScriptedResponse::raw(200, "ok"),
        ScriptedResponse::json(200, default_stk_body()),
    );
    let client = DarajaClient::new(daraja_config(&gateway.base_url())).unwrap();

    let err = client.access_token().await.unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
}
