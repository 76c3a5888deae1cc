use serde_json::json;
use wiremock::matchers::{body_string, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spotkit::error::ApiError;
use spotkit::management::TokenManager;
use spotkit::types::Credentials;

mod common;

#[test]
fn expiry_is_a_pure_function_of_the_record() {
    // Empty token is always stale, however fresh the timestamp.
    let creds = common::credentials("", 0, 3600);
    assert!(creds.is_expired_at(chrono::Utc::now().timestamp()));

    // Unparsable creation timestamp counts as stale.
    let creds = Credentials {
        token_creation: "not a timestamp".to_string(),
        ..common::credentials("tok", 0, 3600)
    };
    assert!(creds.is_expired_at(chrono::Utc::now().timestamp()));

    // Sweep the boundary across a spread of ages and lifetimes. The clock is
    // derived from the parsed record so the boundary cases are exact.
    for age in [0i64, 1, 59, 3599, 3600, 3601, 86400, 999999] {
        for duration in [1u64, 60, 3600, 86400] {
            let creds = common::credentials("tok", 0, duration);
            let created = creds.creation_timestamp().unwrap();
            let expected = age >= duration as i64;
            assert_eq!(
                creds.is_expired_at(created + age),
                expected,
                "age {} duration {}",
                age,
                duration
            );
        }
    }
}

#[tokio::test]
async fn successful_refresh_updates_memory_and_store_together() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header_exists("authorization"))
        .and(body_string("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = common::temp_path("refresh-ok");
    common::write_store(&store, &common::credentials("stale-token", 7200, 3600)).await;

    let mut manager = TokenManager::load(&store, format!("{}/api/token", server.uri()))
        .await
        .unwrap();
    assert!(manager.is_expired());

    let token = manager.refresh().await.unwrap().to_string();
    assert_eq!(token, "fresh-token");
    assert!(!manager.is_expired());
    assert_eq!(manager.credentials().token_duration, 3600);
    assert!(manager.credentials().creation_timestamp().is_some());

    // The persisted record matches the in-memory one field for field.
    let on_disk: Credentials =
        serde_json::from_str(&async_fs::read_to_string(&store).await.unwrap()).unwrap();
    assert_eq!(&on_disk, manager.credentials());
    assert_eq!(on_disk.client_key, "dGVzdDp0ZXN0");
}

#[tokio::test]
async fn failed_refresh_leaves_memory_and_store_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = common::temp_path("refresh-bad-status");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;
    let before = async_fs::read(&store).await.unwrap();

    let mut manager = TokenManager::load(&store, format!("{}/api/token", server.uri()))
        .await
        .unwrap();
    let err = manager.refresh().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthFailure(_)));

    assert_eq!(manager.token(), "cached-token");
    assert_eq!(async_fs::read(&store).await.unwrap(), before);
}

#[tokio::test]
async fn malformed_token_body_is_an_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nope": true})))
        .mount(&server)
        .await;

    let store = common::temp_path("refresh-bad-body");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;
    let before = async_fs::read(&store).await.unwrap();

    let mut manager = TokenManager::load(&store, format!("{}/api/token", server.uri()))
        .await
        .unwrap();
    let err = manager.refresh().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthFailure(_)));
    assert_eq!(manager.token(), "cached-token");
    assert_eq!(async_fs::read(&store).await.unwrap(), before);
}

#[tokio::test]
async fn unreachable_token_endpoint_is_a_transport_failure() {
    let store = common::temp_path("refresh-transport");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;
    let before = async_fs::read(&store).await.unwrap();

    let mut manager = TokenManager::load(&store, "http://127.0.0.1:1/api/token")
        .await
        .unwrap();
    let err = manager.refresh().await.unwrap_err();
    assert!(matches!(err, ApiError::TransportFailure(_)));
    assert_eq!(manager.token(), "cached-token");
    assert_eq!(async_fs::read(&store).await.unwrap(), before);
}

#[tokio::test]
async fn missing_store_is_credentials_unavailable() {
    let err = TokenManager::load(common::temp_path("missing"), "http://127.0.0.1:1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::CredentialsUnavailable(_)));
}

#[tokio::test]
async fn corrupt_store_is_credentials_unavailable() {
    let store = common::temp_path("corrupt");
    async_fs::write(&store, "{ not json").await.unwrap();

    let err = TokenManager::load(&store, "http://127.0.0.1:1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::CredentialsUnavailable(_)));
}

#[tokio::test]
async fn ensure_valid_reuses_a_valid_cached_token() {
    // No token endpoint at all: a valid cached token must not hit the network.
    let store = common::temp_path("reuse");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;

    let mut manager = TokenManager::load(&store, "http://127.0.0.1:1/api/token")
        .await
        .unwrap();
    manager.ensure_valid(false).await.unwrap();
    assert_eq!(manager.token(), "cached-token");
}
