use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spotkit::error::ApiError;
use spotkit::spotify::SpotifyClient;

mod common;

fn token_grant(access_token: &str, expires_in: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": access_token,
        "expires_in": expires_in,
        "token_type": "Bearer"
    }))
}

#[tokio::test]
async fn empty_stored_token_triggers_exactly_one_refresh_at_construction() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(token_grant("fresh-token", 3600))
        .expect(1)
        .mount(&server)
        .await;

    let store = common::temp_path("construct-empty");
    common::write_store(&store, &common::credentials("", 0, 0)).await;

    let client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    assert_eq!(client.token(), "fresh-token");
    assert!(!client.tokens().is_expired());
}

#[tokio::test]
async fn valid_cached_token_skips_the_token_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(token_grant("fresh-token", 3600))
        .expect(0)
        .mount(&server)
        .await;

    let store = common::temp_path("construct-cached");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;

    let client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    assert_eq!(client.token(), "cached-token");
}

#[tokio::test]
async fn rejected_token_is_refreshed_and_the_call_retried_once() {
    let server = MockServer::start().await;

    // expires_in of zero keeps the token permanently stale, so the 401 path
    // is allowed to refresh.
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(token_grant("short-lived", 0))
        .expect(2) // once at construction, once for the 401 retry
        .mount(&server)
        .await;

    // First resource attempt is rejected, the retry succeeds. Mount order
    // matters: the expiring mock matches first.
    Mock::given(method("GET"))
        .and(path("/audio-features"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/audio-features"))
        .and(query_param("ids", "id1,id2"))
        .and(header("authorization", "Bearer short-lived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audio_features": [
                {"id": "id1", "tempo": 120.0},
                {"id": "id2", "tempo": 98.5}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = common::temp_path("retry-once");
    common::write_store(&store, &common::credentials("", 0, 0)).await;

    let mut client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    let features = client
        .get_audio_features(&["id1".to_string(), "id2".to_string()])
        .await
        .unwrap();

    // The list comes from the retry's body, not the first attempt.
    assert_eq!(features.len(), 2);
    assert_eq!(features[0].id, "id1");
    assert_eq!(features[1].tempo, 98.5);
}

#[tokio::test]
async fn never_retries_more_than_once_even_if_the_retry_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(token_grant("short-lived", 0))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tracks/abc"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2) // first attempt plus exactly one retry
        .mount(&server)
        .await;

    let store = common::temp_path("no-retry-storm");
    common::write_store(&store, &common::credentials("", 0, 0)).await;

    let mut client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    let err = client.get_track("abc").await.unwrap_err();
    assert!(matches!(err, ApiError::AuthFailure(_)));
}

#[tokio::test]
async fn forbidden_is_an_auth_failure_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artists/xyz"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let store = common::temp_path("forbidden");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;

    let mut client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    let err = client.get_artist("xyz").await.unwrap_err();
    assert!(matches!(err, ApiError::AuthFailure(_)));
}

#[tokio::test]
async fn rate_limit_is_surfaced_without_backoff() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/abc"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let store = common::temp_path("rate-limited");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;

    let mut client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    let err = client.get_track("abc").await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited));
}

#[tokio::test]
async fn other_statuses_map_to_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/abc"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let store = common::temp_path("bad-gateway");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;

    let mut client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    let err = client.get_track("abc").await.unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed(502)));
}

#[tokio::test]
async fn missing_expected_keys_are_a_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/audio-features"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"wrong": []})))
        .mount(&server)
        .await;

    let store = common::temp_path("bad-shape");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;

    let mut client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    let err = client
        .get_audio_features(&["id1".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedResponseShape(_)));
}

#[tokio::test]
async fn null_feature_entries_are_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/audio-features"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audio_features": [{"id": "id1", "tempo": 120.0}, null]
        })))
        .mount(&server)
        .await;

    let store = common::temp_path("null-features");
    common::write_store(&store, &common::credentials("cached-token", 10, 3600)).await;

    let mut client = SpotifyClient::new(common::client_config(&server.uri(), &store))
        .await
        .unwrap();
    let features = client
        .get_audio_features(&["id1".to_string(), "gone".to_string()])
        .await
        .unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].id, "id1");
}
