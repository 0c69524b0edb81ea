use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_secret};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- envelopes ---

#[tokio::test]
async fn get_server_time_returns_response_envelope() {
    let resp = app().oneshot(get("/method/getServerTime")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope = body_json(resp).await;
    assert!(envelope["response"].as_u64().unwrap() > 0);
    assert!(envelope.get("error").is_none());
}

#[tokio::test]
async fn unknown_method_returns_error_envelope() {
    let resp = app().oneshot(get("/method/bogus")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope = body_json(resp).await;
    assert_eq!(envelope["error"]["error_code"], 3);
    assert!(envelope["error"]["error_msg"]
        .as_str()
        .unwrap()
        .contains("bogus"));
}

// --- echo ---

#[tokio::test]
async fn echo_round_trips_unicode_query_values() {
    // q=клен, percent-encoded
    let resp = app()
        .oneshot(get("/method/echo?q=%D0%BA%D0%BB%D0%B5%D0%BD"))
        .await
        .unwrap();

    let envelope = body_json(resp).await;
    assert_eq!(envelope["response"]["q"], "клен");
}

#[tokio::test]
async fn echo_strips_auth_parameters() {
    let resp = app()
        .oneshot(get("/method/echo?uid=1&api_id=api_id&sig=abc"))
        .await
        .unwrap();

    let envelope = body_json(resp).await;
    assert_eq!(envelope["response"]["uid"], "1");
    assert!(envelope["response"].get("api_id").is_none());
    assert!(envelope["response"].get("sig").is_none());
}

// --- notJson ---

#[tokio::test]
async fn not_json_method_is_not_an_envelope() {
    let resp = app().oneshot(get("/method/notJson")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<Value>(&bytes).is_err());
}

// --- signature verification ---

#[tokio::test]
async fn missing_signature_is_rejected_when_secret_set() {
    let resp = app_with_secret("api_secret")
        .oneshot(get("/method/getServerTime"))
        .await
        .unwrap();

    let envelope = body_json(resp).await;
    assert_eq!(envelope["error"]["error_code"], 10);
}

#[tokio::test]
async fn valid_signature_is_accepted() {
    // md5("q=helloapi_secret")
    let resp = app_with_secret("api_secret")
        .oneshot(get(
            "/method/echo?q=hello&sig=d063a31187fee4cb58caabab26589596",
        ))
        .await
        .unwrap();

    let envelope = body_json(resp).await;
    assert_eq!(envelope["response"]["q"], "hello");
}

#[tokio::test]
async fn tampered_parameter_invalidates_the_signature() {
    // Signature was computed for q=hello, not q=goodbye.
    let resp = app_with_secret("api_secret")
        .oneshot(get(
            "/method/echo?q=goodbye&sig=d063a31187fee4cb58caabab26589596",
        ))
        .await
        .unwrap();

    let envelope = body_json(resp).await;
    assert_eq!(envelope["error"]["error_code"], 10);
}
