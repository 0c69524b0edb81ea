use std::{
    collections::BTreeMap,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use md5::{Digest, Md5};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Router configuration: when `secret` is set, every request must carry a
/// valid `sig` query parameter.
#[derive(Clone, Default)]
pub struct ApiConfig {
    secret: Option<String>,
}

/// Router with signature verification disabled.
pub fn app() -> Router {
    with_config(ApiConfig::default())
}

/// Router that verifies request signatures against `secret`.
pub fn app_with_secret(secret: impl Into<String>) -> Router {
    with_config(ApiConfig {
        secret: Some(secret.into()),
    })
}

fn with_config(config: ApiConfig) -> Router {
    Router::new()
        .route("/method/{name}", get(dispatch))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_secret(
    listener: TcpListener,
    secret: impl Into<String>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_secret(secret)).await
}

async fn dispatch(
    State(config): State<Arc<ApiConfig>>,
    Path(name): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    if let Some(secret) = &config.secret {
        if !signature_valid(secret, &params) {
            return Json(error_envelope(10, "Invalid signature")).into_response();
        }
    }

    match name.as_str() {
        "getServerTime" => Json(json!({ "response": unix_time() })).into_response(),
        "echo" => {
            let mut echoed = params.clone();
            echoed.remove("sig");
            echoed.remove("api_id");
            Json(json!({ "response": echoed })).into_response()
        }
        "slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "response": "late" })).into_response()
        }
        "notJson" => "this is not json".into_response(),
        other => {
            Json(error_envelope(3, &format!("Unknown method called: {other}"))).into_response()
        }
    }
}

fn unix_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn error_envelope(code: i64, message: &str) -> Value {
    json!({ "error": { "error_code": code, "error_msg": message } })
}

/// Recompute the MD5 signature over the query (minus `sig`) and compare it
/// with the provided one. BTreeMap iteration gives the canonical key order.
fn signature_valid(secret: &str, params: &BTreeMap<String, String>) -> bool {
    let Some(provided) = params.get("sig") else {
        return false;
    };

    let mut hasher = Md5::new();
    for (key, value) in params {
        if key == "sig" {
            continue;
        }
        hasher.update(key.as_bytes());
        hasher.update(b"=");
        hasher.update(value.as_bytes());
    }
    hasher.update(secret.as_bytes());
    let expected = format!("{:x}", hasher.finalize());
    provided == &expected
}
