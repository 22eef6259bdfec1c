use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::models::SubmitEnvelope;
use crate::service;
use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Browsers preflight cross-origin posts, so every response carries these.
fn cors_headers() -> [(&'static str, &'static str); 4] {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Access-Control-Allow-Methods", "OPTIONS,POST,GET"),
    ]
}

pub async fn submit_metrics(
    State(state): State<AppState>,
    method: Method,
    body: String,
) -> Response {
    if method == Method::OPTIONS {
        // Preflight needs only the status and headers.
        return (StatusCode::OK, cors_headers()).into_response();
    }
    if method != Method::POST {
        return (
            StatusCode::OK,
            cors_headers(),
            Json(SubmitEnvelope::rejected("POST required")),
        )
            .into_response();
    }

    match service::submit(&state, &body).await {
        Ok(count) => (
            StatusCode::OK,
            cors_headers(),
            Json(SubmitEnvelope::accepted(count)),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "metrics submit failed");
            (
                err.status(),
                cors_headers(),
                Json(SubmitEnvelope::rejected(err.to_string())),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::config::DbConfig;

    fn test_state() -> AppState {
        // Points at a closed port; only paths that never reach the store
        // (or that should fail to connect) run against it.
        AppState {
            db: Arc::new(DbConfig {
                host: "127.0.0.1".to_string(),
                port: 1,
                user: "metrics".to_string(),
                password: "metrics".to_string(),
                dbname: "metrics".to_string(),
                connect_timeout: Duration::from_secs(1),
                table: "MetricsSummary".to_string(),
            }),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn options_returns_cors_headers_and_empty_body() {
        let response = submit_metrics(State(test_state()), Method::OPTIONS, String::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
        for name in [
            "access-control-allow-origin",
            "access-control-allow-headers",
            "access-control-allow-methods",
        ] {
            assert!(response.headers().contains_key(name), "missing {name}");
        }
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn non_post_methods_are_rejected_with_200() {
        for method in [Method::GET, Method::DELETE] {
            let response = submit_metrics(State(test_state()), method, String::new()).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body = body_json(response).await;
            assert_eq!(body["success"], false);
            assert_eq!(body["exception"], "POST required");
        }
    }

    #[tokio::test]
    async fn malformed_post_body_is_a_400_failure() {
        let response =
            submit_metrics(State(test_state()), Method::POST, "{}".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["exception"].is_string());
        assert!(body.get("count").is_none());
    }

    #[tokio::test]
    async fn valid_post_with_unreachable_store_fails_closed() {
        let raw = r#"{
            "page": "home",
            "host": "example.com",
            "uxMetrics": {"summaries": {
                "click": {"fireCount": 3},
                "mouseleave": {"fireCount": 1},
                "mousemove": {"fireCount": 50, "stateChangeCount": 5},
                "resize": {"fireCount": 2, "stateChangeCount": 1},
                "scroll": {"fireCount": 10, "stateChangeCount": 4}
            }}
        }"#;
        let response = submit_metrics(State(test_state()), Method::POST, raw.to_string()).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
    }
}
