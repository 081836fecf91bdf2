//! Status and liveness endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Status echo response
#[derive(Debug, Serialize)]
struct StatusResponse {
    message: String,
    schedule_time: String,
    topics: Vec<String>,
    subscribers: usize,
}

/// GET / - configuration echo
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let subscribers = state.store.count().unwrap_or(0);

    Json(StatusResponse {
        message: "Daily News Digest API is running".to_string(),
        schedule_time: state.config.schedule_time.format("%H:%M").to_string(),
        topics: state.config.topics.clone(),
        subscribers,
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create status routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status))
        .route("/health/live", get(liveness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveTime;
    use digest_services::{DigestConfig, SubscriberStore};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(SubscriberStore::new_in_memory().unwrap()),
            config: Arc::new(DigestConfig {
                email_user: "digest@example.com".to_string(),
                email_pass: "secret".to_string(),
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 587,
                topics: vec!["ai".to_string(), "space".to_string()],
                schedule_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                exa_api_key: "test-key".to_string(),
                db_path: ":memory:".to_string(),
            }),
        }
    }

    #[tokio::test]
    async fn test_status_echoes_configuration() {
        let app = routes().with_state(test_state());

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["schedule_time"], "08:00");
        assert_eq!(json["topics"], serde_json::json!(["ai", "space"]));
        assert_eq!(json["subscribers"], 0);
    }

    #[tokio::test]
    async fn test_liveness() {
        let app = routes().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
