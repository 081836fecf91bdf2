//! Subscribe and unsubscribe endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::Deserialize;
use tracing::error;

use digest_core::normalize_email;
use digest_services::SubscriberStoreError;

use crate::AppState;

/// Request body for subscribe and unsubscribe
#[derive(Debug, Deserialize)]
pub struct SubscriptionRequest {
    /// Email address; normalized before storage
    pub email: String,
}

/// Create subscription routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/unsubscribe", post(unsubscribe))
}

/// POST /subscribe - add a subscriber
async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscriptionRequest>,
) -> impl IntoResponse {
    match state.store.subscribe(&request.email) {
        Ok(subscriber) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("{} successfully subscribed", subscriber.email)
            })),
        ),
        Err(SubscriberStoreError::AlreadySubscribed(_)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Email already subscribed."
            })),
        ),
        Err(e) => {
            error!("Failed to subscribe '{}': {}", request.email, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Subscription failed"
                })),
            )
        }
    }
}

/// POST /unsubscribe - remove a subscriber
async fn unsubscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscriptionRequest>,
) -> impl IntoResponse {
    match state.store.unsubscribe(&request.email) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": format!("{} successfully unsubscribed", normalize_email(&request.email))
            })),
        ),
        Err(SubscriberStoreError::NotSubscribed(_)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "Email not found in subscribers."
            })),
        ),
        Err(e) => {
            error!("Failed to unsubscribe '{}': {}", request.email, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Unsubscription failed"
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
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
                topics: vec!["ai".to_string()],
                schedule_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                exa_api_key: "test-key".to_string(),
                db_path: ":memory:".to_string(),
            }),
        }
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_message(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["error"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_subscribe_then_duplicate_conflicts() {
        let app = routes().with_state(test_state());

        let first = app
            .clone()
            .oneshot(post_json("/subscribe", r#"{"email": " A@B.com "}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        // Same address after normalization
        let second = app
            .clone()
            .oneshot(post_json("/subscribe", r#"{"email": "a@b.com"}"#))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(second).await, "Email already subscribed.");
    }

    #[tokio::test]
    async fn test_unsubscribe_missing_is_not_found() {
        let app = routes().with_state(test_state());

        let response = app
            .oneshot(post_json("/unsubscribe", r#"{"email": "ghost@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            error_message(response).await,
            "Email not found in subscribers."
        );
    }

    #[tokio::test]
    async fn test_subscribe_then_unsubscribe() {
        let app = routes().with_state(test_state());

        let subscribed = app
            .clone()
            .oneshot(post_json("/subscribe", r#"{"email": "user@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(subscribed.status(), StatusCode::OK);

        let unsubscribed = app
            .clone()
            .oneshot(post_json("/unsubscribe", r#"{"email": "USER@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(unsubscribed.status(), StatusCode::OK);

        // Second unsubscribe finds nothing
        let again = app
            .clone()
            .oneshot(post_json("/unsubscribe", r#"{"email": "user@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(again.status(), StatusCode::NOT_FOUND);
    }
}
