//! API route definitions

mod status;
mod subscriptions;

use axum::Router;

use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .merge(subscriptions::routes())
}
