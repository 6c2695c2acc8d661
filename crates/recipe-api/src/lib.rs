//! # recipe-api
//!
//! HTTP surfaces for the recipe catalog:
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/recipes/search` | query-string search, 100-row cap |
//! | `GET /api/recipe/:id` | single recipe |
//! | `GET /api/diet-plans` | preset table |
//! | `GET /api/health` | liveness |
//! | `POST /api/chat` | free-text search through the query translator |
//! | `POST /mcp` | JSON-RPC tool surface |

pub mod error;
pub mod handlers;
pub mod jsonrpc;
pub mod mcp;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use error::ApiError;
pub use state::AppState;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// CORS
// =============================================================================

/// Parse a comma-separated origin list, skipping blanks and invalid values.
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

/// CORS policy. An empty origin list allows any origin.
pub fn cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600))
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with tracing and request-id layers.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/recipes/search", get(handlers::search_recipes))
        .route("/api/recipe/:id", get(handlers::get_recipe))
        .route("/api/diet-plans", get(handlers::list_diet_plans))
        .route("/api/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .route("/mcp", post(mcp::handle_mcp))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins() {
        let origins = parse_allowed_origins(" https://a.example ,, http://localhost:3000 ");
        assert_eq!(
            origins,
            vec![
                HeaderValue::from_static("https://a.example"),
                HeaderValue::from_static("http://localhost:3000"),
            ]
        );
        assert!(parse_allowed_origins("").is_empty());
        assert!(parse_allowed_origins(" , ").is_empty());
    }
}
