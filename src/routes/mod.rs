//! Router assembly: catalog routes, sitemap, operational routes and middleware.

pub mod catalog;
pub mod common;

pub use catalog::catalog;
pub use common::common_routes;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::handlers::sitemap::{self, RouteEntry};
use crate::state::AppState;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::map_response;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// The served application. Trailing slashes are trimmed before routing, so `/planets/` reaches `/planets`.
pub type App = NormalizePath<Router>;

/// Full application: every route plus body limit, CORS and request tracing.
pub fn app(state: AppState, config: &ServerConfig) -> App {
    let mut router = Router::new();
    let mut entries: Vec<RouteEntry> = Vec::new();
    for (entry, method_router) in catalog() {
        entries.push(entry);
        router = router.route(entry.path, method_router);
    }
    entries.extend([
        RouteEntry {
            path: "/health",
            methods: &["GET"],
        },
        RouteEntry {
            path: "/ready",
            methods: &["GET"],
        },
        RouteEntry {
            path: "/version",
            methods: &["GET"],
        },
    ]);
    let page = sitemap::render(&entries);

    let router = router
        .route("/", get(move || async move { Html(page) }))
        .merge(common_routes())
        .fallback(no_route)
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        .layer(map_response(json_payload_too_large))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state);
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn no_route() -> AppError {
    AppError::NotFound("Route")
}

/// The body limit layer answers 413 in plain text; give it the same JSON shape as other errors.
async fn json_payload_too_large(response: Response) -> Response {
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge.into_response();
    }
    response
}

/// Any origin when `origins` is empty, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
