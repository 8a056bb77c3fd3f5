use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::pages::{self, VISIT_COUNT_HEADER};
use crate::state::AppState;
use crate::tokens;

pub fn router(state: AppState) -> Router {
    // Pages are embedded cross-origin; the visit count header has to be
    // exposed for browser scripts to read it.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([VISIT_COUNT_HEADER]);

    Router::new()
        .route("/", get(pages::index))
        .route("/gallery", get(pages::gallery))
        .route("/favicon.ico", get(pages::favicon))
        .route("/404", get(pages::serve_404))
        .route("/502", get(pages::serve_502))
        .route("/503", get(pages::serve_503))
        .route("/api/token", post(tokens::issue_token))
        .route("/api/token/{token}", get(tokens::token_status))
        .route("/api/error", get(pages::error_page_api))
        .route("/health", get(pages::health))
        .fallback(pages::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
