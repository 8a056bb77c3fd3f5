use std::path::PathBuf;

use axum::{
    Json,
    extract::{Query, Request, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{error, info, warn};

use happiness_core::redact;
use happiness_types::api::{ErrorPageQuery, HealthResponse, PageQuery, QueryPairs};

use crate::selection::ErrorCode;
use crate::state::AppState;

pub const VISIT_COUNT_HEADER: HeaderName = HeaderName::from_static("x-visit-count");

const FAVICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><text y="75" font-size="75">🎭</text></svg>"#;

/// Count a visit if the request carries a token. Storage failures degrade
/// to "no count" so the page is still served.
async fn track_visit(state: &AppState, token: Option<String>) -> Option<u64> {
    let token = token.filter(|t| !t.is_empty())?;

    // Run blocking DB update off the async runtime
    let db = state.clone();
    let outcome = tokio::task::spawn_blocking(move || db.counter.page_served(Some(&token)))
        .await
        .map_err(|e| error!("spawn_blocking join error: {}", e))
        .ok()??;

    outcome.ok()?.count()
}

fn with_visit_count(mut res: Response, count: Option<u64>) -> Response {
    if let Some(count) = count {
        res.headers_mut()
            .insert(VISIT_COUNT_HEADER, HeaderValue::from(count));
    }
    res
}

/// Only a page that actually went out (or was revalidated) is a visit.
fn page_was_served(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::NOT_MODIFIED
}

async fn serve_file(path: PathBuf, req: Request) -> Response {
    ServeFile::new(path)
        .oneshot(req)
        .await
        .map(IntoResponse::into_response)
        .unwrap_or_else(|never| match never {})
}

async fn serve_styled(state: AppState, code: ErrorCode, query: PageQuery, req: Request) -> Response {
    let path = code.styled_page(&state.pages_dir, query.style.as_deref());
    let res = serve_file(path, req).await;
    if !page_was_served(res.status()) {
        return res;
    }

    let count = track_visit(&state, query.token).await;
    with_visit_count(res, count)
}

/// GET /404?style=&token=
pub async fn serve_404(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    req: Request,
) -> Response {
    serve_styled(state, ErrorCode::NotFound, PageQuery::from_pairs(&pairs), req).await
}

/// GET /502?style=&token=
pub async fn serve_502(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    req: Request,
) -> Response {
    serve_styled(state, ErrorCode::BadGateway, PageQuery::from_pairs(&pairs), req).await
}

/// GET /503?style=&token=
pub async fn serve_503(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    req: Request,
) -> Response {
    serve_styled(state, ErrorCode::ServiceUnavailable, PageQuery::from_pairs(&pairs), req).await
}

/// Any unrouted path, whatever the method: the default 404 page with a
/// real 404 status.
pub async fn not_found(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
    mut req: Request,
) -> Response {
    // ServeFile only answers GET and HEAD
    if req.method() != Method::HEAD {
        *req.method_mut() = Method::GET;
    }

    let query = PageQuery::from_pairs(&pairs);
    let mut res = serve_styled(state, ErrorCode::NotFound, query, req).await;
    if res.status() == StatusCode::OK {
        *res.status_mut() = StatusCode::NOT_FOUND;
    }
    res
}

pub async fn index(State(state): State<AppState>, req: Request) -> Response {
    serve_file(state.pages_dir.join("index.html"), req).await
}

pub async fn gallery(State(state): State<AppState>, req: Request) -> Response {
    serve_file(state.pages_dir.join("gallery.html"), req).await
}

pub async fn favicon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], FAVICON_SVG)
}

/// GET /api/error?code=&token=: the page for `code` as an HTML body.
pub async fn error_page_api(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Response, StatusCode> {
    let query = ErrorPageQuery::from_pairs(&pairs);
    let code = query.code.as_deref().unwrap_or("404");
    let code = ErrorCode::parse(code).ok_or(StatusCode::BAD_REQUEST)?;

    let path = code.api_page(&state.pages_dir);
    let content = tokio::fs::read(&path).await.map_err(|e| {
        warn!("Failed to read {}: {}", path.display(), e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    info!(
        "API page {} served (token: {})",
        code.as_str(),
        query.token.as_deref().map(redact).unwrap_or("-")
    );

    let count = track_visit(&state, query.token).await;
    let res = (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        content,
    )
        .into_response();
    Ok(with_visit_count(res, count))
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
