pub mod db;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod names;
pub mod pagination;
pub mod rejections;
pub mod services;

use axum::{middleware, Router};

use crate::services::trivia::TriviaService;

#[derive(Clone)]
pub struct AppState {
    pub trivia: TriviaService,
}

impl AppState {
    pub fn new(db: db::Db) -> Self {
        Self {
            trivia: TriviaService::new(db),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::categories::routes())
        .merge(handlers::questions::routes())
        .merge(handlers::quizzes::routes())
        .layer(middleware::from_fn(cors_headers))
        .with_state(state)
}

/// Any origin may call the API; the quiz frontend is served separately.
async fn cors_headers(
    req: axum::http::Request<axum::body::Body>,
    next: middleware::Next,
) -> axum::response::Response {
    use axum::http::{header, HeaderValue, Method, StatusCode};
    use axum::response::IntoResponse;

    let mut resp = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };

    let headers = resp.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type,Authorization"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,POST,DELETE,OPTIONS"),
    );

    resp
}
