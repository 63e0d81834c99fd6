use std::convert::Infallible;

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use crate::{pagination, rejections::AppError};

#[derive(Deserialize)]
struct PageQuery {
    page: Option<String>,
}

/// Extracts the 1-indexed page number from the `page` query parameter.
/// Absent, non-numeric or undecodable values fall back to page 1.
pub struct Page(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for Page {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<PageQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.page);
        Ok(Page(pagination::page_number(page.as_deref())))
    }
}

/// JSON body extractor whose failures become [`AppError::Input`] instead of
/// axum's plain-text rejections.
pub struct JsonBody<T>(pub T);

impl<S: Send + Sync, T: DeserializeOwned> FromRequest<S> for JsonBody<T> {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!("rejected request body: {e}");
            AppError::Input("malformed request body")
        })?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    async fn page_of(uri: &str) -> i64 {
        let (mut parts, _) = HttpRequest::builder().uri(uri).body(()).unwrap().into_parts();
        let Page(page) = Page::from_request_parts(&mut parts, &()).await.unwrap();
        page
    }

    #[tokio::test]
    async fn page_defaults_to_one() {
        assert_eq!(page_of("/questions").await, 1);
        assert_eq!(page_of("/questions?page=abc").await, 1);
        assert_eq!(page_of("/questions?sort=asc").await, 1);
    }

    #[tokio::test]
    async fn page_reads_query_parameter() {
        assert_eq!(page_of("/questions?page=2").await, 2);
        assert_eq!(page_of("/questions?sort=asc&page=3").await, 3);
    }

    #[tokio::test]
    async fn page_is_percent_decoded() {
        assert_eq!(page_of("/questions?page=%32").await, 2);
        assert_eq!(page_of("/questions?page=%2012").await, 12);
        assert_eq!(page_of("/questions?pa%67e=3").await, 3);
    }
}
