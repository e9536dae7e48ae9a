//! HTTP surface for the article store.
//!
//! One resource path, `/api/v1/article`, dispatched on the verb. The target
//! article is selected by the `id` query parameter. Bodies are decoded by hand
//! rather than through `Json` so that every malformed payload is a 400,
//! whatever its content-type.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::store::{ArticleDraft, ArticleId, ArticleStore};

pub const ARTICLE_PATH: &str = "/api/v1/article";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid ID")]
    InvalidId,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Article not found")]
    NotFound(ArticleId),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::InvalidId | ServiceError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(id) => {
                warn!(id, "article not found");
                StatusCode::NOT_FOUND
            }
        };
        if status == StatusCode::BAD_REQUEST {
            warn!(error = %self, "rejected request");
        }
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: Option<String>,
}

impl IdQuery {
    /// The target id. Absent, empty and non-integer values are all invalid.
    fn require(&self) -> Result<ArticleId, ServiceError> {
        self.id
            .as_deref()
            .ok_or(ServiceError::InvalidId)?
            .parse()
            .map_err(|_| ServiceError::InvalidId)
    }
}

fn decode_draft(body: &[u8]) -> Result<ArticleDraft, ServiceError> {
    let draft: ArticleDraft =
        serde_json::from_slice(body).map_err(|e| ServiceError::InvalidJson(e.to_string()))?;
    if draft.heading.trim().is_empty() {
        return Err(ServiceError::InvalidJson("heading must not be empty".to_string()));
    }
    Ok(draft)
}

/// Log method, target and caller of every request before it is dispatched.
pub async fn log_request(request: Request, next: Next) -> Response {
    let caller = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    info!(
        method = %request.method(),
        uri = %request.uri(),
        %caller,
        "received request"
    );
    next.run(request).await
}

pub async fn create_article(
    State(store): State<ArticleStore>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let draft = decode_draft(&body)?;
    let article = store.create(draft).await;
    info!(id = article.id, "article created");
    Ok((StatusCode::CREATED, Json(article)).into_response())
}

/// `GET` with an `id` returns that article, without one returns them all.
pub async fn get_article(
    State(store): State<ArticleStore>,
    Query(query): Query<IdQuery>,
) -> Result<Response, ServiceError> {
    if query.id.is_none() {
        let articles = store.get_all().await;
        info!(count = articles.len(), "articles listed");
        return Ok(Json(articles).into_response());
    }

    let id = query.require()?;
    let article = store.get(id).await.ok_or(ServiceError::NotFound(id))?;
    info!(id, "article retrieved");
    Ok(Json(article).into_response())
}

pub async fn update_article(
    State(store): State<ArticleStore>,
    Query(query): Query<IdQuery>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let id = query.require()?;
    let draft = decode_draft(&body)?;
    let article = store
        .update(id, draft)
        .await
        .ok_or(ServiceError::NotFound(id))?;
    info!(id, "article updated");
    Ok(Json(article).into_response())
}

pub async fn delete_article(
    State(store): State<ArticleStore>,
    Query(query): Query<IdQuery>,
) -> Result<StatusCode, ServiceError> {
    let id = query.require()?;
    if !store.delete(id).await {
        return Err(ServiceError::NotFound(id));
    }
    info!(id, "article deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `HEAD` would otherwise be served by the `GET` handler.
pub async fn reject_head() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}
