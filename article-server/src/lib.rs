//! In-memory article service.
//!
//! # Overview
//! Holds articles in an [`ArticleStore`] and exposes create/read/update/delete
//! over a single HTTP path, `/api/v1/article`. State lives only in memory;
//! a restart starts from an empty (or freshly seeded) store.

pub mod api;
pub mod store;

use std::net::SocketAddr;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;

pub use api::ServiceError;
pub use store::{Article, ArticleDraft, ArticleId, ArticleStore};

/// Router over a fresh, empty store.
pub fn app() -> Router {
    app_with_store(ArticleStore::new())
}

pub fn app_with_store(store: ArticleStore) -> Router {
    Router::new()
        .route(
            api::ARTICLE_PATH,
            get(api::get_article)
                .post(api::create_article)
                .put(api::update_article)
                .delete(api::delete_article)
                .head(api::reject_head),
        )
        .layer(middleware::from_fn(api::log_request))
        .with_state(store)
}

/// Serve `store` on `listener` until the listener fails.
pub async fn run(listener: TcpListener, store: ArticleStore) -> Result<(), std::io::Error> {
    axum::serve(
        listener,
        app_with_store(store).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
