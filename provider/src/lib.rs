//! Desired-state provider for the article server.
//!
//! # Overview
//! Converges articles on a remote article server toward a declared
//! configuration through four lifecycle operations (create, read, update,
//! delete), keeping the caller's declared-state record consistent with what
//! the server actually holds.
//!
//! # Design
//! - `ArticleClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` interprets an `HttpResponse`.
//! - A `Transport` executes requests. `HttpTransport` uses a blocking `ureq`
//!   agent with a bounded timeout; tests substitute their own.
//! - `Reconciler` drives the lifecycle over a `ResourceState` the caller
//!   persists between calls.
//! - DTOs are defined independently from the server crate; the integration
//!   test catches schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod reconciler;
pub mod transport;
pub mod types;

pub use client::ArticleClient;
pub use config::ProviderConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use reconciler::{ArticleConfig, ReadOutcome, Reconciler, ResourceState};
pub use transport::{HttpTransport, Transport};
pub use types::{Article, ArticleDraft, ArticleId};
