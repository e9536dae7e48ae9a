//! Desired-state lifecycle for the `article` resource.
//!
//! # Design
//! An orchestrator owns a [`ResourceState`] per declared article and drives
//! it through [`Reconciler::create`], [`Reconciler::read`],
//! [`Reconciler::update`] and [`Reconciler::delete`], persisting whatever
//! state comes back. A state with no `id` is *absent*; with an `id` it is
//! *bound* to a remote article.
//!
//! Transitions:
//! - absent --create--> bound. If the POST fails the state stays absent.
//!   Once the server has answered 201 the state is bound, even when the
//!   refresh that follows fails, so the remote article is never orphaned.
//! - bound --read--> bound with every field replaced by the remote value.
//!   A 404 means the article was removed out of band and the state goes
//!   back to absent, so the orchestrator plans a re-create.
//! - bound --update--> bound, refreshed by a read. A failed PUT leaves the
//!   state untouched.
//! - bound --delete--> absent. A 404 counts as success since the remote end
//!   is already in the requested state.
//!
//! Declared input is parsed into [`ArticleConfig`] once, at the boundary;
//! a malformed shape is a `Validation` error raised before any request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::client::ArticleClient;
use crate::config::ProviderConfig;
use crate::error::{ApiError, Result};
use crate::transport::{HttpTransport, Transport};
use crate::types::{Article, ArticleDraft, ArticleId};

/// Desired fields of an article, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleConfig {
    pub heading: String,
    pub description: String,
    pub tags: Vec<String>,
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> Result<String> {
    match object.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ApiError::Validation(format!(
            "{name} must be a string, but got {}",
            kind(other)
        ))),
        None => Err(ApiError::Validation(format!("{name} is required"))),
    }
}

impl ArticleConfig {
    /// Parse a loosely typed declaration such as
    /// `{"heading": "...", "description": "...", "tags": ["..."]}`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            ApiError::Validation(format!("expected an object, but got {}", kind(value)))
        })?;

        let heading = string_field(object, "heading")?;
        let description = string_field(object, "description")?;
        let tags = match object.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|tag| {
                    tag.as_str().map(str::to_string).ok_or_else(|| {
                        ApiError::Validation(format!(
                            "each tag must be a string, but got {}",
                            kind(tag)
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(ApiError::Validation(format!(
                    "tags should be a list of strings, but got {}",
                    kind(other)
                )))
            }
            None => {
                return Err(ApiError::Validation(
                    "tags must be a list of strings".to_string(),
                ))
            }
        };

        let config = Self {
            heading,
            description,
            tags,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.heading.trim().is_empty() {
            return Err(ApiError::Validation("heading must not be empty".to_string()));
        }
        Ok(())
    }

    fn to_draft(&self) -> ArticleDraft {
        ArticleDraft {
            heading: self.heading.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Declared state for one article, as persisted by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    pub id: Option<ArticleId>,
    pub heading: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl ResourceState {
    pub fn is_bound(&self) -> bool {
        self.id.is_some()
    }

    fn bound_id(&self) -> Result<ArticleId> {
        self.id
            .ok_or_else(|| ApiError::Validation("resource has no id; create it first".to_string()))
    }

    /// Overwrite every field with the remote article. Returns whether any
    /// declared field differed.
    fn adopt(&mut self, article: Article) -> bool {
        let drifted = self.heading != article.heading
            || self.description != article.description
            || self.tags != article.tags;
        self.id = Some(article.id);
        self.heading = article.heading;
        self.description = article.description;
        self.tags = article.tags;
        drifted
    }

    fn clear(&mut self) {
        self.id = None;
    }
}

/// Result of a successful [`Reconciler::read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The article exists; state now mirrors it.
    Present(Article),
    /// The article is gone remotely; state is absent again.
    Gone,
}

pub struct Reconciler<T> {
    client: ArticleClient,
    transport: T,
}

impl Reconciler<HttpTransport> {
    pub fn from_config(config: &ProviderConfig) -> Self {
        info!(url = %config.url, "configured article provider");
        Self::new(
            ArticleClient::new(&config.url),
            HttpTransport::new(config.timeout),
        )
    }
}

impl<T: Transport> Reconciler<T> {
    pub fn new(client: ArticleClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ArticleClient {
        &self.client
    }

    /// Create the article remotely and bind `state` to it.
    pub fn create(&self, state: &mut ResourceState, desired: &ArticleConfig) -> Result<ArticleId> {
        if let Some(id) = state.id {
            return Err(ApiError::Validation(format!(
                "resource is already bound to article {id}"
            )));
        }
        desired.validate()?;
        debug!(tags = ?desired.tags, "creating article");

        let request = self.client.build_create_article(&desired.to_draft())?;
        let created = self
            .client
            .parse_create_article(self.transport.execute(request)?)?;
        info!(id = created.id, "article created");

        let id = created.id;
        state.adopt(created);
        match self.read(state)? {
            ReadOutcome::Present(_) => Ok(id),
            ReadOutcome::Gone => Err(ApiError::NotFound),
        }
    }

    /// Refresh `state` from the remote article.
    pub fn read(&self, state: &mut ResourceState) -> Result<ReadOutcome> {
        let id = state.bound_id()?;
        let response = self.transport.execute(self.client.build_get_article(id))?;
        match self.client.parse_get_article(response) {
            Ok(article) => {
                if state.adopt(article.clone()) {
                    debug!(id, "remote article differs from declared state; adopting remote");
                }
                Ok(ReadOutcome::Present(article))
            }
            Err(ApiError::NotFound) => {
                warn!(id, "article no longer exists; marking resource absent");
                state.clear();
                Ok(ReadOutcome::Gone)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace the remote article with `desired`, then refresh `state`.
    ///
    /// If the article disappears between the PUT and the refresh, the state
    /// is left absent and `NotFound` is returned.
    pub fn update(&self, state: &mut ResourceState, desired: &ArticleConfig) -> Result<()> {
        let id = state.bound_id()?;
        desired.validate()?;

        let request = self.client.build_update_article(id, &desired.to_draft())?;
        self.client
            .parse_update_article(self.transport.execute(request)?)?;
        info!(id, "article updated");

        match self.read(state)? {
            ReadOutcome::Present(_) => Ok(()),
            ReadOutcome::Gone => Err(ApiError::NotFound),
        }
    }

    /// Delete the remote article and unbind `state`.
    pub fn delete(&self, state: &mut ResourceState) -> Result<()> {
        let id = state.bound_id()?;
        let response = self.transport.execute(self.client.build_delete_article(id))?;
        match self.client.parse_delete_article(response) {
            Ok(()) => info!(id, "article deleted"),
            Err(ApiError::NotFound) => info!(id, "article already absent"),
            Err(e) => return Err(e),
        }
        state.clear();
        Ok(())
    }
}
