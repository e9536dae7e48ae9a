//! In-memory article store.
//!
//! # Design
//! `ArticleStore` owns the id-to-article map and the id counter behind a
//! single `Mutex`. Every operation takes the lock for the duration of the map
//! access and hands back owned clones, so no caller ever holds a reference
//! into the map after the lock is released.
//!
//! Ids come from a counter that lives inside the same critical section. They
//! are never reused for the lifetime of the process.

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub type ArticleId = i64;

/// A stored article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub heading: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Article fields without an id, as accepted by create and update.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ArticleDraft {
    pub heading: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ArticleDraft {
    fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            heading: self.heading,
            description: self.description,
            tags: self.tags,
        }
    }
}

#[derive(Debug)]
struct Inner {
    articles: HashMap<ArticleId, Article>,
    next_id: ArticleId,
}

impl Inner {
    fn issue_id(&mut self) -> ArticleId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Shared handle to the article map. Clones point at the same store.
#[derive(Clone, Debug)]
pub struct ArticleStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                articles: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    /// Insert a new article under a freshly issued id.
    pub async fn create(&self, draft: ArticleDraft) -> Article {
        let mut inner = self.inner.lock().await;
        let id = inner.issue_id();
        let article = draft.into_article(id);
        inner.articles.insert(id, article.clone());
        article
    }

    /// Replace the article stored under `id`. Returns `None` without touching
    /// the map when `id` is not live.
    pub async fn update(&self, id: ArticleId, draft: ArticleDraft) -> Option<Article> {
        let mut inner = self.inner.lock().await;
        let slot = inner.articles.get_mut(&id)?;
        *slot = draft.into_article(id);
        Some(slot.clone())
    }

    pub async fn get(&self, id: ArticleId) -> Option<Article> {
        self.inner.lock().await.articles.get(&id).cloned()
    }

    /// Snapshot of every live article. Order is unspecified.
    pub async fn get_all(&self) -> Vec<Article> {
        self.inner.lock().await.articles.values().cloned().collect()
    }

    pub async fn delete(&self, id: ArticleId) -> bool {
        self.inner.lock().await.articles.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.articles.len()
    }

    /// Load the three demo articles under ids 1..=3 and move the counter
    /// past them. Existing entries with those ids are overwritten.
    pub async fn seed(&self) {
        let demo = [
            (
                "Go Concurrency",
                "Learn about goroutines and channels in Go.",
                ["Go", "Concurrency"],
            ),
            (
                "REST API Design",
                "Best practices for designing RESTful APIs.",
                ["API", "REST"],
            ),
            (
                "Microservices Architecture",
                "An introduction to microservices.",
                ["Microservices", "Architecture"],
            ),
        ];

        let mut inner = self.inner.lock().await;
        for (id, (heading, description, tags)) in (1..).zip(demo) {
            let article = Article {
                id,
                heading: heading.to_string(),
                description: description.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            };
            inner.articles.insert(id, article);
            inner.next_id = inner.next_id.max(id + 1);
        }
    }
}
