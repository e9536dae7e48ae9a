//! Wire DTOs for the article API.
//!
//! # Design
//! These mirror the article server's schema but are defined independently so
//! the provider does not link the server's async stack. The integration test
//! catches any schema drift between the two crates.

use serde::{Deserialize, Serialize};

pub type ArticleId = i64;

/// An article as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub heading: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for create and full-replacement update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleDraft {
    pub heading: String,
    pub description: String,
    pub tags: Vec<String>,
}
