//! Stateless HTTP request builder and response parser for the article API.
//!
//! # Design
//! `ArticleClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Status interpretation happens only in
//! `parse_*`; transports hand back whatever the server said.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Article, ArticleDraft, ArticleId};

const ARTICLE_PATH: &str = "/api/v1/article";

#[derive(Debug, Clone)]
pub struct ArticleClient {
    base_url: String,
}

impl ArticleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{ARTICLE_PATH}", self.base_url)
    }

    fn item_url(&self, id: ArticleId) -> String {
        format!("{}{ARTICLE_PATH}?id={id}", self.base_url)
    }

    pub fn build_list_articles(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_article(&self, id: ArticleId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_article(&self, input: &ArticleDraft) -> Result<HttpRequest> {
        json_request(HttpMethod::Post, self.collection_url(), input)
    }

    pub fn build_update_article(&self, id: ArticleId, input: &ArticleDraft) -> Result<HttpRequest> {
        json_request(HttpMethod::Put, self.item_url(id), input)
    }

    pub fn build_delete_article(&self, id: ArticleId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_articles(&self, response: HttpResponse) -> Result<Vec<Article>> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_get_article(&self, response: HttpResponse) -> Result<Article> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_create_article(&self, response: HttpResponse) -> Result<Article> {
        check_status(&response, 201)?;
        decode(&response)
    }

    pub fn parse_update_article(&self, response: HttpResponse) -> Result<Article> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_delete_article(&self, response: HttpResponse) -> Result<()> {
        check_status(&response, 204)
    }
}

fn json_request(method: HttpMethod, path: String, input: &ArticleDraft) -> Result<HttpRequest> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
