use article_server::{app, app_with_store, Article, ArticleStore};
use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_articles_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/v1/article"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let articles: Vec<Article> = body_json(resp).await;
    assert!(articles.is_empty());
}

#[tokio::test]
async fn list_articles_seeded() {
    let store = ArticleStore::new();
    store.seed().await;
    let resp = app_with_store(store)
        .oneshot(empty_request("GET", "/api/v1/article"))
        .await
        .unwrap();

    let mut ids: Vec<_> = body_json::<Vec<Article>>(resp)
        .await
        .into_iter()
        .map(|a| a.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);
}

// --- create ---

#[tokio::test]
async fn create_article_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            r#"{"heading":"A","description":"B","tags":["x","y"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let article: Article = body_json(resp).await;
    assert!(article.id >= 0);
    assert_eq!(article.heading, "A");
    assert_eq!(article.description, "B");
    assert_eq!(article.tags, vec!["x", "y"]);
}

#[tokio::test]
async fn create_article_ignores_client_id() {
    let store = ArticleStore::new();
    let resp = app_with_store(store.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            r#"{"id":500,"heading":"A","description":"B","tags":[]}"#,
        ))
        .await
        .unwrap();

    let article: Article = body_json(resp).await;
    assert_ne!(article.id, 500);
    assert!(store.get(500).await.is_none());
}

#[tokio::test]
async fn create_article_without_content_type_is_accepted() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/article")
                .body(r#"{"heading":"A","description":"B"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let article: Article = body_json(resp).await;
    assert!(article.tags.is_empty());
}

#[tokio::test]
async fn create_article_malformed_json_returns_400() {
    for body in [
        r#"{"heading":"A""#,
        r#"{"not_heading":1}"#,
        r#"{"heading":"A","description":"B","tags":[1,2]}"#,
    ] {
        let resp = app()
            .oneshot(json_request("POST", "/api/v1/article", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn blank_heading_returns_400_and_stores_nothing() {
    let store = ArticleStore::new();
    store.seed().await;

    let resp = app_with_store(store.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/article",
            r#"{"heading":"","description":"B","tags":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.len().await, 3);

    let resp = app_with_store(store.clone())
        .oneshot(json_request(
            "PUT",
            "/api/v1/article?id=1",
            r#"{"heading":"","description":"B","tags":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.get(1).await.unwrap().heading, "Go Concurrency");
}

// --- get ---

#[tokio::test]
async fn get_article_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/v1/article?id=12345"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_article_bad_id_returns_400() {
    for uri in ["/api/v1/article?id=abc", "/api/v1/article?id="] {
        let resp = app().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
    }
}

// --- update ---

#[tokio::test]
async fn update_article_not_found_leaves_store_unchanged() {
    let store = ArticleStore::new();
    store.seed().await;
    let before = store.get_all().await.len();

    let resp = app_with_store(store.clone())
        .oneshot(json_request(
            "PUT",
            "/api/v1/article?id=999",
            r#"{"heading":"Nope","description":"","tags":[]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.get_all().await.len(), before);
}

#[tokio::test]
async fn update_article_bad_id_or_body_returns_400() {
    let store = ArticleStore::new();
    store.seed().await;

    let resp = app_with_store(store.clone())
        .oneshot(json_request(
            "PUT",
            "/api/v1/article?id=one",
            r#"{"heading":"H","description":"D","tags":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app_with_store(store.clone())
        .oneshot(json_request("PUT", "/api/v1/article?id=1", "not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app_with_store(store)
        .oneshot(json_request(
            "PUT",
            "/api/v1/article",
            r#"{"heading":"H","description":"D","tags":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_article_forces_query_id() {
    let store = ArticleStore::new();
    store.seed().await;

    let resp = app_with_store(store.clone())
        .oneshot(json_request(
            "PUT",
            "/api/v1/article?id=2",
            r#"{"id":3,"heading":"Rewritten","description":"D","tags":["z"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Article = body_json(resp).await;
    assert_eq!(updated.id, 2);
    assert_eq!(store.get(2).await.unwrap().heading, "Rewritten");
    assert_eq!(
        store.get(3).await.unwrap().heading,
        "Microservices Architecture"
    );
}

// --- delete ---

#[tokio::test]
async fn delete_article_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/v1/article?id=7"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_article_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/v1/article?id=x"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- other verbs ---

#[tokio::test]
async fn unsupported_method_returns_405() {
    let resp = app()
        .oneshot(json_request("PATCH", "/api/v1/article?id=1", "{}"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    for uri in ["/api/v1/article", "/api/v1/article?id=1"] {
        let resp = app().oneshot(empty_request("HEAD", uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "HEAD {uri}");
    }

    let resp = app()
        .oneshot(empty_request("OPTIONS", "/api/v1/article"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- full CRUD lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/v1/article",
            r#"{"heading":"A","description":"B","tags":["x","y"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Article = body_json(resp).await;
    let id = created.id;

    // list, should contain the one article
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/v1/article"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let articles: Vec<Article> = body_json(resp).await;
    assert_eq!(articles, vec![created.clone()]);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/v1/article?id={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Article = body_json(resp).await;
    assert_eq!(fetched, created);

    // update, full replacement
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/v1/article?id={id}"),
            r#"{"heading":"A2","description":"B2","tags":[]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Article = body_json(resp).await;
    assert_eq!(updated.id, id);
    assert_eq!(updated.heading, "A2");
    assert!(updated.tags.is_empty());

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/v1/article?id={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete, 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/api/v1/article?id={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete again, still 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/api/v1/article?id={id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
