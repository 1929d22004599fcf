use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, TimeZone, Timelike, Utc};
use foo_service::{app, Alerts, AppState, Foo, FooRepository, InMemoryFooRepository, PageRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const DEFAULT_NAME: &str = "SAMPLE_TEXT";
const UPDATED_NAME: &str = "UPDATED_TEXT";
const DEFAULT_COMMENT: &str = "SAMPLE_TEXT";
const UPDATED_COMMENT: &str = "UPDATED_TEXT";
const DEFAULT_DATE_STR: &str = "1970-01-01T00:00:00Z";

struct Harness {
    app: Router,
    repo: Arc<InMemoryFooRepository>,
}

impl Harness {
    fn new() -> Self {
        let repo = Arc::new(InMemoryFooRepository::new());
        let state = AppState::new(repo.clone(), Alerts::new("testApp").unwrap());
        Self {
            app: app(state, 1024 * 1024),
            repo,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };
        self.app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    async fn count(&self) -> u64 {
        self.repo.find_all(PageRequest::new(0, 1)).await.unwrap().total_elements
    }

    async fn saved(&self, foo: Foo) -> Foo {
        self.repo.save(foo).await.unwrap()
    }
}

fn default_date() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).unwrap()
}

fn updated_date() -> DateTime<Utc> {
    Utc::now().with_nanosecond(0).unwrap()
}

fn new_foo() -> Foo {
    Foo {
        id: None,
        name: Some(DEFAULT_NAME.into()),
        comment: Some(DEFAULT_COMMENT.into()),
        date: Some(default_date()),
        back: None,
    }
}

async fn json_body(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_foo() {
    let h = Harness::new();
    let before = h.count().await;

    let res = h
        .send(Method::POST, "/api/foos", Some(serde_json::to_value(new_foo()).unwrap()))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.headers()["x-testapp-params"].to_str().unwrap().to_string();
    assert_eq!(res.headers()[header::LOCATION], format!("/api/foos/{}", id));
    assert_eq!(res.headers()["x-testapp-alert"], "testApp.foo.created");

    let body = json_body(res).await;
    assert_eq!(body["id"].as_i64().unwrap().to_string(), id);
    assert_eq!(body["date"], DEFAULT_DATE_STR);

    assert_eq!(h.count().await, before + 1);
    let stored = h.repo.find_one(id.parse().unwrap()).await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some(DEFAULT_NAME));
    assert_eq!(stored.comment.as_deref(), Some(DEFAULT_COMMENT));
    assert_eq!(stored.date, Some(default_date()));
}

#[tokio::test]
async fn create_then_get_returns_same_fields() {
    let h = Harness::new();
    let res = h
        .send(Method::POST, "/api/foos", Some(json!({"name": "a", "comment": "b", "date": "2015-06-01T10:30:00Z"})))
        .await;
    let created = json_body(res).await;

    let res = h
        .send(Method::GET, &format!("/api/foos/{}", created["id"]), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, created);
}

#[tokio::test]
async fn create_foo_with_existing_id_is_rejected() {
    let h = Harness::new();
    h.saved(new_foo()).await;
    let before = h.count().await;

    let mut foo = new_foo();
    foo.id = Some(1);
    let res = h.send(Method::POST, "/api/foos", Some(serde_json::to_value(foo).unwrap())).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.headers()["failure"], "A new foo cannot already have an ID");
    assert!(res.headers().get("x-testapp-alert").is_none());
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    assert_eq!(h.count().await, before);
}

#[tokio::test]
async fn get_all_foos() {
    let h = Harness::new();
    let foo = h.saved(new_foo()).await;
    let other = h
        .saved(Foo {
            name: Some("other".into()),
            ..Foo::default()
        })
        .await;

    let res = h.send(Method::GET, "/api/foos", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(res.headers()["x-total-count"], "2");
    assert!(res.headers()[header::LINK].to_str().unwrap().contains("rel=\"first\""));

    let body = json_body(res).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let first = items.iter().find(|v| v["id"] == json!(foo.id)).unwrap();
    assert_eq!(first["name"], DEFAULT_NAME);
    assert_eq!(first["comment"], DEFAULT_COMMENT);
    assert_eq!(first["date"], DEFAULT_DATE_STR);
    let second = items.iter().find(|v| v["id"] == json!(other.id)).unwrap();
    assert_eq!(second["date"], Value::Null);
}

#[tokio::test]
async fn get_all_foos_is_paged() {
    let h = Harness::new();
    for _ in 0..5 {
        h.saved(new_foo()).await;
    }

    let res = h.send(Method::GET, "/api/foos?page=2&per_page=2", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-total-count"], "5");
    assert_eq!(res.headers()["x-total-pages"], "3");
    let link = res.headers()[header::LINK].to_str().unwrap().to_string();
    assert!(link.contains("</api/foos?page=3&per_page=2>; rel=\"next\""));
    assert!(link.contains("</api/foos?page=1&per_page=2>; rel=\"prev\""));

    let body = json_body(res).await;
    let ids: Vec<i64> = body.as_array().unwrap().iter().map(|v| v["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 4]);
}

#[tokio::test]
async fn get_foo() {
    let h = Harness::new();
    let foo = h.saved(new_foo()).await;

    let res = h
        .send(Method::GET, &format!("/api/foos/{}", foo.id.unwrap()), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["id"], json!(foo.id));
    assert_eq!(body["name"], DEFAULT_NAME);
    assert_eq!(body["comment"], DEFAULT_COMMENT);
    assert_eq!(body["date"], DEFAULT_DATE_STR);
}

#[tokio::test]
async fn get_non_existing_foo() {
    let h = Harness::new();
    let res = h.send(Method::GET, &format!("/api/foos/{}", i64::MAX), None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn update_foo() {
    let h = Harness::new();
    let mut foo = h.saved(new_foo()).await;
    let before = h.count().await;

    foo.name = Some(UPDATED_NAME.into());
    foo.comment = Some(UPDATED_COMMENT.into());
    foo.date = Some(updated_date());

    let res = h.send(Method::PUT, "/api/foos", Some(serde_json::to_value(&foo).unwrap())).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-testapp-alert"], "testApp.foo.updated");
    assert_eq!(res.headers()["x-testapp-params"], foo.id.unwrap().to_string());

    assert_eq!(h.count().await, before);
    let res = h
        .send(Method::GET, &format!("/api/foos/{}", foo.id.unwrap()), None)
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["name"], UPDATED_NAME);
    assert_eq!(body["comment"], UPDATED_COMMENT);
    let expected_date = foo.date.unwrap().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    assert_eq!(body["date"], expected_date);
}

#[tokio::test]
async fn update_without_id_creates() {
    let h = Harness::new();
    let before = h.count().await;

    let res = h.send(Method::PUT, "/api/foos", Some(serde_json::to_value(new_foo()).unwrap())).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["x-testapp-alert"], "testApp.foo.created");
    assert!(res.headers().contains_key(header::LOCATION));
    assert_eq!(h.count().await, before + 1);
}

#[tokio::test]
async fn delete_foo() {
    let h = Harness::new();
    let foo = h.saved(new_foo()).await;
    let before = h.count().await;
    let uri = format!("/api/foos/{}", foo.id.unwrap());

    let res = h.send(Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-testapp-alert"], "testApp.foo.deleted");
    assert_eq!(h.count().await, before - 1);

    let res = h.send(Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_foo_still_succeeds() {
    let h = Harness::new();
    let res = h.send(Method::DELETE, "/api/foos/12345", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-testapp-params"], "12345");
}

#[tokio::test]
async fn back_reference_is_exposed_as_nested_user() {
    let h = Harness::new();
    let res = h
        .send(Method::POST, "/api/foos", Some(json!({"name": "x", "back": {"id": 4, "login": "spoofed"}})))
        .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = json_body(res).await;
    assert_eq!(body["back"], json!({"id": 4, "login": null}));

    let res = h.send(Method::GET, &format!("/api/foos/{}", body["id"]), None).await;
    assert_eq!(json_body(res).await["back"], json!({"id": 4, "login": null}));
}

#[tokio::test]
async fn health_and_ready() {
    let h = Harness::new();
    let res = h.send(Method::GET, "/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let res = h.send(Method::GET, "/ready", None).await;
    assert_eq!(json_body(res).await, json!({"status": "ok", "database": "ok"}));
}

#[tokio::test]
async fn serves_openapi_document() {
    let h = Harness::new();
    let res = h.send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert!(body["paths"]["/api/foos"].is_object());
}
