//! HTTP tests for the user endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{assert_error_body, href, TestApp};
use roster_core::UserId;
use serde_json::json;

#[tokio::test]
async fn test_create_with_links() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/api/v1/users?hateoas=true",
            Some(json!({"name": "Alice", "age": 25})),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = &response.body;
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["age"], 25);
    let id = body["id"].as_str().expect("generated id");
    UserId::parse(id).expect("id is a UUID");

    let item = format!("http://localhost/api/v1/users/{}", id);
    assert_eq!(href(body, "self"), Some(format!("{}?hateoas=true", item).as_str()));
    assert_eq!(href(body, "create"), Some("http://localhost/api/v1/users?hateoas=true"));
    assert_eq!(href(body, "update"), Some(format!("{}?hateoas=true", item).as_str()));
    assert_eq!(href(body, "delete"), Some(item.as_str()));
    assert_eq!(response.relations(), vec!["self", "create", "update", "delete"]);
}

#[tokio::test]
async fn test_create_without_links() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/api/v1/users",
            Some(json!({"name": "Bob", "age": 30})),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body.get("_links").is_none());
    assert_eq!(app.get("/api/v1/users").await.body["_embedded"]["users"][0]["name"], "Bob");
}

#[tokio::test]
async fn test_create_rejects_invalid_requests() {
    let app = TestApp::new();

    for body in [
        json!({"age": 25}),
        json!({"name": null, "age": 25}),
        json!({"name": "", "age": 25}),
        json!({"name": "   ", "age": 25}),
        json!({"name": "Alice"}),
        json!({"name": "Alice", "age": null}),
        json!({"name": "Alice", "age": 15}),
    ] {
        let response = app.request(Method::POST, "/api/v1/users", Some(body.clone())).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "accepted {}", body);
        assert_error_body(&response.body, "/api/v1/users");
    }
    assert!(app.get("/api/v1/users").await.body.get("_embedded").is_none());
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": \"Alice\", "))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_error_body(&response.body, "/api/v1/users");
    assert_eq!(
        response.body["message"],
        "Validation error: Data not provided or incorrect!"
    );
}

#[tokio::test]
async fn test_find_one() {
    let app = TestApp::new();
    let alice = app.seed(&[("Alice", 25)]).await.remove(0);
    let uri = format!("/api/v1/users/{}", alice.id);

    let plain = app.get(&uri).await;
    assert_eq!(plain.status, StatusCode::OK);
    assert_eq!(plain.body, json!({"id": alice.id.to_string(), "name": "Alice", "age": 25}));

    let first = app.get(&format!("{}?hateoas=true", uri)).await;
    let second = app.get(&format!("{}?hateoas=true", uri)).await;
    assert_eq!(first.body["id"], alice.id.to_string());
    assert_eq!(first.body["_links"], second.body["_links"]);
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let app = TestApp::new();
    let id = UserId::new();
    let uri = format!("/api/v1/users/{}", id);

    let get = app.get(&uri).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_error_body(&get.body, &uri);
    assert_eq!(get.body["message"], format!("User with id {} was not found!", id));

    let put = app
        .request(Method::PUT, &uri, Some(json!({"name": "Ghost", "age": 40})))
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);
    assert_error_body(&put.body, &uri);

    let delete = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_error_body(&delete.body, &uri);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::new();

    let response = app.get("/api/v1/users/not-a-uuid").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_error_body(&response.body, "/api/v1/users/not-a-uuid");
}

#[tokio::test]
async fn test_update_keeps_identity() {
    let app = TestApp::new();
    let alice = app.seed(&[("Alice", 25)]).await.remove(0);
    let uri = format!("/api/v1/users/{}", alice.id);

    let response = app
        .request(
            Method::PUT,
            &format!("{}?hateoas=true", uri),
            Some(json!({"name": "Alicia", "age": 26})),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], alice.id.to_string());
    assert_eq!(response.body["name"], "Alicia");
    assert_eq!(response.body["age"], 26);
    assert!(href(&response.body, "update").is_some());

    let invalid = app
        .request(Method::PUT, &uri, Some(json!({"name": "Alicia", "age": 10})))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.get(&uri).await.body["age"], 26);
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let app = TestApp::new();
    let alice = app.seed(&[("Alice", 25)]).await.remove(0);
    let uri = format!("/api/v1/users/{}", alice.id);

    let response = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_null());

    assert_eq!(app.get(&uri).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_all_with_links() {
    let app = TestApp::new();
    app.seed(&[("Charlie", 30), ("alice", 20), ("Bob", 40)]).await;

    let response = app.get("/api/v1/users?hateoas=true").await;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.body["_embedded"]["users"].as_array().unwrap();
    let names: Vec<_> = users.iter().map(|u| u["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["alice", "Bob", "Charlie"]);
    assert!(users.iter().all(|u| href(u, "self").is_some()));
    assert_eq!(
        href(&response.body, "self"),
        Some("http://localhost/api/v1/users?hateoas=true")
    );
}

#[tokio::test]
async fn test_find_all_empty() {
    let app = TestApp::new();

    let response = app.get("/api/v1/users").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({}));
}

#[tokio::test]
async fn test_paged_links() {
    let app = TestApp::new();
    app.seed(&[("Ann", 20), ("Ben", 21), ("Cid", 22), ("Dee", 23), ("Eve", 24)])
        .await;

    let response = app.get("/api/v1/users/paged?size=2&page=1&hateoas=true").await;
    assert_eq!(response.status, StatusCode::OK);

    let body = &response.body;
    assert_eq!(
        body["page"],
        json!({"size": 2, "totalElements": 5, "totalPages": 3, "number": 1})
    );
    let names: Vec<_> = body["_embedded"]["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cid", "Dee"]);

    let page = |n: u32| {
        format!(
            "http://localhost/api/v1/users/paged?name=&size=2&page={}&sort=name%2Casc&hateoas=true",
            n
        )
    };
    assert_eq!(href(body, "self"), Some(page(1).as_str()));
    assert_eq!(href(body, "first"), Some(page(0).as_str()));
    assert_eq!(href(body, "last"), Some(page(2).as_str()));
    assert_eq!(href(body, "next"), Some(page(2).as_str()));
    assert_eq!(href(body, "prev"), Some(page(0).as_str()));
    assert_eq!(response.relations(), vec!["self", "first", "last", "next", "prev"]);
}

#[tokio::test]
async fn test_paged_edges_and_round_trip() {
    let app = TestApp::new();
    app.seed(&[("Alice", 25), ("Malik", 33), ("Bob", 41)]).await;

    let first = app
        .get("/api/v1/users/paged?name=ALI&size=1&sort=age,desc&hateoas=true")
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["_embedded"]["users"][0]["name"], "Malik");
    assert!(href(&first.body, "prev").is_none());
    assert!(href(&first.body, "next").is_some());

    let next = href(&first.body, "next").unwrap().trim_start_matches("http://localhost");
    let last_page = app.get(next).await;
    assert_eq!(last_page.body["_embedded"]["users"][0]["name"], "Alice");
    assert!(href(&last_page.body, "next").is_none());
    assert!(href(&last_page.body, "prev").is_some());

    let self_link = href(&last_page.body, "self")
        .unwrap()
        .trim_start_matches("http://localhost");
    let again = app.get(self_link).await;
    assert_eq!(again.body["_embedded"], last_page.body["_embedded"]);
}

#[tokio::test]
async fn test_paged_without_links_and_empty() {
    let app = TestApp::new();

    let response = app.get("/api/v1/users/paged?name=nobody").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"page": {"size": 20, "totalElements": 0, "totalPages": 0, "number": 0}})
    );

    let linked = app.get("/api/v1/users/paged?name=nobody&hateoas=true").await;
    assert_eq!(linked.relations(), vec!["self", "first", "last"]);
}

#[tokio::test]
async fn test_paged_rejects_bad_parameters() {
    let app = TestApp::new();

    for uri in [
        "/api/v1/users/paged?sort=height",
        "/api/v1/users/paged?sort=name,sideways",
        "/api/v1/users/paged?page=-1",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "accepted {}", uri);
        assert_error_body(&response.body, "/api/v1/users/paged");
    }
}

#[tokio::test]
async fn test_paged_far_past_the_end_is_empty() {
    let app = TestApp::new();
    app.seed(&[("Alice", 25), ("Bob", 41)]).await;

    let response = app
        .get("/api/v1/users/paged?page=1000000000000000000&size=100&hateoas=true")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.get("_embedded").is_none());
    assert_eq!(
        response.body["page"],
        json!({"size": 100, "totalElements": 2, "totalPages": 1, "number": 1_000_000_000_000_000_000_u64})
    );
    assert_eq!(response.relations(), vec!["self", "first", "last", "prev"]);
    assert_eq!(
        href(&response.body, "last"),
        Some("http://localhost/api/v1/users/paged?name=&size=100&page=0&sort=name%2Casc&hateoas=true")
    );
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    assert_eq!(app.get("/health").await.body["status"], "UP");
    let ready = app.get("/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
    assert_eq!(ready.body["status"], "UP");
    assert_eq!(app.get("/live").await.status, StatusCode::OK);
}
