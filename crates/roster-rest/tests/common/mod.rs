//! Shared fixtures for the HTTP tests.
//!
//! The router is driven in-process against an in-memory repository.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use roster_config::ServerConfig;
use roster_core::{
    Links, Page, PageRequest, RosterError, RosterResult, SortDirection, SortField, User, UserId,
};
use roster_repository::UserRepository;
use roster_rest::{create_router, AppState};
use roster_service::UserServiceImpl;
use serde::Deserialize;
use serde_json::Value;
use std::{cmp::Ordering, sync::Arc};
use tokio::sync::RwLock;
use tower::ServiceExt;

/// Repository backed by a vector; orders names case-insensitively like the
/// default MySQL collation.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

fn compare(a: &User, b: &User, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.to_string().cmp(&b.id.to_string()),
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Age => a.age.cmp(&b.age),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        let mut users = self.users.read().await.clone();
        users.sort_by(|a, b| {
            compare(a, b, SortField::Name).then_with(|| compare(a, b, SortField::Id))
        });
        Ok(users)
    }

    async fn find_by_name_containing(
        &self,
        filter: &str,
        page: PageRequest,
    ) -> RosterResult<Page<User>> {
        let needle = filter.to_lowercase();
        let mut matching: Vec<User> = self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            let ordering = compare(a, b, page.sort.field);
            let ordering = match page.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| compare(a, b, SortField::Id))
        });

        let total = matching.len() as u64;
        let content = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit())
            .collect();
        Ok(Page::new(content, page.page, page.size, total))
    }

    async fn save(&self, user: &User) -> RosterResult<User> {
        self.users.write().await.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| RosterError::not_found("User", user.id))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

/// A router over an empty in-memory store.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryUserRepository>,
}

/// Decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub raw: String,
}

impl TestResponse {
    /// Top-level link relations in the order they were serialized.
    pub fn relations(&self) -> Vec<&'static str> {
        #[derive(Deserialize)]
        struct TopLevel {
            #[serde(rename = "_links", default)]
            links: Links,
        }

        let top: TopLevel = serde_json::from_str(&self.raw).expect("JSON body");
        top.links.relations().map(|rel| rel.as_str()).collect()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::default());
        let service = Arc::new(UserServiceImpl::new(repository.clone()));
        let router = create_router(AppState::new(service), &ServerConfig::default());
        Self { router, repository }
    }

    /// Inserts users directly into the store.
    pub async fn seed(&self, people: &[(&str, i32)]) -> Vec<User> {
        let mut saved = Vec::new();
        for (name, age) in people {
            let user = User::new((*name).to_string(), *age);
            saved.push(self.repository.save(&user).await.expect("seed user"));
        }
        saved
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "localhost");
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        let raw = String::from_utf8(bytes.to_vec()).expect("UTF-8 body");
        TestResponse { status, body, raw }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }
}

/// Asserts the `{ timestamp, details, message }` error shape.
pub fn assert_error_body(body: &Value, path: &str) {
    let timestamp = body["timestamp"].as_str().expect("timestamp");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert_eq!(body["details"], format!("uri={}", path));
    assert!(body["message"].is_string(), "missing message in {}", body);
}

/// The href of relation `rel`.
pub fn href<'a>(body: &'a Value, rel: &str) -> Option<&'a str> {
    body["_links"][rel]["href"].as_str()
}
