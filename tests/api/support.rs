//! Shared fixtures: a fully registered service over an in-memory store and a fixed catalog.

use std::sync::Arc;

use bookshelf::api::{self, AppState, HandlerError, Service, Session};
use bookshelf::{BookSummary, ImageLinks, InMemoryStore, StaticCatalog};
use serde_json::{json, Value};

pub type TestService = Service<AppState<InMemoryStore>>;

pub fn dune() -> BookSummary {
    BookSummary {
        catalog_id: "dune-1965".to_string(),
        title: "Dune".to_string(),
        authors: vec!["Frank Herbert".to_string()],
        description: Some("Spice and sandworms.".to_string()),
        categories: vec!["Fiction".to_string()],
        published_date: Some("1965-08-01".to_string()),
        page_count: Some(412),
        image_links: ImageLinks {
            thumbnail: Some("https://covers.example/dune-m.jpg".to_string()),
            small_thumbnail: Some("https://covers.example/dune-s.jpg".to_string()),
            large: None,
        },
    }
}

pub fn hyperion() -> BookSummary {
    BookSummary {
        catalog_id: "hyperion-1989".to_string(),
        title: "Hyperion".to_string(),
        authors: vec!["Dan Simmons".to_string()],
        description: None,
        categories: vec!["Science Fiction".to_string()],
        published_date: Some("1989-05-26".to_string()),
        page_count: Some(482),
        image_links: ImageLinks::default(),
    }
}

pub fn service() -> TestService {
    let catalog = StaticCatalog::new(vec![dune(), hyperion()]);
    api::bookshelf_service(AppState::new(InMemoryStore::new(), Arc::new(catalog)))
}

pub fn offline_service() -> TestService {
    api::bookshelf_service(AppState::new(
        InMemoryStore::new(),
        Arc::new(StaticCatalog::unavailable()),
    ))
}

/// Dispatch as `user_id`.
pub fn call(
    service: &TestService,
    user_id: &str,
    command: &str,
    input: Value,
) -> Result<Value, HandlerError> {
    service.dispatch(command, input, Session::for_user(user_id))
}

/// Register a user and return their id.
pub fn register(service: &TestService, username: &str) -> String {
    let user = service
        .dispatch(
            "users.register",
            json!({ "username": username, "email": format!("{username}@example.com") }),
            Session::new(),
        )
        .unwrap();
    user["id"].as_str().unwrap().to_string()
}

/// Add a hand-typed book and return the entry id.
pub fn add_book(service: &TestService, user_id: &str, input: Value) -> String {
    let entry = call(service, user_id, "books.add", input).unwrap();
    entry["id"].as_str().unwrap().to_string()
}
