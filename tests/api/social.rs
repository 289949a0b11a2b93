//! users.* commands.

use bookshelf::api::{HandlerError, Session};
use bookshelf::Error;
use serde_json::{json, Value};

use crate::support::{add_book, call, register, service};

fn ids(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_str().unwrap())
        .collect()
}

#[test]
fn register_validates_and_rejects_duplicates() {
    let service = service();
    register(&service, "ada");

    let register_as = |username: &str, email: &str| {
        let input = json!({ "username": username, "email": email });
        service.dispatch("users.register", input, Session::new()).unwrap_err()
    };

    let err = register_as("ada", "other@example.com");
    assert!(
        matches!(err, HandlerError::Domain(Error::Validation(ref m)) if m.contains("username"))
    );

    let err = register_as("ada2", "ADA@example.com");
    assert!(matches!(err, HandlerError::Domain(Error::Validation(ref m)) if m.contains("email")));

    let err = register_as("al", "al@example.com");
    assert_eq!(err.status_code(), 400);

    let err = register_as("alan", "not-an-email");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn follow_unfollow_round_trip() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");

    let before_ada = call(&service, &ada, "users.profile", json!({})).unwrap();
    let before_bob = call(&service, &ada, "users.profile", json!({ "user_id": bob })).unwrap();

    let followed = call(&service, &ada, "users.follow", json!({ "user_id": bob })).unwrap();
    assert_eq!(followed["following"], true);

    let following = call(&service, &ada, "users.following", json!({})).unwrap();
    assert_eq!(ids(&following), vec![bob.as_str()]);
    let followers = call(&service, &ada, "users.followers", json!({ "user_id": bob })).unwrap();
    assert_eq!(ids(&followers), vec![ada.as_str()]);

    call(&service, &ada, "users.unfollow", json!({ "user_id": bob })).unwrap();

    let after_ada = call(&service, &ada, "users.profile", json!({})).unwrap();
    let after_bob = call(&service, &ada, "users.profile", json!({ "user_id": bob })).unwrap();
    assert_eq!(after_ada, before_ada);
    assert_eq!(after_bob, before_bob);
}

#[test]
fn follow_rules() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");

    let err = call(&service, &ada, "users.follow", json!({ "user_id": ada })).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let err = call(&service, &ada, "users.follow", json!({ "user_id": "ghost" })).unwrap_err();
    assert_eq!(err.status_code(), 404);

    call(&service, &ada, "users.follow", json!({ "user_id": bob })).unwrap();
    let err = call(&service, &ada, "users.follow", json!({ "user_id": bob })).unwrap_err();
    assert!(matches!(err, HandlerError::Domain(Error::Validation(_))));

    // Unfollow is idempotent.
    call(&service, &ada, "users.unfollow", json!({ "user_id": bob })).unwrap();
    call(&service, &ada, "users.unfollow", json!({ "user_id": bob })).unwrap();

    let err = call(&service, &ada, "users.unfollow", json!({ "user_id": "ghost" })).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn search_users() {
    let service = service();
    let ada = register(&service, "ada");
    register(&service, "Adalbert");
    register(&service, "bob");

    let hits = call(&service, &ada, "users.search", json!({ "query": "ADA" })).unwrap();
    let names: Vec<&str> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Adalbert"]);

    let hits = call(&service, &ada, "users.search", json!({ "query": " b " })).unwrap();
    assert_eq!(hits, json!([]));
}

#[test]
fn public_library_of_another_user() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");

    for n in 0..25 {
        add_book(&service, &bob, json!({ "title": format!("Book {n}") }));
    }

    let library = call(&service, &ada, "users.library", json!({ "user_id": bob })).unwrap();
    assert_eq!(library.as_array().unwrap().len(), 20);

    let err = call(&service, &ada, "users.library", json!({ "user_id": "ghost" })).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn profile_of_unknown_user() {
    let service = service();
    let ada = register(&service, "ada");
    let err = call(&service, &ada, "users.profile", json!({ "user_id": "ghost" })).unwrap_err();
    assert_eq!(err.status_code(), 404);
}
