//! books.* and comments.* commands.

use bookshelf::api::{HandlerError, Session};
use bookshelf::Error;
use serde_json::json;

use crate::support::{add_book, call, register, service};

#[test]
fn book_lifecycle() {
    let service = service();
    let ada = register(&service, "ada");

    let id = add_book(
        &service,
        &ada,
        json!({ "title": "  The Left Hand of Darkness ", "authors": ["Ursula K. Le Guin"] }),
    );

    let entry = call(&service, &ada, "books.get", json!({ "id": id })).unwrap();
    assert_eq!(entry["title"], "The Left Hand of Darkness");
    assert_eq!(entry["reading_status"], "TO_READ");
    assert!(entry["rating"].is_null());

    // Completing with a rating stamps the completion date.
    let entry = call(
        &service,
        &ada,
        "books.update",
        json!({
            "id": id,
            "reading_status": "COMPLETED",
            "rating": 5,
            "personal_review": "Superb.",
        }),
    )
    .unwrap();
    assert_eq!(entry["reading_status"], "COMPLETED");
    assert_eq!(entry["rating"], 5);
    assert!(entry["date_completed"].is_string());

    // Rating 0 clears it.
    let entry = call(&service, &ada, "books.update", json!({ "id": id, "rating": 0 })).unwrap();
    assert!(entry["rating"].is_null());

    let list = call(&service, &ada, "books.list", json!({})).unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let deleted = call(&service, &ada, "books.delete", json!({ "id": id })).unwrap();
    assert_eq!(deleted, json!({ "id": id }));

    let list = call(&service, &ada, "books.list", json!({})).unwrap();
    assert_eq!(list, json!([]));
}

#[test]
fn list_is_newest_first() {
    let service = service();
    let ada = register(&service, "ada");

    let first = add_book(&service, &ada, json!({ "title": "First" }));
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = add_book(&service, &ada, json!({ "title": "Second" }));

    let list = call(&service, &ada, "books.list", json!({})).unwrap();
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[test]
fn invalid_rating_is_rejected_without_writing() {
    let service = service();
    let ada = register(&service, "ada");

    let err = call(&service, &ada, "books.add", json!({ "title": "Dune", "rating": 6 }))
        .unwrap_err();
    assert!(matches!(err, HandlerError::Domain(Error::Validation(_))));
    assert_eq!(err.status_code(), 400);

    let id = add_book(&service, &ada, json!({ "title": "Dune", "rating": 4 }));
    let patch = json!({ "id": id, "rating": 9, "title": "Changed" });
    let err = call(&service, &ada, "books.update", patch).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let entry = call(&service, &ada, "books.get", json!({ "id": id })).unwrap();
    assert_eq!(entry["title"], "Dune");
    assert_eq!(entry["rating"], 4);
}

#[test]
fn ownership_is_enforced() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");
    let id = add_book(&service, &ada, json!({ "title": "Dune" }));

    // Reads of someone else's entry look like a missing entry.
    let err = call(&service, &bob, "books.get", json!({ "id": id })).unwrap_err();
    assert_eq!(err.status_code(), 404);

    // Writes are refused outright.
    let err = call(&service, &bob, "books.update", json!({ "id": id, "rating": 1 })).unwrap_err();
    assert!(matches!(err, HandlerError::Domain(Error::Unauthorized(_))));
    assert_eq!(err.status_code(), 403);

    let err = call(&service, &bob, "books.delete", json!({ "id": id })).unwrap_err();
    assert_eq!(err.status_code(), 403);

    let err = call(&service, &bob, "books.delete", json!({ "id": "no-such-entry" })).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn like_toggles() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");
    let id = add_book(&service, &ada, json!({ "title": "Dune" }));

    let liked = call(&service, &bob, "books.like", json!({ "id": id })).unwrap();
    assert_eq!(liked["liked"], true);
    assert_eq!(liked["liked_by"], json!([bob]));

    let unliked = call(&service, &bob, "books.like", json!({ "id": id })).unwrap();
    assert_eq!(unliked["liked"], false);
    assert_eq!(unliked["liked_by"], json!([]));

    let err = call(&service, &bob, "books.like", json!({ "id": "missing" })).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn comment_lifecycle() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");
    let id = add_book(&service, &ada, json!({ "title": "Dune" }));

    let input = json!({ "entry_id": id, "content": " Great pick " });
    let first = call(&service, &bob, "comments.add", input).unwrap();
    assert_eq!(first["content"], "Great pick");
    assert_eq!(first["author_username"], "bob");

    std::thread::sleep(std::time::Duration::from_millis(5));
    call(&service, &ada, "comments.add", json!({ "entry_id": id, "content": "Thanks!" })).unwrap();

    let comments = call(&service, &ada, "comments.list", json!({ "entry_id": id })).unwrap();
    let authors: Vec<&str> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["author_username"].as_str().unwrap())
        .collect();
    assert_eq!(authors, vec!["bob", "ada"]);

    // Only the author may delete.
    let comment_id = first["id"].as_str().unwrap();
    let err = call(&service, &ada, "comments.delete", json!({ "id": comment_id })).unwrap_err();
    assert_eq!(err.status_code(), 403);

    call(&service, &bob, "comments.delete", json!({ "id": comment_id })).unwrap();
    let comments = call(&service, &ada, "comments.list", json!({ "entry_id": id })).unwrap();
    assert_eq!(comments.as_array().unwrap().len(), 1);

    let entry = call(&service, &ada, "books.get", json!({ "id": id })).unwrap();
    assert_eq!(entry["comment_ids"].as_array().unwrap().len(), 1);
}

#[test]
fn comment_content_is_validated() {
    let service = service();
    let ada = register(&service, "ada");
    let id = add_book(&service, &ada, json!({ "title": "Dune" }));

    let input = json!({ "entry_id": id, "content": "   " });
    let err = call(&service, &ada, "comments.add", input).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let long = "x".repeat(501);
    let input = json!({ "entry_id": id, "content": long });
    let err = call(&service, &ada, "comments.add", input).unwrap_err();
    assert_eq!(err.status_code(), 400);

    let input = json!({ "entry_id": "missing", "content": "hi" });
    let err = call(&service, &ada, "comments.add", input).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[test]
fn deleting_an_entry_removes_its_comments() {
    let service = service();
    let ada = register(&service, "ada");
    let id = add_book(&service, &ada, json!({ "title": "Dune" }));
    let input = json!({ "entry_id": id, "content": "note to self" });
    call(&service, &ada, "comments.add", input).unwrap();

    call(&service, &ada, "books.delete", json!({ "id": id })).unwrap();

    let comments = call(&service, &ada, "comments.list", json!({ "entry_id": id })).unwrap();
    assert_eq!(comments, json!([]));
}

#[test]
fn commands_require_a_session_user() {
    let service = service();

    let err = service.dispatch("books.list", json!({}), Session::new()).unwrap_err();
    assert!(matches!(err, HandlerError::Unauthenticated));
    assert_eq!(err.status_code(), 401);

    let err = service.dispatch("books.trending", json!({}), Session::new()).unwrap_err();
    assert_eq!(err.status_code(), 401);
}

#[test]
fn guards_reject_missing_fields() {
    let service = service();
    let ada = register(&service, "ada");

    let err = call(&service, &ada, "books.get", json!({})).unwrap_err();
    assert!(matches!(err, HandlerError::GuardRejected(ref c) if c == "books.get"));

    let err = call(&service, &ada, "books.add", json!({ "rating": 3 })).unwrap_err();
    assert_eq!(err.status_code(), 400);
}
