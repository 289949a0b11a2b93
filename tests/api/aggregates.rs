//! books.community, books.trending and users.feed over data written through the command boundary.

use bookshelf::{DocumentStore, LibraryEntry};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use crate::support::{add_book, call, register, service, TestService};

fn add_dune(
    service: &TestService,
    user_id: &str,
    rating: Option<u8>,
    review: Option<&str>,
) -> String {
    add_book(
        service,
        user_id,
        json!({
            "catalog_id": "dune-1965",
            "title": "Dune",
            "authors": ["Frank Herbert"],
            "categories": ["Fiction"],
            "rating": rating,
            "personal_review": review,
        }),
    )
}

#[test]
fn community_averages_present_ratings() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");
    let cy = register(&service, "cy_");

    add_dune(&service, &ada, Some(4), Some("Dense but rewarding."));
    add_dune(&service, &bob, Some(5), None);
    add_dune(&service, &cy, None, Some("Still reading."));

    let input = json!({ "catalog_id": "dune-1965" });
    let summary = call(&service, &ada, "books.community", input).unwrap();
    assert_eq!(summary["average_rating"], 4.5);
    assert_eq!(summary["rating_count"], 2);

    let mut reviewers: Vec<&str> = summary["reviews"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["username"].as_str().unwrap())
        .collect();
    reviewers.sort_unstable();
    assert_eq!(reviewers, vec!["ada", "cy_"]);
}

#[test]
fn community_of_unknown_title_is_empty() {
    let service = service();
    let ada = register(&service, "ada");

    let input = json!({ "catalog_id": "nobody-has-this" });
    let summary = call(&service, &ada, "books.community", input).unwrap();
    assert_eq!(summary, json!({ "average_rating": 0.0, "rating_count": 0, "reviews": [] }));
}

#[test]
fn trending_ranks_by_count_then_rating() {
    let service = service();
    let users: Vec<String> = ["ada", "bob", "cy_", "dee"]
        .iter()
        .map(|name| register(&service, name))
        .collect();

    for user in &users[..3] {
        add_dune(&service, user, Some(3), None);
    }
    for (n, user) in users.iter().enumerate().take(2) {
        let input = json!({ "catalog_id": "hyperion-1989", "title": "Hyperion", "rating": 5 - n });
        add_book(&service, user, input);
    }
    let solaris = json!({ "catalog_id": "solaris", "title": "Solaris", "rating": 2 });
    add_book(&service, &users[3], solaris);
    add_book(&service, &users[3], json!({ "catalog_id": "ubik", "title": "Ubik", "rating": 5 }));
    add_book(&service, &users[3], json!({ "title": "Hand-typed, no catalog id" }));

    let trending = call(&service, &users[0], "books.trending", json!({})).unwrap();
    let ranked: Vec<(&str, u64)> = trending
        .as_array()
        .unwrap()
        .iter()
        .map(|b| (b["catalog_id"].as_str().unwrap(), b["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(
        ranked,
        vec![("dune-1965", 3), ("hyperion-1989", 2), ("ubik", 1), ("solaris", 1)]
    );
    assert_eq!(trending[0]["category"], "Fiction");
    assert_eq!(trending[1]["average_rating"], 4.5);
}

#[test]
fn feed_is_newest_first_across_followees() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");
    let cy = register(&service, "cy_");

    call(&service, &ada, "users.follow", json!({ "user_id": bob })).unwrap();
    call(&service, &ada, "users.follow", json!({ "user_id": cy })).unwrap();

    let store = service.state().store();
    let backdate = |user: &str, title: &str, day: u32| {
        let id = add_book(&service, user, json!({ "title": title }));
        let mut entry: LibraryEntry = store.get(&id).unwrap().unwrap();
        entry.date_added = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        store.save(&entry).unwrap();
    };
    backdate(&bob, "day-1", 1);
    backdate(&bob, "day-3", 3);
    backdate(&cy, "day-2", 2);
    backdate(&ada, "my own book", 4);

    let feed = call(&service, &ada, "users.feed", json!({})).unwrap();
    let items: Vec<(&str, &str)> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["title"].as_str().unwrap(), f["owner_username"].as_str().unwrap()))
        .collect();
    assert_eq!(items, vec![("day-3", "bob"), ("day-2", "cy_"), ("day-1", "bob")]);
}

#[test]
fn feed_of_someone_following_nobody_is_empty() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");
    add_book(&service, &bob, json!({ "title": "Dune" }));

    let feed = call(&service, &ada, "users.feed", json!({})).unwrap();
    assert_eq!(feed, Value::Array(vec![]));
}

#[test]
fn feed_is_capped() {
    let service = service();
    let ada = register(&service, "ada");
    let bob = register(&service, "bob");
    call(&service, &ada, "users.follow", json!({ "user_id": bob })).unwrap();

    for n in 0..60 {
        add_book(&service, &bob, json!({ "title": format!("Book {n}") }));
    }

    let feed = call(&service, &ada, "users.feed", json!({})).unwrap();
    assert_eq!(feed.as_array().unwrap().len(), 50);
}
