//! Integration tests for the document store and the `Document` derive.

use bookshelf::{CollectionsExt, Document, DocumentStore, Error, InMemoryStore, Query, StoreError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(collection = "shelves")]
struct Shelf {
    #[document(id)]
    slug: String,
    name: String,
    position: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
struct ReadingGoal {
    id: String,
    books: u32,
}

fn shelf(slug: &str, position: u32) -> Shelf {
    Shelf {
        slug: slug.to_string(),
        name: slug.to_uppercase(),
        position,
    }
}

#[test]
fn derive_sets_collection_and_id() {
    assert_eq!(Shelf::COLLECTION, "shelves");
    assert_eq!(ReadingGoal::COLLECTION, "reading_goals");

    let s = shelf("favourites", 0);
    assert_eq!(s.id(), "favourites");
}

#[test]
fn insert_get_save_delete() {
    let store = InMemoryStore::new();
    store.insert(&shelf("sci-fi", 1)).unwrap();

    let err = store.insert(&shelf("sci-fi", 2)).unwrap_err();
    assert!(matches!(err, StoreError::Duplicate { .. }));

    let mut loaded: Shelf = store.get("sci-fi").unwrap().unwrap();
    assert_eq!(loaded.position, 1);

    loaded.position = 7;
    store.save(&loaded).unwrap();
    let reloaded: Shelf = store.get("sci-fi").unwrap().unwrap();
    assert_eq!(reloaded.position, 7);

    assert!(store.delete::<Shelf>("sci-fi").unwrap());
    assert!(!store.delete::<Shelf>("sci-fi").unwrap());
    assert_eq!(store.get::<Shelf>("sci-fi").unwrap(), None);
}

#[test]
fn collections_are_isolated() {
    let store = InMemoryStore::new();
    store.insert(&shelf("same-id", 0)).unwrap();
    store
        .insert(&ReadingGoal {
            id: "same-id".to_string(),
            books: 12,
        })
        .unwrap();

    assert_eq!(store.count::<Shelf>().unwrap(), 1);
    assert_eq!(store.count::<ReadingGoal>().unwrap(), 1);
}

#[test]
fn queries_filter_sort_and_limit() {
    let store = InMemoryStore::new();
    for (slug, position) in [("c", 3), ("a", 1), ("d", 4), ("b", 2)] {
        store.insert(&shelf(slug, position)).unwrap();
    }

    // Insertion order without a comparator.
    let all: Vec<String> = store
        .find(&Query::<Shelf>::all())
        .unwrap()
        .into_iter()
        .map(|s| s.slug)
        .collect();
    assert_eq!(all, vec!["c", "a", "d", "b"]);

    let top = store
        .find(
            &Query::filter(|s: &Shelf| s.position > 1)
                .sort_by(|a, b| a.position.cmp(&b.position))
                .limit(2),
        )
        .unwrap();
    let slugs: Vec<&str> = top.iter().map(|s| s.slug.as_str()).collect();
    assert_eq!(slugs, vec!["b", "c"]);
}

#[test]
fn typed_collections() {
    let store = InMemoryStore::new();
    let shelves = store.collection::<Shelf>();
    shelves.insert(&shelf("history", 5)).unwrap();

    let found = shelves.find_one(|s| s.position == 5).unwrap();
    assert_eq!(found.map(|s| s.slug), Some("history".into()));

    let err = shelves.require("missing").unwrap_err();
    assert!(matches!(err, Error::NotFound { collection: "shelves", .. }));
    assert_eq!(err.to_string(), "shelves not found: missing");
}
