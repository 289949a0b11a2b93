//! # bookshelf
//!
//! Core of a social book-tracking service. Users keep a personal library of
//! books with a reading status, a 1-5 rating and a review; they follow each
//! other, like and comment on entries, and see what the people they follow
//! have been reading.
//!
//! - [`store`] - typed document store ([`DocumentStore`], [`InMemoryStore`])
//! - [`library`] - library entries, likes and comments ([`LibraryStore`])
//! - [`social`] - users and the follow graph ([`SocialGraph`])
//! - [`community`], [`trending`], [`feed`] - read-side aggregations
//! - [`catalog`] - external catalog lookup (Google Books, Open Library)
//! - [`api`] - named command dispatch, plus an axum transport behind the `http` feature
//!
//! Every operation takes the acting user's id explicitly; there is no
//! ambient "current user".

extern crate self as bookshelf;

pub mod api;
pub mod catalog;
pub mod community;
pub mod config;
mod error;
pub mod feed;
pub mod library;
pub mod social;
pub mod store;
pub mod trending;

pub use bookshelf_macros::Document;

pub use catalog::{
    BookSummary, CatalogSource, ImageLinks, SearchPage, SearchRequest, SortOrder, StaticCatalog,
};
pub use community::{community_data, CommunityReview, CommunitySummary};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use feed::{user_feed, ActivityKind, FeedEntry};
pub use library::{
    Comment, CommentView, EntryPatch, LibraryEntry, LibraryStore, NewEntry, ReadingStatus,
};
pub use social::{NewUser, Profile, SocialGraph, User, UserSummary};
pub use store::{
    Collection, CollectionsExt, Document, DocumentStore, InMemoryStore, Query, StoreError,
};
pub use trending::{trending_books, BookTrendSnapshot};
