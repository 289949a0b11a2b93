//! `books.*` commands: the caller's library, likes, and per-title aggregates.

use serde::Deserialize;

/// Input naming a single library entry.
#[derive(Deserialize)]
pub struct EntryId {
    pub id: String,
}

pub mod list {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "books.list";

    pub fn guard<S>(_ctx: &Context<AppState<S>>) -> bool {
        true
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let entries = ctx.state().library().list_entries(ctx.user_id()?)?;
        Ok(serde_json::to_value(entries)?)
    }
}

pub mod get {
    use serde_json::Value;

    use super::EntryId;
    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "books.get";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<EntryId>()?;
        let entry = ctx.state().library().get_entry(user_id, &input.id)?;
        Ok(serde_json::to_value(entry)?)
    }
}

/// Add a book. A bare `catalog_id` (no title) pulls the metadata from the catalog.
pub mod add {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::library::NewEntry;
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "books.add";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_field("title") || ctx.has_field("catalog_id")
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<NewEntry>()?;

        let new = match input.catalog_id.as_deref() {
            Some(catalog_id) if input.title.trim().is_empty() => {
                let book = ctx.state().catalog().get_by_id(catalog_id)?;
                NewEntry {
                    reading_status: input.reading_status,
                    rating: input.rating,
                    personal_review: input.personal_review,
                    date_completed: input.date_completed,
                    ..NewEntry::from(book)
                }
            }
            _ => input,
        };

        let entry = ctx.state().library().add_entry(user_id, new)?;
        Ok(serde_json::to_value(entry)?)
    }
}

pub mod update {
    use serde::Deserialize;
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::library::EntryPatch;
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "books.update";

    #[derive(Deserialize)]
    pub struct Input {
        pub id: String,
        #[serde(flatten)]
        pub patch: EntryPatch,
    }

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<Input>()?;
        let entry = ctx
            .state()
            .library()
            .update_entry(user_id, &input.id, input.patch)?;
        Ok(serde_json::to_value(entry)?)
    }
}

pub mod delete {
    use serde_json::{json, Value};

    use super::EntryId;
    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "books.delete";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<EntryId>()?;
        let id = ctx.state().library().delete_entry(user_id, &input.id)?;
        Ok(json!({ "id": id }))
    }
}

/// Toggle the caller's like. Any user may like any entry.
pub mod like {
    use serde_json::{json, Value};

    use super::EntryId;
    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "books.like";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<EntryId>()?;
        let liked_by = ctx.state().library().toggle_like(&input.id, user_id)?;
        Ok(json!({
            "id": input.id,
            "liked": liked_by.contains(user_id),
            "liked_by": liked_by,
        }))
    }
}

pub mod community {
    use serde::Deserialize;
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::community::community_data;
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "books.community";

    #[derive(Deserialize)]
    pub struct Input {
        pub catalog_id: String,
    }

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["catalog_id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        ctx.user_id()?;
        let input = ctx.input::<Input>()?;
        let summary = community_data(ctx.state().store(), &input.catalog_id)?;
        Ok(serde_json::to_value(summary)?)
    }
}

pub mod trending {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;
    use crate::trending::trending_books;

    pub const COMMAND: &str = "books.trending";

    pub fn guard<S>(_ctx: &Context<AppState<S>>) -> bool {
        true
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        ctx.user_id()?;
        let books = trending_books(ctx.state().store())?;
        Ok(serde_json::to_value(books)?)
    }
}
