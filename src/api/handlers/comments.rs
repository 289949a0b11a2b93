//! `comments.*` commands.

pub mod list {
    use serde::Deserialize;
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "comments.list";

    #[derive(Deserialize)]
    pub struct Input {
        pub entry_id: String,
    }

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["entry_id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        ctx.user_id()?;
        let input = ctx.input::<Input>()?;
        let comments = ctx.state().library().list_comments(&input.entry_id)?;
        Ok(serde_json::to_value(comments)?)
    }
}

pub mod add {
    use serde::Deserialize;
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "comments.add";

    #[derive(Deserialize)]
    pub struct Input {
        pub entry_id: String,
        pub content: String,
    }

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["entry_id", "content"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<Input>()?;
        let comment = ctx
            .state()
            .library()
            .add_comment(&input.entry_id, user_id, &input.content)?;
        Ok(serde_json::to_value(comment)?)
    }
}

pub mod delete {
    use serde::Deserialize;
    use serde_json::{json, Value};

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "comments.delete";

    #[derive(Deserialize)]
    pub struct Input {
        pub id: String,
    }

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<Input>()?;
        let id = ctx.state().library().delete_comment(&input.id, user_id)?;
        Ok(json!({ "id": id }))
    }
}
