//! `users.*` commands: registration, profiles, and the follow graph.

use serde::Deserialize;

/// Input naming another user.
#[derive(Deserialize)]
pub struct UserId {
    pub user_id: String,
}

/// The only command that does not need a session user.
pub mod register {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::social::NewUser;
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.register";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["username", "email"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let input = ctx.input::<NewUser>()?;
        let user = ctx.state().social().register(input)?;
        Ok(serde_json::to_value(user)?)
    }
}

pub mod profile {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.profile";

    pub fn guard<S>(_ctx: &Context<AppState<S>>) -> bool {
        true
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.subject_id()?;
        let profile = ctx.state().social().profile(&user_id)?;
        Ok(serde_json::to_value(profile)?)
    }
}

pub mod search {
    use serde::Deserialize;
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.search";

    #[derive(Deserialize)]
    pub struct Input {
        pub query: String,
    }

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["query"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.user_id()?;
        let input = ctx.input::<Input>()?;
        let users = ctx.state().social().search_users(&input.query, user_id)?;
        Ok(serde_json::to_value(users)?)
    }
}

pub mod follow {
    use serde_json::{json, Value};

    use super::UserId;
    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.follow";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["user_id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let follower = ctx.user_id()?;
        let input = ctx.input::<UserId>()?;
        ctx.state().social().follow(follower, &input.user_id)?;
        Ok(json!({ "user_id": input.user_id, "following": true }))
    }
}

pub mod unfollow {
    use serde_json::{json, Value};

    use super::UserId;
    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.unfollow";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["user_id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let follower = ctx.user_id()?;
        let input = ctx.input::<UserId>()?;
        ctx.state().social().unfollow(follower, &input.user_id)?;
        Ok(json!({ "user_id": input.user_id, "following": false }))
    }
}

pub mod followers {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.followers";

    pub fn guard<S>(_ctx: &Context<AppState<S>>) -> bool {
        true
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.subject_id()?;
        let users = ctx.state().social().followers(&user_id)?;
        Ok(serde_json::to_value(users)?)
    }
}

pub mod following {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.following";

    pub fn guard<S>(_ctx: &Context<AppState<S>>) -> bool {
        true
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let user_id = ctx.subject_id()?;
        let users = ctx.state().social().following(&user_id)?;
        Ok(serde_json::to_value(users)?)
    }
}

/// Another user's public library. Unknown users are `NotFound`.
pub mod library {
    use serde_json::Value;

    use super::UserId;
    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.library";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["user_id"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        ctx.user_id()?;
        let input = ctx.input::<UserId>()?;
        ctx.state().social().get_user(&input.user_id)?;
        let entries = ctx.state().library().user_library(&input.user_id)?;
        Ok(serde_json::to_value(entries)?)
    }
}

pub mod feed {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::feed::user_feed;
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "users.feed";

    pub fn guard<S>(_ctx: &Context<AppState<S>>) -> bool {
        true
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        let entries = user_feed(ctx.state().store(), ctx.user_id()?)?;
        Ok(serde_json::to_value(entries)?)
    }
}
