//! `catalog.*` commands. Thin pass-through to the configured
//! [`CatalogSource`](crate::catalog::CatalogSource).

pub mod search {
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::catalog::SearchRequest;
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "catalog.search";

    pub fn guard<S>(ctx: &Context<AppState<S>>) -> bool {
        ctx.has_fields(&["query"])
    }

    pub fn handle<S: DocumentStore>(ctx: &Context<AppState<S>>) -> Result<Value, HandlerError> {
        ctx.user_id()?;
        let request = ctx.input::<SearchRequest>()?.normalized()?;
        let page = ctx.state().catalog().search(&request)?;
        Ok(serde_json::to_value(page)?)
    }
}

pub mod details {
    use serde::Deserialize;
    use serde_json::Value;

    use crate::api::{AppState, Context, HandlerError};
    use crate::store::DocumentStore;

    pub const COMMAND: &str = "catalog.details";

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
        let book = ctx.state().catalog().get_by_id(&input.catalog_id)?;
        Ok(serde_json::to_value(book)?)
    }
}
