//! Command boundary for the bookshelf service.
//!
//! Register command handlers on a [`Service`]; each receives a
//! [`Context<R>`] with the input payload, the session variables, and the
//! application state.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use bookshelf::api::{self, AppState, Session};
//! use bookshelf::{InMemoryStore, StaticCatalog};
//! use serde_json::json;
//!
//! let state = AppState::new(InMemoryStore::new(), Arc::new(StaticCatalog::new(vec![])));
//! let service = Arc::new(api::bookshelf_service(state));
//!
//! // Direct dispatch
//! let input = json!({ "username": "ada", "email": "ada@example.com" });
//! let user = service.dispatch("users.register", input, Session::new());
//!
//! // HTTP transport (requires "http" feature)
//! // api::serve(service, "0.0.0.0:5000").await?;
//! ```

mod context;
mod error;
pub mod handlers;
mod service;
mod session;

use std::sync::Arc;

pub use context::Context;
pub use error::HandlerError;
pub use service::{CommandRequest, CommandResponse, Service};
pub use session::{Session, USER_ID_KEY};

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

use crate::catalog::CatalogSource;
use crate::library::LibraryStore;
use crate::social::SocialGraph;
use crate::store::DocumentStore;

/// State shared by every handler: the document store and the catalog client.
pub struct AppState<S> {
    store: S,
    catalog: Arc<dyn CatalogSource>,
}

impl<S> AppState<S> {
    pub fn new(store: S, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &dyn CatalogSource {
        self.catalog.as_ref()
    }
}

impl<S: DocumentStore> AppState<S> {
    pub fn library(&self) -> LibraryStore<'_, S> {
        LibraryStore::new(&self.store)
    }

    pub fn social(&self) -> SocialGraph<'_, S> {
        SocialGraph::new(&self.store)
    }
}

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str` - the command name
/// - `guard(ctx) -> bool` - input validation
/// - `handle(ctx) -> Result<Value, HandlerError>` - the handler
///
/// # Example
/// ```ignore
/// let service = bookshelf::register_handlers!(
///     Service::new(state),
///     handlers::books::list,
///     handlers::books::add,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}

/// A service with every bookshelf command registered.
pub fn bookshelf_service<S: DocumentStore + 'static>(state: AppState<S>) -> Service<AppState<S>> {
    crate::register_handlers!(
        Service::new(state),
        handlers::books::list,
        handlers::books::get,
        handlers::books::add,
        handlers::books::update,
        handlers::books::delete,
        handlers::books::like,
        handlers::books::community,
        handlers::books::trending,
        handlers::comments::list,
        handlers::comments::add,
        handlers::comments::delete,
        handlers::users::register,
        handlers::users::profile,
        handlers::users::search,
        handlers::users::follow,
        handlers::users::unfollow,
        handlers::users::followers,
        handlers::users::following,
        handlers::users::library,
        handlers::users::feed,
        handlers::catalog::search,
        handlers::catalog::details,
    )
}
