//! Named-command dispatch.
//!
//! Every bookshelf operation is a string command (`books.add`,
//! `users.follow`, ...) bound to a guard and a handler. Transports call
//! [`Service::dispatch`] or [`Service::dispatch_request`]; see
//! [`bookshelf_service`](super::bookshelf_service) for the full table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

type Guard<R> = Box<dyn Fn(&Context<R>) -> bool + Send + Sync>;
type Handle<R> = Box<dyn Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync>;

struct Registered<R> {
    guard: Option<Guard<R>>,
    handle: Handle<R>,
}

pub struct Service<R> {
    state: R,
    handlers: HashMap<String, Registered<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(state: R) -> Self {
        Self {
            state,
            handlers: HashMap::new(),
        }
    }

    fn register(mut self, name: &str, guard: Option<Guard<R>>, handle: Handle<R>) -> Self {
        if self
            .handlers
            .insert(name.to_string(), Registered { guard, handle })
            .is_some()
        {
            warn!(command = name, "command registered twice; keeping the later handler");
        }
        self
    }

    pub fn command<F>(self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, None, Box::new(handler))
    }

    /// Like [`command`](Self::command), but `guard` must accept the payload
    /// first. A rejected payload is `GuardRejected` (400) and the handler
    /// never runs.
    pub fn command_guarded<G, F>(self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<R>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.register(name, Some(Box::new(guard)), Box::new(handler))
    }

    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let registered = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(input, session, &self.state);
        if let Some(guard) = &registered.guard {
            if !guard(&ctx) {
                debug!(command, "payload failed guard");
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        debug!(command, user = ?ctx.session().user_id(), "dispatching command");
        let result = (registered.handle)(&ctx);
        if let Err(e) = &result {
            let status = e.status_code();
            if status >= 500 {
                warn!(command, status, error = %e, "command failed");
            } else {
                debug!(command, status, error = %e, "command rejected");
            }
        }
        result
    }

    /// Envelope form of [`dispatch`](Self::dispatch): failures become
    /// `{ "error": ... }` bodies with their status code.
    pub fn dispatch_request(&self, request: &CommandRequest) -> CommandResponse {
        let session = Session::from_map(request.session_variables.clone());
        match self.dispatch(&request.command, request.input.clone(), session) {
            Ok(body) => CommandResponse { status: 200, body },
            Err(e) => CommandResponse {
                status: e.status_code(),
                body: serde_json::json!({ "error": e.to_string() }),
            },
        }
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn state(&self) -> &R {
        &self.state
    }
}

/// A command addressed to the service, with the session variables the
/// gateway forwarded (`x-user-id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    pub input: Value,
    #[serde(default)]
    pub session_variables: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: u16,
    pub body: Value,
}
