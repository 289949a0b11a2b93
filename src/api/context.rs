//! What a bookshelf command sees while it runs: its payload, who is
//! calling, and the shared [`AppState`](super::AppState).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;

pub struct Context<'a, R> {
    input: Value,
    session: Session,
    state: &'a R,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Subject {
    user_id: Option<String>,
}

impl<'a, R> Context<'a, R> {
    pub(crate) fn new(input: Value, session: Session, state: &'a R) -> Self {
        Self {
            input,
            session,
            state,
        }
    }

    /// Decode the payload. Shape mismatches surface as `DecodeFailed` (400).
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        T::deserialize(&self.input).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The signed-in reader, or `Unauthenticated`.
    pub fn user_id(&self) -> Result<&str, HandlerError> {
        self.session.user_id().ok_or(HandlerError::Unauthenticated)
    }

    /// The reader a profile-style read is about: `user_id` from the payload
    /// when given, otherwise the caller. Still requires a signed-in caller.
    pub fn subject_id(&self) -> Result<String, HandlerError> {
        let caller = self.user_id()?;
        let Subject { user_id } = self.input()?;
        Ok(user_id.unwrap_or_else(|| caller.to_string()))
    }

    pub fn state(&self) -> &R {
        self.state
    }

    /// Present and not `null`.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some_and(|v| !v.is_null())
    }

    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
