//! Session variables forwarded by the authentication layer.

use std::collections::HashMap;

/// Header / session key carrying the verified user id.
pub const USER_ID_KEY: &str = "x-user-id";

/// Parsed session variables from the incoming request.
///
/// Authentication happens upstream; by the time a request reaches the
/// service, the gateway has verified the token and forwarded the caller's
/// id as `x-user-id`:
///
/// ```json
/// { "x-user-id": "5f0c..." }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for an already-authenticated user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(USER_ID_KEY, user_id);
        session
    }

    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// The caller's user id, if authenticated. Blank values count as absent.
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_KEY).filter(|id| !id.trim().is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }

    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }
}
