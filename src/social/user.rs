use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::Document;

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;

/// A registered user and their side of the follow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Document)]
#[document(collection = "users")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    /// Users following this user.
    #[serde(default)]
    pub follower_ids: BTreeSet<String>,
    /// Users this user follows.
    #[serde(default)]
    pub following_ids: BTreeSet<String>,
}

/// Registration input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

/// Public projection of a user used in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
        }
    }
}

/// A user's profile with both sides of the follow graph resolved to summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        let len = self.username.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
            return Err(Error::validation(format!(
                "username must be {} to {} characters",
                USERNAME_MIN, USERNAME_MAX
            )));
        }
        if !looks_like_email(&self.email) {
            return Err(Error::validation("email must be a valid email"));
        }
        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !email.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

impl User {
    pub fn create(new: NewUser, now: DateTime<Utc>) -> Result<Self> {
        let new = NewUser {
            username: new.username.trim().to_string(),
            email: new.email.trim().to_lowercase(),
        };
        new.validate()?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            username: new.username,
            email: new.email,
            created_at: now,
            follower_ids: BTreeSet::new(),
            following_ids: BTreeSet::new(),
        })
    }

    pub fn follows(&self, other: &str) -> bool {
        self.following_ids.contains(other)
    }
}
