//! Social graph - user records and the directed follow relation.
//!
//! Follow edges are stored on both users: the follower's `following_ids`
//! and the followee's `follower_ids`. The two writes are independent
//! documents with no transaction. `follow` repairs a half-written edge
//! when retried, and `unfollow` is idempotent, so repeating either call
//! converges both documents.

mod user;

use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::store::{CollectionsExt, DocumentStore, Query};

pub use user::{NewUser, Profile, User, UserSummary, USERNAME_MAX, USERNAME_MIN};

/// Minimum trimmed query length for user search.
pub const SEARCH_MIN_CHARS: usize = 2;
/// Maximum results returned by user search.
pub const SEARCH_LIMIT: usize = 10;

/// Access to users and follow edges.
pub struct SocialGraph<'a, S> {
    store: &'a S,
}

impl<'a, S: DocumentStore> SocialGraph<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Register a user. Username and email must be unused.
    pub fn register(&self, new: NewUser) -> Result<User> {
        let user = User::create(new, Utc::now())?;
        let users = self.store.collection::<User>();

        if users.find_one(|u| u.email == user.email)?.is_some() {
            return Err(Error::validation("email is already in use"));
        }
        if users.find_one(|u| u.username == user.username)?.is_some() {
            return Err(Error::validation("username is already taken"));
        }

        users.insert(&user)?;
        info!(user_id = %user.id, username = %user.username, "registered user");
        Ok(user)
    }

    pub fn get_user(&self, user_id: &str) -> Result<User> {
        self.store.collection::<User>().require(user_id)
    }

    pub fn profile(&self, user_id: &str) -> Result<Profile> {
        let user = self.get_user(user_id)?;
        let followers = self.summaries(user.follower_ids.iter().map(String::as_str))?;
        let following = self.summaries(user.following_ids.iter().map(String::as_str))?;

        Ok(Profile {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            followers,
            following,
        })
    }

    /// Case-insensitive substring search on usernames, excluding the requester.
    pub fn search_users(&self, query: &str, requester_id: &str) -> Result<Vec<UserSummary>> {
        let needle = query.trim().to_lowercase();
        if needle.chars().count() < SEARCH_MIN_CHARS {
            return Ok(Vec::new());
        }

        let query = Query::filter(|u: &User| {
            u.id != requester_id && u.username.to_lowercase().contains(&needle)
        })
        .limit(SEARCH_LIMIT);

        let found = self.store.find(&query)?;
        debug!(query = %needle, hits = found.len(), "searched users");
        Ok(found.iter().map(UserSummary::from).collect())
    }

    /// Make `follower_id` follow `followee_id`.
    pub fn follow(&self, follower_id: &str, followee_id: &str) -> Result<()> {
        if follower_id == followee_id {
            return Err(Error::validation("cannot follow yourself"));
        }

        let users = self.store.collection::<User>();
        let mut followee = users.require(followee_id)?;
        let mut follower = users.require(follower_id)?;

        let has_out = follower.follows(followee_id);
        let has_in = followee.follower_ids.contains(follower_id);
        if has_out && has_in {
            return Err(Error::validation("already following this user"));
        }

        let repaired = has_out || has_in;
        if !has_out {
            follower.following_ids.insert(followee_id.to_string());
            users.save(&follower)?;
        }
        if !has_in {
            followee.follower_ids.insert(follower_id.to_string());
            users.save(&followee)?;
        }

        info!(follower = %follower_id, followee = %followee_id, repaired, "followed user");
        Ok(())
    }

    /// Remove the edge `follower_id -> followee_id`. Missing edges are a no-op.
    pub fn unfollow(&self, follower_id: &str, followee_id: &str) -> Result<()> {
        let users = self.store.collection::<User>();
        let mut followee = users.require(followee_id)?;
        let mut follower = users.require(follower_id)?;

        if follower.following_ids.remove(followee_id) {
            users.save(&follower)?;
        }
        if followee.follower_ids.remove(follower_id) {
            users.save(&followee)?;
        }

        info!(follower = %follower_id, followee = %followee_id, "unfollowed user");
        Ok(())
    }

    pub fn followers(&self, user_id: &str) -> Result<Vec<UserSummary>> {
        let user = self.get_user(user_id)?;
        self.summaries(user.follower_ids.iter().map(String::as_str))
    }

    pub fn following(&self, user_id: &str) -> Result<Vec<UserSummary>> {
        let user = self.get_user(user_id)?;
        self.summaries(user.following_ids.iter().map(String::as_str))
    }

    /// Resolve ids to summaries, skipping ids with no user record.
    fn summaries<'i>(&self, ids: impl Iterator<Item = &'i str>) -> Result<Vec<UserSummary>> {
        let users = self.store.collection::<User>();
        let mut out = Vec::new();
        for id in ids {
            if let Some(user) = users.get(id)? {
                out.push(UserSummary::from(&user));
            }
        }
        Ok(out)
    }
}

/// Map user ids to usernames in one scan. Unknown ids are absent from the map.
pub fn usernames<'i, S: DocumentStore>(
    store: &S,
    ids: impl IntoIterator<Item = &'i str>,
) -> Result<HashMap<String, String>> {
    let wanted: std::collections::HashSet<&str> = ids.into_iter().collect();
    if wanted.is_empty() {
        return Ok(HashMap::new());
    }

    let users = store.find(&Query::filter(|u: &User| wanted.contains(u.id.as_str())))?;
    Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
}
