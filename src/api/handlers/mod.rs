//! Command handlers, one module per command.
//!
//! Each module exports:
//! - `COMMAND` - the command name it responds to
//! - `guard` - input shape check
//! - `handle` - the handler
//!
//! Handlers resolve the caller with `ctx.user_id()?`, so every command except
//! `users.register` answers 401 without an `x-user-id` session variable.

pub mod books;
pub mod catalog;
pub mod comments;
pub mod users;
