//! Session layer for the Belfry engine.
//!
//! Each game session runs as an isolated Tokio actor task that owns its
//! [`belfry_rules::Game`] and serializes every operation on it. The
//! [`SessionStore`] creates sessions, indexes players, and routes
//! intents; notifications come back to each player over an unbounded
//! channel registered at join time.

mod actor;
mod config;
mod error;
mod store;

pub use actor::{PlayerSender, SessionHandle, SessionInfo};
pub use config::SessionConfig;
pub use error::SessionError;
pub use store::SessionStore;
