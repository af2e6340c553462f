//! Error types for the session layer.

use belfry_protocol::{GameCode, PlayerId};
use belfry_rules::RulesError;

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A session with this code already exists.
    #[error("game code {0} is already in use")]
    CodeTaken(GameCode),

    /// No session with this code.
    #[error("no game with code {0}")]
    NotFound(GameCode),

    /// The player is already seated in a session.
    #[error("player {0} is already in a game")]
    AlreadyInSession(PlayerId),

    /// The player is not seated in any session.
    #[error("player {0} is not in a game")]
    NotInSession(PlayerId),

    /// The session actor is gone (crashed or shut down).
    #[error("game {0} is unavailable")]
    Unavailable(GameCode),

    /// The rules engine rejected the operation.
    #[error(transparent)]
    Rules(#[from] RulesError),
}
