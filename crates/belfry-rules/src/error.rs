//! Error types for the rules engine.

use belfry_protocol::Team;

/// Errors surfaced by rules-engine operations.
///
/// Configuration errors (`UnsupportedRosterSize`, `RolePoolExhausted`)
/// are fatal to the attempted operation but leave the session intact.
/// `IllegalAction` covers every phase/identity/target rejection; it is
/// returned only to the submitting caller and never changes state.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The roster size has no team table entry.
    #[error("unsupported roster size {0}: need 5-10 players")]
    UnsupportedRosterSize(usize),

    /// A role deal asked for more distinct roles than the pool holds.
    #[error("{team} pool exhausted: need {need} distinct roles, have {have}")]
    RolePoolExhausted {
        team: Team,
        need: usize,
        have: usize,
    },

    /// Wrong phase, dead or unknown actor, invalid target, duplicate
    /// submission. Always a no-op.
    #[error("illegal action: {0}")]
    IllegalAction(String),

    /// A host-only intent from a non-host actor.
    #[error("only the host may do that")]
    NotHost,
}

impl RulesError {
    /// Shorthand for the most common rejection.
    pub(crate) fn illegal(reason: impl Into<String>) -> Self {
        Self::IllegalAction(reason.into())
    }
}
