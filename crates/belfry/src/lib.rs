//! # Belfry
//!
//! A server-authoritative engine for a social-deduction party game:
//! hidden roles dealt from a fixed script, secret night abilities, and
//! public day votes, resolved by a deterministic rules engine behind a
//! per-session actor.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use belfry::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), BelfryError> {
//!     let mut store = SessionStore::new();
//!     let code = GameCode::new("TOWER");
//!     store.create(code.clone(), PlayerId(1), SessionConfig::default())?;
//!
//!     let (tx, mut _rx) = tokio::sync::mpsc::unbounded_channel();
//!     store.join(PlayerId(1), &code, "Ada", tx).await?;
//!     // ...seat four more players, then:
//!     store.route_intent(PlayerId(1), Intent::Start).await?;
//!     Ok(())
//! }
//! ```

mod error;

pub use error::BelfryError;

pub use belfry_protocol::{
    AdminAction, DeathCause, ExecutionEntry, GameCode, GrimoirePage, Hint, Intent, NightChoice,
    Notification, Outbound, Phase, PlayerId, Recipient, Role, SeatReveal, TallyEntry, Team, Winner,
};
pub use belfry_rules::{Game, PendingChoice, Player, RulesError, VoteOutcome};
pub use belfry_session::{
    PlayerSender, SessionConfig, SessionError, SessionHandle, SessionInfo, SessionStore,
};

/// One-stop imports for driving a game.
pub mod prelude {
    pub use crate::{
        BelfryError, GameCode, Intent, NightChoice, Notification, Phase, PlayerId, Role,
        SessionConfig, SessionStore, Team, Winner,
    };
}
