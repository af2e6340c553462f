//! Shared vocabulary for the Belfry social-deduction engine.
//!
//! Everything that crosses the boundary between the rules engine, the
//! session layer, and whatever transport sits in front of them lives
//! here: identity newtypes, the phase and team enums, the immutable
//! role catalog, inbound [`Intent`]s and outbound [`Notification`]s.
//!
//! This crate is a leaf — it depends on nothing but serde.

mod messages;
mod roles;
mod types;

pub use messages::{
    AdminAction, ExecutionEntry, GrimoirePage, Hint, Intent, NightChoice, Notification, Outbound,
    SeatReveal, TallyEntry,
};
pub use roles::Role;
pub use types::{DeathCause, GameCode, Phase, PlayerId, Recipient, Team, Winner};
