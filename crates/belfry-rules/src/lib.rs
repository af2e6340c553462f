//! The Belfry rules engine.
//!
//! A deterministic, transport-free state machine for a social-deduction
//! night/day game: role assignment, night-ability resolution, daytime
//! nomination and voting, and win-condition evaluation. All randomness
//! flows through a single seedable RNG owned by [`Game`], so a seeded
//! game replays identically.
//!
//! The engine never performs I/O. Every operation returns the
//! [`belfry_protocol::Outbound`] notifications to deliver; routing and
//! delivery belong to the session layer above.

mod assign;
mod effects;
mod error;
mod game;
mod night;
mod player;
mod vote;

pub mod win;

pub use error::RulesError;
pub use game::Game;
pub use night::PendingChoice;
pub use player::Player;
pub use vote::VoteOutcome;
