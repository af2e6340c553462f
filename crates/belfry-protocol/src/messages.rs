//! Inbound intents and outbound notifications.
//!
//! These are the abstract operations of the engine boundary, not a wire
//! format: the transport in front of the session layer decides how they
//! are carried. Enums are internally tagged so a JSON transport gets
//! `{ "type": "Vote", "target": 3 }` shapes for free.

use serde::{Deserialize, Serialize};

use crate::{DeathCause, GameCode, Phase, PlayerId, Recipient, Role, Team, Winner};

/// An outbound notification paired with its routing.
pub type Outbound = (Recipient, Notification);

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// A player- or host-submitted operation on a running session.
///
/// Session creation and joining are store-level operations; everything
/// after that arrives as an `Intent` attributed to an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Intent {
    /// Host only: deal roles and enter the first Night. Requires at
    /// least five seated players.
    Start,
    /// Resolve an outstanding night choice for the actor's role.
    SubmitChoice { choice: NightChoice },
    /// Nominate a living player for execution (Day only).
    Nominate { target: PlayerId },
    /// Cast the actor's single daily vote (Day only).
    Vote { target: PlayerId },
    /// The Slayer's once-per-game public shot (Day only).
    SlayerShot { target: PlayerId },
    /// Host only: execute the sole vote leader.
    ConfirmExecution { target: PlayerId },
    /// Host only: clear today's tally and voting flags.
    ResetVotes,
    /// Host only: Night→Day or Day→Night.
    AdvancePhase,
    /// Host only: out-of-band correction.
    Admin { action: AdminAction },
}

/// The payload of a resumed night ability. Each variant maps to exactly
/// one role's outstanding request; a mismatch is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NightChoice {
    /// Monk: shield a player from tonight's attack.
    Protect { target: PlayerId },
    /// Imp: the nightly kill (self-target triggers succession).
    Kill { target: PlayerId },
    /// Poisoner: poison a player through tonight and tomorrow.
    Poison { target: PlayerId },
    /// Fortune Teller: ask whether either player reads as evil.
    Scry { first: PlayerId, second: PlayerId },
    /// Butler: bind to a master whose vote gates yours.
    BindMaster { master: PlayerId },
    /// Ravenkeeper: mark the player whose role you learn if you die
    /// tonight.
    Mark { target: PlayerId },
}

/// Host-only overrides for moderating a live table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdminAction {
    Kill { target: PlayerId },
    Revive { target: PlayerId },
    SetPhase { phase: Phase },
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

/// The attribute a first-night information role hints at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Hint {
    /// Washerwoman: a specific townsfolk role.
    Role { role: Role },
    /// Librarian / Investigator: membership of a team.
    Team { team: Team },
}

/// One target's ordered voter list in the day tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub target: PlayerId,
    pub voters: Vec<PlayerId>,
}

/// One seat as the Spy sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrimoirePage {
    pub player: PlayerId,
    pub name: String,
    pub role: Role,
    pub alive: bool,
    pub poisoned: bool,
}

/// A recorded execution, also served to the Undertaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionEntry {
    pub day: u32,
    pub player: PlayerId,
    pub role: Role,
}

/// One seat in the end-of-game full reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatReveal {
    pub player: PlayerId,
    pub name: String,
    pub role: Role,
    pub alive: bool,
}

/// A server-to-player notification. Routing lives in [`Recipient`];
/// secret information is only ever paired with `Recipient::Player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    // Lobby / lifecycle
    PlayerJoined { player: PlayerId, name: String },
    PlayerLeft { player: PlayerId },
    GameStarted { code: GameCode, players: Vec<PlayerId> },
    RoleAssigned { role: Role },
    PhaseChanged { phase: Phase, day: u32 },
    PlayerDied { player: PlayerId, cause: DeathCause },
    PlayerRevived { player: PlayerId },
    /// The recipient's role changed (Imp succession).
    RoleChanged { role: Role },

    // Night abilities
    /// The recipient must submit a [`NightChoice`] picking `picks`
    /// targets from `candidates`.
    ChoiceRequired {
        role: Role,
        candidates: Vec<PlayerId>,
        picks: u8,
    },
    /// Acknowledges an applied choice (Monk, Poisoner, Butler,
    /// Ravenkeeper).
    ChoiceConfirmed { role: Role, targets: Vec<PlayerId> },
    /// Washerwoman / Librarian / Investigator: one of `pair` holds the
    /// hinted attribute. `pair` is `None` when nothing in play does.
    RoleHint {
        hint: Hint,
        pair: Option<(PlayerId, PlayerId)>,
    },
    /// Chef: adjacent evil pairs around the table.
    EvilPairs { count: u8 },
    /// Empath: evil count among nearest living neighbors.
    EvilNeighbors { count: u8 },
    /// Fortune Teller: whether either target registers as evil (the
    /// red herring does, by design of the role).
    ScryResult {
        first: PlayerId,
        second: PlayerId,
        evil_seen: bool,
    },
    /// Spy: the full table state.
    Grimoire { pages: Vec<GrimoirePage> },
    /// Undertaker: who was executed yesterday, if anyone.
    LastExecution { entry: Option<ExecutionEntry> },
    /// Ravenkeeper: the marked player's role, revealed on death.
    DeathReveal { player: PlayerId, role: Role },
    /// The demon's attack hit a protected or unkillable target.
    AttackBlocked,

    // Day
    NominationOccurred {
        nominator: PlayerId,
        nominee: PlayerId,
    },
    VirginTriggered {
        nominator: PlayerId,
        virgin: PlayerId,
    },
    VoteUpdated { tally: Vec<TallyEntry> },
    VotesReset,
    ExecutionDecided { target: PlayerId, votes: usize },
    ExecutionTied { targets: Vec<PlayerId> },
    NoExecution,
    SlayerShot {
        slayer: PlayerId,
        target: PlayerId,
        killed: bool,
    },

    // Terminal
    GameEnded {
        winner: Winner,
        reason: String,
        roles: Vec<SeatReveal>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_vote_json_shape() {
        let intent = Intent::Vote {
            target: PlayerId(3),
        };
        let json: serde_json::Value = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["type"], "Vote");
        assert_eq!(json["target"], 3);
    }

    #[test]
    fn intent_round_trips() {
        let intents = [
            Intent::Start,
            Intent::SubmitChoice {
                choice: NightChoice::Scry {
                    first: PlayerId(1),
                    second: PlayerId(2),
                },
            },
            Intent::Nominate {
                target: PlayerId(4),
            },
            Intent::ConfirmExecution {
                target: PlayerId(5),
            },
            Intent::Admin {
                action: AdminAction::SetPhase { phase: Phase::Day },
            },
        ];
        for intent in intents {
            let bytes = serde_json::to_vec(&intent).unwrap();
            let back: Intent = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(intent, back);
        }
    }

    #[test]
    fn notification_role_hint_json_shape() {
        let n = Notification::RoleHint {
            hint: Hint::Team {
                team: Team::Outsider,
            },
            pair: Some((PlayerId(1), PlayerId(2))),
        };
        let json: serde_json::Value = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "RoleHint");
        assert_eq!(json["hint"]["type"], "Team");
        assert_eq!(json["pair"], serde_json::json!([1, 2]));
    }

    #[test]
    fn notification_game_ended_round_trips() {
        let n = Notification::GameEnded {
            winner: Winner::Good,
            reason: "the Demon was executed".into(),
            roles: vec![SeatReveal {
                player: PlayerId(1),
                name: "Ada".into(),
                role: Role::Imp,
                alive: false,
            }],
        };
        let bytes = serde_json::to_vec(&n).unwrap();
        let back: Notification = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(n, back);
    }

    #[test]
    fn unknown_intent_type_is_rejected() {
        let unknown = r#"{"type": "CastFireball", "target": 1}"#;
        let result: Result<Intent, _> = serde_json::from_str(unknown);
        assert!(result.is_err());
    }
}
