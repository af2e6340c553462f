//! Identity newtypes and the small closed enums the whole engine speaks.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a seated player (or the host).
///
/// Newtype over `u64` so a player id can never be confused with a vote
/// count or a seat index. `#[serde(transparent)]` keeps the wire form a
/// plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// The host-chosen code that names a game session.
///
/// Codes are compared case-sensitively and serialize as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCode(pub String);

impl GameCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Writes the raw code so tracing output reads naturally.
impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a game session.
///
/// ```text
/// Lobby ──(start)──→ Night ⇄ Day ──(win condition)──→ Ended
/// ```
///
/// - **Lobby**: players join and leave; no roles dealt yet.
/// - **Night**: abilities resolve in night order; no voting.
/// - **Day**: nomination, voting, and host-confirmed execution.
/// - **Ended**: a win condition fired. Terminal — no further mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Lobby,
    Night,
    Day,
    Ended,
}

impl Phase {
    /// Returns `true` once a win condition has ended the game.
    pub fn is_over(self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Returns `true` while the match is running (Night or Day).
    pub fn in_play(self) -> bool {
        matches!(self, Self::Night | Self::Day)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "Lobby"),
            Self::Night => write!(f, "Night"),
            Self::Day => write!(f, "Day"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// The four role teams. Townsfolk and Outsiders are good; Minions and
/// the Demon are evil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Townsfolk,
    Outsider,
    Minion,
    Demon,
}

impl Team {
    pub fn is_good(self) -> bool {
        matches!(self, Self::Townsfolk | Self::Outsider)
    }

    pub fn is_evil(self) -> bool {
        !self.is_good()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Townsfolk => write!(f, "Townsfolk"),
            Self::Outsider => write!(f, "Outsider"),
            Self::Minion => write!(f, "Minion"),
            Self::Demon => write!(f, "Demon"),
        }
    }
}

// ---------------------------------------------------------------------------
// DeathCause / Winner
// ---------------------------------------------------------------------------

/// How a player died. Death triggers key off the cause: the Ravenkeeper
/// reveal and the Mayor redirect fire only on `NightAttack`, the Saint
/// rule only on `Execution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Killed by the demon's nightly attack.
    NightAttack,
    /// The demon targeted itself.
    Suicide,
    /// Died in place of the Mayor.
    Redirect,
    /// Host-confirmed day execution.
    Execution,
    /// Nominated the Virgin while good-aligned.
    Virgin,
    /// Shot by the Slayer.
    Slain,
    /// Host admin override.
    Admin,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NightAttack => "night attack",
            Self::Suicide => "suicide",
            Self::Redirect => "redirect",
            Self::Execution => "execution",
            Self::Virgin => "virgin",
            Self::Slain => "slain",
            Self::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

/// Which side won the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Good,
    Evil,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "Good"),
            Self::Evil => write!(f, "Evil"),
        }
    }
}

// ---------------------------------------------------------------------------
// Recipient
// ---------------------------------------------------------------------------

/// Specifies who should receive an outbound [`Notification`].
///
/// The rules engine returns `(Recipient, Notification)` pairs; the
/// session layer routes them. Most ability results go to exactly one
/// player — secrecy is the point of the genre.
///
/// [`Notification`]: crate::Notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every seated player (and the host).
    All,
    /// One specific player.
    Player(PlayerId),
    /// The host only (vote outcomes awaiting confirmation, etc.).
    Host,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&PlayerId(42)).unwrap();
        assert_eq!(json, "42");
        let back: PlayerId = serde_json::from_str("42").unwrap();
        assert_eq!(back, PlayerId(42));
    }

    #[test]
    fn game_code_serializes_as_plain_string() {
        let code = GameCode::new("TOWER");
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"TOWER\"");
        assert_eq!(code.to_string(), "TOWER");
    }

    #[test]
    fn phase_predicates() {
        assert!(!Phase::Lobby.in_play());
        assert!(Phase::Night.in_play());
        assert!(Phase::Day.in_play());
        assert!(Phase::Ended.is_over());
        assert!(!Phase::Day.is_over());
    }

    #[test]
    fn team_alignment() {
        assert!(Team::Townsfolk.is_good());
        assert!(Team::Outsider.is_good());
        assert!(Team::Minion.is_evil());
        assert!(Team::Demon.is_evil());
    }

    #[test]
    fn death_cause_display() {
        assert_eq!(DeathCause::NightAttack.to_string(), "night attack");
        assert_eq!(DeathCause::Execution.to_string(), "execution");
    }
}
