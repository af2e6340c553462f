//! The per-participant mutable state.

use belfry_protocol::{PlayerId, Role};

/// One seat at the table.
///
/// A dead player keeps their role for reveals and the end-of-game
/// summary but can no longer act, vote, nominate, or be protected.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// `None` until roles are dealt at game start.
    pub role: Option<Role>,
    pub alive: bool,
    pub poisoned: bool,
    /// Monk protection; cleared at the start of every Night.
    pub protected_tonight: bool,
    pub can_vote: bool,
    pub has_voted: bool,
    pub nominated_today: bool,
    /// One-shot: the Slayer's public shot.
    pub slayer_used: bool,
    /// One-shot: the Virgin's first-nomination trigger.
    pub virgin_spent: bool,
    /// The Butler's chosen master, gating their vote.
    pub master: Option<PlayerId>,
    /// The Ravenkeeper's marked player, revealed if they die at night.
    pub marked: Option<PlayerId>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: None,
            alive: true,
            poisoned: false,
            protected_tonight: false,
            can_vote: true,
            has_voted: false,
            nominated_today: false,
            slayer_used: false,
            virgin_spent: false,
            master: None,
            marked: None,
        }
    }

    pub fn is_evil(&self) -> bool {
        self.role.is_some_and(|r| r.team().is_evil())
    }

    pub fn is_good(&self) -> bool {
        self.role.is_some_and(|r| r.team().is_good())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub(crate) fn die(&mut self) {
        self.alive = false;
    }

    /// Night-entry housekeeping: protection and poison expire, voting
    /// and nomination flags reset for the coming day.
    pub(crate) fn reset_for_night(&mut self) {
        self.protected_tonight = false;
        self.poisoned = false;
        self.can_vote = true;
        self.has_voted = false;
        self.nominated_today = false;
    }
}
