//! The immutable role catalog.
//!
//! Twenty-one roles across four teams, each with a fixed night-order
//! rank. Lower ranks resolve first each Night; ties are broken by seat
//! order. The catalog never changes at runtime — role state lives on
//! the player, not here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Team;

/// A role definition. Fieldless — all catalog data hangs off methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    // Townsfolk
    Washerwoman,
    Librarian,
    Investigator,
    Chef,
    Empath,
    FortuneTeller,
    Undertaker,
    Monk,
    Ravenkeeper,
    Virgin,
    Slayer,
    Soldier,
    Mayor,
    // Outsiders
    Butler,
    Saint,
    Recluse,
    // Minions
    Poisoner,
    Spy,
    Baron,
    ScarletWoman,
    // Demon
    Imp,
}

impl Role {
    /// The townsfolk pool, in catalog order.
    pub const TOWNSFOLK: [Role; 13] = [
        Role::Washerwoman,
        Role::Librarian,
        Role::Investigator,
        Role::Chef,
        Role::Empath,
        Role::FortuneTeller,
        Role::Undertaker,
        Role::Monk,
        Role::Ravenkeeper,
        Role::Virgin,
        Role::Slayer,
        Role::Soldier,
        Role::Mayor,
    ];

    /// The outsider pool.
    pub const OUTSIDERS: [Role; 3] = [Role::Butler, Role::Saint, Role::Recluse];

    /// The minion pool.
    pub const MINIONS: [Role; 4] = [Role::Poisoner, Role::Spy, Role::Baron, Role::ScarletWoman];

    /// The demon pool. Exactly one demon role exists.
    pub const DEMONS: [Role; 1] = [Role::Imp];

    /// Every role, for iteration in night order.
    pub const ALL: [Role; 21] = [
        Role::Washerwoman,
        Role::Librarian,
        Role::Investigator,
        Role::Chef,
        Role::Empath,
        Role::FortuneTeller,
        Role::Undertaker,
        Role::Monk,
        Role::Ravenkeeper,
        Role::Virgin,
        Role::Slayer,
        Role::Soldier,
        Role::Mayor,
        Role::Butler,
        Role::Saint,
        Role::Recluse,
        Role::Poisoner,
        Role::Spy,
        Role::Baron,
        Role::ScarletWoman,
        Role::Imp,
    ];

    /// The team this role belongs to.
    pub fn team(self) -> Team {
        match self {
            Role::Washerwoman
            | Role::Librarian
            | Role::Investigator
            | Role::Chef
            | Role::Empath
            | Role::FortuneTeller
            | Role::Undertaker
            | Role::Monk
            | Role::Ravenkeeper
            | Role::Virgin
            | Role::Slayer
            | Role::Soldier
            | Role::Mayor => Team::Townsfolk,
            Role::Butler | Role::Saint | Role::Recluse => Team::Outsider,
            Role::Poisoner | Role::Spy | Role::Baron | Role::ScarletWoman => Team::Minion,
            Role::Imp => Team::Demon,
        }
    }

    /// Night-resolution rank. Lower resolves first.
    pub fn night_order(self) -> u8 {
        match self {
            Role::Washerwoman
            | Role::Librarian
            | Role::Investigator
            | Role::Chef
            | Role::Poisoner
            | Role::Spy => 1,
            Role::Monk
            | Role::Empath
            | Role::FortuneTeller
            | Role::Undertaker
            | Role::Mayor
            | Role::Imp => 2,
            Role::Ravenkeeper
            | Role::Virgin
            | Role::Slayer
            | Role::Soldier
            | Role::Butler
            | Role::Saint
            | Role::Recluse
            | Role::Baron
            | Role::ScarletWoman => 3,
        }
    }

    /// Human-readable ability text. Informational only — the engine
    /// never parses this.
    pub fn ability(self) -> &'static str {
        match self {
            Role::Washerwoman => {
                "You start knowing that 1 of 2 players is a particular Townsfolk."
            }
            Role::Librarian => {
                "You start knowing that 1 of 2 players is a particular Outsider (or that zero are in play)."
            }
            Role::Investigator => {
                "You start knowing that 1 of 2 players is a particular Minion."
            }
            Role::Chef => "You start knowing how many pairs of evil players there are.",
            Role::Empath => "Each night, you learn how many of your 2 alive neighbors are evil.",
            Role::FortuneTeller => {
                "Each night, choose 2 players: you learn if either is the Demon. One good player registers as the Demon to you."
            }
            Role::Undertaker => "Each night*, you learn which character died by execution today.",
            Role::Monk => "Each night*, choose a player (not yourself): they are safe from the Demon tonight.",
            Role::Ravenkeeper => {
                "If you die at night, you learn the role of the player you had marked."
            }
            Role::Virgin => {
                "The first time you are nominated, if the nominator is good, they die immediately."
            }
            Role::Slayer => {
                "Once per game, during the day, publicly choose a player: if they are the Demon, they die."
            }
            Role::Soldier => "You are safe from the Demon.",
            Role::Mayor => {
                "If only 3 players live and no execution occurs, your team wins. If you die at night, another player might die instead."
            }
            Role::Butler => {
                "Each night, choose a player (not yourself): you may only vote if they are voting too."
            }
            Role::Saint => "If you die by execution, your team loses.",
            Role::Recluse => "You might register as evil, and as a Minion or Demon, even if dead.",
            Role::Poisoner => {
                "Each night, choose a player: they are poisoned tonight and tomorrow day."
            }
            Role::Spy => {
                "Each night, you see the Grimoire. You might register as good, and as a Townsfolk or Outsider, even if dead."
            }
            Role::Baron => "There are extra Outsiders in play (+2 Outsiders).",
            Role::ScarletWoman => {
                "If there are 5 or more players alive and the Demon dies, you become the Demon."
            }
            Role::Imp => {
                "Each night, choose a player: they die. If you kill yourself, a Minion becomes the Imp."
            }
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Washerwoman => "Washerwoman",
            Role::Librarian => "Librarian",
            Role::Investigator => "Investigator",
            Role::Chef => "Chef",
            Role::Empath => "Empath",
            Role::FortuneTeller => "Fortune Teller",
            Role::Undertaker => "Undertaker",
            Role::Monk => "Monk",
            Role::Ravenkeeper => "Ravenkeeper",
            Role::Virgin => "Virgin",
            Role::Slayer => "Slayer",
            Role::Soldier => "Soldier",
            Role::Mayor => "Mayor",
            Role::Butler => "Butler",
            Role::Saint => "Saint",
            Role::Recluse => "Recluse",
            Role::Poisoner => "Poisoner",
            Role::Spy => "Spy",
            Role::Baron => "Baron",
            Role::ScarletWoman => "Scarlet Woman",
            Role::Imp => "Imp",
        };
        write!(f, "{name}")
    }
}
