//! Win-condition evaluation.
//!
//! `evaluate` runs after every death and at phase boundaries; the
//! Mayor's three-alive condition is only sampled when a day begins.
//! The first satisfied condition ends the game.

use belfry_protocol::{Role, Team, Winner};

use crate::Player;

/// Standing win conditions, checked in order.
pub fn evaluate(players: &[Player]) -> Option<(Winner, &'static str)> {
    let demon_alive = players
        .iter()
        .any(|p| p.alive && p.role.is_some_and(|r| r.team() == Team::Demon));
    if !demon_alive {
        return Some((Winner::Good, "the Demon is dead"));
    }

    let evil = players.iter().filter(|p| p.alive && p.is_evil()).count();
    let good = players.iter().filter(|p| p.alive && p.is_good()).count();
    if evil >= good {
        return Some((Winner::Evil, "evil players equal or outnumber good"));
    }

    None
}

/// The Mayor's condition: exactly three players alive, the Mayor among
/// them, and no execution on the books.
pub fn day_start(players: &[Player], execution_occurred: bool) -> Option<(Winner, &'static str)> {
    if execution_occurred {
        return None;
    }
    let alive = players.iter().filter(|p| p.alive).count();
    let mayor_alive = players.iter().any(|p| p.alive && p.has_role(Role::Mayor));
    if alive == 3 && mayor_alive {
        return Some((Winner::Good, "three players alive with the Mayor and no execution"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use belfry_protocol::PlayerId;

    fn seat(id: u64, role: Role, alive: bool) -> Player {
        let mut p = Player::new(PlayerId(id), format!("p{id}"));
        p.role = Some(role);
        p.alive = alive;
        p
    }

    #[test]
    fn good_wins_when_demon_dies() {
        let players = vec![
            seat(1, Role::Imp, false),
            seat(2, Role::Chef, true),
            seat(3, Role::Monk, true),
            seat(4, Role::Poisoner, true),
        ];
        assert_eq!(evaluate(&players).map(|(w, _)| w), Some(Winner::Good));
    }

    #[test]
    fn evil_wins_at_parity() {
        let players = vec![
            seat(1, Role::Imp, true),
            seat(2, Role::Poisoner, true),
            seat(3, Role::Chef, true),
            seat(4, Role::Monk, true),
            seat(5, Role::Librarian, false),
        ];
        assert_eq!(evaluate(&players).map(|(w, _)| w), Some(Winner::Evil));
    }

    #[test]
    fn evil_wins_when_one_on_one() {
        let players = vec![
            seat(1, Role::Imp, true),
            seat(2, Role::Chef, true),
            seat(3, Role::Monk, false),
        ];
        assert_eq!(evaluate(&players).map(|(w, _)| w), Some(Winner::Evil));
    }

    #[test]
    fn game_continues_while_good_outnumbers_evil() {
        let players = vec![
            seat(1, Role::Imp, true),
            seat(2, Role::Chef, true),
            seat(3, Role::Monk, true),
        ];
        assert_eq!(evaluate(&players), None);
    }

    #[test]
    fn mayor_condition_needs_exactly_three_alive() {
        let players = vec![
            seat(1, Role::Imp, true),
            seat(2, Role::Mayor, true),
            seat(3, Role::Monk, true),
            seat(4, Role::Chef, false),
        ];
        assert_eq!(day_start(&players, false).map(|(w, _)| w), Some(Winner::Good));
        assert_eq!(day_start(&players, true), None);

        let four_alive = vec![
            seat(1, Role::Imp, true),
            seat(2, Role::Mayor, true),
            seat(3, Role::Monk, true),
            seat(4, Role::Chef, true),
        ];
        assert_eq!(day_start(&four_alive, false), None);
    }

    #[test]
    fn mayor_condition_needs_living_mayor() {
        let players = vec![
            seat(1, Role::Imp, true),
            seat(2, Role::Mayor, false),
            seat(3, Role::Monk, true),
            seat(4, Role::Chef, true),
        ];
        assert_eq!(day_start(&players, false), None);
    }
}
