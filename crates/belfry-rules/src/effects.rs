//! Death resolution.
//!
//! Deaths go through an explicit queue instead of re-entrant calls, so
//! a death triggered by another death (the Mayor's redirect, the
//! Virgin's nomination kill) resolves in submission order and the win
//! check runs exactly once, after the queue drains.

use std::collections::VecDeque;

use rand::seq::IndexedRandom;

use belfry_protocol::{DeathCause, Notification, Outbound, PlayerId, Recipient, Role, Team, Winner};

use crate::{win, Game};

/// A queued state change. Only deaths today; the queue shape leaves
/// room for other deferred effects.
pub(crate) enum Effect {
    Die { player: PlayerId, cause: DeathCause },
}

/// Drains `initial` and everything it triggers, appending notifications
/// to `out`. Ends the game if a win condition is met.
pub(crate) fn run(game: &mut Game, initial: Vec<Effect>, out: &mut Vec<Outbound>) {
    let mut queue: VecDeque<Effect> = initial.into();

    while let Some(Effect::Die { player, cause }) = queue.pop_front() {
        if game.phase.is_over() {
            return;
        }
        let Some(seat) = game.seat_of(player) else {
            continue;
        };
        if !game.players[seat].alive {
            continue;
        }

        // The Mayor deflects the night attack onto a random other
        // living townsfolk when one exists.
        if cause == DeathCause::NightAttack && game.players[seat].has_role(Role::Mayor) {
            let candidates: Vec<PlayerId> = game
                .players
                .iter()
                .filter(|p| {
                    p.alive
                        && p.id != player
                        && p.role.is_some_and(|r| r.team() == Team::Townsfolk)
                })
                .map(|p| p.id)
                .collect();
            if let Some(&replacement) = candidates.choose(&mut game.rng) {
                tracing::info!(code = %game.code, mayor = %player, %replacement, "attack deflected");
                queue.push_back(Effect::Die {
                    player: replacement,
                    cause: DeathCause::Redirect,
                });
                continue;
            }
        }

        game.players[seat].die();
        tracing::info!(code = %game.code, %player, %cause, "player died");
        out.push((Recipient::All, Notification::PlayerDied { player, cause }));

        // A Ravenkeeper killed at night learns their marked player's
        // role.
        if cause == DeathCause::NightAttack && game.players[seat].has_role(Role::Ravenkeeper) {
            if let Some(marked) = game.players[seat].marked {
                if let Some(role) = game.player(marked).and_then(|p| p.role) {
                    out.push((
                        Recipient::Player(player),
                        Notification::DeathReveal {
                            player: marked,
                            role,
                        },
                    ));
                }
            }
        }

        // Executing the Saint hands the game to evil outright.
        if cause == DeathCause::Execution && game.players[seat].has_role(Role::Saint) {
            game.end_game(Winner::Evil, "the Saint was executed", out);
            return;
        }
    }

    if let Some((winner, reason)) = win::evaluate(&game.players) {
        game.end_game(winner, reason, out);
    }
}
