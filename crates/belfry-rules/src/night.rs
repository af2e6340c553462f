//! Night resolution.
//!
//! Entering Night resolves every living role holder's ability in
//! ascending night-order rank, seat order breaking ties. Instant
//! abilities (hints, counts, the grimoire) emit their result
//! immediately; abilities that need a target suspend into a
//! [`PendingChoice`] and resume when the player submits a
//! [`NightChoice`].

use rand::seq::IndexedRandom;
use rand::Rng;

use belfry_protocol::{
    GrimoirePage, Hint, NightChoice, Notification, Outbound, Phase, PlayerId, Recipient, Role, Team,
};
use belfry_protocol::DeathCause;

use crate::effects::{self, Effect};
use crate::{Game, Player, RulesError};

/// A night ability waiting on its holder's target submission.
#[derive(Debug, Clone)]
pub struct PendingChoice {
    pub player: PlayerId,
    pub role: Role,
    /// The night this was issued; stale choices are dropped at the next
    /// night entry.
    pub day: u32,
    pub candidates: Vec<PlayerId>,
    pub picks: u8,
}

/// Enters Night: housekeeping, then ability resolution.
pub(crate) fn begin_night(game: &mut Game) -> Vec<Outbound> {
    game.phase = Phase::Night;
    game.day += 1;
    game.tally.clear();
    game.pending.clear();
    for player in &mut game.players {
        player.reset_for_night();
    }

    let mut out = vec![(
        Recipient::All,
        Notification::PhaseChanged {
            phase: Phase::Night,
            day: game.day,
        },
    )];
    tracing::info!(code = %game.code, day = game.day, "night begins");

    let mut order: Vec<usize> = (0..game.players.len())
        .filter(|&i| game.players[i].alive)
        .collect();
    order.sort_by_key(|&i| {
        (
            game.players[i].role.map_or(u8::MAX, Role::night_order),
            i,
        )
    });

    for seat in order {
        if game.phase.is_over() {
            break;
        }
        if !game.players[seat].alive {
            continue;
        }
        let Some(role) = game.players[seat].role else {
            continue;
        };
        resolve_ability(game, seat, role, &mut out);
    }
    out
}

fn resolve_ability(game: &mut Game, seat: usize, role: Role, out: &mut Vec<Outbound>) {
    match role {
        Role::Washerwoman if game.day == 1 => {
            let pool: Vec<Role> = Role::TOWNSFOLK
                .iter()
                .copied()
                .filter(|&r| r != Role::Washerwoman)
                .collect();
            if let Some(&hinted) = pool.choose(&mut game.rng) {
                first_night_hint(game, seat, Hint::Role { role: hinted }, out, |p| {
                    p.has_role(hinted)
                });
            }
        }
        Role::Librarian if game.day == 1 => {
            first_night_hint(
                game,
                seat,
                Hint::Team {
                    team: Team::Outsider,
                },
                out,
                |p| p.role.is_some_and(|r| r.team() == Team::Outsider),
            );
        }
        Role::Investigator if game.day == 1 => {
            first_night_hint(
                game,
                seat,
                Hint::Team { team: Team::Minion },
                out,
                |p| p.role.is_some_and(|r| r.team() == Team::Minion),
            );
        }
        Role::Chef if game.day == 1 => {
            let n = game.players.len();
            let count = (0..n)
                .filter(|&i| game.players[i].is_evil() && game.players[(i + 1) % n].is_evil())
                .count() as u8;
            out.push((
                Recipient::Player(game.players[seat].id),
                Notification::EvilPairs { count },
            ));
        }
        Role::Empath => {
            let left = living_neighbor(game, seat, -1);
            let right = living_neighbor(game, seat, 1);
            let mut neighbors = [left, right];
            if left == right {
                neighbors[1] = None;
            }
            let count = neighbors
                .into_iter()
                .flatten()
                .filter(|&i| game.players[i].is_evil())
                .count() as u8;
            out.push((
                Recipient::Player(game.players[seat].id),
                Notification::EvilNeighbors { count },
            ));
        }
        Role::FortuneTeller => request_choice(game, seat, role, false, 2, out),
        Role::Monk if game.day > 1 => request_choice(game, seat, role, false, 1, out),
        Role::Imp => request_choice(game, seat, role, true, 1, out),
        Role::Poisoner => request_choice(game, seat, role, false, 1, out),
        Role::Butler => request_choice(game, seat, role, false, 1, out),
        Role::Ravenkeeper => request_choice(game, seat, role, false, 1, out),
        Role::Spy => {
            let pages: Vec<GrimoirePage> = game
                .players
                .iter()
                .filter_map(|p| {
                    p.role.map(|role| GrimoirePage {
                        player: p.id,
                        name: p.name.clone(),
                        role,
                        alive: p.alive,
                        poisoned: p.poisoned,
                    })
                })
                .collect();
            out.push((
                Recipient::Player(game.players[seat].id),
                Notification::Grimoire { pages },
            ));
        }
        Role::Undertaker if game.day > 1 => {
            let entry = game
                .executions
                .last()
                .filter(|e| e.day + 1 == game.day)
                .cloned();
            out.push((
                Recipient::Player(game.players[seat].id),
                Notification::LastExecution { entry },
            ));
        }
        Role::ScarletWoman => {
            let demon_alive = game
                .players
                .iter()
                .any(|p| p.alive && p.role.is_some_and(|r| r.team() == Team::Demon));
            if !demon_alive && game.living_count() >= 5 {
                game.players[seat].role = Some(Role::Imp);
                tracing::info!(code = %game.code, player = %game.players[seat].id, "demon succession");
                out.push((
                    Recipient::Player(game.players[seat].id),
                    Notification::RoleChanged { role: Role::Imp },
                ));
            }
        }
        // First-night-only roles past night one, and passive roles.
        _ => {}
    }
}

/// Washerwoman, Librarian, Investigator: one of two shown players holds
/// the hinted attribute. `pair` is `None` when nothing in play does.
fn first_night_hint(
    game: &mut Game,
    seat: usize,
    hint: Hint,
    out: &mut Vec<Outbound>,
    holds: impl Fn(&Player) -> bool,
) {
    let actor = game.players[seat].id;
    let holders: Vec<PlayerId> = game
        .players
        .iter()
        .filter(|p| p.id != actor && holds(p))
        .map(|p| p.id)
        .collect();

    let pair = match holders.choose(&mut game.rng) {
        Some(&shown) => {
            let decoys: Vec<PlayerId> = game
                .players
                .iter()
                .filter(|p| p.id != actor && !holders.contains(&p.id))
                .map(|p| p.id)
                .collect();
            decoys.choose(&mut game.rng).map(|&decoy| {
                if game.rng.random_bool(0.5) {
                    (shown, decoy)
                } else {
                    (decoy, shown)
                }
            })
        }
        None => None,
    };
    out.push((Recipient::Player(actor), Notification::RoleHint { hint, pair }));
}

/// Nearest living seat stepping around the table, excluding `seat`.
fn living_neighbor(game: &Game, seat: usize, step: isize) -> Option<usize> {
    let n = game.players.len() as isize;
    let mut i = seat as isize;
    for _ in 0..n - 1 {
        i = (i + step).rem_euclid(n);
        if game.players[i as usize].alive {
            return Some(i as usize);
        }
    }
    None
}

/// Suspends an ability into a pending choice and asks its holder to
/// pick.
fn request_choice(
    game: &mut Game,
    seat: usize,
    role: Role,
    include_self: bool,
    picks: u8,
    out: &mut Vec<Outbound>,
) {
    let actor = game.players[seat].id;
    let candidates: Vec<PlayerId> = game
        .players
        .iter()
        .filter(|p| p.alive && (include_self || p.id != actor))
        .map(|p| p.id)
        .collect();
    game.pending.push(PendingChoice {
        player: actor,
        role,
        day: game.day,
        candidates: candidates.clone(),
        picks,
    });
    out.push((
        Recipient::Player(actor),
        Notification::ChoiceRequired {
            role,
            candidates,
            picks,
        },
    ));
}

/// Resumes an outstanding choice. The submitted variant must match the
/// actor's pending role and every target must come from the candidate
/// list issued with the request.
pub(crate) fn submit_choice(
    game: &mut Game,
    actor: PlayerId,
    choice: NightChoice,
) -> Result<Vec<Outbound>, RulesError> {
    game.require_phase(Phase::Night)?;
    game.living_seat(actor)?;

    let expected = match choice {
        NightChoice::Protect { .. } => Role::Monk,
        NightChoice::Kill { .. } => Role::Imp,
        NightChoice::Poison { .. } => Role::Poisoner,
        NightChoice::Scry { .. } => Role::FortuneTeller,
        NightChoice::BindMaster { .. } => Role::Butler,
        NightChoice::Mark { .. } => Role::Ravenkeeper,
    };
    let idx = game
        .pending
        .iter()
        .position(|c| c.player == actor && c.role == expected)
        .ok_or_else(|| {
            RulesError::illegal(format!("no outstanding {expected} choice for {actor}"))
        })?;

    let targets = match choice {
        NightChoice::Protect { target }
        | NightChoice::Kill { target }
        | NightChoice::Poison { target }
        | NightChoice::Mark { target } => vec![target],
        NightChoice::BindMaster { master } => vec![master],
        NightChoice::Scry { first, second } => vec![first, second],
    };
    for target in &targets {
        if !game.pending[idx].candidates.contains(target) {
            return Err(RulesError::illegal(format!(
                "{target} is not a valid target for the {expected}"
            )));
        }
    }
    if let NightChoice::Scry { first, second } = choice {
        if first == second {
            return Err(RulesError::illegal("pick two different players to scry"));
        }
    }
    // Candidates were alive when the request was issued, but an earlier
    // resolution this night may have killed one. Reject before consuming
    // the pending record so a corrected resubmission still finds it.
    match choice {
        NightChoice::Protect { target } | NightChoice::Poison { target } => {
            game.living_seat(target)?;
        }
        NightChoice::Kill { target } if target != actor => {
            game.living_seat(target)?;
        }
        _ => {}
    }
    game.pending.remove(idx);

    let mut out = Vec::new();
    match choice {
        NightChoice::Protect { target } => {
            let seat = game.living_seat(target)?;
            game.players[seat].protected_tonight = true;
            out.push(confirmed(actor, Role::Monk, &targets));
        }
        NightChoice::Poison { target } => {
            let seat = game.living_seat(target)?;
            game.players[seat].poisoned = true;
            out.push(confirmed(actor, Role::Poisoner, &targets));
        }
        NightChoice::BindMaster { master } => {
            if let Some(seat) = game.seat_of(actor) {
                game.players[seat].master = Some(master);
            }
            out.push(confirmed(actor, Role::Butler, &targets));
        }
        NightChoice::Mark { target } => {
            if let Some(seat) = game.seat_of(actor) {
                game.players[seat].marked = Some(target);
            }
            out.push(confirmed(actor, Role::Ravenkeeper, &targets));
        }
        NightChoice::Scry { first, second } => {
            let reads_evil = |id: PlayerId| {
                game.player(id).is_some_and(Player::is_evil) || game.red_herring == Some(id)
            };
            out.push((
                Recipient::Player(actor),
                Notification::ScryResult {
                    first,
                    second,
                    evil_seen: reads_evil(first) || reads_evil(second),
                },
            ));
        }
        NightChoice::Kill { target } => resolve_kill(game, actor, target, &mut out)?,
    }
    Ok(out)
}

/// The Imp's kill. Self-target promotes a random living minion before
/// the suicide resolves, so succession beats the win check.
fn resolve_kill(
    game: &mut Game,
    actor: PlayerId,
    target: PlayerId,
    out: &mut Vec<Outbound>,
) -> Result<(), RulesError> {
    if target == actor {
        let minions: Vec<usize> = (0..game.players.len())
            .filter(|&i| {
                game.players[i].alive
                    && game.players[i].role.is_some_and(|r| r.team() == Team::Minion)
            })
            .collect();
        if let Some(&heir) = minions.choose(&mut game.rng) {
            game.players[heir].role = Some(Role::Imp);
            tracing::info!(code = %game.code, player = %game.players[heir].id, "demon succession");
            out.push((
                Recipient::Player(game.players[heir].id),
                Notification::RoleChanged { role: Role::Imp },
            ));
        }
        effects::run(
            game,
            vec![Effect::Die {
                player: actor,
                cause: DeathCause::Suicide,
            }],
            out,
        );
        return Ok(());
    }

    let seat = game.living_seat(target)?;
    if game.players[seat].protected_tonight || game.players[seat].has_role(Role::Soldier) {
        tracing::debug!(code = %game.code, %target, "night attack blocked");
        out.push((Recipient::Player(actor), Notification::AttackBlocked));
        return Ok(());
    }
    effects::run(
        game,
        vec![Effect::Die {
            player: target,
            cause: DeathCause::NightAttack,
        }],
        out,
    );
    Ok(())
}

fn confirmed(actor: PlayerId, role: Role, targets: &[PlayerId]) -> Outbound {
    (
        Recipient::Player(actor),
        Notification::ChoiceConfirmed {
            role,
            targets: targets.to_vec(),
        },
    )
}
