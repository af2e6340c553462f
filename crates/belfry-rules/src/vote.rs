//! Nomination, voting, execution, and the Slayer's public shot.

use belfry_protocol::{
    DeathCause, ExecutionEntry, Notification, Outbound, Phase, PlayerId, Recipient, Role,
    TallyEntry,
};

use crate::effects::{self, Effect};
use crate::{Game, RulesError};

/// Where today's tally stands when the host calls for an execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// A single leader with the most votes.
    Candidate { target: PlayerId, votes: usize },
    /// Two or more targets share the lead; nobody dies.
    Tie(Vec<PlayerId>),
    /// No votes cast.
    None,
}

/// The sole leader of the tally, a tie, or nothing.
pub(crate) fn outcome(game: &Game) -> VoteOutcome {
    let max = game.tally.iter().map(|e| e.voters.len()).max().unwrap_or(0);
    if max == 0 {
        return VoteOutcome::None;
    }
    let leaders: Vec<PlayerId> = game
        .tally
        .iter()
        .filter(|e| e.voters.len() == max)
        .map(|e| e.target)
        .collect();
    match leaders.as_slice() {
        [target] => VoteOutcome::Candidate {
            target: *target,
            votes: max,
        },
        _ => VoteOutcome::Tie(leaders),
    }
}

/// Puts a living player up for execution. Each player can be nominated
/// once per day; nominating an unspent Virgin as a good player is
/// immediately fatal to the nominator.
pub(crate) fn nominate(
    game: &mut Game,
    actor: PlayerId,
    target: PlayerId,
) -> Result<Vec<Outbound>, RulesError> {
    game.require_phase(Phase::Day)?;
    let actor_seat = game.living_seat(actor)?;
    let target_seat = game.living_seat(target)?;
    if actor == target {
        return Err(RulesError::illegal("you cannot nominate yourself"));
    }
    if game.players[target_seat].nominated_today {
        return Err(RulesError::illegal(format!(
            "{target} was already nominated today"
        )));
    }
    game.players[target_seat].nominated_today = true;

    let mut out = vec![(
        Recipient::All,
        Notification::NominationOccurred {
            nominator: actor,
            nominee: target,
        },
    )];
    tracing::info!(code = %game.code, nominator = %actor, nominee = %target, "nomination");

    if game.players[target_seat].has_role(Role::Virgin) && !game.players[target_seat].virgin_spent
    {
        game.players[target_seat].virgin_spent = true;
        if game.players[actor_seat].is_good() {
            out.push((
                Recipient::All,
                Notification::VirginTriggered {
                    nominator: actor,
                    virgin: target,
                },
            ));
            effects::run(
                game,
                vec![Effect::Die {
                    player: actor,
                    cause: DeathCause::Virgin,
                }],
                &mut out,
            );
        }
    }
    Ok(out)
}

/// One vote per player per day. A Butler with a living master may only
/// vote after the master has.
pub(crate) fn cast_vote(
    game: &mut Game,
    actor: PlayerId,
    target: PlayerId,
) -> Result<Vec<Outbound>, RulesError> {
    game.require_phase(Phase::Day)?;
    let actor_seat = game.living_seat(actor)?;
    game.living_seat(target)?;
    if game.players[actor_seat].has_voted {
        return Err(RulesError::illegal("you already voted today"));
    }
    if !game.players[actor_seat].can_vote {
        return Err(RulesError::illegal("you cannot vote today"));
    }
    if game.players[actor_seat].has_role(Role::Butler) {
        if let Some(master) = game.players[actor_seat].master {
            let master_voted = game
                .player(master)
                .is_some_and(|m| !m.alive || m.has_voted);
            if !master_voted {
                return Err(RulesError::illegal(
                    "the Butler may only vote once their master has",
                ));
            }
        }
    }

    game.players[actor_seat].has_voted = true;
    match game.tally.iter_mut().find(|e| e.target == target) {
        Some(entry) => entry.voters.push(actor),
        None => game.tally.push(TallyEntry {
            target,
            voters: vec![actor],
        }),
    }
    Ok(vec![(
        Recipient::All,
        Notification::VoteUpdated {
            tally: game.tally.to_vec(),
        },
    )])
}

/// Host-confirmed execution of the tally leader. Ties and empty
/// tallies execute nobody; those outcomes go back to the host, who
/// announces them (or calls a revote) at the table.
pub(crate) fn confirm_execution(
    game: &mut Game,
    target: PlayerId,
) -> Result<Vec<Outbound>, RulesError> {
    game.require_phase(Phase::Day)?;
    match outcome(game) {
        VoteOutcome::None => Ok(vec![(Recipient::Host, Notification::NoExecution)]),
        VoteOutcome::Tie(targets) => {
            Ok(vec![(Recipient::Host, Notification::ExecutionTied { targets })])
        }
        VoteOutcome::Candidate {
            target: leader,
            votes,
        } => {
            if target != leader {
                return Err(RulesError::illegal(format!(
                    "{target} is not the vote leader"
                )));
            }
            let seat = game.living_seat(leader)?;
            let Some(role) = game.players[seat].role else {
                return Err(RulesError::illegal(format!("{leader} has no role")));
            };
            game.executions.push(ExecutionEntry {
                day: game.day,
                player: leader,
                role,
            });
            game.execution_today = true;
            tracing::info!(code = %game.code, %leader, votes, "execution");

            let mut out = vec![(
                Recipient::All,
                Notification::ExecutionDecided {
                    target: leader,
                    votes,
                },
            )];
            effects::run(
                game,
                vec![Effect::Die {
                    player: leader,
                    cause: DeathCause::Execution,
                }],
                &mut out,
            );
            Ok(out)
        }
    }
}

/// The Slayer's once-per-game public shot. The charge is spent whether
/// or not it hits the Demon.
pub(crate) fn slayer_shot(
    game: &mut Game,
    actor: PlayerId,
    target: PlayerId,
) -> Result<Vec<Outbound>, RulesError> {
    game.require_phase(Phase::Day)?;
    let actor_seat = game.living_seat(actor)?;
    if !game.players[actor_seat].has_role(Role::Slayer) {
        return Err(RulesError::illegal("only the Slayer can do that"));
    }
    if game.players[actor_seat].slayer_used {
        return Err(RulesError::illegal("the Slayer's shot is already spent"));
    }
    let target_seat = game.living_seat(target)?;
    game.players[actor_seat].slayer_used = true;

    let killed = game.players[target_seat].has_role(Role::Imp);
    tracing::info!(code = %game.code, slayer = %actor, %target, killed, "slayer shot");
    let mut out = vec![(
        Recipient::All,
        Notification::SlayerShot {
            slayer: actor,
            target,
            killed,
        },
    )];
    if killed {
        effects::run(
            game,
            vec![Effect::Die {
                player: target,
                cause: DeathCause::Slain,
            }],
            &mut out,
        );
    }
    Ok(out)
}

/// Host-only: wipe the tally and let everyone vote and nominate again.
pub(crate) fn reset_votes(game: &mut Game) -> Result<Vec<Outbound>, RulesError> {
    game.require_phase(Phase::Day)?;
    game.tally.clear();
    for player in &mut game.players {
        player.has_voted = false;
        player.can_vote = true;
        player.nominated_today = false;
    }
    tracing::info!(code = %game.code, "votes reset");
    Ok(vec![(Recipient::All, Notification::VotesReset)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use belfry_protocol::{GameCode, Winner};

    // Builds a Day-phase game with the given roles dealt in seat order.
    fn rigged(roles: &[Role]) -> Game {
        let mut game = Game::new(GameCode::new("TEST"), PlayerId(1), Some(0));
        for (i, role) in roles.iter().enumerate() {
            let id = PlayerId(i as u64 + 1);
            game.join(id, format!("p{}", i + 1)).unwrap();
            game.players[i].role = Some(*role);
        }
        game.phase = Phase::Day;
        game.day = 1;
        game
    }

    #[test]
    fn sole_leader_is_executed() {
        let mut game = rigged(&[
            Role::Imp,
            Role::Chef,
            Role::Monk,
            Role::Empath,
            Role::Soldier,
        ]);
        // 3 votes for seat 2, 1 vote for seat 1.
        cast_vote(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        cast_vote(&mut game, PlayerId(3), PlayerId(2)).unwrap();
        cast_vote(&mut game, PlayerId(4), PlayerId(2)).unwrap();
        cast_vote(&mut game, PlayerId(2), PlayerId(1)).unwrap();
        assert_eq!(
            outcome(&game),
            VoteOutcome::Candidate {
                target: PlayerId(2),
                votes: 3
            }
        );

        let out = confirm_execution(&mut game, PlayerId(2)).unwrap();
        assert!(!game.player(PlayerId(2)).unwrap().alive);
        assert!(game.execution_today);
        assert_eq!(game.executions().len(), 1);
        assert!(out
            .iter()
            .any(|(_, n)| matches!(n, Notification::ExecutionDecided { votes: 3, .. })));
    }

    #[test]
    fn tied_vote_executes_nobody() {
        let mut game = rigged(&[
            Role::Imp,
            Role::Chef,
            Role::Monk,
            Role::Empath,
            Role::Soldier,
        ]);
        cast_vote(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        cast_vote(&mut game, PlayerId(3), PlayerId(2)).unwrap();
        cast_vote(&mut game, PlayerId(2), PlayerId(1)).unwrap();
        cast_vote(&mut game, PlayerId(4), PlayerId(1)).unwrap();
        assert!(matches!(outcome(&game), VoteOutcome::Tie(_)));

        let out = confirm_execution(&mut game, PlayerId(2)).unwrap();
        assert!(game.player(PlayerId(1)).unwrap().alive);
        assert!(game.player(PlayerId(2)).unwrap().alive);
        assert!(!game.execution_today);
        // The tie report goes to the host, who decides what to announce.
        assert!(out
            .iter()
            .any(|(r, n)| *r == Recipient::Host
                && matches!(n, Notification::ExecutionTied { .. })));
    }

    #[test]
    fn empty_tally_is_no_execution() {
        let mut game = rigged(&[Role::Imp, Role::Chef, Role::Monk]);
        let out = confirm_execution(&mut game, PlayerId(2)).unwrap();
        assert_eq!(out[0].0, Recipient::Host);
        assert!(matches!(out[0].1, Notification::NoExecution));
    }

    #[test]
    fn one_vote_per_day() {
        let mut game = rigged(&[Role::Imp, Role::Chef, Role::Monk]);
        cast_vote(&mut game, PlayerId(2), PlayerId(1)).unwrap();
        assert!(cast_vote(&mut game, PlayerId(2), PlayerId(3)).is_err());
    }

    #[test]
    fn butler_waits_for_master() {
        let mut game = rigged(&[Role::Imp, Role::Butler, Role::Monk]);
        game.players[1].master = Some(PlayerId(3));

        assert!(cast_vote(&mut game, PlayerId(2), PlayerId(1)).is_err());
        cast_vote(&mut game, PlayerId(3), PlayerId(1)).unwrap();
        cast_vote(&mut game, PlayerId(2), PlayerId(1)).unwrap();
    }

    #[test]
    fn butler_votes_freely_when_master_is_dead() {
        let mut game = rigged(&[Role::Imp, Role::Butler, Role::Monk]);
        game.players[1].master = Some(PlayerId(3));
        game.players[2].alive = false;
        cast_vote(&mut game, PlayerId(2), PlayerId(1)).unwrap();
    }

    #[test]
    fn virgin_kills_good_nominator_once() {
        let mut game = rigged(&[
            Role::Chef,
            Role::Virgin,
            Role::Monk,
            Role::Empath,
            Role::Imp,
        ]);
        let out = nominate(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        assert!(!game.player(PlayerId(1)).unwrap().alive);
        assert!(game.player(PlayerId(2)).unwrap().virgin_spent);
        assert!(out
            .iter()
            .any(|(_, n)| matches!(n, Notification::VirginTriggered { .. })));

        // Spent: a later re-nomination next day is harmless.
        reset_votes(&mut game).unwrap();
        nominate(&mut game, PlayerId(3), PlayerId(2)).unwrap();
        assert!(game.player(PlayerId(3)).unwrap().alive);
    }

    #[test]
    fn evil_nominator_survives_the_virgin() {
        let mut game = rigged(&[
            Role::Imp,
            Role::Virgin,
            Role::Monk,
            Role::Empath,
            Role::Chef,
        ]);
        nominate(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        assert!(game.player(PlayerId(1)).unwrap().alive);
        // The charge is still spent.
        assert!(game.player(PlayerId(2)).unwrap().virgin_spent);
    }

    #[test]
    fn repeat_nomination_same_day_is_rejected() {
        let mut game = rigged(&[Role::Imp, Role::Chef, Role::Monk]);
        nominate(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        assert!(nominate(&mut game, PlayerId(3), PlayerId(2)).is_err());
    }

    #[test]
    fn slayer_shot_kills_only_the_demon() {
        let mut game = rigged(&[
            Role::Slayer,
            Role::Imp,
            Role::Monk,
            Role::Empath,
            Role::Chef,
        ]);
        let out = slayer_shot(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        assert!(!game.player(PlayerId(2)).unwrap().alive);
        assert!(out
            .iter()
            .any(|(_, n)| matches!(n, Notification::SlayerShot { killed: true, .. })));
        assert_eq!(game.winner(), Some(Winner::Good));
    }

    #[test]
    fn slayer_shot_is_single_use() {
        let mut game = rigged(&[
            Role::Slayer,
            Role::Monk,
            Role::Imp,
            Role::Empath,
            Role::Chef,
        ]);
        let out = slayer_shot(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        assert!(game.player(PlayerId(2)).unwrap().alive);
        assert!(out
            .iter()
            .any(|(_, n)| matches!(n, Notification::SlayerShot { killed: false, .. })));
        assert!(slayer_shot(&mut game, PlayerId(1), PlayerId(3)).is_err());
    }

    #[test]
    fn saint_execution_hands_evil_the_game() {
        let mut game = rigged(&[
            Role::Imp,
            Role::Saint,
            Role::Monk,
            Role::Empath,
            Role::Chef,
        ]);
        cast_vote(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        cast_vote(&mut game, PlayerId(3), PlayerId(2)).unwrap();
        confirm_execution(&mut game, PlayerId(2)).unwrap();
        assert_eq!(game.winner(), Some(Winner::Evil));
    }

    #[test]
    fn reset_votes_clears_tally_and_flags() {
        let mut game = rigged(&[Role::Imp, Role::Chef, Role::Monk]);
        cast_vote(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        nominate(&mut game, PlayerId(1), PlayerId(2)).unwrap();
        reset_votes(&mut game).unwrap();
        assert!(game.tally().is_empty());
        assert!(!game.player(PlayerId(1)).unwrap().has_voted);
        assert!(!game.player(PlayerId(2)).unwrap().nominated_today);
    }
}
