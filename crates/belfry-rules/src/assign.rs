//! Role assignment at game start.
//!
//! Minions are drawn first so the Baron's outsider adjustment is known
//! before the good roles are sampled. Every dealt role is unique; the
//! deal is a bijection from seats to roles.

use rand::seq::{IndexedRandom, SliceRandom};

use belfry_protocol::{Notification, Outbound, Recipient, Role, Team};

use crate::{Game, RulesError};

/// Team quotas by roster size: (townsfolk, outsiders, minions, demons).
fn quota(n: usize) -> Result<(usize, usize, usize, usize), RulesError> {
    match n {
        5 => Ok((3, 0, 1, 1)),
        6 => Ok((3, 1, 1, 1)),
        7 => Ok((5, 0, 1, 1)),
        8 => Ok((5, 1, 1, 1)),
        9 => Ok((5, 2, 1, 1)),
        10 => Ok((7, 0, 2, 1)),
        other => Err(RulesError::UnsupportedRosterSize(other)),
    }
}

/// Draws `count` distinct roles from `pool` with the game RNG.
fn draw(
    game: &mut Game,
    pool: &[Role],
    count: usize,
    team: Team,
) -> Result<Vec<Role>, RulesError> {
    if count > pool.len() {
        return Err(RulesError::RolePoolExhausted {
            team,
            need: count,
            have: pool.len(),
        });
    }
    let mut pool = pool.to_vec();
    pool.shuffle(&mut game.rng);
    pool.truncate(count);
    Ok(pool)
}

/// Deals roles to every seat and picks the Fortune Teller's red
/// herring. Emits one private `RoleAssigned` per player.
pub(crate) fn assign_roles(game: &mut Game) -> Result<Vec<Outbound>, RulesError> {
    let (mut townsfolk_n, mut outsider_n, minion_n, demon_n) = quota(game.players.len())?;

    let minions = draw(game, &Role::MINIONS, minion_n, Team::Minion)?;
    if minions.contains(&Role::Baron) {
        outsider_n += 2;
        townsfolk_n = townsfolk_n.saturating_sub(2);
    }
    let townsfolk = draw(game, &Role::TOWNSFOLK, townsfolk_n, Team::Townsfolk)?;
    let outsiders = draw(game, &Role::OUTSIDERS, outsider_n, Team::Outsider)?;
    let demons = draw(game, &Role::DEMONS, demon_n, Team::Demon)?;

    let mut deck: Vec<Role> = Vec::with_capacity(game.players.len());
    deck.extend(townsfolk);
    deck.extend(outsiders);
    deck.extend(minions);
    deck.extend(demons);
    deck.shuffle(&mut game.rng);

    let mut out = Vec::with_capacity(deck.len());
    for (seat, role) in deck.into_iter().enumerate() {
        game.players[seat].role = Some(role);
        out.push((
            Recipient::Player(game.players[seat].id),
            Notification::RoleAssigned { role },
        ));
        tracing::debug!(code = %game.code, player = %game.players[seat].id, %role, "role dealt");
    }

    let good: Vec<_> = game
        .players
        .iter()
        .filter(|p| p.is_good())
        .map(|p| p.id)
        .collect();
    game.red_herring = good.choose(&mut game.rng).copied();

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use belfry_protocol::{GameCode, PlayerId};

    fn lobby(n: u64, seed: u64) -> Game {
        let mut game = Game::new(GameCode::new("TEST"), PlayerId(1), Some(seed));
        for i in 1..=n {
            game.join(PlayerId(i), format!("p{i}")).unwrap();
        }
        game
    }

    fn team_counts(game: &Game) -> (usize, usize, usize, usize) {
        let count = |team: Team| {
            game.players()
                .iter()
                .filter(|p| p.role.is_some_and(|r| r.team() == team))
                .count()
        };
        (
            count(Team::Townsfolk),
            count(Team::Outsider),
            count(Team::Minion),
            count(Team::Demon),
        )
    }

    #[test]
    fn rejects_out_of_range_rosters() {
        for n in [0, 4, 11] {
            assert!(matches!(
                quota(n),
                Err(RulesError::UnsupportedRosterSize(m)) if m == n
            ));
        }
    }

    #[test]
    fn deals_match_quota_or_baron_shift() {
        for seed in 0..40 {
            let mut game = lobby(7, seed);
            assign_roles(&mut game).unwrap();
            let baron = game.players().iter().any(|p| p.has_role(Role::Baron));
            let expected = if baron { (3, 2, 1, 1) } else { (5, 0, 1, 1) };
            assert_eq!(team_counts(&game), expected, "seed {seed}");
        }
    }

    #[test]
    fn every_role_is_unique() {
        for seed in 0..40 {
            let mut game = lobby(10, seed);
            assign_roles(&mut game).unwrap();
            let mut roles: Vec<_> = game.players().iter().filter_map(|p| p.role).collect();
            roles.sort_by_key(|r| *r as u8);
            roles.dedup();
            assert_eq!(roles.len(), 10, "seed {seed}");
        }
    }

    #[test]
    fn exactly_one_demon_dealt() {
        let mut game = lobby(8, 7);
        assign_roles(&mut game).unwrap();
        let demons = game
            .players()
            .iter()
            .filter(|p| p.role.is_some_and(|r| r.team() == Team::Demon))
            .count();
        assert_eq!(demons, 1);
    }

    #[test]
    fn red_herring_is_a_good_player() {
        for seed in 0..20 {
            let mut game = lobby(6, seed);
            assign_roles(&mut game).unwrap();
            let herring = game.red_herring().expect("herring chosen");
            assert!(game.player(herring).unwrap().is_good(), "seed {seed}");
        }
    }

    #[test]
    fn nine_seats_with_baron_exhausts_outsiders() {
        // 9 players want 2 outsiders; a Baron raises that to 4 against a
        // pool of 3.
        let mut saw_exhaustion = false;
        for seed in 0..200 {
            let mut game = lobby(9, seed);
            match assign_roles(&mut game) {
                Ok(_) => {
                    assert!(!game.players().iter().any(|p| p.has_role(Role::Baron)));
                }
                Err(RulesError::RolePoolExhausted { team, need, have }) => {
                    assert_eq!(team, Team::Outsider);
                    assert_eq!((need, have), (4, 3));
                    saw_exhaustion = true;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert!(saw_exhaustion, "no seed drew the Baron at 9 seats");
    }

    #[test]
    fn same_seed_same_deal() {
        let mut a = lobby(8, 99);
        let mut b = lobby(8, 99);
        assign_roles(&mut a).unwrap();
        assign_roles(&mut b).unwrap();
        let roles = |g: &Game| g.players().iter().map(|p| p.role).collect::<Vec<_>>();
        assert_eq!(roles(&a), roles(&b));
        assert_eq!(a.red_herring(), b.red_herring());
    }
}
