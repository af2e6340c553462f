//! The game session aggregate root.
//!
//! `Game` owns the seated roster and all per-match state, and exposes
//! every inbound intent as a method returning the notifications to
//! dispatch. Callers are expected to serialize intents per game — the
//! session layer runs one actor task per `Game` for exactly that
//! reason.

use rand::rngs::StdRng;
use rand::SeedableRng;

use belfry_protocol::{
    AdminAction, DeathCause, GameCode, Intent, Notification, Outbound, Phase, PlayerId, Recipient,
    SeatReveal, TallyEntry, Winner,
};
use belfry_protocol::ExecutionEntry;

use crate::night::PendingChoice;
use crate::{assign, effects, night, vote, win, Player, RulesError};

/// One game session: roster, phase, tallies, and the injected RNG.
///
/// Seating order is semantically significant — `players` defines the
/// circular left/right adjacency the Chef and Empath count over.
pub struct Game {
    pub(crate) code: GameCode,
    pub(crate) host: PlayerId,
    pub(crate) players: Vec<Player>,
    pub(crate) phase: Phase,
    pub(crate) day: u32,
    /// Per-target ordered voter lists, valid during Day.
    pub(crate) tally: Vec<TallyEntry>,
    pub(crate) executions: Vec<ExecutionEntry>,
    pub(crate) execution_today: bool,
    /// The one good player the Fortune Teller reads as the Demon.
    pub(crate) red_herring: Option<PlayerId>,
    pub(crate) pending: Vec<PendingChoice>,
    pub(crate) winner: Option<Winner>,
    pub(crate) rng: StdRng,
}

impl Game {
    /// Creates an empty lobby owned by `host`. Pass a seed to make
    /// every deal and night outcome reproducible.
    pub fn new(code: GameCode, host: PlayerId, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            code,
            host,
            players: Vec::new(),
            phase: Phase::Lobby,
            day: 0,
            tally: Vec::new(),
            executions: Vec::new(),
            execution_today: false,
            red_herring: None,
            pending: Vec::new(),
            winner: None,
            rng,
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn code(&self) -> &GameCode {
        &self.code
    }

    pub fn host(&self) -> PlayerId {
        self.host
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn red_herring(&self) -> Option<PlayerId> {
        self.red_herring
    }

    pub fn tally(&self) -> &[TallyEntry] {
        &self.tally
    }

    pub fn executions(&self) -> &[ExecutionEntry] {
        &self.executions
    }

    /// Outstanding night choices waiting on `id`.
    pub fn pending_for(&self, id: PlayerId) -> impl Iterator<Item = &PendingChoice> {
        self.pending.iter().filter(move |c| c.player == id)
    }

    pub(crate) fn seat_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub(crate) fn living_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// Seat index of `id`, required to be alive.
    pub(crate) fn living_seat(&self, id: PlayerId) -> Result<usize, RulesError> {
        let seat = self
            .seat_of(id)
            .ok_or_else(|| RulesError::illegal(format!("{id} is not in this game")))?;
        if !self.players[seat].alive {
            return Err(RulesError::illegal(format!("{id} is dead")));
        }
        Ok(seat)
    }

    pub(crate) fn require_phase(&self, phase: Phase) -> Result<(), RulesError> {
        if self.phase != phase {
            return Err(RulesError::illegal(format!(
                "expected phase {phase}, currently {}",
                self.phase
            )));
        }
        Ok(())
    }

    fn require_host(&self, actor: PlayerId) -> Result<(), RulesError> {
        if actor != self.host {
            return Err(RulesError::NotHost);
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Intent entry point
    // -----------------------------------------------------------------

    /// Dispatches an attributed intent to its handler.
    pub fn apply(&mut self, actor: PlayerId, intent: Intent) -> Result<Vec<Outbound>, RulesError> {
        if self.phase.is_over() && !matches!(intent, Intent::Admin { .. }) {
            return Err(RulesError::illegal("the game has ended"));
        }
        match intent {
            Intent::Start => self.start(actor),
            Intent::SubmitChoice { choice } => night::submit_choice(self, actor, choice),
            Intent::Nominate { target } => vote::nominate(self, actor, target),
            Intent::Vote { target } => vote::cast_vote(self, actor, target),
            Intent::SlayerShot { target } => vote::slayer_shot(self, actor, target),
            Intent::ConfirmExecution { target } => {
                self.require_host(actor)?;
                vote::confirm_execution(self, target)
            }
            Intent::ResetVotes => {
                self.require_host(actor)?;
                vote::reset_votes(self)
            }
            Intent::AdvancePhase => self.advance_phase(actor),
            Intent::Admin { action } => self.admin(actor, action),
        }
    }

    // -----------------------------------------------------------------
    // Lobby
    // -----------------------------------------------------------------

    /// Seats a new player. Lobby only; names must be unique.
    pub fn join(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
    ) -> Result<Vec<Outbound>, RulesError> {
        self.require_phase(Phase::Lobby)?;
        let name = name.into();
        if self.seat_of(id).is_some() {
            return Err(RulesError::illegal(format!("{id} already joined")));
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(RulesError::illegal(format!("name {name:?} is taken")));
        }
        tracing::info!(code = %self.code, %id, name = %name, "player joined");
        self.players.push(Player::new(id, name.clone()));
        Ok(vec![(
            Recipient::All,
            Notification::PlayerJoined { player: id, name },
        )])
    }

    /// Removes a player before the game starts. After roles are dealt
    /// the seat is permanent, dead or alive.
    pub fn leave(&mut self, id: PlayerId) -> Result<Vec<Outbound>, RulesError> {
        self.require_phase(Phase::Lobby)?;
        let seat = self
            .seat_of(id)
            .ok_or_else(|| RulesError::illegal(format!("{id} is not in this game")))?;
        self.players.remove(seat);
        tracing::info!(code = %self.code, %id, "player left lobby");
        Ok(vec![(Recipient::All, Notification::PlayerLeft { player: id })])
    }

    /// Host only: deals roles and enters the first Night.
    pub fn start(&mut self, actor: PlayerId) -> Result<Vec<Outbound>, RulesError> {
        self.require_host(actor)?;
        self.require_phase(Phase::Lobby)?;

        let mut out = assign::assign_roles(self)?;
        out.insert(
            0,
            (
                Recipient::All,
                Notification::GameStarted {
                    code: self.code.clone(),
                    players: self.players.iter().map(|p| p.id).collect(),
                },
            ),
        );
        tracing::info!(code = %self.code, players = self.players.len(), "game started");
        out.extend(night::begin_night(self));
        Ok(out)
    }

    // -----------------------------------------------------------------
    // Phase transitions
    // -----------------------------------------------------------------

    /// Host only: Night→Day or Day→Night.
    pub fn advance_phase(&mut self, actor: PlayerId) -> Result<Vec<Outbound>, RulesError> {
        self.require_host(actor)?;
        match self.phase {
            Phase::Night => Ok(self.begin_day()),
            Phase::Day => Ok(night::begin_night(self)),
            other => Err(RulesError::illegal(format!(
                "cannot advance phase from {other}"
            ))),
        }
    }

    /// Enters Day: resets the tally and the execution flag, then runs
    /// the day-start win checks (including the Mayor's three-alive
    /// condition).
    pub(crate) fn begin_day(&mut self) -> Vec<Outbound> {
        self.phase = Phase::Day;
        self.execution_today = false;
        self.tally.clear();

        let mut out = vec![(
            Recipient::All,
            Notification::PhaseChanged {
                phase: Phase::Day,
                day: self.day,
            },
        )];
        tracing::info!(code = %self.code, day = self.day, "day begins");

        if let Some((winner, reason)) = win::evaluate(&self.players)
            .or_else(|| win::day_start(&self.players, self.execution_today))
        {
            self.end_game(winner, reason, &mut out);
        }
        out
    }

    /// Marks the game over and broadcasts the full role reveal.
    pub(crate) fn end_game(&mut self, winner: Winner, reason: &str, out: &mut Vec<Outbound>) {
        self.phase = Phase::Ended;
        self.winner = Some(winner);
        self.pending.clear();
        tracing::info!(code = %self.code, %winner, reason, "game ended");

        let roles = self
            .players
            .iter()
            .filter_map(|p| {
                p.role.map(|role| SeatReveal {
                    player: p.id,
                    name: p.name.clone(),
                    role,
                    alive: p.alive,
                })
            })
            .collect();
        out.push((
            Recipient::All,
            Notification::GameEnded {
                winner,
                reason: reason.to_owned(),
                roles,
            },
        ));
    }

    // -----------------------------------------------------------------
    // Host admin overrides
    // -----------------------------------------------------------------

    fn admin(&mut self, actor: PlayerId, action: AdminAction) -> Result<Vec<Outbound>, RulesError> {
        self.require_host(actor)?;
        if !self.phase.in_play() {
            return Err(RulesError::illegal(format!(
                "admin overrides need a running game, currently {}",
                self.phase
            )));
        }
        match action {
            AdminAction::Kill { target } => {
                self.living_seat(target)?;
                let mut out = Vec::new();
                effects::run(
                    self,
                    vec![effects::Effect::Die {
                        player: target,
                        cause: DeathCause::Admin,
                    }],
                    &mut out,
                );
                Ok(out)
            }
            AdminAction::Revive { target } => {
                let seat = self
                    .seat_of(target)
                    .ok_or_else(|| RulesError::illegal(format!("{target} is not in this game")))?;
                if self.players[seat].alive {
                    return Err(RulesError::illegal(format!("{target} is not dead")));
                }
                self.players[seat].alive = true;
                tracing::info!(code = %self.code, %target, "player revived by host");
                Ok(vec![(
                    Recipient::All,
                    Notification::PlayerRevived { player: target },
                )])
            }
            AdminAction::SetPhase { phase } => match phase {
                Phase::Night => Ok(night::begin_night(self)),
                Phase::Day => Ok(self.begin_day()),
                other => Err(RulesError::illegal(format!("cannot force phase {other}"))),
            },
        }
    }
}
