//! Session actor: an isolated Tokio task that owns one [`Game`].
//!
//! Each session runs in its own task, communicating with the outside
//! world through an mpsc channel. The actor is the single writer of its
//! game, so rules operations never race and never need a lock.

use std::collections::HashMap;

use belfry_protocol::{GameCode, Intent, Notification, Outbound, Phase, PlayerId, Recipient, Winner};
use belfry_rules::Game;
use tokio::sync::{mpsc, oneshot};

use crate::{SessionConfig, SessionError};

/// Channel sender delivering notifications to one player's connection
/// handler.
pub type PlayerSender = mpsc::UnboundedSender<Notification>;

/// Commands sent to a session actor through its channel.
///
/// Variants that need an answer carry a `oneshot::Sender` reply
/// channel.
pub(crate) enum SessionCommand {
    /// Seat a player and register their outbound channel.
    Join {
        player: PlayerId,
        name: String,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Remove a player (lobby) or drop their channel (in play).
    Leave {
        player: PlayerId,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Apply an attributed game intent.
    Intent {
        actor: PlayerId,
        intent: Intent,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },

    /// Request a metadata snapshot.
    GetInfo { reply: oneshot::Sender<SessionInfo> },

    /// Shut down the session.
    Shutdown,
}

/// A snapshot of session metadata (not the hidden game state).
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub code: GameCode,
    pub phase: Phase,
    pub day: u32,
    pub player_count: usize,
    pub winner: Option<Winner>,
}

/// Handle to a running session actor. Cheap to clone — just an
/// `mpsc::Sender` wrapper.
#[derive(Clone)]
pub struct SessionHandle {
    code: GameCode,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub fn code(&self) -> &GameCode {
        &self.code
    }

    /// Seats a player in the session.
    pub async fn join(
        &self,
        player: PlayerId,
        name: impl Into<String>,
        sender: PlayerSender,
    ) -> Result<(), SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Join {
                player,
                name: name.into(),
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))?
    }

    /// Removes a player from the session.
    pub async fn leave(&self, player: PlayerId) -> Result<(), SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Leave {
                player,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))?
    }

    /// Applies a game intent attributed to `actor`.
    pub async fn intent(&self, actor: PlayerId, intent: Intent) -> Result<(), SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Intent {
                actor,
                intent,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))?
    }

    /// Requests the current session info.
    pub async fn info(&self) -> Result<SessionInfo, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))
    }

    /// Tells the session to shut down.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.sender
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| SessionError::Unavailable(self.code.clone()))
    }
}

/// The internal session actor state. Runs inside a Tokio task.
struct SessionActor {
    game: Game,
    config: SessionConfig,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl SessionActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(code = %self.game.code(), "session actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                SessionCommand::Join {
                    player,
                    name,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(player, &name, sender);
                    let _ = reply.send(result);
                }
                SessionCommand::Leave { player, reply } => {
                    let result = self.handle_leave(player);
                    let _ = reply.send(result);
                }
                SessionCommand::Intent {
                    actor,
                    intent,
                    reply,
                } => {
                    let result = self.handle_intent(actor, intent);
                    let _ = reply.send(result);
                }
                SessionCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                SessionCommand::Shutdown => {
                    tracing::info!(code = %self.game.code(), "session shutting down");
                    break;
                }
            }
        }

        tracing::info!(code = %self.game.code(), "session actor stopped");
    }

    fn handle_join(
        &mut self,
        player: PlayerId,
        name: &str,
        sender: PlayerSender,
    ) -> Result<(), SessionError> {
        if self.game.players().len() >= self.config.max_players {
            return Err(belfry_rules::RulesError::IllegalAction(format!(
                "game is full ({} players)",
                self.config.max_players
            ))
            .into());
        }
        let out = self.game.join(player, name)?;
        self.senders.insert(player, sender);
        self.dispatch(out);
        Ok(())
    }

    fn handle_leave(&mut self, player: PlayerId) -> Result<(), SessionError> {
        if self.senders.remove(&player).is_none() {
            return Err(SessionError::NotInSession(player));
        }
        // In the lobby the seat is freed; once roles are dealt the seat
        // survives disconnects and only the channel goes.
        if self.game.phase() == Phase::Lobby {
            let out = self.game.leave(player)?;
            self.dispatch(out);
        } else {
            tracing::info!(code = %self.game.code(), %player, "player disconnected mid-game");
        }
        Ok(())
    }

    fn handle_intent(&mut self, actor: PlayerId, intent: Intent) -> Result<(), SessionError> {
        let out = self.game.apply(actor, intent)?;
        self.dispatch(out);
        Ok(())
    }

    /// Dispatches notifications to the correct recipients.
    fn dispatch(&self, out: Vec<Outbound>) {
        for (recipient, notification) in out {
            match recipient {
                Recipient::All => {
                    for sender in self.senders.values() {
                        let _ = sender.send(notification.clone());
                    }
                }
                Recipient::Player(player) => self.send_to(player, notification),
                Recipient::Host => self.send_to(self.game.host(), notification),
            }
        }
    }

    /// Sends to a single player. Silently drops if the receiver is
    /// gone (player disconnected).
    fn send_to(&self, player: PlayerId, notification: Notification) {
        if let Some(sender) = self.senders.get(&player) {
            let _ = sender.send(notification);
        }
    }

    fn info(&self) -> SessionInfo {
        SessionInfo {
            code: self.game.code().clone(),
            phase: self.game.phase(),
            day: self.game.day(),
            player_count: self.game.players().len(),
            winner: self.game.winner(),
        }
    }
}

/// Spawns a session actor task and returns a handle to it.
pub(crate) fn spawn_session(code: GameCode, host: PlayerId, config: SessionConfig) -> SessionHandle {
    let (tx, rx) = mpsc::channel(config.channel_size);

    let actor = SessionActor {
        game: Game::new(code.clone(), host, config.seed),
        config,
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    SessionHandle { code, sender: tx }
}
