//! Session store: creates, tracks, and routes players to sessions.

use std::collections::HashMap;

use belfry_protocol::{GameCode, Intent, PlayerId};

use crate::actor::spawn_session;
use crate::{PlayerSender, SessionConfig, SessionError, SessionHandle, SessionInfo};

/// Tracks all live sessions and which player sits in which one.
///
/// This is the entry point for session operations from higher layers
/// (a server accept loop, a bot harness, the demo driver).
pub struct SessionStore {
    /// Live sessions, keyed by their game code.
    sessions: HashMap<GameCode, SessionHandle>,

    /// Maps each player to the session they are seated in. A player
    /// sits in at most one session at a time.
    player_sessions: HashMap<PlayerId, GameCode>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            player_sessions: HashMap::new(),
        }
    }

    /// Creates a session under `code`, hosted by `host`. The host still
    /// has to join to get a seat and a channel.
    pub fn create(
        &mut self,
        code: GameCode,
        host: PlayerId,
        config: SessionConfig,
    ) -> Result<SessionHandle, SessionError> {
        if self.sessions.contains_key(&code) {
            return Err(SessionError::CodeTaken(code));
        }
        let handle = spawn_session(code.clone(), host, config);
        self.sessions.insert(code.clone(), handle.clone());
        tracing::info!(%code, %host, "session created");
        Ok(handle)
    }

    /// Seats a player in the session named by `code`.
    ///
    /// Enforces the one-session-at-a-time invariant.
    pub async fn join(
        &mut self,
        player: PlayerId,
        code: &GameCode,
        name: impl Into<String>,
        sender: PlayerSender,
    ) -> Result<(), SessionError> {
        if self.player_sessions.contains_key(&player) {
            return Err(SessionError::AlreadyInSession(player));
        }
        let handle = self
            .sessions
            .get(code)
            .ok_or_else(|| SessionError::NotFound(code.clone()))?;

        handle.join(player, name, sender).await?;
        self.player_sessions.insert(player, code.clone());
        Ok(())
    }

    /// Removes a player from their current session.
    pub async fn leave(&mut self, player: PlayerId) -> Result<(), SessionError> {
        let code = self
            .player_sessions
            .get(&player)
            .cloned()
            .ok_or(SessionError::NotInSession(player))?;

        if let Some(handle) = self.sessions.get(&code) {
            handle.leave(player).await?;
        }
        self.player_sessions.remove(&player);
        Ok(())
    }

    /// Routes a game intent from a player to their session.
    pub async fn route_intent(
        &self,
        player: PlayerId,
        intent: Intent,
    ) -> Result<(), SessionError> {
        let code = self
            .player_sessions
            .get(&player)
            .ok_or(SessionError::NotInSession(player))?;
        let handle = self
            .sessions
            .get(code)
            .ok_or_else(|| SessionError::NotFound(code.clone()))?;
        handle.intent(player, intent).await
    }

    /// Returns info about a specific session.
    pub async fn info(&self, code: &GameCode) -> Result<SessionInfo, SessionError> {
        let handle = self
            .sessions
            .get(code)
            .ok_or_else(|| SessionError::NotFound(code.clone()))?;
        handle.info().await
    }

    /// Shuts down a session and unseats all its players.
    pub async fn destroy(&mut self, code: &GameCode) -> Result<(), SessionError> {
        let handle = self
            .sessions
            .remove(code)
            .ok_or_else(|| SessionError::NotFound(code.clone()))?;

        let _ = handle.shutdown().await;
        self.player_sessions.retain(|_, c| c != code);

        tracing::info!(%code, "session destroyed");
        Ok(())
    }

    /// The code of the session a player sits in, if any.
    pub fn player_session(&self, player: &PlayerId) -> Option<&GameCode> {
        self.player_sessions.get(player)
    }

    /// A cloned handle for direct use, bypassing the routing index.
    pub fn handle(&self, code: &GameCode) -> Option<SessionHandle> {
        self.sessions.get(code).cloned()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
