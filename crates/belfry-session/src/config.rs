//! Session configuration.

/// Per-session settings, fixed at creation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Hard cap on seated players; the rules engine additionally
    /// requires 5-10 at start.
    pub max_players: usize,
    /// Bound on the actor's command channel.
    pub channel_size: usize,
    /// RNG seed for reproducible deals and night outcomes. `None`
    /// seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_players: 10,
            channel_size: 64,
            seed: None,
        }
    }
}
