//! Chat Arena - a chat-driven team arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (registry, step engine, admission)
//! - `settings`: Arena configuration and mode presets
//! - `chat`: Boundary validation for inbound chat events
//! - `runner`: Fixed-period driver with a serialized event queue
//! - `scoreboard`: Kill leaderboard derived from step events

pub mod chat;
pub mod logging;
pub mod runner;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use chat::{ChatError, ChatEvent};
pub use runner::ArenaRunner;
pub use scoreboard::Scoreboard;
pub use settings::{ArenaConfig, ArenaMode, ConfigError};

/// Simulation configuration constants
pub mod consts {
    /// Simulation timestep in ticks (velocities are displacement per tick)
    pub const SIM_DT: f32 = 1.0;
    /// Reference timer period between steps
    pub const TICK_PERIOD_MS: u64 = 50;
    /// Maximum catch-up steps per advance to prevent spiral of death
    pub const MAX_CATCH_UP_STEPS: u32 = 8;

    /// Reference arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Engagement radius for the fixed four-player roster mode
    pub const ROSTER_ENGAGEMENT_RADIUS: f32 = 40.0;
    /// Engagement radius for the chat-driven mode
    pub const CHAT_ENGAGEMENT_RADIUS: f32 = 20.0;

    /// Per-axis spawn velocity bound (units per tick)
    pub const MAX_SPAWN_SPEED: f32 = 1.0;

    /// Health bounds
    pub const MAX_HEALTH: u8 = 100;
    pub const SPAWN_HEALTH: u8 = 100;
    pub const REVIVE_HEALTH: u8 = 50;

    /// Usernames longer than this are never admitted
    pub const MAX_NAME_LEN: usize = 100;

    /// Chat command that brings a dead entity back
    pub const REVIVE_COMMAND: &str = "!revive";

    /// Initial roster of the fixed four-player mode
    pub const DEFAULT_ROSTER: [&str; 4] = ["Alice", "Bob", "Charlie", "Diana"];
}
