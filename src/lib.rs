//! Chaotic Pong - two-paddle arcade Pong with abilities
//!
//! Core modules:
//! - `sim`: Match simulation (physics, scoring, power-ups, bot AI)
//! - `settings`: Match configuration, validation and JSON persistence
//! - `controls`: Default key bindings and per-tick input snapshots

pub mod controls;
pub mod settings;
pub mod sim;

pub use controls::{KeyBindings, KeyboardState};
pub use settings::{ConfigError, GameMode, Settings, SettingsError, WinningScore};

/// Game configuration constants
///
/// Distances are in field pixels, velocities in pixels per tick, times in seconds.
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 900.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 22.0;
    pub const PADDLE_HEIGHT: f32 = 135.0;
    pub const MIN_PADDLE_HEIGHT: f32 = 60.0;
    pub const PADDLE_SHRINK_RATE: f32 = 8.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Gap between a paddle and its side wall
    pub const PADDLE_MARGIN: f32 = 50.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 22.0;
    pub const INITIAL_BALL_SPEED: f32 = 10.0;
    /// Per-axis speed boost on a normal paddle hit (multiplicative)
    pub const BALL_SPEED_INCREASE: f32 = 1.05;

    /// Size-up
    pub const SIZE_UP_DURATION: f64 = 5.0;
    pub const SIZE_UP_COOLDOWN: f64 = 10.0;
    pub const SIZE_UP_MULTIPLIER: f32 = 1.5;

    /// Speed-up
    pub const SPEED_UP_DURATION: f64 = 3.0;
    pub const SPEED_UP_COOLDOWN: f64 = 15.0;
    pub const SPEED_UP_MULTIPLIER: f32 = 2.0;

    /// Reverse
    pub const REVERSE_COOLDOWN: f64 = 30.0;

    /// Slow-down
    pub const SLOW_DURATION: f64 = 5.0;
    pub const SLOW_COOLDOWN: f64 = 20.0;
    pub const SLOW_MULTIPLIER: f32 = 0.7;

    /// Chaos
    pub const CHAOS_DURATION: f64 = 3.0;
    pub const CHAOS_COOLDOWN: f64 = 30.0;
    pub const CHAOS_SPEED_MULTIPLIER: f32 = 4.0;
    pub const CHAOS_SIZE_MULTIPLIER: f32 = 0.75;

    /// Powershot
    pub const POWERSHOT_COOLDOWN: f64 = 15.0;
    pub const POWERSHOT_MULTIPLIER: f32 = 3.0;

    /// Stealth
    pub const STEALTH_DURATION: f64 = 2.0;
    pub const STEALTH_COOLDOWN: f64 = 15.0;

    /// Pinpoint
    pub const PINPOINT_COOLDOWN: f64 = 10.0;

    /// Most abilities a match may enable
    pub const MAX_ENABLED_ABILITIES: usize = 3;
}
