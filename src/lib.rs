//! Deposit Run - a single-screen platformer minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `session`: Countdown timer, grace delay and presenter dispatch
//! - `input`: Keyboard mapping to per-frame input intent
//! - `settings`: Player preferences and session tuning
//! - `audio`: Web Audio sound cues (wasm only)
//! - `autopilot`: Demo bot used by the headless runner and attract mode

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod autopilot;
pub mod error;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{AudioError, SettingsError};
pub use input::{InputIntent, KeyAction};
pub use session::{Outcome, Presenter, Session, SessionSummary};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Physics values are per frame, not per second. The driver is expected to
/// call `advance_frame` at `FRAME_RATE`.
pub mod consts {
    /// Simulation frames per second
    pub const FRAME_RATE: f32 = 60.0;
    /// Fixed frame duration in seconds
    pub const FRAME_DT: f32 = 1.0 / FRAME_RATE;
    /// Maximum catch-up frames per display refresh
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 500.0;

    /// Actor size
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 40.0;

    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.6;
    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 15.0;
    /// Horizontal speed while a direction is held
    pub const MOVE_SPEED: f32 = 4.0;
    /// Initial vertical velocity of a jump (negative is up)
    pub const JUMP_STRENGTH: f32 = -12.0;

    /// Depth of the band below a platform top that still counts as a landing
    pub const LANDING_TOLERANCE: f32 = 15.0;

    /// Top of the ground platform
    pub const GROUND_Y: f32 = 460.0;
    /// Actor spawn / fall-through recovery position
    pub const SPAWN_X: f32 = 100.0;
    pub const GROUND_REST_Y: f32 = GROUND_Y - ACTOR_HEIGHT;

    /// Deposits
    pub const TOTAL_DEPOSITS: usize = 12;
    pub const DEPOSIT_QUOTA: u32 = 12;
    /// Center-to-center distance below which a deposit is picked up
    pub const PICKUP_RADIUS: f32 = 32.0;
    /// Visual size of a deposit (presentation only)
    pub const DEPOSIT_SIZE: f32 = 30.0;

    /// Session defaults
    pub const DEFAULT_TIME_LIMIT_SECS: f32 = 60.0;
    pub const DEFAULT_GRACE_DELAY_SECS: f32 = 0.5;
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(top_left: Vec2, size: Vec2) -> Vec2 {
    top_left + size * 0.5
}

/// Whether two 1D spans [a_min, a_min + a_len) and [b_min, b_min + b_len) overlap
#[inline]
pub fn spans_overlap(a_min: f32, a_len: f32, b_min: f32, b_len: f32) -> bool {
    a_min < b_min + b_len && a_min + a_len > b_min
}
