//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-frame constants only, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (platforms by list position, deposits by id)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod level;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{find_landing, lands_on, resolve_platforms, within_pickup};
pub use level::Level;
pub use snapshot::RenderSnapshot;
pub use state::{
    Actor, Deposit, Facing, GameState, Platform, RngState, SessionState, ValueTier,
};
pub use tick::{FrameReport, GameEvent, advance_frame};
