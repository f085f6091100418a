//! Read-only view of the state handed to the presentation layer each frame

use glam::Vec2;
use serde::Serialize;

use super::state::{Facing, GameState};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    /// Actor top-left corner
    pub actor_pos: Vec2,
    pub facing: Facing,
    pub grounded: bool,
    pub collected_count: u32,
    pub multiplier_sum: u32,
    pub time_remaining: f32,
}

impl RenderSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            actor_pos: state.actor.pos,
            facing: state.actor.facing,
            grounded: state.actor.grounded,
            collected_count: state.session.collected_count,
            multiplier_sum: state.session.multiplier_sum,
            time_remaining: state.session.time_remaining,
        }
    }

    /// Whole seconds left, rounded up the way a countdown reads
    pub fn seconds_left(&self) -> u32 {
        self.time_remaining.max(0.0).ceil() as u32
    }
}
