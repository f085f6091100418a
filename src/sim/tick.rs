//! Per-frame simulation step
//!
//! `advance_frame` is a pure function of the state and the sampled input. It
//! never touches audio, DOM or timers; everything observable comes back in
//! the `FrameReport`.

use super::collision::{resolve_platforms, within_pickup};
use super::snapshot::RenderSnapshot;
use super::state::{Facing, GameState, ValueTier};
use crate::consts::*;
use crate::input::InputIntent;

/// Something that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Jump started (play the jump cue)
    Jumped,
    /// Touched down after being airborne
    Landed { platform: usize },
    /// Deposit picked up
    Collected { deposit_id: u32, tier: ValueTier },
    /// Last deposit of the quota picked up; the session is now inactive
    QuotaReached,
    /// Actor dropped below the world and was put back on the ground
    Recovered,
}

/// Result of one call to `advance_frame`
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub snapshot: RenderSnapshot,
}

impl FrameReport {
    pub fn collected(&self) -> impl Iterator<Item = ValueTier> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Collected { tier, .. } => Some(*tier),
            _ => None,
        })
    }

    pub fn has(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }
}

/// Advance the game state by one frame
///
/// Does nothing but report a snapshot once the session is inactive.
pub fn advance_frame(state: &mut GameState, input: &InputIntent) -> FrameReport {
    let mut events = Vec::new();

    if !state.session.active {
        return FrameReport {
            events,
            snapshot: RenderSnapshot::from_state(state),
        };
    }

    state.frame += 1;
    let was_grounded = state.actor.grounded;
    let actor = &mut state.actor;

    // Gravity (grounded actors are held at vy = 0 by the landing snap)
    if !actor.grounded {
        actor.vel.y = (actor.vel.y + GRAVITY).min(MAX_FALL_SPEED);
    }

    // Horizontal speed is set, not accumulated. Left wins if both are held.
    if input.move_left {
        actor.vel.x = -MOVE_SPEED;
        actor.facing = Facing::Left;
    } else if input.move_right {
        actor.vel.x = MOVE_SPEED;
        actor.facing = Facing::Right;
    } else {
        actor.vel.x = 0.0;
    }

    // Jump
    if !input.jump_held {
        actor.can_jump = true;
    } else if actor.can_jump && actor.grounded {
        actor.vel.y = JUMP_STRENGTH;
        actor.grounded = false;
        actor.can_jump = false;
        events.push(GameEvent::Jumped);
    }

    actor.pos += actor.vel;

    actor.pos.x = actor.pos.x.clamp(0.0, WORLD_WIDTH - ACTOR_WIDTH);
    if actor.pos.y > WORLD_HEIGHT {
        log::warn!(
            "Actor fell out of the world at ({:.1}, {:.1}), resetting to ground",
            actor.pos.x,
            actor.pos.y
        );
        actor.reset_to_ground();
        events.push(GameEvent::Recovered);
    }

    if let Some(platform) = resolve_platforms(actor, &state.platforms) {
        if !was_grounded {
            events.push(GameEvent::Landed { platform });
        }
    }

    // Pickups
    let center = state.actor.center();
    for deposit in &mut state.deposits {
        if deposit.collected || !within_pickup(center, deposit) {
            continue;
        }
        if deposit.collect() {
            state.session.collected_count += 1;
            state.session.multiplier_sum += deposit.tier.multiplier();
            events.push(GameEvent::Collected {
                deposit_id: deposit.id,
                tier: deposit.tier,
            });
        }
    }

    if state.session.collected_count >= DEPOSIT_QUOTA && state.session.deactivate() {
        log::info!(
            "Quota reached on frame {} (multiplier sum {})",
            state.frame,
            state.session.multiplier_sum
        );
        events.push(GameEvent::QuotaReached);
    }

    FrameReport {
        events,
        snapshot: RenderSnapshot::from_state(state),
    }
}
