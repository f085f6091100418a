//! Idle/demo mode - a naive bot that chases the nearest deposit
//!
//! Used by the native headless runner and the web build's attract mode. It
//! only produces input; the simulation treats it like a keyboard.

use crate::consts::*;
use crate::input::InputIntent;
use crate::sim::GameState;

/// Pick this frame's input for the bot
pub fn steer(state: &GameState) -> InputIntent {
    let center = state.actor.center();
    let Some(target) = state.remaining_deposits().min_by(|a, b| {
        a.pos
            .distance_squared(center)
            .partial_cmp(&b.pos.distance_squared(center))
            .unwrap_or(std::cmp::Ordering::Equal)
    }) else {
        return InputIntent::default();
    };

    let dx = target.pos.x - center.x;
    let above = target.pos.y < center.y - PICKUP_RADIUS;

    InputIntent {
        move_left: dx < -MOVE_SPEED,
        move_right: dx > MOVE_SPEED,
        // Tap rather than hold so the jump re-arms while airborne
        jump_held: above && state.actor.grounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::advance_frame;

    #[test]
    fn test_bot_collects_something() {
        let mut state = GameState::new(2024, 60.0);
        for _ in 0..600 {
            let input = steer(&state);
            advance_frame(&mut state, &input);
        }
        assert!(state.session.collected_count >= 1);
    }

    #[test]
    fn test_idle_when_nothing_left() {
        let mut state = GameState::new(1, 60.0);
        for d in &mut state.deposits {
            d.collected = true;
        }
        assert_eq!(steer(&state), InputIntent::default());
    }
}
