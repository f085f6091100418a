//! Collision detection for the actor
//!
//! Platforms are one-way: only their top edge stops a falling actor. There is
//! no side or ceiling response, so the actor can jump up through a ledge from
//! below and walk off either end of it.

use glam::Vec2;

use super::state::{Actor, Deposit, Platform};
use crate::consts::*;
use crate::spans_overlap;

/// Whether a falling actor at `pos` with vertical velocity `vel_y` lands on `platform`
///
/// Landing requires non-negative vertical velocity, feet inside the band
/// `[platform.y, platform.y + LANDING_TOLERANCE]` and horizontal overlap.
pub fn lands_on(pos: Vec2, vel_y: f32, platform: &Platform) -> bool {
    if vel_y < 0.0 {
        return false;
    }
    let bottom = pos.y + ACTOR_HEIGHT;
    let in_band = bottom >= platform.y && bottom <= platform.y + LANDING_TOLERANCE;
    in_band && spans_overlap(pos.x, ACTOR_WIDTH, platform.x, platform.width)
}

/// Index of the first platform (in list order) the actor lands on
pub fn find_landing(actor: &Actor, platforms: &[Platform]) -> Option<usize> {
    platforms
        .iter()
        .position(|p| lands_on(actor.pos, actor.vel.y, p))
}

/// Snap the actor onto its landing platform, or mark it airborne
///
/// Returns the platform index landed on.
pub fn resolve_platforms(actor: &mut Actor, platforms: &[Platform]) -> Option<usize> {
    match find_landing(actor, platforms) {
        Some(idx) => {
            actor.pos.y = platforms[idx].y - ACTOR_HEIGHT;
            actor.vel.y = 0.0;
            actor.grounded = true;
            actor.can_jump = true;
            Some(idx)
        }
        None => {
            actor.grounded = false;
            None
        }
    }
}

/// Whether the actor is close enough to pick up `deposit`
#[inline]
pub fn within_pickup(actor_center: Vec2, deposit: &Deposit) -> bool {
    actor_center.distance(deposit.pos) < PICKUP_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ValueTier;

    fn ledge() -> Platform {
        Platform::new(250.0, 380.0, 150.0, 20.0)
    }

    fn actor_at(x: f32, y: f32, vy: f32) -> Actor {
        Actor {
            pos: Vec2::new(x, y),
            vel: Vec2::new(0.0, vy),
            grounded: false,
            can_jump: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_lands_in_tolerance_band() {
        let p = ledge();
        // Feet exactly on top
        assert!(lands_on(Vec2::new(300.0, p.y - ACTOR_HEIGHT), 0.0, &p));
        // Feet at the bottom of the band
        assert!(lands_on(Vec2::new(300.0, p.y - ACTOR_HEIGHT + LANDING_TOLERANCE), 5.0, &p));
        // Feet just below the band
        assert!(!lands_on(Vec2::new(300.0, p.y - ACTOR_HEIGHT + LANDING_TOLERANCE + 0.5), 5.0, &p));
        // Feet above the platform
        assert!(!lands_on(Vec2::new(300.0, p.y - ACTOR_HEIGHT - 1.0), 5.0, &p));
    }

    #[test]
    fn test_rising_actor_passes_through() {
        let p = ledge();
        assert!(!lands_on(Vec2::new(300.0, p.y - ACTOR_HEIGHT + 5.0), -3.0, &p));
    }

    #[test]
    fn test_requires_horizontal_overlap() {
        let p = ledge();
        let y = p.y - ACTOR_HEIGHT + 2.0;
        assert!(lands_on(Vec2::new(p.x - ACTOR_WIDTH + 1.0, y), 1.0, &p));
        assert!(!lands_on(Vec2::new(p.x - ACTOR_WIDTH, y), 1.0, &p));
        assert!(lands_on(Vec2::new(p.x + p.width - 1.0, y), 1.0, &p));
        assert!(!lands_on(Vec2::new(p.x + p.width, y), 1.0, &p));
    }

    #[test]
    fn test_resolve_snaps_and_grounds() {
        let p = ledge();
        let mut actor = actor_at(300.0, p.y - ACTOR_HEIGHT + 3.0, 4.0);
        assert_eq!(resolve_platforms(&mut actor, &[p]), Some(0));
        assert_eq!(actor.pos.y, p.y - ACTOR_HEIGHT);
        assert_eq!(actor.vel.y, 0.0);
        assert!(actor.grounded);
        assert!(actor.can_jump);
    }

    #[test]
    fn test_first_platform_in_list_wins() {
        // Two overlapping tops inside the same band
        let a = Platform::new(250.0, 380.0, 150.0, 20.0);
        let b = Platform::new(250.0, 385.0, 150.0, 20.0);
        let mut actor = actor_at(300.0, 386.0 - ACTOR_HEIGHT, 1.0);
        assert_eq!(resolve_platforms(&mut actor, &[b, a]), Some(0));
        assert_eq!(actor.pos.y, b.y - ACTOR_HEIGHT);
    }

    #[test]
    fn test_no_landing_marks_airborne() {
        let mut actor = actor_at(10.0, 10.0, 1.0);
        actor.grounded = true;
        assert_eq!(resolve_platforms(&mut actor, &[ledge()]), None);
        assert!(!actor.grounded);
        assert_eq!(actor.vel.y, 1.0);
    }

    #[test]
    fn test_pickup_radius() {
        let d = Deposit::new(0, Vec2::new(135.0, 200.0), ValueTier::Low);
        assert!(within_pickup(Vec2::new(114.0, 200.0), &d));
        assert!(!within_pickup(Vec2::new(103.0, 200.0), &d));
        // Exactly on the radius is a miss
        assert!(!within_pickup(Vec2::new(135.0, 200.0 + PICKUP_RADIUS), &d));
    }
}
