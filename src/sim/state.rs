//! Game state and core simulation types
//!
//! Everything the frame loop reads or mutates lives in `GameState`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::box_center;
use crate::consts::*;

/// Horizontal facing of the actor sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// A static, axis-aligned collision surface. Only its top edge is solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub grounded: bool,
    /// Cleared on jump, re-armed on landing or jump release
    pub can_jump: bool,
    pub facing: Facing,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SPAWN_X, GROUND_REST_Y),
            vel: Vec2::ZERO,
            grounded: true,
            can_jump: true,
            facing: Facing::Right,
        }
    }
}

impl Actor {
    pub fn size() -> Vec2 {
        Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        box_center(self.pos, Self::size())
    }

    /// Y coordinate of the actor's feet
    pub fn bottom(&self) -> f32 {
        self.pos.y + ACTOR_HEIGHT
    }

    /// Put the actor back on the ground after falling out of the world
    pub fn reset_to_ground(&mut self) {
        self.pos.y = GROUND_REST_Y;
        self.vel.y = 0.0;
    }
}

/// Value tier of a deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueTier {
    #[default]
    Low,
    Medium,
    High,
}

impl ValueTier {
    /// Map a uniform roll in [0, 1) to a tier: 30% high, 30% medium, 40% low
    pub fn from_roll(roll: f32) -> Self {
        if roll > 0.7 {
            ValueTier::High
        } else if roll > 0.4 {
            ValueTier::Medium
        } else {
            ValueTier::Low
        }
    }

    /// Draw a tier from any random source
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_roll(rng.random::<f32>())
    }

    pub fn multiplier(self) -> u32 {
        match self {
            ValueTier::Low => 1,
            ValueTier::Medium => 2,
            ValueTier::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueTier::Low => "low",
            ValueTier::Medium => "medium",
            ValueTier::High => "high",
        }
    }
}

/// A collectible item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposit {
    /// Index in the level layout, stable for the whole session
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub tier: ValueTier,
    pub collected: bool,
}

impl Deposit {
    pub fn new(id: u32, pos: Vec2, tier: ValueTier) -> Self {
        Self {
            id,
            pos,
            tier,
            collected: false,
        }
    }

    /// Mark collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// Per-session counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub collected_count: u32,
    pub multiplier_sum: u32,
    /// Seconds left on the countdown (owned by the session controller)
    pub time_remaining: f32,
    /// Cleared exactly once, on quota or timeout
    pub active: bool,
}

impl SessionState {
    pub fn new(time_limit: f32) -> Self {
        Self {
            collected_count: 0,
            multiplier_sum: 0,
            time_remaining: time_limit,
            active: true,
        }
    }

    /// Deactivate. Returns false if already inactive.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub rng_state: RngState,
    /// Simulation frame counter
    pub frame: u64,
    pub actor: Actor,
    /// Static geometry, checked in list order
    pub platforms: Vec<Platform>,
    /// Sorted by id
    pub deposits: Vec<Deposit>,
    pub session: SessionState,
}

impl GameState {
    /// Standard level with deposit tiers rolled from `seed`
    pub fn new(seed: u64, time_limit: f32) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        Self::from_level(Level::standard(), &mut rng, rng_state, time_limit)
    }

    /// Build a state from a layout, rolling deposit tiers from `rng`
    pub fn from_level<R: Rng + ?Sized>(
        level: Level,
        rng: &mut R,
        rng_state: RngState,
        time_limit: f32,
    ) -> Self {
        let deposits = level
            .deposit_centers
            .iter()
            .enumerate()
            .map(|(i, &pos)| Deposit::new(i as u32, pos, ValueTier::roll(rng)))
            .collect();

        Self {
            rng_state,
            frame: 0,
            actor: Actor::default(),
            platforms: level.platforms,
            deposits,
            session: SessionState::new(time_limit),
        }
    }

    pub fn remaining_deposits(&self) -> impl Iterator<Item = &Deposit> {
        self.deposits.iter().filter(|d| !d.collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Random source that always yields the same bits
    struct FixedBits(u32);

    impl RngCore for FixedBits {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(ValueTier::from_roll(0.0), ValueTier::Low);
        assert_eq!(ValueTier::from_roll(0.4), ValueTier::Low);
        assert_eq!(ValueTier::from_roll(0.41), ValueTier::Medium);
        assert_eq!(ValueTier::from_roll(0.7), ValueTier::Medium);
        assert_eq!(ValueTier::from_roll(0.71), ValueTier::High);
        assert_eq!(ValueTier::from_roll(0.999), ValueTier::High);
    }

    #[test]
    fn test_tier_multipliers() {
        assert_eq!(ValueTier::Low.multiplier(), 1);
        assert_eq!(ValueTier::Medium.multiplier(), 2);
        assert_eq!(ValueTier::High.multiplier(), 3);
    }

    #[test]
    fn test_injected_rng_controls_tiers() {
        let mut rng = FixedBits(0);
        let state = GameState::from_level(Level::standard(), &mut rng, RngState::new(0), 60.0);
        assert!(state.deposits.iter().all(|d| d.tier == ValueTier::Low));

        let mut rng = FixedBits(u32::MAX);
        let state = GameState::from_level(Level::standard(), &mut rng, RngState::new(0), 60.0);
        assert!(state.deposits.iter().all(|d| d.tier == ValueTier::High));
    }

    #[test]
    fn test_tier_distribution_roughly_weighted() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            match ValueTier::roll(&mut rng) {
                ValueTier::Low => counts[0] += 1,
                ValueTier::Medium => counts[1] += 1,
                ValueTier::High => counts[2] += 1,
            }
        }
        assert!((3700..4300).contains(&counts[0]), "low: {}", counts[0]);
        assert!((2700..3300).contains(&counts[1]), "medium: {}", counts[1]);
        assert!((2700..3300).contains(&counts[2]), "high: {}", counts[2]);
    }

    #[test]
    fn test_new_state_is_seeded() {
        let a = GameState::new(42, 60.0);
        let b = GameState::new(42, 60.0);
        assert_eq!(a.deposits.len(), TOTAL_DEPOSITS);
        let tiers_a: Vec<_> = a.deposits.iter().map(|d| d.tier).collect();
        let tiers_b: Vec<_> = b.deposits.iter().map(|d| d.tier).collect();
        assert_eq!(tiers_a, tiers_b);
        assert!(a.session.active);
        assert_eq!(a.session.collected_count, 0);
    }

    #[test]
    fn test_deposit_collects_once() {
        let mut d = Deposit::new(0, Vec2::ZERO, ValueTier::High);
        assert!(d.collect());
        assert!(!d.collect());
        assert!(d.collected);
    }

    #[test]
    fn test_session_deactivates_once() {
        let mut s = SessionState::new(10.0);
        assert!(s.deactivate());
        assert!(!s.deactivate());
        assert!(!s.active);
    }
}
