//! The level layout
//!
//! One hand-placed screen: a ground strip, seven floating ledges and twelve
//! deposit spots. Deposit tiers are rolled per session, positions are not.

use glam::Vec2;

use super::state::Platform;
use crate::consts::*;

/// Static geometry and deposit spawn points for a session
#[derive(Debug, Clone)]
pub struct Level {
    /// Checked in this order during landing resolution
    pub platforms: Vec<Platform>,
    /// Deposit centers
    pub deposit_centers: Vec<Vec2>,
}

/// Height a deposit floats above the surface it sits on
const DEPOSIT_HOVER: f32 = 25.0;

const PLATFORMS: [Platform; 8] = [
    Platform::new(0.0, GROUND_Y, WORLD_WIDTH, WORLD_HEIGHT - GROUND_Y),
    Platform::new(250.0, 380.0, 150.0, 20.0),
    Platform::new(50.0, 320.0, 140.0, 20.0),
    Platform::new(450.0, 300.0, 150.0, 20.0),
    Platform::new(620.0, 230.0, 140.0, 20.0),
    Platform::new(300.0, 220.0, 120.0, 20.0),
    Platform::new(80.0, 170.0, 130.0, 20.0),
    Platform::new(480.0, 130.0, 120.0, 20.0),
];

/// (platform index, horizontal offset from the platform's left edge)
const DEPOSIT_SPOTS: [(usize, f32); TOTAL_DEPOSITS] = [
    (0, 220.0),
    (0, 560.0),
    (0, 740.0),
    (1, 40.0),
    (1, 115.0),
    (2, 70.0),
    (3, 100.0),
    (4, 50.0),
    (5, 60.0),
    (6, 30.0),
    (6, 100.0),
    (7, 60.0),
];

impl Level {
    /// The one shipped layout
    pub fn standard() -> Self {
        let platforms = PLATFORMS.to_vec();
        let deposit_centers = DEPOSIT_SPOTS
            .iter()
            .map(|&(idx, dx)| {
                let p = &platforms[idx];
                Vec2::new(p.x + dx, p.y - DEPOSIT_HOVER)
            })
            .collect();

        Self {
            platforms,
            deposit_centers,
        }
    }

    /// The platform the actor spawns on and falls back to
    pub fn ground(&self) -> &Platform {
        &self.platforms[0]
    }
}
