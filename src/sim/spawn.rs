//! Procedural obstacle generation
//!
//! One obstacle at a time, on a tick counter whose interval shrinks as the
//! difficulty escalates. Lane, size and color are sampled uniformly; the
//! obstacle starts fully above the surface and is centered in its lane.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, SimState};
use crate::consts::LANE_COUNT;
use crate::profile::DeviceProfile;

/// Fill colors obstacles are drawn in, sampled uniformly
pub const OBSTACLE_PALETTE: [u32; 7] = [
    0xe74c3c, 0xf39c12, 0x2ecc71, 0x9b59b6, 0x1abc9c, 0x3498db, 0xe67e22,
];

/// Advance the spawn counter, emitting at most one obstacle
pub fn advance_spawner(state: &mut SimState, profile: &DeviceProfile) {
    state.ticks_since_spawn += 1;
    if state.ticks_since_spawn > state.spawn_interval {
        let obstacle = sample_obstacle(&mut state.rng, profile);
        state.obstacles.push(obstacle);
        state.ticks_since_spawn = 0;
    }
}

/// Sample a new obstacle in a random lane with device-scaled dimensions
pub fn sample_obstacle<R: Rng>(rng: &mut R, profile: &DeviceProfile) -> Obstacle {
    let lane = rng.random_range(0..LANE_COUNT);
    let width = rng.random_range(profile.obstacle_min_width..profile.obstacle_max_width);
    let height = rng.random_range(profile.obstacle_min_height..profile.obstacle_max_height);
    let x = lane as f32 * profile.lane_width + (profile.lane_width - width) / 2.0;
    let color = OBSTACLE_PALETTE[rng.random_range(0..OBSTACLE_PALETTE.len())];
    Obstacle {
        pos: Vec2::new(x, -height),
        size: Vec2::new(width, height),
        color,
    }
}
