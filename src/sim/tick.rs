//! The per-tick update pipeline
//!
//! One call to [`tick`] advances the whole simulation by one frame: input is
//! applied, the world scrolls, an obstacle may spawn, collisions resolve,
//! difficulty escalates and the feedback timers decay. Every delta is a
//! constant applied once per call; effective speed therefore follows the
//! host's callback rate.

use crate::consts::{
    LEVEL_SCORE_STEP, LEVEL_SPEED_BONUS, SCORE_PER_MISS, SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_STEP,
    SPEED_MAX, SPEED_MIN, SPEED_STEP, SWIPE_SPEED_STEP,
};
use crate::input::{SwipeAction, TickInput};
use crate::profile::DeviceProfile;

use super::spawn::advance_spawner;
use super::state::{Phase, SimState, TickEvent};

/// Advance the simulation by one tick.
///
/// No-op unless the run is in [`Phase::Running`]; returns whether the
/// pipeline executed. A lethal collision ends the run mid-pipeline: the
/// remaining stages are skipped and obstacles not yet reached keep their
/// positions in the terminal snapshot.
pub fn tick(state: &mut SimState, profile: &DeviceProfile, input: &TickInput) -> bool {
    if state.phase != Phase::Running {
        return false;
    }

    apply_vehicle_input(state, profile, input);
    advance_scroll(state, profile);
    advance_spawner(state, profile);
    if resolve_collisions(state, profile) {
        return true;
    }
    advance_difficulty(state);
    state.effects.decay(&mut state.rng);
    true
}

/// Translate this tick's intents into vehicle and speed deltas
fn apply_vehicle_input(state: &mut SimState, profile: &DeviceProfile, input: &TickInput) {
    let mut x = state.vehicle.x;
    if input.held.left {
        x -= profile.car_speed;
    }
    if input.held.right {
        x += profile.car_speed;
    }
    // An absolute pointer position wins over held directions
    if let Some(surface_x) = input.steer_to {
        x = surface_x - state.vehicle.width / 2.0;
    }
    if let Some(delta) = input.swipe {
        match SwipeAction::classify(delta) {
            Some(SwipeAction::LaneLeft) => x -= profile.lane_width,
            Some(SwipeAction::LaneRight) => x += profile.lane_width,
            Some(SwipeAction::SpeedUp) => {
                if state.speed < SPEED_MAX {
                    state.speed = (state.speed + SWIPE_SPEED_STEP).min(SPEED_MAX);
                }
            }
            Some(SwipeAction::SlowDown) => {
                if state.speed > SPEED_MIN {
                    state.speed = (state.speed - SWIPE_SPEED_STEP).max(SPEED_MIN);
                }
            }
            None => {}
        }
    }
    state.vehicle.x = profile.clamp_car_x(x);

    // Manual speed control stays inside the player band. Difficulty may
    // already have pushed speed past the ceiling; holding accelerate then
    // does nothing rather than dragging it back down.
    if input.held.up && state.speed < SPEED_MAX {
        state.speed = (state.speed + SPEED_STEP).min(SPEED_MAX);
    }
    if input.held.down && state.speed > SPEED_MIN {
        state.speed = (state.speed - SPEED_STEP).max(SPEED_MIN);
    }
}

/// Advance the track, wrapping at the surface height
fn advance_scroll(state: &mut SimState, profile: &DeviceProfile) {
    state.scroll += state.speed;
    if state.scroll >= profile.surface_height {
        state.scroll = 0.0;
    }
}

/// Advance and resolve every live obstacle. Returns true when the run ended.
///
/// Iterates in reverse index order so removal never skips an entry. An
/// obstacle either collides or scores, never both; once the last life is
/// lost the loop stops immediately, leaving lower-index obstacles
/// un-advanced for this tick.
fn resolve_collisions(state: &mut SimState, profile: &DeviceProfile) -> bool {
    let car = state.vehicle.rect();
    let mut i = state.obstacles.len();
    while i > 0 {
        i -= 1;
        state.obstacles[i].pos.y += state.speed;

        if state.obstacles[i].rect().overlaps(&car) {
            state.lives = state.lives.saturating_sub(1);
            state.obstacles.remove(i);
            state.effects.trigger_shake(profile.shake_intensity);
            state.effects.trigger_flash();
            state.events.push(TickEvent::Collision {
                lives_left: state.lives,
            });
            if state.lives == 0 {
                state.phase = Phase::Over;
                state.events.push(TickEvent::GameOver {
                    score: state.score,
                    level: state.level,
                });
                return true;
            }
        } else if state.obstacles[i].pos.y > profile.surface_height {
            state.obstacles.remove(i);
            state.score += SCORE_PER_MISS;
            state.events.push(TickEvent::Scored { total: state.score });
        }
    }
    false
}

/// Escalate speed and spawn rate when the score crosses the level threshold.
///
/// At most one level per tick, even when the score jumped across several
/// thresholds at once; the next tick picks up the next threshold.
fn advance_difficulty(state: &mut SimState) {
    if state.score >= state.level * LEVEL_SCORE_STEP {
        state.level += 1;
        state.speed += LEVEL_SPEED_BONUS;
        state.spawn_interval = state
            .spawn_interval
            .saturating_sub(SPAWN_INTERVAL_STEP)
            .max(SPAWN_INTERVAL_MIN);
        state.events.push(TickEvent::LevelUp { level: state.level });
    }
}
