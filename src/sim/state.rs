//! Game state and core simulation types
//!
//! [`SimState`] is the single owned value holding everything a run mutates.
//! It is touched only from inside `tick()` and the lifecycle commands; there
//! are no ambient globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Rect;
use super::effects::EffectsState;
use crate::consts::{MAX_LIVES, SPAWN_INTERVAL_START};
use crate::profile::DeviceProfile;

/// Lifecycle state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Before the first start
    Idle,
    /// Active gameplay
    Running,
    /// Suspended mid-run, resumable
    Paused,
    /// Run ended by losing the last life; a start request begins a new run
    Over,
}

/// The player's vehicle. Only `x` ever changes after a resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vehicle {
    /// Left edge, kept inside the drivable band
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Vehicle {
    pub fn new(profile: &DeviceProfile) -> Self {
        Self {
            x: profile.car_start_x(),
            y: profile.car_y,
            width: profile.car_width,
            height: profile.car_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A spawned obstacle. No identity beyond membership in the live set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Packed 0xRRGGBB fill color
    pub color: u32,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Things that happened during a tick, drained by the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Vehicle hit an obstacle; the obstacle is gone
    Collision { lives_left: u8 },
    /// An obstacle scrolled off the surface
    Scored { total: u32 },
    LevelUp { level: u32 },
    /// Last life lost; phase is now [`Phase::Over`]
    GameOver { score: u32, level: u32 },
}

/// Complete simulation state for one run
#[derive(Debug)]
pub struct SimState {
    pub score: u32,
    pub level: u32,
    pub lives: u8,
    /// World scroll per tick; obstacles fall by this much
    pub speed: f32,
    pub phase: Phase,
    /// Suppresses future audio cue requests, never already-issued ones
    pub muted: bool,
    /// Track scroll offset, wraps at the surface height
    pub scroll: f32,
    pub vehicle: Vehicle,
    pub obstacles: Vec<Obstacle>,
    /// Ticks since the last spawn
    pub ticks_since_spawn: u32,
    /// Current spawn interval in ticks, shrinks with difficulty
    pub spawn_interval: u32,
    pub effects: EffectsState,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<TickEvent>,
}

impl SimState {
    /// Fresh state in [`Phase::Idle`], waiting for the first start
    pub fn new(profile: &DeviceProfile, seed: u64) -> Self {
        Self {
            score: 0,
            level: 1,
            lives: MAX_LIVES,
            speed: profile.base_speed,
            phase: Phase::Idle,
            muted: false,
            scroll: 0.0,
            vehicle: Vehicle::new(profile),
            obstacles: Vec::new(),
            ticks_since_spawn: 0,
            spawn_interval: SPAWN_INTERVAL_START,
            effects: EffectsState::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Re-initialize everything for a new run and enter [`Phase::Running`].
    ///
    /// The mute preference and the RNG stream survive; nothing from a prior
    /// run's obstacles or effects does.
    pub fn reset(&mut self, profile: &DeviceProfile) {
        self.score = 0;
        self.level = 1;
        self.lives = MAX_LIVES;
        self.speed = profile.base_speed;
        self.phase = Phase::Running;
        self.scroll = 0.0;
        self.vehicle = Vehicle::new(profile);
        self.obstacles.clear();
        self.ticks_since_spawn = 0;
        self.spawn_interval = SPAWN_INTERVAL_START;
        self.effects.clear();
        self.events.clear();
    }

    /// Drain the events emitted since the last call
    pub fn take_events(&mut self) -> Vec<TickEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Read-only view of one tick's outcome, handed to the renderer
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub vehicle: &'a Vehicle,
    pub obstacles: &'a [Obstacle],
    pub scroll_offset: f32,
    pub speed: f32,
    pub shake_offset: Vec2,
    pub flash_active: bool,
    pub surface_width: f32,
    pub surface_height: f32,
    pub lane_width: f32,
}

impl Snapshot<'_> {
    /// HUD speedometer reading
    pub fn speedometer_kmh(&self) -> u32 {
        (self.speed * 10.0).round() as u32
    }
}

/// Assemble the renderer snapshot for the current state
pub fn snapshot<'a>(state: &'a SimState, profile: &DeviceProfile) -> Snapshot<'a> {
    Snapshot {
        vehicle: &state.vehicle,
        obstacles: &state.obstacles,
        scroll_offset: state.scroll,
        speed: state.speed,
        shake_offset: state.effects.shake_offset,
        flash_active: state.effects.flash_active(),
        surface_width: profile.surface_width,
        surface_height: profile.surface_height,
        lane_width: profile.lane_width,
    }
}
