//! Lane Rush - an endless lane-dodge arcade game
//!
//! Core modules:
//! - `sim`: deterministic simulation (state machine, tick pipeline, collisions, spawning)
//! - `profile`: device-dependent surface dimensions and tuning
//! - `input`: normalized input intents sampled once per tick
//! - `game`: lifecycle orchestration wiring the sim to platform services
//! - `audio` / `highscore` / `settings` / `ui`: platform service seams

pub mod audio;
pub mod game;
pub mod highscore;
pub mod input;
pub mod profile;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::{Game, Renderer, Services};
pub use input::{InputBuffer, TickInput};
pub use profile::{DeviceClass, DeviceProfile};
pub use settings::Settings;
pub use sim::{Phase, SimState, Snapshot};

/// Game tuning constants
pub mod consts {
    /// Number of lanes across the drivable surface
    pub const LANE_COUNT: u32 = 3;
    /// Lives at the start of a run
    pub const MAX_LIVES: u8 = 3;

    /// Player-adjustable speed band
    pub const SPEED_MIN: f32 = 2.0;
    pub const SPEED_MAX: f32 = 15.0;
    /// Speed delta per tick while accelerate/decelerate is held
    pub const SPEED_STEP: f32 = 0.05;
    /// Speed delta applied by a vertical swipe
    pub const SWIPE_SPEED_STEP: f32 = 1.0;
    /// Minimum swipe magnitude in surface units
    pub const MIN_SWIPE_DISTANCE: f32 = 50.0;

    /// Points per obstacle that scrolls off the surface
    pub const SCORE_PER_MISS: u32 = 10;
    /// Score threshold is `level * LEVEL_SCORE_STEP`
    pub const LEVEL_SCORE_STEP: u32 = 100;
    /// Speed gained per level-up (difficulty escalation ignores the player band)
    pub const LEVEL_SPEED_BONUS: f32 = 0.5;

    /// Spawn interval: starting value, per-level decrease, floor (all in ticks)
    pub const SPAWN_INTERVAL_START: u32 = 120;
    pub const SPAWN_INTERVAL_STEP: u32 = 10;
    pub const SPAWN_INTERVAL_MIN: u32 = 30;

    /// Screen shake duration in ticks
    pub const SHAKE_TICKS: u32 = 20;
    /// Collision flash length in frames
    pub const FLASH_FRAMES: u32 = 5;
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
