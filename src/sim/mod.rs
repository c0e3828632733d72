//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed per-tick deltas only, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies; outcomes leave as events
//!   and snapshots

pub mod collision;
pub mod effects;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use effects::EffectsState;
pub use spawn::{OBSTACLE_PALETTE, sample_obstacle};
pub use state::{Obstacle, Phase, SimState, Snapshot, TickEvent, Vehicle, snapshot};
pub use tick::tick;
