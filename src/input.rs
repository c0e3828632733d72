//! Normalized input intents
//!
//! Event sources (keyboard, touch, virtual buttons) write into an
//! [`InputBuffer`] as events arrive; the host samples it exactly once at the
//! start of each tick. The simulation never sees raw platform events and
//! never reacts mid-tick.

use glam::Vec2;

use crate::consts::MIN_SWIPE_DISTANCE;

/// Directional intents a source can hold down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
    Up,
    Down,
}

/// Held-state of the four directional intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    fn set(&mut self, dir: Dir, held: bool) {
        match dir {
            Dir::Left => self.left = held,
            Dir::Right => self.right = held,
            Dir::Up => self.up = held,
            Dir::Down => self.down = held,
        }
    }
}

/// What a completed swipe gesture asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    LaneLeft,
    LaneRight,
    SpeedUp,
    SlowDown,
}

impl SwipeAction {
    /// Classify a raw swipe delta in surface units.
    ///
    /// The dominant axis wins; the gesture is dropped entirely if the
    /// dominant component is at or under the minimum distance. Surface y
    /// grows downward, so a negative dy is a swipe up.
    pub fn classify(delta: Vec2) -> Option<Self> {
        if delta.x.abs() > delta.y.abs() {
            if delta.x.abs() > MIN_SWIPE_DISTANCE {
                Some(if delta.x > 0.0 {
                    Self::LaneRight
                } else {
                    Self::LaneLeft
                })
            } else {
                None
            }
        } else if delta.y.abs() > MIN_SWIPE_DISTANCE {
            Some(if delta.y > 0.0 {
                Self::SlowDown
            } else {
                Self::SpeedUp
            })
        } else {
            None
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Absolute pointer position (surface x) overriding the vehicle position
    pub steer_to: Option<f32>,
    /// Raw delta of a swipe completed since the last tick
    pub swipe: Option<Vec2>,
}

/// Bounded intent buffer between event callbacks and the tick
///
/// Held state persists until released; one-shot intents (pointer position,
/// swipe) are latest-writer-wins and consumed by [`InputBuffer::sample`].
#[derive(Debug, Default)]
pub struct InputBuffer {
    held: HeldKeys,
    steer_to: Option<f32>,
    swipe: Option<Vec2>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, dir: Dir) {
        self.held.set(dir, true);
    }

    pub fn release(&mut self, dir: Dir) {
        self.held.set(dir, false);
    }

    /// Absolute pointer/touch position in surface coordinates
    pub fn steer(&mut self, surface_x: f32) {
        self.steer_to = Some(surface_x);
    }

    /// Completed swipe gesture, raw delta in surface units
    pub fn swipe(&mut self, delta: Vec2) {
        self.swipe = Some(delta);
    }

    /// Take this tick's input. One-shot intents are cleared; held state stays.
    pub fn sample(&mut self) -> TickInput {
        TickInput {
            held: self.held,
            steer_to: self.steer_to.take(),
            swipe: self.swipe.take(),
        }
    }
}
