//! HUD and control-surface binding
//!
//! The core pushes readouts and button captions out through [`Hud`];
//! nothing here feeds back into the simulation.

use crate::sim::Phase;

/// Integer readouts shown beside the play surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub score: u32,
    pub level: u32,
    pub lives: u8,
    pub high_score: u32,
}

/// Button captions for the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlLabels {
    pub start: &'static str,
    pub pause: &'static str,
    pub mute: &'static str,
}

/// Captions matching the current phase and mute flag
pub fn control_labels(phase: Phase, muted: bool) -> ControlLabels {
    ControlLabels {
        start: if phase == Phase::Idle {
            "Start Game"
        } else {
            "Restart Game"
        },
        pause: if phase == Phase::Paused {
            "Resume"
        } else {
            "Pause"
        },
        mute: if muted { "Unmute" } else { "Mute" },
    }
}

/// Receives HUD updates from the game
pub trait Hud {
    fn stats(&mut self, stats: &Stats);
    fn controls(&mut self, labels: &ControlLabels);
    /// Final report when a run ends
    fn game_over(&mut self, score: u32, high_score: u32, level: u32);
}

/// Host without a HUD
#[derive(Debug, Default)]
pub struct NullHud;

impl Hud for NullHud {
    fn stats(&mut self, _stats: &Stats) {}
    fn controls(&mut self, _labels: &ControlLabels) {}
    fn game_over(&mut self, _score: u32, _high_score: u32, _level: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_by_phase() {
        let idle = control_labels(Phase::Idle, false);
        assert_eq!(idle.start, "Start Game");
        assert_eq!(idle.pause, "Pause");
        assert_eq!(idle.mute, "Mute");

        let running = control_labels(Phase::Running, false);
        assert_eq!(running.start, "Restart Game");
        assert_eq!(running.pause, "Pause");

        let paused = control_labels(Phase::Paused, true);
        assert_eq!(paused.pause, "Resume");
        assert_eq!(paused.mute, "Unmute");

        let over = control_labels(Phase::Over, false);
        assert_eq!(over.start, "Restart Game");
        assert_eq!(over.pause, "Pause");
    }
}
