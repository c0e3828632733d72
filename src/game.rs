//! Lifecycle orchestration
//!
//! [`Game`] owns the simulation state and the platform service seams, runs
//! the tick pipeline, and turns simulation events into cue/HUD/persistence
//! side effects. It does not own scheduling: the host calls [`Game::tick`]
//! once per display frame for as long as it returns true.

use glam::Vec2;

use crate::audio::{AudioSink, CRASH_VIBRATION_MS, Cue, HapticSink, NullAudio, NullHaptics};
use crate::highscore::{MemoryScoreStore, ScoreStore};
use crate::input::TickInput;
use crate::profile::DeviceProfile;
use crate::settings::Settings;
use crate::sim::{self, Phase, SimState, Snapshot, TickEvent};
use crate::ui::{Hud, NullHud, Stats, control_labels};

/// Draws a tick's snapshot. Must not mutate anything the core reads.
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot<'_>);
}

/// The platform services a game is wired to
pub struct Services {
    pub audio: Box<dyn AudioSink>,
    pub haptics: Box<dyn HapticSink>,
    pub store: Box<dyn ScoreStore>,
    pub hud: Box<dyn Hud>,
}

impl Services {
    /// Inert services: no sound, no vibration, session-only record
    pub fn null() -> Self {
        Self {
            audio: Box::new(NullAudio),
            haptics: Box::new(NullHaptics),
            store: Box::new(MemoryScoreStore::default()),
            hud: Box::new(NullHud),
        }
    }
}

/// The simulation loop and its lifecycle state machine
pub struct Game {
    state: SimState,
    profile: DeviceProfile,
    settings: Settings,
    high_score: u32,
    services: Services,
}

impl Game {
    /// Wire a game up. Reads the best score on record and pushes the
    /// initial HUD state.
    pub fn new(
        profile: DeviceProfile,
        seed: u64,
        settings: Settings,
        mut services: Services,
    ) -> Self {
        let high_score = services.store.load();
        let mut state = SimState::new(&profile, seed);
        state.muted = settings.muted;
        let mut game = Self {
            state,
            profile,
            settings,
            high_score,
            services,
        };
        game.push_stats();
        game.push_controls();
        game
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn muted(&self) -> bool {
        self.state.muted
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Start a new run, fully resetting any run in progress
    pub fn start(&mut self) {
        self.state.reset(&self.profile);
        log::info!("run started");
        self.push_stats();
        self.push_controls();
        if !self.state.muted {
            self.services.audio.play(Cue::BackgroundStart);
        }
    }

    /// Suspend a running game; no-op in any other phase
    pub fn pause(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }
        self.state.phase = Phase::Paused;
        self.services.audio.play(Cue::BackgroundPause);
        self.push_controls();
    }

    /// Resume a paused game; no-op in any other phase
    pub fn resume(&mut self) {
        if self.state.phase != Phase::Paused {
            return;
        }
        self.state.phase = Phase::Running;
        if !self.state.muted {
            self.services.audio.play(Cue::BackgroundResume);
        }
        self.push_controls();
    }

    /// Convenience for a single pause/resume button
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Suppress or restore future cues. Works in any phase and never
    /// affects already-issued requests.
    pub fn set_muted(&mut self, muted: bool) {
        if self.state.muted == muted {
            return;
        }
        self.state.muted = muted;
        self.settings.muted = muted;
        self.settings.save();
        if muted {
            self.services.audio.play(Cue::BackgroundPause);
        } else if self.state.phase == Phase::Running {
            self.services.audio.play(Cue::BackgroundResume);
        }
        self.push_controls();
    }

    /// Adopt new surface dimensions, carrying the vehicle's lane-relative
    /// position across the change. Degenerate dimensions are rejected and
    /// the prior profile kept.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let Some(next) = self.profile.resized(width, height) else {
            return false;
        };
        let lane_ratio =
            (self.state.vehicle.x + self.state.vehicle.width / 2.0) / self.profile.lane_width;
        self.profile = next;
        let v = &mut self.state.vehicle;
        v.width = next.car_width;
        v.height = next.car_height;
        v.y = next.car_y;
        v.x = next.clamp_car_x(lane_ratio * next.lane_width - next.car_width / 2.0);
        true
    }

    /// Advance one tick. Returns whether the host should schedule another.
    pub fn tick(&mut self, input: &TickInput) -> bool {
        sim::tick(&mut self.state, &self.profile, input);
        self.dispatch_events();
        self.state.phase == Phase::Running
    }

    /// Hand the current state to a renderer
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&self.snapshot());
    }

    /// Read-only view for the renderer, honoring reduced motion
    pub fn snapshot(&self) -> Snapshot<'_> {
        let mut snap = sim::snapshot(&self.state, &self.profile);
        if !self.settings.effects_enabled() {
            snap.shake_offset = Vec2::ZERO;
            snap.flash_active = false;
        }
        snap
    }

    fn dispatch_events(&mut self) {
        let events = self.state.take_events();
        if events.is_empty() {
            return;
        }
        for event in events {
            match event {
                TickEvent::Collision { .. } => {
                    if !self.state.muted {
                        self.services.audio.play(Cue::Crash);
                        if self.settings.haptics {
                            self.services.haptics.vibrate(&CRASH_VIBRATION_MS);
                        }
                    }
                }
                TickEvent::Scored { .. } => {}
                TickEvent::LevelUp { level } => {
                    log::debug!("reached level {level}");
                }
                TickEvent::GameOver { score, level } => {
                    self.services.audio.play(Cue::BackgroundStop);
                    if score > self.high_score {
                        self.high_score = score;
                        self.services.store.save(score);
                        log::info!("new high score: {score}");
                    }
                    log::info!("game over at level {level} with {score} points");
                    self.services.hud.game_over(score, self.high_score, level);
                    self.push_controls();
                }
            }
        }
        self.push_stats();
    }

    fn push_stats(&mut self) {
        self.services.hud.stats(&Stats {
            score: self.state.score,
            level: self.state.level,
            lives: self.state.lives,
            high_score: self.high_score,
        });
    }

    fn push_controls(&mut self) {
        self.services
            .hud
            .controls(&control_labels(self.state.phase, self.state.muted));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_LIVES;
    use crate::sim::Obstacle;
    use crate::ui::ControlLabels;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorded {
        cues: Vec<Cue>,
        vibrations: Vec<Vec<u32>>,
        saves: Vec<u32>,
        best: u32,
        stats: Vec<Stats>,
        labels: Vec<ControlLabels>,
        overs: Vec<(u32, u32, u32)>,
    }

    #[derive(Clone, Default)]
    struct Probe(Rc<RefCell<Recorded>>);

    impl AudioSink for Probe {
        fn play(&mut self, cue: Cue) {
            self.0.borrow_mut().cues.push(cue);
        }
    }

    impl HapticSink for Probe {
        fn vibrate(&mut self, pattern_ms: &[u32]) {
            self.0.borrow_mut().vibrations.push(pattern_ms.to_vec());
        }
    }

    impl ScoreStore for Probe {
        fn load(&mut self) -> u32 {
            self.0.borrow().best
        }

        fn save(&mut self, best: u32) {
            let mut rec = self.0.borrow_mut();
            rec.best = best;
            rec.saves.push(best);
        }
    }

    impl Hud for Probe {
        fn stats(&mut self, stats: &Stats) {
            self.0.borrow_mut().stats.push(*stats);
        }

        fn controls(&mut self, labels: &ControlLabels) {
            self.0.borrow_mut().labels.push(*labels);
        }

        fn game_over(&mut self, score: u32, high_score: u32, level: u32) {
            self.0.borrow_mut().overs.push((score, high_score, level));
        }
    }

    fn probed_game(settings: Settings) -> (Game, Probe) {
        let probe = Probe::default();
        let services = Services {
            audio: Box::new(probe.clone()),
            haptics: Box::new(probe.clone()),
            store: Box::new(probe.clone()),
            hud: Box::new(probe.clone()),
        };
        let game = Game::new(DeviceProfile::desktop(), 777, settings, services);
        (game, probe)
    }

    /// Place an obstacle so the next tick collides with the vehicle
    fn plant_collision(game: &mut Game) {
        let v = game.state.vehicle;
        let speed = game.state.speed;
        game.state.obstacles.push(Obstacle {
            pos: Vec2::new(v.x, v.y - speed),
            size: Vec2::new(v.width, v.height),
            color: 0xe74c3c,
        });
    }

    #[test]
    fn test_lifecycle_transitions() {
        let (mut game, _probe) = probed_game(Settings::default());
        assert_eq!(game.phase(), Phase::Idle);

        // Misuse before the first start is a defined no-op
        game.pause();
        game.resume();
        assert_eq!(game.phase(), Phase::Idle);

        game.start();
        assert_eq!(game.phase(), Phase::Running);

        game.pause();
        assert_eq!(game.phase(), Phase::Paused);
        // Pausing again changes nothing
        game.pause();
        assert_eq!(game.phase(), Phase::Paused);

        game.resume();
        assert_eq!(game.phase(), Phase::Running);

        game.toggle_pause();
        assert_eq!(game.phase(), Phase::Paused);
        game.toggle_pause();
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn test_ticks_ignored_while_paused() {
        let (mut game, _probe) = probed_game(Settings::default());
        game.start();
        game.pause();
        let scroll = game.state.scroll;
        assert!(!game.tick(&TickInput::default()));
        assert_eq!(game.state.scroll, scroll);
    }

    #[test]
    fn test_restart_mid_run_fully_resets() {
        let (mut game, _probe) = probed_game(Settings::default());
        game.start();
        game.state.score = 90;
        game.state.lives = 1;
        plant_collision(&mut game);
        game.start();
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.lives, MAX_LIVES);
        assert!(game.state.obstacles.is_empty());
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn test_collision_requests_cue_and_haptics() {
        let (mut game, probe) = probed_game(Settings::default());
        game.start();
        plant_collision(&mut game);
        assert!(game.tick(&TickInput::default()));

        let rec = probe.0.borrow();
        assert!(rec.cues.contains(&Cue::Crash));
        assert_eq!(rec.vibrations, vec![CRASH_VIBRATION_MS.to_vec()]);
        // Lives reached the HUD
        assert_eq!(rec.stats.last().unwrap().lives, MAX_LIVES - 1);
    }

    #[test]
    fn test_muted_suppresses_cues_not_simulation() {
        let (mut game, probe) = probed_game(Settings::default());
        game.set_muted(true);
        game.start();
        plant_collision(&mut game);
        game.tick(&TickInput::default());

        let rec = probe.0.borrow();
        assert!(!rec.cues.contains(&Cue::Crash));
        assert!(!rec.cues.contains(&Cue::BackgroundStart));
        assert!(rec.vibrations.is_empty());
        drop(rec);
        // The collision itself still happened
        assert_eq!(game.state.lives, MAX_LIVES - 1);
    }

    #[test]
    fn test_haptics_preference_respected() {
        let settings = Settings {
            haptics: false,
            ..Default::default()
        };
        let (mut game, probe) = probed_game(settings);
        game.start();
        plant_collision(&mut game);
        game.tick(&TickInput::default());

        let rec = probe.0.borrow();
        assert!(rec.cues.contains(&Cue::Crash));
        assert!(rec.vibrations.is_empty());
    }

    #[test]
    fn test_background_cue_follows_lifecycle() {
        let (mut game, probe) = probed_game(Settings::default());
        game.start();
        game.pause();
        game.resume();
        let rec = probe.0.borrow();
        assert_eq!(
            rec.cues,
            vec![Cue::BackgroundStart, Cue::BackgroundPause, Cue::BackgroundResume]
        );
    }

    #[test]
    fn test_game_over_writes_record_once() {
        let (mut game, probe) = probed_game(Settings::default());
        probe.0.borrow_mut().best = 0;
        game.start();
        game.state.score = 120;
        game.state.lives = 1;
        plant_collision(&mut game);
        assert!(!game.tick(&TickInput::default()));

        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.high_score(), 120);
        let rec = probe.0.borrow();
        assert_eq!(rec.saves, vec![120]);
        assert_eq!(rec.overs, vec![(120, 120, 1)]);
        assert!(rec.cues.contains(&Cue::BackgroundStop));
    }

    #[test]
    fn test_no_record_written_below_best() {
        let probe = Probe::default();
        probe.0.borrow_mut().best = 500;
        let services = Services {
            audio: Box::new(probe.clone()),
            haptics: Box::new(probe.clone()),
            store: Box::new(probe.clone()),
            hud: Box::new(probe.clone()),
        };
        let mut game = Game::new(DeviceProfile::desktop(), 1, Settings::default(), services);
        assert_eq!(game.high_score(), 500);

        game.start();
        game.state.score = 120;
        game.state.lives = 1;
        plant_collision(&mut game);
        game.tick(&TickInput::default());

        let rec = probe.0.borrow();
        assert!(rec.saves.is_empty());
        assert_eq!(rec.overs, vec![(120, 500, 1)]);
    }

    #[test]
    fn test_resize_keeps_lane_position() {
        let (mut game, _probe) = probed_game(Settings::default());
        game.start();
        // Park the vehicle three quarters of the way into the left lane
        let p = *game.profile();
        game.state.vehicle.x = p.clamp_car_x(0.75 * p.lane_width - p.car_width / 2.0);
        let ratio = (game.state.vehicle.x + p.car_width / 2.0) / p.lane_width;

        assert!(game.resize(300.0, 500.0));
        let q = *game.profile();
        let center = game.state.vehicle.x + q.car_width / 2.0;
        assert!((center - ratio * q.lane_width).abs() < 1e-3);
        assert_eq!(game.state.vehicle.width, q.car_width);
        assert_eq!(game.state.vehicle.y, q.car_y);

        // The center of the surface maps to the center of the surface
        game.state.vehicle.x = q.car_start_x();
        assert!(game.resize(480.0, 700.0));
        let r = *game.profile();
        assert!((game.state.vehicle.x - r.car_start_x()).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_resize_rejected() {
        let (mut game, _probe) = probed_game(Settings::default());
        let before = *game.profile();
        assert!(!game.resize(0.0, 500.0));
        assert!(!game.resize(300.0, f32::NAN));
        assert_eq!(*game.profile(), before);
    }

    #[test]
    fn test_labels_track_phase_and_mute() {
        let (mut game, probe) = probed_game(Settings::default());
        assert_eq!(probe.0.borrow().labels.last().unwrap().start, "Start Game");

        game.start();
        assert_eq!(
            probe.0.borrow().labels.last().unwrap().start,
            "Restart Game"
        );

        game.pause();
        assert_eq!(probe.0.borrow().labels.last().unwrap().pause, "Resume");

        game.set_muted(true);
        assert_eq!(probe.0.borrow().labels.last().unwrap().mute, "Unmute");
    }

    #[test]
    fn test_reduced_motion_strips_feedback_from_snapshot() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let (mut game, _probe) = probed_game(settings);
        game.start();
        plant_collision(&mut game);
        game.tick(&TickInput::default());

        // The sim tracked the effects; the snapshot hides them
        assert!(game.state.effects.flash_active());
        let snap = game.snapshot();
        assert!(!snap.flash_active);
        assert_eq!(snap.shake_offset, Vec2::ZERO);
    }
}
