//! Transient collision feedback timers
//!
//! Shake and flash are tracked separately from the state that triggered
//! them: they decay every tick on their own clocks and carry no gameplay
//! meaning. The renderer reads the jitter offset and flash flag from the
//! snapshot.

use glam::Vec2;
use rand::Rng;

use crate::consts::{FLASH_FRAMES, SHAKE_TICKS};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffectsState {
    pub shake_intensity: f32,
    /// Remaining shake window; zero when idle
    pub shake_duration: u32,
    pub shake_elapsed: u32,
    pub flash_frames: u32,
    /// Per-axis jitter for the renderer, resampled each tick of the shake
    pub shake_offset: Vec2,
}

impl EffectsState {
    /// Reset everything, for the start of a run
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Begin (or restart) a shake at the given peak magnitude
    pub fn trigger_shake(&mut self, intensity: f32) {
        self.shake_intensity = intensity;
        self.shake_duration = SHAKE_TICKS;
        self.shake_elapsed = 0;
    }

    /// Light the vehicle sprite up for the next few frames
    pub fn trigger_flash(&mut self) {
        self.flash_frames = FLASH_FRAMES;
    }

    /// Current shake magnitude: linear decay from intensity to zero
    pub fn magnitude(&self) -> f32 {
        if self.shake_duration == 0 {
            return 0.0;
        }
        self.shake_intensity * (1.0 - self.shake_elapsed as f32 / self.shake_duration as f32)
    }

    pub fn flash_active(&self) -> bool {
        self.flash_frames > 0
    }

    /// Advance both timers by one tick, resampling the jitter offset
    pub fn decay<R: Rng>(&mut self, rng: &mut R) {
        if self.shake_duration > 0 {
            self.shake_elapsed += 1;
            if self.shake_elapsed >= self.shake_duration {
                self.shake_duration = 0;
                self.shake_offset = Vec2::ZERO;
            } else {
                let m = self.magnitude();
                self.shake_offset = Vec2::new(
                    (rng.random::<f32>() * 2.0 - 1.0) * m,
                    (rng.random::<f32>() * 2.0 - 1.0) * m,
                );
            }
        }
        if self.flash_frames > 0 {
            self.flash_frames -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_shake_decays_linearly_to_zero() {
        let mut fx = EffectsState::default();
        let mut rng = Pcg32::seed_from_u64(1);
        fx.trigger_shake(10.0);
        assert_eq!(fx.magnitude(), 10.0);

        fx.decay(&mut rng);
        assert!((fx.magnitude() - 10.0 * (1.0 - 1.0 / 20.0)).abs() < 1e-5);
        assert!(fx.shake_offset.x.abs() <= fx.magnitude());
        assert!(fx.shake_offset.y.abs() <= fx.magnitude());

        for _ in 0..SHAKE_TICKS {
            fx.decay(&mut rng);
        }
        assert_eq!(fx.shake_duration, 0);
        assert_eq!(fx.magnitude(), 0.0);
        assert_eq!(fx.shake_offset, Vec2::ZERO);
    }

    #[test]
    fn test_retrigger_restarts_window() {
        let mut fx = EffectsState::default();
        let mut rng = Pcg32::seed_from_u64(2);
        fx.trigger_shake(10.0);
        for _ in 0..15 {
            fx.decay(&mut rng);
        }
        fx.trigger_shake(5.0);
        assert_eq!(fx.shake_elapsed, 0);
        assert_eq!(fx.shake_duration, SHAKE_TICKS);
        assert_eq!(fx.magnitude(), 5.0);
    }

    #[test]
    fn test_flash_counts_down() {
        let mut fx = EffectsState::default();
        let mut rng = Pcg32::seed_from_u64(3);
        fx.trigger_flash();
        for i in (0..FLASH_FRAMES).rev() {
            assert!(fx.flash_active());
            fx.decay(&mut rng);
            assert_eq!(fx.flash_frames, i);
        }
        assert!(!fx.flash_active());
        fx.decay(&mut rng);
        assert!(!fx.flash_active());
    }

    #[test]
    fn test_clear() {
        let mut fx = EffectsState::default();
        let mut rng = Pcg32::seed_from_u64(4);
        fx.trigger_shake(10.0);
        fx.trigger_flash();
        fx.decay(&mut rng);
        fx.clear();
        assert_eq!(fx, EffectsState::default());
    }
}
