//! Device profile: everything the simulation reads about the drawing surface
//!
//! The display adapter computes one of these per resize. The core never
//! inspects the device directly; all device-conditional sizing funnels
//! through this struct.

use serde::{Deserialize, Serialize};

use crate::consts::LANE_COUNT;

/// Broad device category, decided once by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

/// Surface dimensions and device-scaled tuning, recomputed on resize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub surface_width: f32,
    pub surface_height: f32,
    /// Width of one of the three lanes
    pub lane_width: f32,
    pub car_width: f32,
    pub car_height: f32,
    /// Fixed vertical position of the vehicle's top edge
    pub car_y: f32,
    /// Lateral displacement per tick while a direction is held
    pub car_speed: f32,
    /// Scroll speed at the start of a run
    pub base_speed: f32,
    /// Peak screen-shake magnitude on collision
    pub shake_intensity: f32,
    pub obstacle_min_width: f32,
    pub obstacle_max_width: f32,
    pub obstacle_min_height: f32,
    pub obstacle_max_height: f32,
}

impl DeviceProfile {
    /// Fixed desktop surface
    pub fn desktop() -> Self {
        Self::with_surface(DeviceClass::Desktop, 500.0, 700.0)
    }

    /// Mobile surface derived from the viewport, orientation-aware
    pub fn mobile(viewport_width: f32, viewport_height: f32) -> Self {
        let portrait = viewport_height > viewport_width;
        let width = (viewport_width * 0.95).min(500.0);
        let height = if portrait {
            (viewport_height * 0.7).min(800.0)
        } else {
            (viewport_height * 0.9).min(500.0)
        };
        Self::with_surface(DeviceClass::Mobile, width, height)
    }

    /// Build a profile for an already-decided surface size
    pub fn with_surface(class: DeviceClass, width: f32, height: f32) -> Self {
        let (base_speed, shake_intensity) = match class {
            DeviceClass::Desktop => (5.0, 10.0),
            DeviceClass::Mobile => (8.0, 5.0),
        };
        Self {
            class,
            surface_width: width,
            surface_height: height,
            lane_width: width / LANE_COUNT as f32,
            car_width: width * 0.1,
            car_height: width * 0.175,
            car_y: height - width * 0.175 - 20.0,
            car_speed: 5.0,
            base_speed,
            shake_intensity,
            obstacle_min_width: width * 0.125,
            obstacle_max_width: width * 0.375,
            obstacle_min_height: width * 0.15,
            obstacle_max_height: width * 0.3,
        }
    }

    /// Recompute for a new surface size. Degenerate dimensions are rejected
    /// and `None` returned so the caller keeps the prior profile.
    pub fn resized(&self, width: f32, height: f32) -> Option<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            log::warn!("rejecting degenerate resize to {width}x{height}");
            return None;
        }
        Some(Self::with_surface(self.class, width, height))
    }

    /// Left edge of the drivable band
    pub fn band_min(&self) -> f32 {
        self.lane_width / 2.0
    }

    /// Rightmost position the vehicle's left edge may occupy
    pub fn band_max(&self) -> f32 {
        self.surface_width - self.car_width - self.lane_width / 2.0
    }

    /// Clamp a vehicle x into the drivable band
    pub fn clamp_car_x(&self, x: f32) -> f32 {
        x.clamp(self.band_min(), self.band_max())
    }

    /// Centered starting position for the vehicle's left edge
    pub fn car_start_x(&self) -> f32 {
        self.surface_width / 2.0 - self.car_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_dimensions() {
        let p = DeviceProfile::desktop();
        assert_eq!(p.surface_width, 500.0);
        assert_eq!(p.surface_height, 700.0);
        assert!((p.lane_width - 500.0 / 3.0).abs() < 1e-4);
        assert_eq!(p.car_width, 50.0);
        assert_eq!(p.base_speed, 5.0);
        assert_eq!(p.shake_intensity, 10.0);
    }

    #[test]
    fn test_mobile_portrait_caps() {
        // A tall phone viewport: width scaled, height capped at 800
        let p = DeviceProfile::mobile(400.0, 1400.0);
        assert!((p.surface_width - 380.0).abs() < 1e-4);
        assert_eq!(p.surface_height, 800.0);
        assert_eq!(p.base_speed, 8.0);
        assert_eq!(p.shake_intensity, 5.0);
    }

    #[test]
    fn test_mobile_landscape() {
        let p = DeviceProfile::mobile(900.0, 400.0);
        assert_eq!(p.surface_width, 500.0);
        assert_eq!(p.surface_height, 360.0);
    }

    #[test]
    fn test_band_bounds() {
        let p = DeviceProfile::desktop();
        assert!(p.band_min() < p.band_max());
        assert_eq!(p.clamp_car_x(-100.0), p.band_min());
        assert_eq!(p.clamp_car_x(1e6), p.band_max());
        let mid = p.car_start_x();
        assert_eq!(p.clamp_car_x(mid), mid);
    }

    #[test]
    fn test_resize_rejects_degenerate() {
        let p = DeviceProfile::desktop();
        assert!(p.resized(0.0, 700.0).is_none());
        assert!(p.resized(500.0, -1.0).is_none());
        assert!(p.resized(f32::NAN, 700.0).is_none());
        let q = p.resized(300.0, 600.0).unwrap();
        assert_eq!(q.class, DeviceClass::Desktop);
        assert_eq!(q.lane_width, 100.0);
    }
}
