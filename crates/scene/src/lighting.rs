//! Per-vertex shading for the fixed-function path.
//!
//! The intensity curve is a stylised two-tier ramp built on a rational
//! approximation of `acos`. Piece sets were tuned against this exact curve,
//! so the coefficients must not be swapped for `f32::acos`.

use math::{radians, vec::Vec3};

/// Degree-3 over degree-3 rational fit of `acos` on `[-1, 1]`.
///
/// Accurate near zero (`f(0) = π/2` to 1e-7) but it drifts towards the ends:
/// `f(1) ≈ 0.1702` and `f(-1) ≈ 2.7545`, about 0.388 rad off true `acos`.
/// It is strictly decreasing over the whole interval.
pub fn arccos_approx(f: f32) -> f32 {
    let f = f as f64;
    let n = 2.193376378 + (-2.987042783 + (0.5314426631 + 0.2990387380 * f) * f) * f;
    let d = 1.396346817 + (-1.012703522 + (-0.3056194995 + 0.1383216735 * f) * f) * f;
    (n / d) as f32
}

/// Maps a normal/light cosine to a grey level in `[0.25, ~0.98]`.
pub fn shade(cos_angle: f32) -> f32 {
    let angle = arccos_approx(cos_angle) / 2.8;
    if angle < 0.5 {
        0.25
    } else {
        (angle - 0.5) * 1.5 + 0.25
    }
}

/// Unit light direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Vec3,
}

impl Light {
    /// Straight down onto the board; the board itself is always lit by this.
    pub const OVERHEAD: Light = Light { direction: Vec3::new(0.0, 0.0, -1.0) };

    /// Key light that follows the camera so the lit side faces the viewer.
    pub fn from_camera(pitch: f32, yaw: f32) -> Light {
        let (sp, cp) = radians(pitch).sin_cos();
        let (sy, cy) = radians(yaw).sin_cos();

        let direction = Vec3::new(sy * (1.0 - cp), -sp * cy, -cp);
        Light { direction: direction.normalized() }
    }

    /// Black pieces are turned half a revolution, so their light is turned
    /// with them.
    pub fn mirrored(self) -> Light {
        let d = self.direction;
        Light { direction: Vec3::new(-d.x, -d.y, d.z) }
    }

    pub fn intensity(&self, normal: Vec3) -> f32 {
        shade(normal.dot(self.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arccos_endpoints_follow_the_fit() {
        assert!((arccos_approx(1.0) - 0.1702).abs() < 1e-3);
        assert!((arccos_approx(-1.0) - 2.7545).abs() < 1e-3);
        assert!((arccos_approx(0.0) - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn arccos_stays_within_documented_deviation() {
        for i in -100..=100 {
            let x = i as f32 / 100.0;
            assert!((arccos_approx(x) - x.acos()).abs() < 0.39, "x = {x}");
        }
        assert!((arccos_approx(0.5) - 0.5f32.acos()).abs() < 0.01);
    }

    #[test]
    fn arccos_is_decreasing() {
        let mut prev = arccos_approx(-1.0);
        for i in -99..=100 {
            let v = arccos_approx(i as f32 / 100.0);
            assert!(v < prev);
            prev = v;
        }
    }

    #[test]
    fn shade_has_a_flat_floor() {
        assert_eq!(shade(1.0), 0.25);
        assert_eq!(shade(0.5), 0.25);
        assert!((shade(-1.0) - 0.9756).abs() < 1e-3);
        assert!((shade(0.0) - 0.3415).abs() < 1e-3);
    }

    #[test]
    fn level_camera_lights_from_above() {
        let l = Light::from_camera(0.0, 0.0);
        assert!((l.direction - Light::OVERHEAD.direction).length() < 1e-6);
    }

    #[test]
    fn camera_light_is_unit_length() {
        for &(p, y) in &[(-45.0, 0.0), (-90.0, 90.0), (-10.0, 270.0), (-60.0, 33.0)] {
            let l = Light::from_camera(p, y);
            assert!((l.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn mirrored_keeps_height() {
        let l = Light::from_camera(-45.0, 30.0);
        let m = l.mirrored();
        assert_eq!(m.direction.z, l.direction.z);
        assert_eq!(m.direction.x, -l.direction.x);
        assert_eq!(m.direction.y, -l.direction.y);
    }
}
