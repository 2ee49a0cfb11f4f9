use math::{
    vec::Vec3,
    mat::Mat4,
};

use crate::lighting::Light;

pub const MIN_PITCH: f32 = -90.0;
pub const MAX_PITCH: f32 = 0.0;

/// Where the board sits relative to the eye before the camera angles apply.
pub const BOARD_OFFSET: Vec3 = Vec3::new(0.0, -0.5, -12.0);

/// Orbit camera around the board centre. Angles are in degrees; pitch tilts
/// the board away from the viewer, yaw spins it about its normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pitch: f32,
    yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::reset(false)
    }
}

impl Camera {
    pub fn new(pitch: f32, yaw: f32) -> Camera {
        let mut c = Camera { pitch: 0.0, yaw: 0.0 };
        c.set(pitch, yaw);
        c
    }

    /// Default viewing angle for a freshly loaded piece set.
    pub fn reset(flat: bool) -> Camera {
        if flat {
            Camera::new(-10.0, 0.0)
        } else {
            Camera::new(-45.0, 0.0)
        }
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set(&mut self, pitch: f32, yaw: f32) {
        self.pitch = pitch.clamp(MIN_PITCH, MAX_PITCH);

        let yaw = yaw.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360.
        self.yaw = if yaw >= 360.0 { 0.0 } else { yaw };
    }

    /// Deltas are subtracted, matching the drag direction of the input layer.
    pub fn rotate(&mut self, delta_pitch: f32, delta_yaw: f32) {
        if !delta_pitch.is_finite() || !delta_yaw.is_finite() {
            return;
        }
        self.set(self.pitch - delta_pitch, self.yaw - delta_yaw);
    }

    /// Yaw snapped to the nearest quarter turn, in `0..=4`.
    pub fn quarter_turns(&self) -> u32 {
        ((self.yaw + 45.0) / 90.0) as u32
    }

    pub fn view(&self) -> Mat4 {
        Mat4::translation(BOARD_OFFSET)
            * Mat4::rotation_x(self.pitch)
            * Mat4::rotation_z(self.yaw)
    }

    pub fn light(&self) -> Light {
        Light::from_camera(self.pitch, self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut c = Camera::new(-45.0, 0.0);
        for _ in 0..10 {
            c.rotate(-1000.0, 0.0);
            assert!(c.pitch() >= MIN_PITCH && c.pitch() <= MAX_PITCH);
        }
        assert_eq!(c.pitch(), MAX_PITCH);

        for _ in 0..10 {
            c.rotate(1000.0, 0.0);
            assert!(c.pitch() >= MIN_PITCH && c.pitch() <= MAX_PITCH);
        }
        assert_eq!(c.pitch(), MIN_PITCH);
    }

    #[test]
    fn yaw_wraps_below_zero() {
        let mut c = Camera::new(-45.0, 5.0);
        c.rotate(0.0, 10.0);
        assert_eq!(c.yaw(), 355.0);
    }

    #[test]
    fn yaw_wraps_past_full_turn() {
        let mut c = Camera::new(-45.0, 355.0);
        c.rotate(0.0, -10.0);
        assert_eq!(c.yaw(), 5.0);

        c.rotate(0.0, 5.0);
        assert_eq!(c.yaw(), 0.0);

        for i in 0..100 {
            c.rotate(0.0, 37.0 * if i % 3 == 0 { -1.0 } else { 1.0 });
            assert!(c.yaw() >= 0.0 && c.yaw() < 360.0);
        }
    }

    #[test]
    fn quarter_turns_snap_to_nearest() {
        assert_eq!(Camera::new(0.0, 0.0).quarter_turns(), 0);
        assert_eq!(Camera::new(0.0, 44.0).quarter_turns(), 0);
        assert_eq!(Camera::new(0.0, 46.0).quarter_turns(), 1);
        assert_eq!(Camera::new(0.0, 180.0).quarter_turns(), 2);
        assert_eq!(Camera::new(0.0, 350.0).quarter_turns(), 4);
    }

    #[test]
    fn reset_angles() {
        assert_eq!(Camera::reset(true), Camera::new(-10.0, 0.0));
        assert_eq!(Camera::reset(false), Camera::new(-45.0, 0.0));
    }

    #[test]
    fn view_places_board_centre() {
        let c = Camera::new(-30.0, 120.0);
        let p = c.view().transform_point(Vec3::ZERO);
        assert!((p - BOARD_OFFSET).length() < 1e-5);
    }
}
