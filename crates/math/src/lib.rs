pub mod vec;
pub mod mat;

/// Degrees to radians, in the single precision the renderer works in.
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * core::f32::consts::PI / 180.0
}
