use core::ops;

use bytemuck::{Pod, Zeroable};

use crate::vec::{Vec3, Vec4};

/// Column-major 4x4 matrix: `e[column][row]`, the layout fixed-function
/// pipelines expect when loading a model-view matrix.
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Mat4 {
    pub e: [[f32; 4]; 4],
}

impl Mat4 {
    #[inline]
    pub fn from_columns(v: &[Vec4; 4]) -> Mat4 {
        let mut m = Mat4::default();
        for i in 0..4 {
            m.e[i] = v[i].to_slice();
        }
        m
    }

    #[inline]
    pub fn identity() -> Mat4 {
        Mat4::scale(Vec3::from_scalar(1.0))
    }

    #[inline]
    pub fn scale(v: Vec3) -> Mat4 {
        let mut m = Mat4::default();
        m.e[0][0] = v.x;
        m.e[1][1] = v.y;
        m.e[2][2] = v.z;
        m.e[3][3] = 1.0;
        m
    }

    #[inline]
    pub fn translation(t: Vec3) -> Mat4 {
        let mut m = Mat4::identity();
        m.e[3] = [t.x, t.y, t.z, 1.0];
        m
    }

    /// Rotation about +X by `degrees`, counter-clockwise looking down the axis.
    pub fn rotation_x(degrees: f32) -> Mat4 {
        let (s, c) = crate::radians(degrees).sin_cos();
        Mat4::from_columns(&[
            Vec4::new(1., 0., 0., 0.),
            Vec4::new(0., c,  s,  0.),
            Vec4::new(0., -s, c,  0.),
            Vec4::new(0., 0., 0., 1.),
        ])
    }

    /// Rotation about +Z by `degrees`.
    pub fn rotation_z(degrees: f32) -> Mat4 {
        let (s, c) = crate::radians(degrees).sin_cos();
        Mat4::from_columns(&[
            Vec4::new(c,  s,  0., 0.),
            Vec4::new(-s, c,  0., 0.),
            Vec4::new(0., 0., 1., 0.),
            Vec4::new(0., 0., 0., 1.),
        ])
    }

    #[inline]
    pub fn transpose(&self) -> Mat4 {
        let mut m = Mat4::default();
        for j in 0..4 {
            for i in 0..4 {
                m.e[j][i] = self.e[i][j];
            }
        }
        m
    }

    #[inline]
    pub fn to_columns(&self) -> [Vec4; 4] {
        bytemuck::cast(*self)
    }

    #[inline]
    pub fn to_rows(&self) -> [Vec4; 4] {
        self.transpose().to_columns()
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * p.extend(1.0)).xyz()
    }
}

impl ops::Mul<Mat4> for Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut m = Mat4::default();

        let a = self.to_rows();
        let b = rhs.to_columns();

        for j in 0..4 {
            for i in 0..4 {
                m.e[j][i] = a[i].dot(b[j]);
            }
        }
        m
    }
}

impl ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        let a = self.to_rows();
        Vec4::new(a[0].dot(rhs), a[1].dot(rhs), a[2].dot(rhs), a[3].dot(rhs))
    }
}
