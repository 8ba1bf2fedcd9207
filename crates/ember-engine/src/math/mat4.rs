use core::ops::Mul;

use bytemuck::{Pod, Zeroable};

use super::Vec2;

/// 4x4 homogeneous matrix, column-major.
///
/// Layout matches WGSL `mat4x4<f32>`, so a `Mat4` can be uploaded to a uniform
/// buffer with `bytemuck::bytes_of` as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Non-uniform scale in the XY plane (Z untouched).
    pub fn from_scale(scale: Vec2) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = scale.x;
        m.cols[1][1] = scale.y;
        m
    }

    /// Counter-clockwise rotation about +Z.
    pub fn from_rotation_z(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let mut m = Self::IDENTITY;
        m.cols[0][0] = c;
        m.cols[0][1] = s;
        m.cols[1][0] = -s;
        m.cols[1][1] = c;
        m
    }

    pub fn from_translation(offset: Vec2) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3][0] = offset.x;
        m.cols[3][1] = offset.y;
        m
    }

    /// Orthographic projection mapping the given box to clip space.
    ///
    /// X/Y land in `[-1, 1]`; Z uses the GL convention (`near -> -1`, `far -> 1`),
    /// so the engine's flat `z = 0` geometry stays inside wgpu's `[0, 1]` depth range
    /// for the symmetric `near = -1, far = 1` volumes used here.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;

        Self::from_cols([
            [2.0 / rl, 0.0, 0.0, 0.0],
            [0.0, 2.0 / tb, 0.0, 0.0],
            [0.0, 0.0, -2.0 / fnr, 0.0],
            [-(right + left) / rl, -(top + bottom) / tb, -(far + near) / fnr, 1.0],
        ])
    }

    /// Returns `next * self`: applies `self` first, then `next`.
    #[inline]
    pub fn then(self, next: Mat4) -> Self {
        next * self
    }

    /// Row `r`, column `c`.
    #[inline]
    pub fn at(&self, r: usize, c: usize) -> f32 {
        self.cols[c][r]
    }

    /// Transforms the point `(p.x, p.y, 0, 1)` and drops Z/W.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let m = &self.cols;
        Vec2::new(
            m[0][0] * p.x + m[1][0] * p.y + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[3][1],
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, cell) in col.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.at(r, k) * rhs.at(k, c)).sum();
            }
        }
        Mat4::from_cols(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_point(actual: Vec2, x: f32, y: f32) {
        assert_relative_eq!(actual.x, x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, y, epsilon = 1e-5);
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::from_rotation_z(33.0);
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn then_applies_in_call_order() {
        let m = Mat4::IDENTITY
            .then(Mat4::from_translation(Vec2::new(1.0, 0.0)))
            .then(Mat4::from_rotation_z(90.0));
        // translate to (1, 0), then rotate about the origin to (0, 1)
        assert_point(m.transform_point(Vec2::ZERO), 0.0, 1.0);
    }

    #[test]
    fn orthographic_maps_bounds_to_ndc() {
        let p = Mat4::orthographic(-10.0, 10.0, -5.0, 5.0, -1.0, 1.0);
        assert_point(p.transform_point(Vec2::new(10.0, 5.0)), 1.0, 1.0);
        assert_point(p.transform_point(Vec2::new(-10.0, -5.0)), -1.0, -1.0);
        assert_point(p.transform_point(Vec2::ZERO), 0.0, 0.0);
        assert_eq!(p.at(2, 3), 0.0);
    }

    #[test]
    fn offset_orthographic_centers_on_box() {
        let p = Mat4::orthographic(0.0, 4.0, 2.0, 6.0, -1.0, 1.0);
        assert_point(p.transform_point(Vec2::new(2.0, 4.0)), 0.0, 0.0);
    }
}
