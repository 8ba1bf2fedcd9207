use core::ops::Mul;

use super::Vec3;

/// Rotation quaternion `(x, y, z, w)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_axis_angle(axis: Vec3, degrees: f32) -> Self {
        let axis = axis.normalized();
        let (s, c) = (degrees.to_radians() * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Builds a rotation from pitch (X), yaw (Y) and roll (Z) in degrees.
    pub fn from_euler(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sp, cp) = (pitch.to_radians() * 0.5).sin_cos();
        let (sy, cy) = (yaw.to_radians() * 0.5).sin_cos();
        let (sr, cr) = (roll.to_radians() * 0.5).sin_cos();

        Self::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    #[inline]
    pub fn dot(self, rhs: Quat) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    pub fn normalized(self) -> Self {
        let mag = self.dot(self).sqrt();
        if mag == 0.0 {
            return Self::IDENTITY;
        }
        Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
    }

    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let uv = q.cross(v);
        let uuv = q.cross(uv);
        v + uv * (2.0 * self.w) + uuv * 2.0
    }

    /// Spherical interpolation along the shortest arc.
    pub fn slerp(self, to: Quat, t: f32) -> Self {
        const LINEAR_THRESHOLD: f32 = 0.9995;

        let mut to = to;
        let mut dot = self.dot(to);
        if dot < 0.0 {
            to = Quat::new(-to.x, -to.y, -to.z, -to.w);
            dot = -dot;
        }

        if dot > LINEAR_THRESHOLD {
            return Quat::new(
                self.x + (to.x - self.x) * t,
                self.y + (to.y - self.y) * t,
                self.z + (to.z - self.z) * t,
                self.w + (to.w - self.w) * t,
            )
            .normalized();
        }

        let theta_0 = dot.acos();
        let sin_theta_0 = theta_0.sin();
        let theta = theta_0 * t;
        let s0 = theta.cos() - dot * theta.sin() / sin_theta_0;
        let s1 = theta.sin() / sin_theta_0;

        Quat::new(
            self.x * s0 + to.x * s1,
            self.y * s0 + to.y * s1,
            self.z * s0 + to.z * s1,
            self.w * s0 + to.w * s1,
        )
    }
}

impl Mul for Quat {
    type Output = Quat;

    fn mul(self, o: Quat) -> Quat {
        Quat::new(
            self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            self.w * o.y - self.x * o.z + self.y * o.w + self.z * o.x,
            self.w * o.z + self.x * o.y - self.y * o.x + self.z * o.w,
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn axis_angle_rotates_about_z() {
        let q = Quat::from_axis_angle(Vec3::Z, 90.0);
        let v = q.rotate_vector(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn composition_adds_angles() {
        let a = Quat::from_axis_angle(Vec3::Z, 30.0);
        let b = Quat::from_axis_angle(Vec3::Z, 60.0);
        let v = (a * b).rotate_vector(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quat::IDENTITY;
        let b = Quat::from_axis_angle(Vec3::Z, 90.0);
        assert_relative_eq!(a.slerp(b, 0.0).dot(a), 1.0, epsilon = 1e-6);
        assert_relative_eq!(a.slerp(b, 1.0).dot(b).abs(), 1.0, epsilon = 1e-6);

        let mid = a.slerp(b, 0.5).rotate_vector(Vec3::new(1.0, 0.0, 0.0));
        let expected = 45f32.to_radians();
        assert_relative_eq!(mid.x, expected.cos(), epsilon = 1e-5);
        assert_relative_eq!(mid.y, expected.sin(), epsilon = 1e-5);
    }
}
