use crate::math::Vec2;

/// Placement of a game object in world space.
///
/// There is no parent/child nesting; every transform is world-relative.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0, Vec2::ONE)
    }
}

impl Transform {
    #[inline]
    pub const fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self { position, rotation, scale }
    }

    #[inline]
    pub fn at(position: Vec2) -> Self {
        Self { position, ..Self::default() }
    }

    #[inline]
    pub fn rotate(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    #[inline]
    pub fn distance_to(&self, other: &Transform) -> f32 {
        self.position.distance_to(other.position)
    }
}
