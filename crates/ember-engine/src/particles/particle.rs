use crate::math::{mathf, Color32, Vec2};

/// One live particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub angular_velocity: f32,

    pub total_lifetime: f32,
    pub current_life: f32,

    pub start_size: f32,
    pub end_size: f32,
    pub start_color: Color32,
    pub end_color: Color32,
}

impl Particle {
    /// Ages the particle by `dt` and integrates motion.
    ///
    /// Returns `false` once the age reaches the lifetime; a dead particle is not moved.
    pub fn advance(&mut self, dt: f32, gravity: f32) -> bool {
        self.current_life += dt;
        if self.current_life >= self.total_lifetime {
            return false;
        }

        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;
        if gravity != 0.0 {
            self.velocity.y -= gravity * dt;
        }
        true
    }

    /// Fraction of life used, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total_lifetime <= 0.0 {
            return 1.0;
        }
        mathf::clamp01(self.current_life / self.total_lifetime)
    }

    pub fn size(&self) -> f32 {
        mathf::lerp(self.start_size, self.end_size, self.progress())
    }

    pub fn color(&self) -> Color32 {
        self.start_color.lerp(self.end_color, self.progress())
    }
}
