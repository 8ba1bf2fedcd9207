use rand::Rng;

use crate::math::Color32;
use crate::render::Sprite;

/// Inclusive `[min, max]` range sampled uniformly; `min == max` is a constant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    #[inline]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub const fn constant(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let (lo, hi) = if self.min <= self.max { (self.min, self.max) } else { (self.max, self.min) };
        if lo == hi || !(hi - lo).is_finite() {
            return lo;
        }
        rng.gen_range(lo..=hi)
    }
}

/// Per-channel color range; each channel is sampled independently.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorRange {
    pub min: Color32,
    pub max: Color32,
}

impl ColorRange {
    #[inline]
    pub const fn new(min: Color32, max: Color32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub const fn constant(color: Color32) -> Self {
        Self::new(color, color)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color32 {
        let mut channel = |a: f32, b: f32| ValueRange::new(a, b).sample(&mut *rng);
        Color32::rgba(
            channel(self.min.r, self.max.r),
            channel(self.min.g, self.max.g),
            channel(self.min.b, self.max.b),
            channel(self.min.a, self.max.a),
        )
    }
}

/// Where new particles head relative to the emitter's facing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EmitterShape {
    /// Straight along the base direction.
    Point,
    /// Any direction.
    Circle,
    /// Base direction jittered within `±cone_angle / 2`.
    Cone,
}

impl EmitterShape {
    /// Parses `"point"`, `"circle"` or `"cone"`; anything else falls back to `Point`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "point" => EmitterShape::Point,
            "circle" => EmitterShape::Circle,
            "cone" => EmitterShape::Cone,
            other => {
                log::warn!("unknown emitter shape {other:?}; using point");
                EmitterShape::Point
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSystemConfig {
    pub max_particles: usize,
    /// Particles per second.
    pub emission_rate: f32,
    /// Seconds of emission per cycle; ignored when `looping`.
    pub duration: f32,
    pub looping: bool,
    pub start_delay: f32,

    pub lifetime: ValueRange,
    pub speed: ValueRange,
    pub start_size: ValueRange,
    pub end_size: ValueRange,
    pub start_color: ColorRange,
    pub end_color: ColorRange,
    /// Degrees.
    pub start_rotation: ValueRange,
    /// Degrees per second.
    pub angular_velocity: ValueRange,

    pub shape: EmitterShape,
    pub cone_angle: f32,
    /// Offset from the owner's rotation, degrees.
    pub cone_direction: f32,

    pub sprite: Sprite,
    /// Downward acceleration in world units per second squared.
    pub gravity: f32,
}

impl Default for ParticleSystemConfig {
    fn default() -> Self {
        Self {
            max_particles: 100,
            emission_rate: 10.0,
            duration: 5.0,
            looping: true,
            start_delay: 0.0,

            lifetime: ValueRange::new(1.0, 3.0),
            speed: ValueRange::new(1.0, 5.0),
            start_size: ValueRange::new(0.1, 0.3),
            end_size: ValueRange::new(0.01, 0.05),
            start_color: ColorRange::constant(Color32::WHITE),
            end_color: ColorRange::constant(Color32::WHITE.with_alpha(0.0)),
            start_rotation: ValueRange::new(0.0, 360.0),
            angular_velocity: ValueRange::new(-50.0, 50.0),

            shape: EmitterShape::Cone,
            cone_angle: 30.0,
            cone_direction: 0.0,

            sprite: Sprite::Rectangle,
            gravity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::new(2.0, 4.0);
        let reversed = ValueRange::new(4.0, 2.0);
        for _ in 0..200 {
            assert!((2.0..=4.0).contains(&range.sample(&mut rng)));
            assert!((2.0..=4.0).contains(&reversed.sample(&mut rng)));
        }
        assert_eq!(ValueRange::constant(1.5).sample(&mut rng), 1.5);
    }

    #[test]
    fn color_channels_sample_independently() {
        let mut rng = StdRng::seed_from_u64(11);
        let range = ColorRange::new(Color32::rgba(0.0, 0.5, 1.0, 0.0), Color32::rgba(1.0, 0.5, 1.0, 1.0));
        for _ in 0..100 {
            let c = range.sample(&mut rng);
            assert_eq!(c.g, 0.5);
            assert_eq!(c.b, 1.0);
            assert!((0.0..=1.0).contains(&c.r));
        }
    }

    #[test]
    fn shape_names() {
        assert_eq!(EmitterShape::from_name("Cone"), EmitterShape::Cone);
        assert_eq!(EmitterShape::from_name("circle"), EmitterShape::Circle);
        assert_eq!(EmitterShape::from_name("spiral"), EmitterShape::Point);
    }

    #[test]
    fn defaults() {
        let config = ParticleSystemConfig::default();
        assert_eq!(config.max_particles, 100);
        assert_eq!(config.shape, EmitterShape::Cone);
        assert_eq!(config.end_color.min.a, 0.0);
    }
}
