use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::SpriteRenderer;
use crate::math::Vec2;
use crate::render::{Sprite, SpriteBatch};
use crate::scene::{Component, StartCtx, UpdateCtx};

use super::{EmitterShape, Particle, ParticleSystemConfig};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParticlePhase {
    /// Waiting out `start_delay`.
    Delayed,
    /// Emitting and simulating.
    Active,
    /// Duration elapsed on a non-looping system; live particles finish their lives.
    SimulatingOnly,
}

/// CPU particle emitter and simulator.
///
/// As a component it emits from the owner's position along the owner's
/// rotation and draws every live particle with alpha blending. The sprite is
/// bound to the owner's `SpriteRenderer` once, in `start`; later edits to that
/// renderer do not change the particles.
#[derive(Debug)]
pub struct ParticleSystem {
    config: ParticleSystemConfig,
    sprite: Sprite,
    particles: Vec<Particle>,
    phase: ParticlePhase,

    delay_timer: f32,
    current_duration: f32,
    accumulator: f32,
    emitted_total: u64,

    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(config: ParticleSystemConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic system for reproducible effects and tests.
    pub fn with_seed(config: ParticleSystemConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: ParticleSystemConfig, rng: StdRng) -> Self {
        let phase = if config.start_delay > 0.0 {
            ParticlePhase::Delayed
        } else {
            ParticlePhase::Active
        };

        Self {
            particles: Vec::with_capacity(config.max_particles.min(1024)),
            sprite: config.sprite,
            config,
            phase,
            delay_timer: 0.0,
            current_duration: 0.0,
            accumulator: 0.0,
            emitted_total: 0,
            rng,
        }
    }

    #[inline]
    pub fn config(&self) -> &ParticleSystemConfig {
        &self.config
    }

    /// Sprite every particle is drawn with.
    #[inline]
    pub fn sprite(&self) -> Sprite {
        self.sprite
    }

    #[inline]
    pub fn phase(&self) -> ParticlePhase {
        self.phase
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn emitted_total(&self) -> u64 {
        self.emitted_total
    }

    /// Advances the system by `dt` seconds and returns how many particles were emitted.
    ///
    /// New particles start at `origin`, heading `facing + cone_direction` degrees.
    /// They are integrated in the same step they are born.
    pub fn step(&mut self, dt: f32, origin: Vec2, facing: f32) -> usize {
        if self.phase == ParticlePhase::Delayed {
            self.delay_timer += dt;
            if self.delay_timer >= self.config.start_delay {
                self.phase = ParticlePhase::Active;
            }
            return 0;
        }

        let mut emitted = 0;
        if self.config.looping || self.current_duration < self.config.duration {
            self.phase = ParticlePhase::Active;
            self.current_duration += dt;
            emitted = self.emit(dt, origin, facing);
        } else {
            self.phase = ParticlePhase::SimulatingOnly;
        }

        let gravity = self.config.gravity;
        self.particles.retain_mut(|p| p.advance(dt, gravity));

        emitted
    }

    /// Records one draw per live particle, bracketed by alpha blending.
    pub fn render(&self, batch: &mut SpriteBatch) {
        batch.enable_blending();
        for p in &self.particles {
            let size = p.size();
            batch.draw(
                self.sprite,
                p.position,
                p.rotation,
                Vec2::new(size, size),
                p.color(),
            );
        }
        batch.disable_blending();
    }

    fn emit(&mut self, dt: f32, origin: Vec2, facing: f32) -> usize {
        let max = self.config.max_particles;
        if self.particles.len() >= max {
            return 0;
        }

        self.accumulator += self.config.emission_rate.max(0.0) * dt;
        let whole = self.accumulator.floor();
        self.accumulator -= whole;

        // Whatever does not fit under the cap is dropped, not carried over.
        let count = (whole as usize).min(max - self.particles.len());
        for _ in 0..count {
            let particle = self.spawn(origin, facing);
            self.particles.push(particle);
        }

        self.emitted_total += count as u64;
        count
    }

    fn spawn(&mut self, origin: Vec2, facing: f32) -> Particle {
        let c = &self.config;
        let rng = &mut self.rng;

        let base = facing + c.cone_direction;
        let heading = match c.shape {
            EmitterShape::Point => base,
            EmitterShape::Circle => rng.gen_range(0.0..360.0),
            EmitterShape::Cone => {
                let half = c.cone_angle.abs() * 0.5;
                if half > 0.0 {
                    base + rng.gen_range(-half..=half)
                } else {
                    base
                }
            }
        };

        let speed = c.speed.sample(rng);

        Particle {
            position: origin,
            velocity: Vec2::from_angle(heading) * speed,
            rotation: c.start_rotation.sample(rng),
            angular_velocity: c.angular_velocity.sample(rng),
            total_lifetime: c.lifetime.sample(rng),
            current_life: 0.0,
            start_size: c.start_size.sample(rng),
            end_size: c.end_size.sample(rng),
            start_color: c.start_color.sample(rng),
            end_color: c.end_color.sample(rng),
        }
    }
}

impl Component for ParticleSystem {
    fn start(&mut self, ctx: &mut StartCtx<'_>) {
        let sprite = self.config.sprite;
        self.sprite = sprite;
        match ctx.get_component_mut::<SpriteRenderer>() {
            Some(renderer) => renderer.sprite = Some(sprite),
            None => {
                log::warn!(
                    "ParticleSystem on {:?} found no SpriteRenderer; attaching a default one",
                    ctx.name
                );
                ctx.add_component(SpriteRenderer::new(sprite));
            }
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_, '_>) -> anyhow::Result<()> {
        let origin = ctx.transform.position;
        let facing = ctx.transform.rotation;

        self.step(ctx.dt(), origin, facing);
        self.render(ctx.batch());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color32;
    use crate::particles::{ColorRange, ValueRange};
    use crate::render::BlendMode;
    use crate::scene::GameObject;
    use approx::assert_relative_eq;

    fn config() -> ParticleSystemConfig {
        ParticleSystemConfig {
            lifetime: ValueRange::constant(100.0),
            ..ParticleSystemConfig::default()
        }
    }

    // ── emission ──────────────────────────────────────────────────────────

    #[test]
    fn one_slot_caps_a_huge_burst() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                max_particles: 1,
                emission_rate: 1000.0,
                ..config()
            },
            1,
        );
        assert_eq!(sys.step(1.0, Vec2::ZERO, 0.0), 1);
        assert_eq!(sys.particle_count(), 1);
        assert_eq!(sys.emitted_total(), 1);
    }

    #[test]
    fn count_never_exceeds_max() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                max_particles: 25,
                emission_rate: 500.0,
                ..config()
            },
            2,
        );
        for _ in 0..200 {
            sys.step(0.016, Vec2::ZERO, 0.0);
            assert!(sys.particle_count() <= 25);
        }
        assert_eq!(sys.particle_count(), 25);
    }

    #[test]
    fn accumulator_conserves_fractional_emission() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                max_particles: 10_000,
                emission_rate: 37.0,
                ..config()
            },
            3,
        );
        let dt = 1.0 / 60.0;
        let frames = 600;
        let emitted: usize = (0..frames).map(|_| sys.step(dt, Vec2::ZERO, 0.0)).sum();

        let expected = 37.0 * dt * frames as f32;
        assert!((emitted as f32 - expected).abs() <= 1.0, "{emitted} vs {expected}");
    }

    #[test]
    fn particles_die_at_lifetime() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                emission_rate: 1.0,
                max_particles: 1,
                lifetime: ValueRange::constant(2.0),
                ..config()
            },
            4,
        );
        sys.step(1.0, Vec2::ZERO, 0.0); // born, age 1
        assert_eq!(sys.particle_count(), 1);
        sys.step(0.5, Vec2::ZERO, 0.0); // age 1.5
        assert_eq!(sys.particle_count(), 1);
        sys.step(0.5, Vec2::ZERO, 0.0); // age 2.0
        assert_eq!(sys.particle_count(), 0);
    }

    // ── phases ────────────────────────────────────────────────────────────

    #[test]
    fn delay_holds_emission() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                start_delay: 1.0,
                emission_rate: 100.0,
                ..config()
            },
            5,
        );
        assert_eq!(sys.phase(), ParticlePhase::Delayed);
        assert_eq!(sys.step(0.6, Vec2::ZERO, 0.0), 0);
        // delay satisfied: this step only switches phase
        assert_eq!(sys.step(0.6, Vec2::ZERO, 0.0), 0);
        assert_eq!(sys.phase(), ParticlePhase::Active);
        assert!(sys.step(0.1, Vec2::ZERO, 0.0) > 0);
    }

    #[test]
    fn non_looping_system_stops_emitting_but_keeps_simulating() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                looping: false,
                duration: 1.0,
                emission_rate: 10.0,
                ..config()
            },
            6,
        );
        assert_eq!(sys.step(1.0, Vec2::ZERO, 0.0), 10);
        let before = sys.particles()[0].position;

        assert_eq!(sys.step(1.0, Vec2::ZERO, 0.0), 0);
        assert_eq!(sys.phase(), ParticlePhase::SimulatingOnly);
        assert_eq!(sys.particle_count(), 10);
        assert_ne!(sys.particles()[0].position, before);
    }

    // ── shapes ────────────────────────────────────────────────────────────

    #[test]
    fn point_shape_follows_facing() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                shape: EmitterShape::Point,
                cone_direction: 10.0,
                emission_rate: 5.0,
                ..config()
            },
            7,
        );
        sys.step(1.0, Vec2::ZERO, 80.0);
        for p in sys.particles() {
            let dir = p.velocity.normalized();
            assert_relative_eq!(dir.x, 0.0, epsilon = 1e-5);
            assert_relative_eq!(dir.y, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn cone_shape_stays_inside_the_cone() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                shape: EmitterShape::Cone,
                cone_angle: 40.0,
                emission_rate: 200.0,
                max_particles: 200,
                ..config()
            },
            8,
        );
        sys.step(1.0, Vec2::ZERO, 0.0);
        for p in sys.particles() {
            let heading = Vec2::ZERO.angle_to(p.velocity);
            assert!(heading.abs() <= 20.0 + 1e-3, "heading {heading}");
        }
    }

    #[test]
    fn gravity_pulls_particles_down() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                shape: EmitterShape::Point,
                gravity: 9.8,
                emission_rate: 1.0,
                ..config()
            },
            9,
        );
        sys.step(1.0, Vec2::ZERO, 0.0);
        sys.step(1.0, Vec2::ZERO, 0.0);
        assert!(sys.particles()[0].velocity.y < 0.0);
    }

    // ── rendering ─────────────────────────────────────────────────────────

    #[test]
    fn render_brackets_draws_with_blending() {
        let mut sys = ParticleSystem::with_seed(
            ParticleSystemConfig {
                emission_rate: 3.0,
                sprite: Sprite::Triangle,
                start_color: ColorRange::constant(Color32::RED),
                ..config()
            },
            10,
        );
        sys.step(1.0, Vec2::ZERO, 0.0);

        let mut batch = SpriteBatch::new();
        sys.render(&mut batch);

        assert_eq!(batch.len(), 3);
        assert!(batch.calls().iter().all(|c| c.blend == BlendMode::Alpha));
        assert!(batch.calls().iter().all(|c| c.sprite == Sprite::Triangle));
        assert_eq!(batch.blend(), BlendMode::Opaque);
    }

    // ── component ─────────────────────────────────────────────────────────

    #[test]
    fn attaches_a_sprite_renderer_when_missing() {
        let mut obj = GameObject::new("emitter");
        obj.add_component(ParticleSystem::with_seed(
            ParticleSystemConfig {
                sprite: Sprite::Triangle,
                ..config()
            },
            11,
        ));

        assert_eq!(obj.component_count(), 2);
        let renderer = obj.get_component::<SpriteRenderer>().unwrap();
        assert_eq!(renderer.sprite, Some(Sprite::Triangle));
    }

    #[test]
    fn rebinds_an_existing_sprite_renderer() {
        let mut obj = GameObject::new("emitter");
        obj.add_component(SpriteRenderer::new(Sprite::Rectangle));
        obj.add_component(ParticleSystem::with_seed(
            ParticleSystemConfig {
                sprite: Sprite::Triangle,
                ..config()
            },
            12,
        ));

        assert_eq!(obj.component_count(), 2);
        assert_eq!(
            obj.get_component::<SpriteRenderer>().unwrap().sprite,
            Some(Sprite::Triangle)
        );
    }

    #[test]
    fn sprite_is_bound_when_started() {
        let mut obj = GameObject::new("emitter");
        obj.add_component(ParticleSystem::with_seed(
            ParticleSystemConfig {
                sprite: Sprite::Triangle,
                ..config()
            },
            13,
        ));
        obj.get_component_mut::<SpriteRenderer>().unwrap().sprite = Some(Sprite::Rectangle);

        let sys = obj.get_component_mut::<ParticleSystem>().unwrap();
        assert_eq!(sys.sprite(), Sprite::Triangle);
        sys.step(0.5, Vec2::ZERO, 0.0);

        let mut batch = SpriteBatch::new();
        sys.render(&mut batch);
        assert!(!batch.is_empty());
        assert!(batch.calls().iter().all(|c| c.sprite == Sprite::Triangle));
    }
}
