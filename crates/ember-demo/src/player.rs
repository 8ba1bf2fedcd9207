use ember_engine::math::mathf::clamp01;
use ember_engine::math::Vec2;
use ember_engine::scene::{Component, UpdateCtx};

/// Spins the object and eases it toward the pointer.
#[derive(Debug, Clone)]
pub struct PlayerMovement {
    /// Fraction of the remaining distance covered per second.
    pub speed: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
}

impl PlayerMovement {
    pub fn new(speed: f32, rotation_speed: f32) -> Self {
        Self { speed, rotation_speed }
    }

    fn step(&self, position: Vec2, target: Option<Vec2>, dt: f32) -> Vec2 {
        match target {
            Some(target) => position.lerp(target, clamp01(self.speed * dt)),
            None => position,
        }
    }
}

impl Component for PlayerMovement {
    fn update(&mut self, ctx: &mut UpdateCtx<'_, '_>) -> anyhow::Result<()> {
        let dt = ctx.dt();
        ctx.transform.rotate(self.rotation_speed * dt);

        // Stays put while the pointer is outside the window.
        let target = ctx
            .input()
            .pointer_pos
            .map(|(x, y)| ctx.camera().screen_to_world(x, y));
        ctx.transform.position = self.step(ctx.transform.position, target, dt);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_toward_target() {
        let movement = PlayerMovement::new(5.0, 720.0);
        let next = movement.step(Vec2::ZERO, Some(Vec2::new(10.0, 0.0)), 0.1);
        assert_eq!(next, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn large_steps_do_not_overshoot() {
        let movement = PlayerMovement::new(5.0, 720.0);
        let next = movement.step(Vec2::ZERO, Some(Vec2::new(2.0, 2.0)), 1.0);
        assert_eq!(next, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn holds_position_without_pointer() {
        let movement = PlayerMovement::new(5.0, 720.0);
        assert_eq!(movement.step(Vec2::ONE, None, 0.5), Vec2::ONE);
    }
}
