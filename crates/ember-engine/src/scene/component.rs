use std::any::Any;

use crate::camera::Camera;
use crate::input::{InputFrame, InputState};
use crate::render::SpriteBatch;

use super::Transform;

/// Type-erased access used for component lookup by concrete type.
///
/// Implemented for every `'static` type; component authors never implement it.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior unit attached to a [`GameObject`](super::GameObject).
///
/// Lifecycle:
/// - `start` runs exactly once, right after the component is attached
/// - `update` runs once per frame, in attachment order
///
/// The owning object is not stored; it is lent to each hook through the context.
pub trait Component: AsAny {
    fn start(&mut self, ctx: &mut StartCtx<'_>) {
        let _ = ctx;
    }

    /// Returning an error logs a warning for this component only; the rest of the
    /// frame continues.
    fn update(&mut self, ctx: &mut UpdateCtx<'_, '_>) -> anyhow::Result<()>;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Per-frame state shared by every component updated in the frame.
pub struct FrameState<'f> {
    /// Seconds since the previous frame (already clamped by the frame clock).
    pub dt: f32,
    pub input: &'f InputState,
    pub input_frame: &'f InputFrame,
    pub camera: &'f Camera,
    pub batch: &'f mut SpriteBatch,
}

/// Context lent to [`Component::update`].
pub struct UpdateCtx<'a, 'f> {
    pub name: &'a str,
    pub transform: &'a mut Transform,
    pub frame: &'a mut FrameState<'f>,
}

impl UpdateCtx<'_, '_> {
    #[inline]
    pub fn dt(&self) -> f32 {
        self.frame.dt
    }

    #[inline]
    pub fn batch(&mut self) -> &mut SpriteBatch {
        &mut *self.frame.batch
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        self.frame.camera
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        self.frame.input
    }
}

/// Context lent to [`Component::start`].
///
/// Gives access to the sibling components already attached to the owning object.
/// Components added here are attached after the starting component and started
/// once it returns.
pub struct StartCtx<'a> {
    pub name: &'a str,
    pub transform: &'a mut Transform,
    pub(super) siblings: &'a mut [Box<dyn Component>],
    pub(super) added: Vec<Box<dyn Component>>,
}

impl StartCtx<'_> {
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.siblings
            .iter()
            .find_map(|c| (**c).as_any().downcast_ref::<T>())
    }

    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.siblings
            .iter_mut()
            .find_map(|c| (**c).as_any_mut().downcast_mut::<T>())
    }

    pub fn add_component<C: Component>(&mut self, component: C) {
        self.added.push(Box::new(component));
    }
}
