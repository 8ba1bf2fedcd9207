use crate::math::Vec2;

use super::component::{Component, FrameState, StartCtx, UpdateCtx};
use super::Transform;

/// Relative direction queried from an object's rotation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
    /// Forward rotated 90° clockwise.
    Left,
    /// Forward rotated 90° counter-clockwise.
    Right,
}

impl Direction {
    /// Parses `"forward"`, `"backward"`, `"left"` or `"right"` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "forward" => Some(Self::Forward),
            "backward" => Some(Self::Backward),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Named entity with a transform and an ordered list of components.
///
/// Components are owned exclusively; attachment order is update order.
pub struct GameObject {
    name: String,
    pub transform: Transform,
    components: Vec<Box<dyn Component>>,
}

impl std::fmt::Debug for GameObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameObject")
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field(
                "components",
                &self.components.iter().map(|c| c.type_name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl GameObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_transform(name, Transform::default())
    }

    pub fn with_transform(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            components: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Attaches `component`, runs its `start`, and returns it.
    ///
    /// Components added by `start` are attached right after it and started in turn.
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut C {
        let index = self.components.len();
        self.components.push(Box::new(component));
        self.start_at(index);

        (*self.components[index])
            .as_any_mut()
            .downcast_mut::<C>()
            .expect("component slot holds the type that was just attached")
    }

    /// Returns the first attached component of type `T`.
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| (**c).as_any().downcast_ref::<T>())
    }

    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| (**c).as_any_mut().downcast_mut::<T>())
    }

    /// Updates every component once, in attachment order.
    ///
    /// A failing component is reported and skipped; later components still run.
    pub fn update_components(&mut self, frame: &mut FrameState<'_>) {
        for component in self.components.iter_mut() {
            let mut ctx = UpdateCtx {
                name: &self.name,
                transform: &mut self.transform,
                frame: &mut *frame,
            };

            if let Err(e) = component.update(&mut ctx) {
                log::warn!(
                    "[{}] {} update failed: {e:#}",
                    self.name,
                    component.type_name()
                );
            }
        }
    }

    /// Unit vector for `direction` relative to the current rotation.
    pub fn get_direction(&self, direction: Direction) -> Vec2 {
        let forward = Vec2::from_angle(self.transform.rotation);
        match direction {
            Direction::Forward => forward,
            Direction::Backward => -forward,
            Direction::Left => Vec2::new(forward.y, -forward.x),
            Direction::Right => Vec2::new(-forward.y, forward.x),
        }
    }

    fn start_at(&mut self, index: usize) {
        // Taken out so `start` can borrow its siblings mutably.
        let mut component = self.components.remove(index);

        let mut ctx = StartCtx {
            name: &self.name,
            transform: &mut self.transform,
            siblings: &mut self.components,
            added: Vec::new(),
        };
        component.start(&mut ctx);
        let added = ctx.added;

        self.components.insert(index, component);

        for extra in added {
            log::debug!("[{}] attaching {} requested during start", self.name, extra.type_name());
            let at = self.components.len();
            self.components.push(extra);
            self.start_at(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::camera::Camera;
    use crate::input::{InputFrame, InputState};
    use crate::render::SpriteBatch;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        tag: &'static str,
        log: Log,
        fail: bool,
    }

    impl Recorder {
        fn new(tag: &'static str, log: &Log) -> Self {
            Self { tag, log: log.clone(), fail: false }
        }
    }

    impl Component for Recorder {
        fn start(&mut self, _ctx: &mut StartCtx<'_>) {
            self.log.borrow_mut().push(format!("start:{}", self.tag));
        }

        fn update(&mut self, _ctx: &mut UpdateCtx<'_, '_>) -> anyhow::Result<()> {
            self.log.borrow_mut().push(format!("update:{}", self.tag));
            anyhow::ensure!(!self.fail, "{} is misconfigured", self.tag);
            Ok(())
        }
    }

    struct Mover;

    impl Component for Mover {
        fn update(&mut self, ctx: &mut UpdateCtx<'_, '_>) -> anyhow::Result<()> {
            let dt = ctx.dt();
            ctx.transform.translate(Vec2::new(dt, 0.0));
            Ok(())
        }
    }

    /// Attaches a `Recorder` from its own `start`.
    struct Spawner {
        log: Log,
    }

    impl Component for Spawner {
        fn start(&mut self, ctx: &mut StartCtx<'_>) {
            if ctx.get_component::<Recorder>().is_none() {
                ctx.add_component(Recorder::new("spawned", &self.log));
            }
        }

        fn update(&mut self, _ctx: &mut UpdateCtx<'_, '_>) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn run_frame(object: &mut GameObject, dt: f32) {
        let input = InputState::default();
        let input_frame = InputFrame::default();
        let camera = Camera::new(800.0, 600.0);
        let mut batch = SpriteBatch::new();
        let mut frame = FrameState {
            dt,
            input: &input,
            input_frame: &input_frame,
            camera: &camera,
            batch: &mut batch,
        };
        object.update_components(&mut frame);
    }

    // ── attach / lookup ───────────────────────────────────────────────────

    #[test]
    fn add_component_starts_before_returning() {
        let log = Log::default();
        let mut obj = GameObject::new("player");
        obj.add_component(Recorder::new("a", &log));
        assert_eq!(*log.borrow(), vec!["start:a"]);
        assert_eq!(obj.component_count(), 1);
    }

    #[test]
    fn get_component_returns_first_added() {
        let log = Log::default();
        let mut obj = GameObject::new("player");
        obj.add_component(Recorder::new("first", &log));
        obj.add_component(Recorder::new("second", &log));

        assert_eq!(obj.get_component::<Recorder>().map(|r| r.tag), Some("first"));
        assert!(obj.get_component::<Mover>().is_none());
    }

    #[test]
    fn components_added_during_start_are_appended_and_started() {
        let log = Log::default();
        let mut obj = GameObject::new("spawner");
        obj.add_component(Spawner { log: log.clone() });

        assert_eq!(obj.component_count(), 2);
        assert_eq!(*log.borrow(), vec!["start:spawned"]);
        assert!(obj.get_component::<Recorder>().is_some());
    }

    // ── update dispatch ───────────────────────────────────────────────────

    #[test]
    fn update_runs_in_attachment_order() {
        let log = Log::default();
        let mut obj = GameObject::new("ordered");
        obj.add_component(Recorder::new("a", &log));
        obj.add_component(Recorder::new("b", &log));
        log.borrow_mut().clear();

        run_frame(&mut obj, 0.016);
        assert_eq!(*log.borrow(), vec!["update:a", "update:b"]);
    }

    #[test]
    fn failing_component_does_not_stop_the_frame() {
        let log = Log::default();
        let mut obj = GameObject::new("broken");
        let first = obj.add_component(Recorder::new("bad", &log));
        first.fail = true;
        obj.add_component(Recorder::new("good", &log));
        obj.add_component(Mover);
        log.borrow_mut().clear();

        run_frame(&mut obj, 0.5);
        assert_eq!(*log.borrow(), vec!["update:bad", "update:good"]);
        assert_eq!(obj.transform.position, Vec2::new(0.5, 0.0));
    }

    // ── directions ────────────────────────────────────────────────────────

    #[test]
    fn forward_follows_rotation() {
        let mut obj = GameObject::new("dir");
        obj.transform.rotation = 90.0;
        let f = obj.get_direction(Direction::Forward);
        assert_relative_eq!(f.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(f.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn side_directions_are_perpendicular() {
        let obj = GameObject::new("dir");
        assert_eq!(obj.get_direction(Direction::Left), Vec2::new(0.0, -1.0));
        assert_eq!(obj.get_direction(Direction::Right), Vec2::new(0.0, 1.0));
        assert_eq!(obj.get_direction(Direction::Backward), Vec2::new(-1.0, 0.0));
        assert_eq!(Direction::from_name("Forward"), Some(Direction::Forward));
        assert_eq!(Direction::from_name("up"), None);
    }

    #[test]
    fn right_is_forward_turned_counter_clockwise() {
        let mut obj = GameObject::new("dir");
        obj.transform.rotation = 90.0;
        let right = obj.get_direction(Direction::Right);
        let left = obj.get_direction(Direction::Left);
        assert_relative_eq!(right.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(right.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(left.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(left.y, 0.0, epsilon = 1e-6);
    }
}
