use super::component::FrameState;
use super::GameObject;

/// Named, ordered collection of game objects.
#[derive(Debug)]
pub struct Scene {
    name: String,
    objects: Vec<GameObject>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds `object` to the scene; it is updated from the next frame on.
    pub fn instantiate(&mut self, object: GameObject) -> &mut GameObject {
        self.objects.push(object);
        let last = self.objects.len() - 1;
        &mut self.objects[last]
    }

    /// Removes and returns the first object called `name`.
    pub fn destroy(&mut self, name: &str) -> Option<GameObject> {
        let index = self.objects.iter().position(|o| o.name() == name)?;
        Some(self.objects.remove(index))
    }

    pub fn find(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.name() == name)
    }

    #[inline]
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Updates every object in insertion order.
    pub fn update(&mut self, frame: &mut FrameState<'_>) {
        for object in self.objects.iter_mut() {
            object.update_components(frame);
        }
    }
}

/// Owns the active scene.
#[derive(Debug, Default)]
pub struct SceneManager {
    current: Option<Scene>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `scene` current and returns the previously loaded one.
    pub fn load_scene(&mut self, scene: Scene) -> Option<Scene> {
        log::info!("loading scene '{}'", scene.name());
        self.current.replace(scene)
    }

    #[inline]
    pub fn scene(&self) -> Option<&Scene> {
        self.current.as_ref()
    }

    #[inline]
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.current.as_mut()
    }

    /// Updates the current scene, if any.
    pub fn update(&mut self, frame: &mut FrameState<'_>) {
        if let Some(scene) = self.current.as_mut() {
            scene.update(frame);
        }
    }
}
