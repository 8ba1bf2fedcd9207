//! The engine application: scene, camera and sprite renderer behind [`App`].

use anyhow::Context;

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::core::{App, AppControl, FrameCtx};
use crate::device::present_mode;
use crate::input::{InputFrame, InputState};
use crate::logging::init_logging;
use crate::math::Color32;
use crate::render::{MeshLibrary, RenderCtx, SpriteBatch, SpriteResources};
use crate::scene::{FrameState, Scene, SceneManager};
use crate::window::Runtime;

/// Owns the scene manager, the camera and the sprite pipeline.
///
/// Each frame: begin the batch, update the current scene (components record
/// draws), then clear the window and flush the batch.
pub struct Engine {
    config: EngineConfig,
    scenes: SceneManager,
    camera: Camera,
    batch: SpriteBatch,
    meshes: MeshLibrary,
    resources: Option<SpriteResources>,
    applied_vsync: Option<bool>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let camera = Camera::new(config.size.0, config.size.1);
        Self {
            config,
            scenes: SceneManager::new(),
            camera,
            batch: SpriteBatch::new(),
            meshes: MeshLibrary::new(),
            resources: None,
            applied_vsync: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.config.size = (width, height);
        self.camera.update_screen_size(width, height);
        self
    }

    pub fn clear_color(mut self, color: Color32) -> Self {
        self.config.clear_color = color;
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    pub fn fps_limit(mut self, fps: u32) -> Self {
        self.config.fps_limit = fps;
        self
    }

    pub fn camera_projection(mut self, enabled: bool) -> Self {
        self.config.camera_projection = enabled;
        self
    }

    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.load_scene(scene);
        self
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Toggles vsync; applied to the surface on the next frame.
    pub fn set_vsync(&mut self, vsync: bool) {
        self.config.vsync = vsync;
    }

    #[inline]
    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    #[inline]
    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Mesh store for registering custom sprite shapes before `run`.
    #[inline]
    pub fn meshes_mut(&mut self) -> &mut MeshLibrary {
        &mut self.meshes
    }

    /// Draws recorded by the last update.
    #[inline]
    pub fn batch(&self) -> &SpriteBatch {
        &self.batch
    }

    /// Initializes logging, opens the window and runs until it closes.
    pub fn run(self) -> anyhow::Result<()> {
        init_logging(self.config.logging.clone());

        let runtime = self.config.runtime();
        let gpu_init = self.config.gpu_init();
        log::info!(
            "starting {:?} ({}x{}, vsync {}, fps limit {})",
            self.config.title,
            self.config.size.0,
            self.config.size.1,
            self.config.vsync,
            self.config.fps_limit
        );

        Runtime::run(runtime, gpu_init, self)
    }

    /// Runs one simulation step: updates the current scene and records its draws.
    pub fn update(&mut self, dt: f32, input: &InputState, input_frame: &InputFrame) {
        self.batch.begin_frame();
        if self.config.camera_projection {
            self.camera.apply_projection(&mut self.batch);
        }

        let mut frame = FrameState {
            dt,
            input,
            input_frame,
            camera: &self.camera,
            batch: &mut self.batch,
        };
        self.scenes.update(&mut frame);
    }
}

impl App for Engine {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        self.camera
            .update_screen_size(ctx.viewport.width, ctx.viewport.height);

        let resources =
            SpriteResources::new(ctx, &self.meshes).context("sprite renderer setup failed")?;
        self.resources = Some(resources);
        // The surface was configured from `config.gpu_init()`.
        self.applied_vsync = Some(self.config.vsync);
        Ok(())
    }

    fn on_resize(&mut self, width: f32, height: f32) {
        self.camera.update_screen_size(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.applied_vsync != Some(self.config.vsync) {
            ctx.gpu.set_present_mode(present_mode(self.config.vsync));
            self.applied_vsync = Some(self.config.vsync);
        }

        self.update(ctx.time.dt, ctx.input, ctx.input_frame);

        let Some(resources) = self.resources.as_mut() else {
            log::error!("frame requested before the sprite renderer was initialized");
            return AppControl::Exit;
        };
        let (batch, meshes) = (&self.batch, &self.meshes);

        ctx.render(self.config.clear_color, |rctx, target| {
            resources.flush(rctx, target, batch, meshes);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::SpriteRenderer;
    use crate::math::Vec2;
    use crate::render::{sprite_projection, Sprite};
    use crate::scene::{GameObject, Transform};

    fn engine_with_player() -> Engine {
        let mut scene = Scene::new("main");
        let mut player = GameObject::with_transform("player", Transform::at(Vec2::new(1.0, 1.0)));
        player.add_component(SpriteRenderer::new(Sprite::Rectangle));
        scene.instantiate(player);

        Engine::default().scene(scene)
    }

    #[test]
    fn update_records_scene_draws_with_fixed_projection() {
        let mut engine = engine_with_player();
        engine.update(0.016, &InputState::default(), &InputFrame::default());

        assert_eq!(engine.batch().len(), 1);
        assert_eq!(engine.batch().calls()[0].projection, sprite_projection());
    }

    #[test]
    fn camera_projection_replaces_fixed_view() {
        let mut engine = engine_with_player().camera_projection(true);
        engine.camera_mut().zoom = 5.0;
        engine.update(0.016, &InputState::default(), &InputFrame::default());

        assert_eq!(engine.batch().calls()[0].projection, engine.camera().projection_matrix());
    }

    #[test]
    fn each_update_starts_a_fresh_batch() {
        let mut engine = engine_with_player();
        engine.update(0.016, &InputState::default(), &InputFrame::default());
        engine.update(0.016, &InputState::default(), &InputFrame::default());
        assert_eq!(engine.batch().len(), 1);
    }

    #[test]
    fn builder_keeps_camera_in_sync_with_size() {
        let engine = Engine::default().size(1024.0, 512.0).title("t");
        assert_eq!(engine.camera().screen_size(), (1024.0, 512.0));
        assert_eq!(engine.config().title, "t");
    }
}
