mod player;

use ember_engine::components::SpriteRenderer;
use ember_engine::math::{Color32, Vec2};
use ember_engine::particles::{ColorRange, EmitterShape, ParticleSystem, ParticleSystemConfig, ValueRange};
use ember_engine::render::Sprite;
use ember_engine::scene::{GameObject, Scene, Transform};
use ember_engine::{Engine, EngineConfig};

use player::PlayerMovement;

fn main() -> anyhow::Result<()> {
    let config = EngineConfig {
        title: "Ember Preview".to_string(),
        size: (800.0, 600.0),
        vsync: false,
        fps_limit: 0,
        camera_projection: true,
        ..EngineConfig::default()
    };

    let engine = Engine::new(config).scene(main_scene());
    engine.run()
}

fn main_scene() -> Scene {
    let mut scene = Scene::new("Main Scene");

    let mut player = GameObject::with_transform(
        "Player1",
        Transform::new(Vec2::ZERO, 0.0, Vec2::new(0.2, 0.2)),
    );
    player.add_component(SpriteRenderer::new(Sprite::Rectangle));
    player.add_component(PlayerMovement::new(5.0, 720.0));
    scene.instantiate(player);

    let mut emitter = GameObject::with_transform("Sparks", Transform::at(Vec2::new(0.0, -3.0)));
    emitter.transform.rotation = 90.0;
    emitter.add_component(ParticleSystem::new(sparks()));
    scene.instantiate(emitter);

    log::debug!("scene '{}' built with {} objects", scene.name(), scene.objects().len());
    scene
}

fn sparks() -> ParticleSystemConfig {
    ParticleSystemConfig {
        max_particles: 300,
        emission_rate: 60.0,
        lifetime: ValueRange::new(0.8, 1.6),
        speed: ValueRange::new(2.0, 4.0),
        start_size: ValueRange::new(0.15, 0.25),
        end_size: ValueRange::constant(0.0),
        start_color: ColorRange::new(
            Color32::rgb(1.0, 0.55, 0.1),
            Color32::rgb(1.0, 0.85, 0.3),
        ),
        end_color: ColorRange::constant(Color32::RED.with_alpha(0.0)),
        angular_velocity: ValueRange::new(-180.0, 180.0),
        shape: EmitterShape::Cone,
        cone_angle: 25.0,
        sprite: Sprite::Triangle,
        gravity: 3.0,
        ..ParticleSystemConfig::default()
    }
}
