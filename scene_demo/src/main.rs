//! Headless demo driving a small scene hierarchy for a fixed number of frames
//!
//! Usage: `scene_demo [config.toml|config.ron]`

use scene_core::foundation::logging;
use scene_core::prelude::*;

const FRAME_COUNT: u32 = 180;
const FIXED_DELTA: f64 = 1.0 / 60.0;

/// Rotates its node at a constant rate
struct Spin {
    degrees_per_second: f64,
    angle: f64,
}

impl Behavior for Spin {
    fn update(&mut self, _ctx: &FrameContext<'_>, delta_time: f64) {
        self.angle = (self.angle + self.degrees_per_second * delta_time) % 360.0;
    }
}

/// Follows the nearest spinning ancestor at a fixed radius
struct Orbit {
    radius: f64,
    position: (f64, f64),
}

impl Behavior for Orbit {
    fn update(&mut self, ctx: &FrameContext<'_>, _delta_time: f64) {
        if let Some((_, spin)) = ctx.find_in_ancestors::<Spin>() {
            let radians = spin.angle.to_radians();
            self.position = (self.radius * radians.cos(), self.radius * radians.sin());
        }
    }
}

/// Reports where its node ended up this frame
struct Tracer;

impl Behavior for Tracer {
    fn render(&self, ctx: &FrameContext<'_>) {
        for &child in ctx.scene().children(ctx.owner()) {
            if let Some(orbit) = ctx.scene().component::<Orbit>(child) {
                log::debug!(
                    "{} at ({:.2}, {:.2})",
                    ctx.scene().name(child).unwrap_or_default(),
                    orbit.position.0,
                    orbit.position.1
                );
            }
        }
    }
}

fn build_scene(config: &SceneConfig) -> Result<(Scene, NodeId, NodeId), SceneError> {
    let (mut scene, root) = Scene::with_root(config);
    let sun = scene.create_node("sun");
    let planet = scene.create_node("planet");
    let moon = scene.create_node("moon");
    scene.add_child(root, sun)?;
    scene.add_child(sun, planet)?;
    scene.add_child(planet, moon)?;

    let sun_spin = scene.create_behavior(Spin { degrees_per_second: 30.0, angle: 0.0 });
    let planet_spin = scene.create_behavior(Spin { degrees_per_second: 120.0, angle: 0.0 });
    let planet_orbit = scene.create_behavior(Orbit { radius: 10.0, position: (10.0, 0.0) });
    let moon_orbit = scene.create_behavior(Orbit { radius: 1.5, position: (1.5, 0.0) });
    let tracer = scene.create_behavior(Tracer);
    scene.add_component(sun, sun_spin)?;
    scene.add_component(planet, planet_spin)?;
    scene.add_component(planet, planet_orbit)?;
    scene.add_component(moon, moon_orbit)?;
    scene.add_component(sun, tracer)?;

    Ok((scene, root, sun))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load_from_file(path)?,
        None => SceneConfig::default(),
    };
    config.validate()?;
    logging::init_with_level(&config.log_level);

    log::info!("Starting scene demo");

    let (mut scene, root, sun) = build_scene(&config)?;
    log::info!(
        "Built scene with {} nodes and {} behaviors",
        scene.node_count(),
        scene.behavior_count()
    );

    for frame in 0..FRAME_COUNT {
        scene.update(root, FIXED_DELTA);
        scene.render(sun);

        // Halfway through, park the whole system for a second.
        if frame == FRAME_COUNT / 2 {
            scene.set_enabled(sun, false)?;
        } else if frame == FRAME_COUNT / 2 + 60 {
            scene.set_enabled(sun, true)?;
        }
    }

    if let Some(spin) = scene.component::<Spin>(sun) {
        log::info!("Sun finished at {:.1} degrees", spin.angle);
    }

    scene.destroy_node(sun);
    log::info!(
        "Scene demo completed: {} node(s), {} behavior(s) left",
        scene.node_count(),
        scene.behavior_count()
    );
    Ok(())
}
