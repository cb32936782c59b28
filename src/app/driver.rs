use smallvec::SmallVec;

use crate::{
    app::{config::AppConfig, input::InputState, timing::FrameClock},
    foundation::core::{Owner, SceneId},
    foundation::error::SceneryResult,
    graph::world::World,
    render::surface::Surface,
};

/// Frame driver: owns the world, the frame clock and the input focus state.
///
/// An external scheduler calls [`App::frame`] (or [`App::update`] and [`App::draw`]) once per
/// display refresh; the app never schedules itself.
#[derive(Debug)]
pub struct App {
    pub world: World,
    config: AppConfig,
    clock: FrameClock,
    pub(crate) input: InputState,
}

impl App {
    pub fn new(config: AppConfig) -> SceneryResult<Self> {
        config.validate()?;
        let mut world = World::new(config.display());
        world.debug = config.debug;
        world.physics_settings = config.physics;
        Ok(Self {
            world,
            clock: FrameClock::new(config.target_frame_rate, config.max_dt),
            config,
            input: InputState::default(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn avg_fps(&self) -> f64 {
        self.clock.avg_fps()
    }

    /// Runs one full frame: next delta from the clock, update, draw. Returns the delta used.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> SceneryResult<f64> {
        let dt = self.clock.next_dt();
        self.update(dt)?;
        self.draw(surface);
        Ok(dt)
    }

    /// Logic for one frame: app managers, shared physics, scenes, scene removals, scene order.
    ///
    /// Only physics provider errors are returned; callback failures are logged and contained.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn update(&mut self, dt: f64) -> SceneryResult<()> {
        let world = &mut self.world;
        world.dt = dt;
        world.reset_stats();
        world.run_managers(Owner::App, dt);

        if world.has_shared_physics() {
            let steps = self.clock.physics_steps(self.config.adaptive_physics);
            world.step_shared_physics(dt, steps)?;
        }

        let scenes: SmallVec<[SceneId; 4]> = world.scene_order.iter().copied().collect();
        for scene in scenes {
            world.update_scene(scene, dt)?;
        }
        world.flush_scene_removals();
        world.sort_scenes();
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        self.world.draw(surface);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/driver.rs"]
mod tests;
