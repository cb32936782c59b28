use crate::{
    actions::list::{Action, ActionCtx},
    animation::ease::Ease,
    foundation::core::{ActorId, Point, SceneId},
    foundation::error::{SceneryError, SceneryResult},
    foundation::math::lerp,
};

/// Glides the camera of the owning scene to a point.
#[derive(Clone, Debug)]
pub struct CameraMoveTo {
    pub to: Point,
    pub duration: f64,
    pub ease: Ease,
    from: Point,
    scene: Option<SceneId>,
    elapsed: f64,
}

impl CameraMoveTo {
    pub fn new(x: f64, y: f64, duration: f64, ease: Ease) -> Self {
        Self {
            to: Point::new(x, y),
            duration,
            ease,
            from: Point::ZERO,
            scene: None,
            elapsed: 0.0,
        }
    }
}

impl Action for CameraMoveTo {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let id = ctx.scene()?;
        let scene = ctx
            .world
            .scene_mut(id)
            .ok_or_else(|| SceneryError::not_found(format!("scene {id:?}")))?;
        self.from = Point::new(scene.camera.x, scene.camera.y);
        scene.camera.vx = 0.0;
        scene.camera.vy = 0.0;
        self.scene = Some(id);
        self.elapsed = 0.0;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        let Some(scene) = self.scene.and_then(|id| ctx.world.scene_mut(id)) else {
            return Ok(false);
        };
        self.elapsed += ctx.dt;
        let p = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        let t = self.ease.apply(p);
        scene.camera.x = lerp(self.from.x, self.to.x, t);
        scene.camera.y = lerp(self.from.y, self.to.y, t);
        Ok(p < 1.0)
    }
}

/// Points the camera of the owning scene at an actor (or stops following with `None`).
#[derive(Clone, Debug)]
pub struct CameraFollow {
    pub target: Option<ActorId>,
    pub speed: f64,
}

impl CameraFollow {
    pub fn new(target: Option<ActorId>, speed: f64) -> Self {
        Self { target, speed }
    }
}

impl Action for CameraFollow {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let id = ctx.scene()?;
        let scene = ctx
            .world
            .scene_mut(id)
            .ok_or_else(|| SceneryError::not_found(format!("scene {id:?}")))?;
        scene.camera.follow(self.target, self.speed);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actions/camera.rs"]
mod tests;
