use crate::{
    actions::list::{Action, ActionCtx},
    foundation::core::{ActorId, Point, Vec2},
    foundation::error::{SceneryError, SceneryResult},
    physics::{BodyHandle, PhysicsWorld},
};

/// Resolves the owner's body and the simulation it lives in.
fn with_body<R>(
    ctx: &mut ActionCtx<'_>,
    f: impl FnOnce(&mut (dyn PhysicsWorld + 'static), BodyHandle) -> R,
) -> SceneryResult<R> {
    let id: ActorId = ctx.actor()?;
    let (body, scene) = ctx
        .world
        .actor(id)
        .map(|a| (a.body(), a.scene()))
        .ok_or_else(|| SceneryError::not_found(format!("actor {id:?}")))?;
    let body = body.ok_or_else(|| SceneryError::not_found(format!("physics body of actor {id:?}")))?;
    let physics = ctx
        .world
        .physics_for(scene)
        .ok_or_else(|| SceneryError::not_found("no physics world for this actor"))?;
    Ok(f(physics, body))
}

/// Applies a one-off impulse to the owner's body.
#[derive(Clone, Debug)]
pub struct ApplyImpulse {
    pub impulse: Vec2,
    /// World point to apply at; the centre of mass when unset.
    pub point: Option<Point>,
}

impl ApplyImpulse {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            impulse: Vec2::new(x, y),
            point: None,
        }
    }
}

impl Action for ApplyImpulse {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let (impulse, point) = (self.impulse, self.point);
        with_body(ctx, |physics, body| {
            physics.set_awake(body, true);
            physics.apply_impulse(body, impulse, point);
        })
    }
}

/// Applies a force every tick for `duration` seconds (a single tick when zero).
#[derive(Clone, Debug)]
pub struct ApplyForce {
    pub force: Vec2,
    pub point: Option<Point>,
    pub duration: f64,
    elapsed: f64,
}

impl ApplyForce {
    pub fn new(x: f64, y: f64, duration: f64) -> Self {
        Self {
            force: Vec2::new(x, y),
            point: None,
            duration,
            elapsed: 0.0,
        }
    }
}

impl Action for ApplyForce {
    fn on_init(&mut self, _ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        self.elapsed = 0.0;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        let (force, point) = (self.force, self.point);
        with_body(ctx, |physics, body| {
            physics.set_awake(body, true);
            physics.apply_force(body, force, point);
        })?;
        self.elapsed += ctx.dt;
        Ok(self.elapsed < self.duration)
    }
}

/// Sets linear and/or angular velocity; actors without a body get `vx`/`vy`/`vr` instead.
#[derive(Clone, Debug, Default)]
pub struct SetVelocity {
    pub linear: Option<Vec2>,
    pub angular: Option<f64>,
}

impl Action for SetVelocity {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let id = ctx.actor()?;
        let has_body = ctx.world.actor(id).and_then(|a| a.body()).is_some();
        if !has_body {
            if let Some(actor) = ctx.world.actor_mut(id) {
                if let Some(v) = self.linear {
                    actor.vx = v.x;
                    actor.vy = v.y;
                }
                if let Some(w) = self.angular {
                    actor.vr = w;
                }
            }
            return Ok(());
        }
        let (linear, angular) = (self.linear, self.angular);
        with_body(ctx, |physics, body| {
            if let Some(v) = linear {
                physics.set_linear_velocity(body, v);
            }
            if let Some(w) = angular {
                physics.set_angular_velocity(body, w);
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actions/physics.rs"]
mod tests;
