use crate::{
    actions::list::{Action, ActionCtx},
    animation::ease::Ease,
    foundation::core::{ActorId, Point, Vec2},
    foundation::error::{SceneryError, SceneryResult},
    foundation::math::lerp,
    graph::world::World,
};

fn position(world: &World, id: ActorId) -> SceneryResult<Point> {
    world
        .actor(id)
        .map(|a| Point::new(a.x, a.y))
        .ok_or_else(|| SceneryError::not_found(format!("actor {id:?}")))
}

/// Moves the owner to a point over a fixed duration.
#[derive(Clone, Debug)]
pub struct MoveTo {
    pub to: Point,
    pub duration: f64,
    pub ease: Ease,
    from: Point,
    elapsed: f64,
}

impl MoveTo {
    pub fn new(x: f64, y: f64, duration: f64, ease: Ease) -> Self {
        Self {
            to: Point::new(x, y),
            duration,
            ease,
            from: Point::ZERO,
            elapsed: 0.0,
        }
    }
}

impl Action for MoveTo {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        self.from = position(ctx.world, ctx.actor()?)?;
        self.elapsed = 0.0;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        let id = ctx.actor()?;
        self.elapsed += ctx.dt;
        let p = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        let t = self.ease.apply(p);
        ctx.world.set_position(
            id,
            lerp(self.from.x, self.to.x, t),
            lerp(self.from.y, self.to.y, t),
        );
        Ok(p < 1.0)
    }
}

/// Moves the owner towards a point at a constant speed in pixels per second.
#[derive(Clone, Debug)]
pub struct MoveWithSpeed {
    pub to: Point,
    pub speed: f64,
}

impl MoveWithSpeed {
    pub fn new(x: f64, y: f64, speed: f64) -> Self {
        Self {
            to: Point::new(x, y),
            speed,
        }
    }
}

impl Action for MoveWithSpeed {
    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        let id = ctx.actor()?;
        let pos = position(ctx.world, id)?;
        let delta = self.to - pos;
        let step = self.speed * ctx.dt;
        let dist = delta.hypot();
        if dist <= step || self.speed <= 0.0 {
            ctx.world.set_position(id, self.to.x, self.to.y);
            return Ok(false);
        }
        let next = pos + delta * (step / dist);
        ctx.world.set_position(id, next.x, next.y);
        Ok(true)
    }
}

/// Chases another actor at a constant speed.
///
/// Completes once within `stop_distance` of the target (never, if unset) or when the target
/// goes away.
#[derive(Clone, Debug)]
pub struct ChaseActor {
    pub target: ActorId,
    pub speed: f64,
    pub stop_distance: Option<f64>,
}

impl ChaseActor {
    pub fn new(target: ActorId, speed: f64) -> Self {
        Self {
            target,
            speed,
            stop_distance: None,
        }
    }

    pub fn until_within(mut self, distance: f64) -> Self {
        self.stop_distance = Some(distance);
        self
    }
}

impl Action for ChaseActor {
    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        let id = ctx.actor()?;
        let Ok(goal) = position(ctx.world, self.target) else {
            return Ok(false);
        };
        let pos = position(ctx.world, id)?;
        let delta = goal - pos;
        let dist = delta.hypot();
        if self.stop_distance.is_some_and(|d| dist <= d) {
            return Ok(false);
        }
        if dist > 0.0 {
            let step = (self.speed * ctx.dt).min(dist);
            let next = pos + delta * (step / dist);
            ctx.world.set_position(id, next.x, next.y);
        }
        Ok(true)
    }
}

/// Accelerates the owner's velocity towards another actor.
///
/// Runs for `duration` seconds, or until the target goes away when `duration` is zero.
#[derive(Clone, Debug)]
pub struct Attract {
    pub target: ActorId,
    /// Acceleration in pixels per second squared.
    pub strength: f64,
    pub duration: f64,
    elapsed: f64,
}

impl Attract {
    pub fn new(target: ActorId, strength: f64, duration: f64) -> Self {
        Self {
            target,
            strength,
            duration,
            elapsed: 0.0,
        }
    }
}

impl Action for Attract {
    fn on_init(&mut self, _ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        self.elapsed = 0.0;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        let id = ctx.actor()?;
        let Ok(goal) = position(ctx.world, self.target) else {
            return Ok(false);
        };
        let pos = position(ctx.world, id)?;
        let delta: Vec2 = goal - pos;
        let dist = delta.hypot();
        if dist > 0.0 {
            let accel = delta * (self.strength * ctx.dt / dist);
            if let Some(actor) = ctx.world.actor_mut(id) {
                actor.vx += accel.x;
                actor.vy += accel.y;
            }
        }
        self.elapsed += ctx.dt;
        Ok(self.duration <= 0.0 || self.elapsed < self.duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actions/movement.rs"]
mod tests;
