use crate::{
    actions::list::{Action, ActionCtx},
    animation::{
        ease::Ease,
        property::{Property, Target},
    },
    foundation::core::{ActorId, Owner, SceneId},
    foundation::error::{SceneryError, SceneryResult},
    foundation::math::lerp,
};

/// Play state change applied by [`PlayTimeline`] and [`ChangeActions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    Play,
    Pause,
    Restart,
}

/// Idles for a fixed number of seconds.
#[derive(Clone, Debug)]
pub struct Wait {
    pub duration: f64,
    elapsed: f64,
}

impl Wait {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            elapsed: 0.0,
        }
    }
}

impl Action for Wait {
    fn on_init(&mut self, _ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        self.elapsed = 0.0;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        self.elapsed += ctx.dt;
        Ok(self.elapsed < self.duration)
    }
}

/// Calls a closure once and completes.
pub struct Call<F>(pub F);

impl<F> Action for Call<F>
where
    F: FnMut(&mut ActionCtx<'_>) -> SceneryResult<()>,
{
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        (self.0)(ctx)
    }
}

fn resolve_target(target: Option<Target>, ctx: &ActionCtx<'_>) -> SceneryResult<Target> {
    match target {
        Some(t) => Ok(t),
        None => ctx.target(),
    }
}

/// Assigns property values on start. Without an explicit target the list owner is used.
#[derive(Clone, Debug)]
pub struct SetProps {
    pub target: Option<Target>,
    pub props: Vec<(Property, f64)>,
}

impl SetProps {
    pub fn new(props: Vec<(Property, f64)>) -> Self {
        Self {
            target: None,
            props,
        }
    }

    pub fn on(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl Action for SetProps {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let target = resolve_target(self.target, ctx)?;
        for (property, value) in &self.props {
            if !ctx.world.set_property(target, property, *value) {
                return Err(SceneryError::not_found(format!(
                    "property \"{property}\" on {target:?}"
                )));
            }
        }
        Ok(())
    }
}

/// Adds deltas to property values on start.
#[derive(Clone, Debug)]
pub struct AddProps {
    pub target: Option<Target>,
    pub props: Vec<(Property, f64)>,
}

impl AddProps {
    pub fn new(props: Vec<(Property, f64)>) -> Self {
        Self {
            target: None,
            props,
        }
    }

    pub fn on(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl Action for AddProps {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let target = resolve_target(self.target, ctx)?;
        for (property, delta) in &self.props {
            let current = ctx.world.get_property(target, property).unwrap_or(0.0);
            ctx.world.set_property(target, property, current + delta);
        }
        Ok(())
    }
}

/// Tweens several properties from their values at start to the given ones.
#[derive(Clone, Debug)]
pub struct TweenProps {
    pub target: Option<Target>,
    pub props: Vec<(Property, f64)>,
    pub duration: f64,
    pub ease: Ease,
    from: Vec<f64>,
    resolved: Option<Target>,
    elapsed: f64,
}

impl TweenProps {
    pub fn new(props: Vec<(Property, f64)>, duration: f64, ease: Ease) -> Self {
        Self {
            target: None,
            props,
            duration,
            ease,
            from: Vec::new(),
            resolved: None,
            elapsed: 0.0,
        }
    }

    pub fn on(mut self, target: impl Into<Target>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl Action for TweenProps {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let target = resolve_target(self.target, ctx)?;
        self.from = self
            .props
            .iter()
            .map(|(p, _)| ctx.world.get_property(target, p).unwrap_or(0.0))
            .collect();
        self.resolved = Some(target);
        self.elapsed = 0.0;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        let Some(target) = self.resolved else {
            return Ok(false);
        };
        self.elapsed += ctx.dt;
        let p = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        let eased = self.ease.apply(p);
        for ((property, to), from) in self.props.iter().zip(&self.from) {
            ctx.world.set_property(target, property, lerp(*from, *to, eased));
        }
        Ok(p < 1.0)
    }
}

/// Marks an actor (the owner by default) for removal.
#[derive(Clone, Debug, Default)]
pub struct DestroyActor {
    pub target: Option<ActorId>,
}

impl Action for DestroyActor {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let id = match self.target {
            Some(id) => id,
            None => ctx.actor()?,
        };
        ctx.world.remove_actor(id);
        Ok(())
    }
}

/// Switches the owner's sprite to a named atlas sequence.
#[derive(Clone, Debug)]
pub struct PlayAnim {
    pub name: String,
}

impl PlayAnim {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Action for PlayAnim {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let id = ctx.actor()?;
        ctx.world.play_anim(id, &self.name);
        Ok(())
    }
}

/// Plays, pauses or restarts a named timeline of an owner (the list owner by default).
#[derive(Clone, Debug)]
pub struct PlayTimeline {
    pub owner: Option<Owner>,
    pub name: String,
    pub playback: Playback,
}

impl PlayTimeline {
    pub fn new(name: impl Into<String>, playback: Playback) -> Self {
        Self {
            owner: None,
            name: name.into(),
            playback,
        }
    }

    pub fn of(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl Action for PlayTimeline {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let owner = self.owner.unwrap_or(ctx.owner);
        let timelines = ctx
            .world
            .timelines(owner)
            .ok_or_else(|| SceneryError::not_found(format!("{owner:?}")))?;
        match self.playback {
            Playback::Play => timelines.play_named(&self.name),
            Playback::Pause => timelines.pause_named(&self.name),
            Playback::Restart => timelines.restart_named(&self.name),
        }
        Ok(())
    }
}

/// Plays, pauses or restarts a named action list of an owner (the list owner by default).
#[derive(Clone, Debug)]
pub struct ChangeActions {
    pub owner: Option<Owner>,
    pub name: String,
    pub playback: Playback,
}

impl ChangeActions {
    pub fn new(name: impl Into<String>, playback: Playback) -> Self {
        Self {
            owner: None,
            name: name.into(),
            playback,
        }
    }

    pub fn of(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }
}

impl Action for ChangeActions {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        let owner = self.owner.unwrap_or(ctx.owner);
        let lists = ctx
            .world
            .action_lists(owner)
            .ok_or_else(|| SceneryError::not_found(format!("{owner:?}")))?;
        match self.playback {
            Playback::Play => lists.play_named(&self.name),
            Playback::Pause => lists.pause_named(&self.name),
            Playback::Restart => lists.restart_named(&self.name),
        }
        Ok(())
    }
}

/// Routes input to a scene, as the primary or the secondary focus.
#[derive(Clone, Debug)]
pub struct FocusScene {
    pub scene: SceneId,
    pub secondary: bool,
}

impl Action for FocusScene {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        if ctx.world.scene(self.scene).is_none() {
            return Err(SceneryError::not_found(format!("scene {:?}", self.scene)));
        }
        if self.secondary {
            ctx.world.focus_scene2 = Some(self.scene);
        } else {
            ctx.world.focus_scene = Some(self.scene);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actions/general.rs"]
mod tests;
