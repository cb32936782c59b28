use std::collections::HashMap;

use slotmap::SlotMap;

use crate::{
    actions::list::ActionListManager,
    animation::{
        ease::Ease,
        keyframe::KeyframeAnimation,
        property::{Property, Target},
        timeline::{Timeline, TimelineId, TimelineManager},
    },
    foundation::core::{ActorId, Display, Owner, Point, SceneId},
    foundation::error::{SceneryError, SceneryResult},
    graph::{
        actor::{Actor, ActorHandler, ActorHandlers},
        scene::{Scene, SceneHandler, SceneHandlers},
    },
    physics::{
        BodyDef, BodyHandle, FixtureDef, JointDef, JointHandle, JointKind, PhysicsSettings,
        PhysicsWorld,
    },
    resources::Resources,
    tasks::manager::TaskManager,
};

/// The timeline, action-list and task managers owned by the app, a scene or an actor.
#[derive(Debug, Default)]
pub struct Managers {
    pub timelines: TimelineManager,
    pub actions: ActionListManager,
    pub tasks: TaskManager,
}

/// Per-frame counters, reset at the start of every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrameStats {
    pub actors_updated: u64,
    pub actors_drawn: u64,
    pub transforms_computed: u64,
}

/// Arena owning every scene and actor, plus the app-wide state actors can reach.
///
/// Hierarchy links (`parent`, `scene`, camera targets, focus) are plain handles; a handle whose
/// actor has been released simply stops resolving.
pub struct World {
    pub(crate) actors: SlotMap<ActorId, Actor>,
    pub(crate) scenes: SlotMap<SceneId, Scene>,
    pub(crate) scene_order: Vec<SceneId>,
    pub(crate) scene_removals: Vec<SceneId>,
    pub(crate) scene_order_changed: bool,
    /// App-level managers.
    pub managers: Managers,
    pub display: Display,
    pub physics_settings: PhysicsSettings,
    pub resources: Resources,
    /// Log configuration problems (unknown animations, missing resources) as warnings.
    pub debug: bool,
    pub vars: HashMap<String, f64>,
    pub focus_scene: Option<SceneId>,
    pub focus_scene2: Option<SceneId>,
    pub(crate) physics: Option<Box<dyn PhysicsWorld>>,
    pub(crate) stats: FrameStats,
    pub(crate) dt: f64,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("actors", &self.actors.len())
            .field("scenes", &self.scene_order)
            .field("display", &self.display)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Display::default())
    }
}

impl World {
    pub fn new(display: Display) -> Self {
        Self {
            actors: SlotMap::with_key(),
            scenes: SlotMap::with_key(),
            scene_order: Vec::new(),
            scene_removals: Vec::new(),
            scene_order_changed: false,
            managers: Managers::default(),
            display,
            physics_settings: PhysicsSettings::default(),
            resources: Resources::new(),
            debug: false,
            vars: HashMap::new(),
            focus_scene: None,
            focus_scene2: None,
            physics: None,
            stats: FrameStats::default(),
            dt: 0.0,
        }
    }

    /// Delta of the frame being processed.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = FrameStats::default();
    }

    // ---- scenes -------------------------------------------------------------

    /// Adds a scene; the first scene added becomes the focus scene.
    pub fn add_scene(&mut self, scene: Scene) -> SceneId {
        let id = self.scenes.insert(scene);
        self.scene_order.push(id);
        self.scene_order_changed = true;
        if self.focus_scene.is_none() {
            self.focus_scene = Some(id);
        }
        id
    }

    /// Creates an empty scene sized to the design resolution.
    pub fn create_scene(&mut self, name: impl Into<String>) -> SceneId {
        let (w, h) = (self.display.design_width, self.display.design_height);
        self.add_scene(Scene::new(name, w, h))
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(id)
    }

    /// Scenes in draw order.
    pub fn scene_ids(&self) -> &[SceneId] {
        &self.scene_order
    }

    pub fn find_scene(&self, name: &str) -> Option<SceneId> {
        self.scene_order
            .iter()
            .copied()
            .find(|id| self.scenes.get(*id).is_some_and(|s| s.name == name))
    }

    /// Marks a scene for removal at the end of the current frame's scene updates.
    pub fn remove_scene(&mut self, id: SceneId) {
        let Some(scene) = self.scenes.get_mut(id) else {
            return;
        };
        if !scene.pending_removal {
            scene.pending_removal = true;
            self.scene_removals.push(id);
        }
    }

    pub fn set_scene_layer(&mut self, id: SceneId, layer: i32) {
        if let Some(scene) = self.scenes.get_mut(id) {
            scene.layer = layer;
            self.scene_order_changed = true;
        }
    }

    pub(crate) fn flush_scene_removals(&mut self) {
        for id in std::mem::take(&mut self.scene_removals) {
            let Some(scene) = self.scenes.get(id) else {
                continue;
            };
            let roots = scene.actors.clone();
            for root in roots {
                self.release(root);
            }
            if let Some(scene) = self.scenes.remove(id) {
                tracing::debug!(scene = %scene.name, "scene removed");
            }
            self.scene_order.retain(|s| *s != id);
            if self.focus_scene == Some(id) {
                self.focus_scene = None;
            }
            if self.focus_scene2 == Some(id) {
                self.focus_scene2 = None;
            }
        }
    }

    /// Stable sort by layer, only when a layer changed since the last sort.
    pub(crate) fn sort_scenes(&mut self) {
        if !self.scene_order_changed {
            return;
        }
        self.scene_order_changed = false;
        let scenes = &self.scenes;
        self.scene_order
            .sort_by_key(|id| scenes.get(*id).map(|s| s.layer).unwrap_or(0));
    }

    // ---- actors -------------------------------------------------------------

    /// Adds `actor` as a root of `scene`.
    pub fn add_actor(&mut self, scene: SceneId, mut actor: Actor) -> SceneryResult<ActorId> {
        if !self.scenes.contains_key(scene) {
            return Err(SceneryError::not_found(format!("scene {scene:?}")));
        }
        actor.scene = Some(scene);
        actor.parent = None;
        actor.transform_dirty = true;
        let id = self.actors.insert(actor);
        if let Some(s) = self.scenes.get_mut(scene) {
            s.actors.push(id);
            s.order_changed = true;
        }
        Ok(id)
    }

    /// Adds `actor` as the last child of `parent`.
    pub fn add_child(&mut self, parent: ActorId, mut actor: Actor) -> SceneryResult<ActorId> {
        let Some(p) = self.actors.get(parent) else {
            return Err(SceneryError::not_found(format!("actor {parent:?}")));
        };
        actor.scene = p.scene;
        actor.parent = Some(parent);
        actor.transform_dirty = true;
        let id = self.actors.insert(actor);
        if let Some(p) = self.actors.get_mut(parent) {
            p.children.push(id);
            p.order_changed = true;
        }
        Ok(id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Direct access. Call [`World::dirty`] after editing transform inputs this way.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    pub fn contains_actor(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn children(&self, id: ActorId) -> &[ActorId] {
        self.actors
            .get(id)
            .map(|a| a.children.as_slice())
            .unwrap_or(&[])
    }

    /// Depth-first search by name through a scene's forest.
    pub fn find_actor(&self, scene: SceneId, name: &str) -> Option<ActorId> {
        let mut stack: Vec<ActorId> =
            self.scenes.get(scene)?.actors.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(actor) = self.actors.get(id) else {
                continue;
            };
            if actor.name == name {
                return Some(id);
            }
            stack.extend(actor.children.iter().rev().copied());
        }
        None
    }

    /// Marks an actor for removal; it is released when its parent (or scene) finishes updating.
    pub fn remove_actor(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        if actor.pending_removal {
            return;
        }
        actor.pending_removal = true;
        match (actor.parent, actor.scene) {
            (Some(parent), _) => {
                if let Some(p) = self.actors.get_mut(parent) {
                    p.removals.push(id);
                }
            }
            (None, Some(scene)) => {
                if let Some(s) = self.scenes.get_mut(scene) {
                    s.removals.push(id);
                }
            }
            (None, None) => {
                self.release(id);
            }
        }
    }

    /// Destroys physics state, releases children recursively and detaches `id` from the tree.
    pub(crate) fn release(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut actor.children);
        actor.removals.clear();
        for child in children {
            self.release(child);
        }
        let Some(actor) = self.actors.remove(id) else {
            return;
        };
        if actor.body.is_some() || !actor.joints.is_empty() {
            if let Some(physics) = self.physics_for(actor.scene) {
                for joint in &actor.joints {
                    physics.destroy_joint(*joint);
                }
                if let Some(body) = actor.body {
                    physics.destroy_body(body);
                }
            }
        }
        match (actor.parent, actor.scene) {
            (Some(parent), _) => {
                if let Some(p) = self.actors.get_mut(parent) {
                    p.children.retain(|c| *c != id);
                }
            }
            (None, Some(scene)) => {
                if let Some(s) = self.scenes.get_mut(scene) {
                    s.actors.retain(|c| *c != id);
                }
            }
            (None, None) => {}
        }
        tracing::debug!(actor = %actor.name, "actor released");
    }

    pub(crate) fn flush_actor_removals(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        if actor.removals.is_empty() {
            return;
        }
        for child in std::mem::take(&mut actor.removals) {
            self.release(child);
        }
    }

    pub(crate) fn flush_root_removals(&mut self, scene: SceneId) {
        let Some(s) = self.scenes.get_mut(scene) else {
            return;
        };
        for root in std::mem::take(&mut s.removals) {
            self.release(root);
        }
    }

    /// Changes draw/update order; the containing list is re-sorted after its next update.
    pub fn set_layer(&mut self, id: ActorId, layer: i32) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        if actor.layer == layer {
            return;
        }
        actor.layer = layer;
        match (actor.parent, actor.scene) {
            (Some(parent), _) => {
                if let Some(p) = self.actors.get_mut(parent) {
                    p.order_changed = true;
                }
            }
            (None, Some(scene)) => {
                if let Some(s) = self.scenes.get_mut(scene) {
                    s.order_changed = true;
                }
            }
            (None, None) => {}
        }
    }

    pub(crate) fn sort_children(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        if !actor.order_changed {
            return;
        }
        actor.order_changed = false;
        let mut children = std::mem::take(&mut actor.children);
        let actors = &self.actors;
        children.sort_by_key(|c| actors.get(*c).map(|a| a.layer).unwrap_or(0));
        if let Some(actor) = self.actors.get_mut(id) {
            actor.children = children;
        }
    }

    pub(crate) fn sort_roots(&mut self, scene: SceneId) {
        let Some(s) = self.scenes.get_mut(scene) else {
            return;
        };
        if !s.order_changed {
            return;
        }
        s.order_changed = false;
        let actors = &self.actors;
        s.actors
            .sort_by_key(|c| actors.get(*c).map(|a| a.layer).unwrap_or(0));
    }

    // ---- properties ---------------------------------------------------------

    /// Reads a numeric property; `None` if the target or the property does not exist.
    pub fn get_property(&self, target: Target, property: &Property) -> Option<f64> {
        match target {
            Target::Actor(id) => {
                let a = self.actors.get(id)?;
                Some(match property {
                    Property::X => a.x,
                    Property::Y => a.y,
                    Property::X2 => a.x2,
                    Property::Y2 => a.y2,
                    Property::OriginX => a.ox,
                    Property::OriginY => a.oy,
                    Property::Rotation => a.rotation,
                    Property::ScaleX => a.scale_x,
                    Property::ScaleY => a.scale_y,
                    Property::Depth => a.depth,
                    Property::Opacity => a.opacity,
                    Property::Width => a.w,
                    Property::Height => a.h,
                    Property::Vx => a.vx,
                    Property::Vy => a.vy,
                    Property::Vr => a.vr,
                    Property::Vd => a.vd,
                    Property::FrameSpeed => a.sprite.as_ref()?.frame_speed,
                    Property::CurrentFrame => a.sprite.as_ref()?.current_frame,
                    Property::ScrollX => a.virtual_canvas.as_ref()?.scroll_pos_x,
                    Property::ScrollY => a.virtual_canvas.as_ref()?.scroll_pos_y,
                    Property::CameraX | Property::CameraY => return None,
                    Property::Var(name) => *a.vars.get(name)?,
                })
            }
            Target::Scene(id) => {
                let s = self.scenes.get(id)?;
                Some(match property {
                    Property::X => s.x,
                    Property::Y => s.y,
                    Property::ScaleX | Property::ScaleY => s.scale,
                    Property::Width => s.w,
                    Property::Height => s.h,
                    Property::CameraX => s.camera.x,
                    Property::CameraY => s.camera.y,
                    Property::Vx => s.camera.vx,
                    Property::Vy => s.camera.vy,
                    Property::Var(name) => *s.vars.get(name)?,
                    _ => return None,
                })
            }
        }
    }

    /// Writes a numeric property, invalidating cached transforms where needed.
    /// Returns false if the target or the property does not exist.
    pub fn set_property(&mut self, target: Target, property: &Property, value: f64) -> bool {
        match target {
            Target::Actor(id) => {
                let Some(a) = self.actors.get_mut(id) else {
                    return false;
                };
                let slot = match property {
                    Property::X => &mut a.x,
                    Property::Y => &mut a.y,
                    Property::X2 => &mut a.x2,
                    Property::Y2 => &mut a.y2,
                    Property::OriginX => &mut a.ox,
                    Property::OriginY => &mut a.oy,
                    Property::Rotation => &mut a.rotation,
                    Property::ScaleX => &mut a.scale_x,
                    Property::ScaleY => &mut a.scale_y,
                    Property::Depth => &mut a.depth,
                    Property::Opacity => &mut a.opacity,
                    Property::Width => &mut a.w,
                    Property::Height => &mut a.h,
                    Property::Vx => &mut a.vx,
                    Property::Vy => &mut a.vy,
                    Property::Vr => &mut a.vr,
                    Property::Vd => &mut a.vd,
                    Property::FrameSpeed => match a.sprite.as_mut() {
                        Some(s) => &mut s.frame_speed,
                        None => return false,
                    },
                    Property::CurrentFrame => match a.sprite.as_mut() {
                        Some(s) => &mut s.current_frame,
                        None => return false,
                    },
                    Property::ScrollX => match a.virtual_canvas.as_mut() {
                        Some(vc) => &mut vc.scroll_pos_x,
                        None => return false,
                    },
                    Property::ScrollY => match a.virtual_canvas.as_mut() {
                        Some(vc) => &mut vc.scroll_pos_y,
                        None => return false,
                    },
                    Property::CameraX | Property::CameraY => return false,
                    Property::Var(name) => a.vars.entry(name.clone()).or_insert(0.0),
                };
                *slot = value;
                if property.affects_transform() {
                    self.dirty(id);
                } else if matches!(property, Property::ScrollX | Property::ScrollY) {
                    self.dirty_children(id);
                }
                true
            }
            Target::Scene(id) => {
                let Some(s) = self.scenes.get_mut(id) else {
                    return false;
                };
                match property {
                    Property::X => s.x = value,
                    Property::Y => s.y = value,
                    Property::ScaleX | Property::ScaleY => {
                        s.scale = value;
                        let roots = s.actors.clone();
                        for root in roots {
                            self.dirty(root);
                        }
                    }
                    Property::Width => s.w = value,
                    Property::Height => s.h = value,
                    Property::CameraX => s.camera.x = value,
                    Property::CameraY => s.camera.y = value,
                    Property::Vx => s.camera.vx = value,
                    Property::Vy => s.camera.vy = value,
                    Property::Var(name) => {
                        s.vars.insert(name.clone(), value);
                    }
                    _ => return false,
                }
                true
            }
        }
    }

    /// Sets `x`/`y` and invalidates the subtree.
    pub fn set_position(&mut self, id: ActorId, x: f64, y: f64) {
        if let Some(a) = self.actors.get_mut(id) {
            a.x = x;
            a.y = y;
            self.dirty(id);
        }
    }

    /// Hides and freezes a target (`visible = active = false`).
    pub fn deactivate(&mut self, target: Target) {
        match target {
            Target::Actor(id) => {
                if let Some(a) = self.actors.get_mut(id) {
                    a.visible = false;
                    a.active = false;
                }
            }
            Target::Scene(id) => {
                if let Some(s) = self.scenes.get_mut(id) {
                    s.visible = false;
                    s.active = false;
                }
            }
        }
    }

    // ---- managers -----------------------------------------------------------

    pub fn managers_mut(&mut self, owner: Owner) -> Option<&mut Managers> {
        match owner {
            Owner::App => Some(&mut self.managers),
            Owner::Scene(id) => self.scenes.get_mut(id).map(|s| &mut s.managers),
            Owner::Actor(id) => self.actors.get_mut(id).map(|a| &mut a.managers),
        }
    }

    pub fn timelines(&mut self, owner: Owner) -> Option<&mut TimelineManager> {
        self.managers_mut(owner).map(|m| &mut m.timelines)
    }

    pub fn action_lists(&mut self, owner: Owner) -> Option<&mut ActionListManager> {
        self.managers_mut(owner).map(|m| &mut m.actions)
    }

    pub fn tasks(&mut self, owner: Owner) -> Option<&mut TaskManager> {
        self.managers_mut(owner).map(|m| &mut m.tasks)
    }

    /// Timelines, then action lists, then tasks of one owner.
    ///
    /// Each manager is detached from its owner while it runs so that callbacks can freely
    /// reach the world; whatever they add to the owner meanwhile is merged back afterwards.
    pub(crate) fn run_managers(&mut self, owner: Owner, dt: f64) {
        if let Some(mut timelines) = self
            .managers_mut(owner)
            .map(|m| std::mem::replace(&mut m.timelines, TimelineManager::detached()))
        {
            timelines.update(dt, self);
            if let Some(m) = self.managers_mut(owner) {
                let added = std::mem::replace(&mut m.timelines, timelines);
                m.timelines.absorb(added);
            }
        }

        if let Some(mut actions) = self
            .managers_mut(owner)
            .map(|m| std::mem::replace(&mut m.actions, ActionListManager::detached()))
        {
            actions.execute(self, owner, dt);
            if let Some(m) = self.managers_mut(owner) {
                let added = std::mem::replace(&mut m.actions, actions);
                m.actions.absorb(added);
            }
        }

        if let Some(mut tasks) = self
            .managers_mut(owner)
            .map(|m| std::mem::replace(&mut m.tasks, TaskManager::detached()))
        {
            tasks.execute(self, owner, dt);
            if let Some(m) = self.managers_mut(owner) {
                let added = std::mem::replace(&mut m.tasks, tasks);
                m.tasks.absorb(added);
            }
        }
    }

    /// Tweens `property` of `target` from its current value to `to` on a transient timeline
    /// owned by the target.
    pub fn tween_to(
        &mut self,
        target: impl Into<Target>,
        property: Property,
        to: f64,
        duration: f64,
        ease: Ease,
    ) -> SceneryResult<TimelineId> {
        let target = target.into();
        let from = self.require_property(target, &property)?;
        self.add_tween(target, property, from, to, duration, ease)
    }

    /// Tweens `property` of `target` from `from` back to its current value.
    pub fn tween_from(
        &mut self,
        target: impl Into<Target>,
        property: Property,
        from: f64,
        duration: f64,
        ease: Ease,
    ) -> SceneryResult<TimelineId> {
        let target = target.into();
        let to = self.require_property(target, &property)?;
        self.add_tween(target, property, from, to, duration, ease)
    }

    fn require_property(&self, target: Target, property: &Property) -> SceneryResult<f64> {
        self.get_property(target, property).ok_or_else(|| {
            SceneryError::not_found(format!("property \"{property}\" on {target:?}"))
        })
    }

    fn add_tween(
        &mut self,
        target: Target,
        property: Property,
        from: f64,
        to: f64,
        duration: f64,
        ease: Ease,
    ) -> SceneryResult<TimelineId> {
        let name = format!("tween:{property}");
        let anim = KeyframeAnimation::new(
            target,
            property,
            vec![from, to],
            vec![0.0, duration.max(0.0)],
        )?
        .with_easing(vec![ease])?
        .with_destroy(true);
        let mut timeline = Timeline::new(name);
        timeline.add(anim);
        let owner = match target {
            Target::Actor(id) => Owner::Actor(id),
            Target::Scene(id) => Owner::Scene(id),
        };
        self.timelines(owner)
            .ok_or_else(|| SceneryError::not_found(format!("{target:?}")))
            .map(|m| m.add(timeline))
    }

    // ---- handlers -----------------------------------------------------------

    /// Runs one actor handler with the handler temporarily taken out of the actor, so it may
    /// mutate the world (including its own actor). Failures are logged and contained.
    pub(crate) fn fire_actor<A, F>(&mut self, id: ActorId, slot: F, arg: A, what: &str) -> bool
    where
        F: Fn(&mut ActorHandlers) -> &mut Option<ActorHandler<A>>,
    {
        let Some(actor) = self.actors.get_mut(id) else {
            return false;
        };
        let Some(mut handler) = slot(&mut actor.handlers).take() else {
            return false;
        };
        if let Err(err) = handler(self, id, arg) {
            tracing::warn!(actor = ?id, handler = what, %err, "actor handler failed");
        }
        if let Some(actor) = self.actors.get_mut(id) {
            let slot = slot(&mut actor.handlers);
            if slot.is_none() {
                *slot = Some(handler);
            }
        }
        true
    }

    pub(crate) fn fire_scene<A, F>(&mut self, id: SceneId, slot: F, arg: A, what: &str) -> bool
    where
        F: Fn(&mut SceneHandlers) -> &mut Option<SceneHandler<A>>,
    {
        let Some(scene) = self.scenes.get_mut(id) else {
            return false;
        };
        let Some(mut handler) = slot(&mut scene.handlers).take() else {
            return false;
        };
        if let Err(err) = handler(self, id, arg) {
            tracing::warn!(scene = ?id, handler = what, %err, "scene handler failed");
        }
        if let Some(scene) = self.scenes.get_mut(id) {
            let slot = slot(&mut scene.handlers);
            if slot.is_none() {
                *slot = Some(handler);
            }
        }
        true
    }

    // ---- physics ------------------------------------------------------------

    /// Installs (or clears) a simulation shared by every scene and stepped by the app.
    pub fn set_shared_physics(&mut self, physics: Option<Box<dyn PhysicsWorld>>) {
        self.physics = physics;
    }

    pub fn has_shared_physics(&self) -> bool {
        self.physics.is_some()
    }

    /// The simulation bodies of `scene` live in: the shared one if present, else the scene's.
    pub fn physics_for(
        &mut self,
        scene: Option<SceneId>,
    ) -> Option<&mut (dyn PhysicsWorld + 'static)> {
        if self.physics.is_some() {
            return self.physics.as_deref_mut();
        }
        self.scenes.get_mut(scene?)?.physics.as_deref_mut()
    }

    /// Creates a body at the actor's current position and makes physics authoritative for it.
    pub fn attach_body(
        &mut self,
        id: ActorId,
        def: &BodyDef,
        fixtures: &[FixtureDef],
    ) -> SceneryResult<BodyHandle> {
        let scale = self.physics_settings.world_scale;
        let actor = self
            .actors
            .get(id)
            .ok_or_else(|| SceneryError::not_found(format!("actor {id:?}")))?;
        let mut def = def.clone();
        def.owner = Some(id);
        def.position = Point::new(actor.x / scale, actor.y / scale);
        def.angle = actor.rotation;
        let (scene, old) = (actor.scene, actor.body);
        let physics = self
            .physics_for(scene)
            .ok_or_else(|| SceneryError::not_found("no physics world for this actor"))?;
        if let Some(old) = old {
            physics.destroy_body(old);
        }
        let body = physics.create_body(&def)?;
        for fixture in fixtures {
            physics.add_fixture(body, fixture)?;
        }
        if let Some(actor) = self.actors.get_mut(id) {
            actor.body = Some(body);
        }
        Ok(body)
    }

    /// Joins the bodies of two actors; the joint is owned (and released) by `a`.
    pub fn add_joint(
        &mut self,
        a: ActorId,
        b: ActorId,
        kind: JointKind,
        collide_connected: bool,
    ) -> SceneryResult<JointHandle> {
        let body_of = |id: ActorId| {
            self.actors
                .get(id)
                .and_then(|actor| actor.body)
                .ok_or_else(|| SceneryError::not_found(format!("physics body of actor {id:?}")))
        };
        let def = JointDef {
            kind,
            body_a: body_of(a)?,
            body_b: body_of(b)?,
            collide_connected,
        };
        let scene = self.actors.get(a).and_then(|actor| actor.scene);
        let physics = self
            .physics_for(scene)
            .ok_or_else(|| SceneryError::not_found("no physics world for this actor"))?;
        let joint = physics.create_joint(&def)?;
        if let Some(actor) = self.actors.get_mut(a) {
            actor.joints.push(joint);
        }
        Ok(joint)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/world.rs"]
mod tests;
