use smallvec::SmallVec;

use crate::{
    foundation::core::{ActorId, Owner, SceneId, Size},
    foundation::error::SceneryResult,
    foundation::math::wrap_into,
    graph::{kind::ActorKind, world::World},
    physics::{ContactEvent, ContactPhase},
};

impl World {
    /// Per-frame update of one actor and, recursively, its children.
    ///
    /// Order: tick handler, timelines, action lists, tasks, virtual canvas, sprite frames,
    /// particles, motion, wrapping, docking, children, then removal flush and layer sort.
    pub(crate) fn update_actor(&mut self, id: ActorId, dt: f64) {
        match self.actors.get(id) {
            Some(a) if a.active && a.in_view => {}
            _ => return,
        }
        self.stats.actors_updated += 1;

        self.fire_actor(id, |h| &mut h.on_tick, dt, "on_tick");
        self.run_managers(Owner::Actor(id), dt);

        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let has_canvas = actor.virtual_canvas.is_some();
        let is_emitter = matches!(actor.kind, ActorKind::Particles(_));
        if has_canvas {
            self.update_virtual(id, dt);
        }
        self.advance_sprite(id, dt);
        if is_emitter {
            self.update_emitter(id, dt);
        }

        self.integrate(id, dt);

        let children: SmallVec<[ActorId; 16]> = match self.actors.get(id) {
            Some(a) => a.children.iter().copied().collect(),
            None => return,
        };
        for child in children {
            self.update_actor(child, dt);
        }
        self.flush_actor_removals(id);
        self.sort_children(id);
    }

    /// Motion from the physics body or from velocities, then wrapping and docking.
    fn integrate(&mut self, id: ActorId, dt: f64) {
        let world_scale = self.physics_settings.world_scale;
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let before = (actor.x, actor.y, actor.rotation, actor.depth);
        let (scene, body) = (actor.scene, actor.body);
        let parent_is_canvas = actor
            .parent
            .and_then(|p| self.actors.get(p))
            .is_some_and(|p| p.virtual_canvas.is_some());

        let synced = body.and_then(|body| {
            let physics = self.physics_for(scene)?;
            Some((physics.position(body)?, physics.angle(body)?))
        });
        let extents = scene
            .and_then(|s| self.scenes.get(s))
            .and_then(|s| s.extents);

        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        match synced {
            Some((pos, angle)) => {
                actor.x = pos.x * world_scale;
                actor.y = pos.y * world_scale;
                actor.rotation = angle;
            }
            None => {
                actor.x += actor.vx * dt;
                actor.y += actor.vy * dt;
                actor.rotation += actor.vr * dt;
                actor.depth += actor.vd * dt;
                actor.vx *= actor.vx_damping;
                actor.vy *= actor.vy_damping;
                actor.vr *= actor.vr_damping;
                actor.vd *= actor.vd_damping;
            }
        }
        if actor.wrap_position {
            if let Some(ext) = extents {
                actor.x = wrap_into(actor.x, ext.x0, ext.width());
                actor.y = wrap_into(actor.y, ext.y0, ext.height());
            }
        }

        if !parent_is_canvas {
            self.dock(id);
        }

        let Some(actor) = self.actors.get(id) else {
            return;
        };
        if (actor.x, actor.y, actor.rotation, actor.depth) != before {
            self.dirty(id);
        }
    }

    /// Per-frame update of a scene: handlers, managers, its own physics, camera and actors.
    ///
    /// Errors only come from the scene's physics provider.
    pub(crate) fn update_scene(&mut self, id: SceneId, dt: f64) -> SceneryResult<()> {
        match self.scenes.get(id) {
            Some(s) if s.active => {}
            _ => return Ok(()),
        }
        self.fire_scene(id, |h| &mut h.on_tick, dt, "on_tick");
        self.run_managers(Owner::Scene(id), dt);

        if self.physics.is_none() {
            self.step_scene_physics(id, dt)?;
        }
        self.update_camera(id, dt);

        let roots: SmallVec<[ActorId; 32]> = match self.scenes.get(id) {
            Some(s) => s.actors.iter().copied().collect(),
            None => return Ok(()),
        };
        for root in roots {
            self.update_actor(root, dt);
        }
        self.flush_root_removals(id);
        self.sort_roots(id);
        Ok(())
    }

    fn step_scene_physics(&mut self, id: SceneId, dt: f64) -> SceneryResult<()> {
        let settings = self.physics_settings;
        let Some(physics) = self.scenes.get_mut(id).and_then(|s| s.physics.as_deref_mut()) else {
            return Ok(());
        };
        physics.step(
            dt,
            settings.velocity_iterations,
            settings.position_iterations,
        )?;
        let contacts = physics.drain_contacts();
        self.dispatch_contacts(contacts);
        Ok(())
    }

    /// Steps the shared simulation `steps` times by the full `dt`.
    ///
    /// With a fixed frame delta, extra steps are what keep simulated time in line with wall-clock
    /// time when frames run slower than the target rate.
    pub(crate) fn step_shared_physics(&mut self, dt: f64, steps: u32) -> SceneryResult<()> {
        let settings = self.physics_settings;
        let Some(physics) = self.physics.as_deref_mut() else {
            return Ok(());
        };
        let mut contacts = Vec::new();
        for _ in 0..steps.max(1) {
            physics.step(
                dt,
                settings.velocity_iterations,
                settings.position_iterations,
            )?;
            contacts.extend(physics.drain_contacts());
        }
        self.dispatch_contacts(contacts);
        Ok(())
    }

    /// Fires the collision handlers of both actors of every contact.
    fn dispatch_contacts(&mut self, contacts: Vec<ContactEvent>) {
        for contact in contacts {
            for (me, other) in [(contact.a, contact.b), (contact.b, contact.a)] {
                match contact.phase {
                    ContactPhase::Begin => {
                        self.fire_actor(
                            me,
                            |h| &mut h.on_collision_begin,
                            other,
                            "on_collision_begin",
                        );
                    }
                    ContactPhase::End => {
                        self.fire_actor(me, |h| &mut h.on_collision_end, other, "on_collision_end");
                    }
                }
            }
        }
    }

    /// The extents clamp is measured against what the canvas shows, so letterboxed space counts.
    fn update_camera(&mut self, id: SceneId, dt: f64) {
        let Some(scene) = self.scenes.get(id) else {
            return;
        };
        let target = (
            scene
                .camera
                .target_x
                .and_then(|a| self.actors.get(a))
                .map(|a| a.x),
            scene
                .camera
                .target_y
                .and_then(|a| self.actors.get(a))
                .map(|a| a.y),
        );
        let scale = if scene.scale > 0.0 { scene.scale } else { 1.0 };
        let visible = self.display.visible_size();
        let view = Size::new(visible.width / scale, visible.height / scale);
        if let Some(scene) = self.scenes.get_mut(id) {
            scene.camera.step(dt, target, view);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/update.rs"]
mod tests;
