use smallvec::SmallVec;

use crate::{
    app::driver::App,
    foundation::core::{ActorId, Point, SceneId, Vec2},
    graph::world::World,
};

/// Frame delta assumed when turning a drag into a release velocity before the first frame.
const FALLBACK_DT: f64 = 1.0 / 60.0;

/// A touch or pointer event as delivered to handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchInfo {
    /// Canvas pixels.
    pub canvas: Point,
    /// Position in the scene space of the receiving scene.
    pub point: Point,
    /// Movement since the previous event of this touch, in scene units.
    pub delta: Vec2,
}

/// Touch, hover and drag focus tracked between input events.
#[derive(Clone, Debug, Default)]
pub(crate) struct InputState {
    touching: bool,
    last_canvas: Option<Point>,
    touch_focus: Option<ActorId>,
    hover_focus: Option<ActorId>,
    drag_canvas: Option<ActorId>,
    drag_velocity: Vec2,
    pan_velocity: Vec2,
}

fn focus_scenes(world: &World) -> SmallVec<[SceneId; 2]> {
    let mut scenes = SmallVec::new();
    for scene in [world.focus_scene, world.focus_scene2].into_iter().flatten() {
        if world.scene(scene).is_some() && !scenes.contains(&scene) {
            scenes.push(scene);
        }
    }
    scenes
}

impl App {
    /// Actor the current touch started on.
    pub fn touch_focus(&self) -> Option<ActorId> {
        self.input.touch_focus
    }

    /// Actor under the pointer while no touch is in progress.
    pub fn hover_focus(&self) -> Option<ActorId> {
        self.input.hover_focus
    }

    pub fn is_touching(&self) -> bool {
        self.input.touching
    }

    fn touch_info(&self, scene: SceneId, canvas: Point, prev: Point) -> TouchInfo {
        let point = self.world.canvas_to_scene(scene, canvas);
        TouchInfo {
            canvas,
            point,
            delta: point - self.world.canvas_to_scene(scene, prev),
        }
    }

    fn velocity_dt(&self) -> f64 {
        let dt = self.world.dt();
        if dt > 0.0 { dt } else { FALLBACK_DT }
    }

    /// Touch (or mouse button) pressed at a canvas position.
    pub fn touch_begin(&mut self, canvas: Point) {
        self.input.touching = true;
        self.input.last_canvas = Some(canvas);
        self.input.pan_velocity = Vec2::ZERO;
        self.input.drag_velocity = Vec2::ZERO;

        let scenes = focus_scenes(&self.world);
        let mut hit = None;
        if self.config().touchables {
            if let Some(&primary) = scenes.first() {
                let info = self.touch_info(primary, canvas, canvas);
                hit = self.world.hit_test(primary, info.point);
                if let Some(actor) = hit {
                    self.world
                        .fire_actor(actor, |h| &mut h.on_touch_begin, info, "on_touch_begin");
                    self.start_canvas_drag(actor);
                }
            }
        }
        self.input.touch_focus = hit;

        for scene in scenes {
            let info = self.touch_info(scene, canvas, canvas);
            self.world
                .fire_scene(scene, |h| &mut h.on_touch_begin, info, "on_touch_begin");
            if hit.is_some() {
                continue;
            }
            if let Some(s) = self.world.scene_mut(scene) {
                if s.touch_pan {
                    s.camera.panning = true;
                    s.camera.vx = 0.0;
                    s.camera.vy = 0.0;
                }
            }
        }
    }

    /// Touch moved, or the pointer moved without a touch (hover tracking).
    pub fn touch_move(&mut self, canvas: Point) {
        let prev = self.input.last_canvas.unwrap_or(canvas);
        self.input.last_canvas = Some(canvas);
        let vdt = self.velocity_dt();
        let scenes = focus_scenes(&self.world);

        for &scene in &scenes {
            let info = self.touch_info(scene, canvas, prev);
            self.world
                .fire_scene(scene, |h| &mut h.on_touch_move, info, "on_touch_move");
            if let Some(s) = self.world.scene_mut(scene) {
                if s.camera.panning {
                    s.camera.x -= info.delta.x;
                    s.camera.y -= info.delta.y;
                    self.input.pan_velocity = -info.delta / vdt;
                }
            }
        }

        if !self.config().touchables {
            return;
        }
        let Some(&primary) = scenes.first() else {
            return;
        };
        let info = self.touch_info(primary, canvas, prev);
        if let Some(vc) = self.input.drag_canvas {
            let (sx, sy) = self
                .world
                .actor(vc)
                .map(|a| a.accum_scale())
                .unwrap_or((1.0, 1.0));
            let local = Vec2::new(
                info.delta.x / non_zero(sx),
                info.delta.y / non_zero(sy),
            );
            self.world.scroll_by(vc, local.x, local.y);
            self.input.drag_velocity = local / vdt;
        }

        let hit = self.world.hit_test(primary, info.point);
        if let Some(actor) = hit {
            self.world
                .fire_actor(actor, |h| &mut h.on_touch_move, info, "on_touch_move");
        }
        if !self.input.touching && hit != self.input.hover_focus {
            if let Some(old) = self.input.hover_focus {
                self.world.fire_actor(old, |h| &mut h.on_hover, false, "on_hover");
            }
            if let Some(new) = hit {
                self.world.fire_actor(new, |h| &mut h.on_hover, true, "on_hover");
            }
            self.input.hover_focus = hit;
        }
    }

    /// Touch released at a canvas position.
    pub fn touch_end(&mut self, canvas: Point) {
        let prev = self.input.last_canvas.unwrap_or(canvas);
        self.input.last_canvas = Some(canvas);
        self.input.touching = false;
        let scenes = focus_scenes(&self.world);

        for &scene in &scenes {
            let info = self.touch_info(scene, canvas, prev);
            self.world
                .fire_scene(scene, |h| &mut h.on_touch_end, info, "on_touch_end");
            if let Some(s) = self.world.scene_mut(scene) {
                if s.camera.panning {
                    s.camera.panning = false;
                    s.camera.vx = self.input.pan_velocity.x;
                    s.camera.vy = self.input.pan_velocity.y;
                }
            }
        }

        if let Some(vc) = self.input.drag_canvas.take() {
            let v = self.input.drag_velocity;
            if let Some(canvas) = self.world.actor_mut(vc).and_then(|a| a.virtual_canvas.as_mut()) {
                canvas.dragging = false;
                canvas.scroll_vx = v.x;
                canvas.scroll_vy = v.y;
            }
        }

        let focus = self.input.touch_focus.take();
        if !self.config().touchables {
            return;
        }
        let Some(&primary) = scenes.first() else {
            return;
        };
        let info = self.touch_info(primary, canvas, prev);
        let hit = self.world.hit_test(primary, info.point);
        if let Some(actor) = hit {
            self.world
                .fire_actor(actor, |h| &mut h.on_touch_end, info, "on_touch_end");
        }
        if let Some(focus) = focus {
            if hit != Some(focus) {
                self.world
                    .fire_actor(focus, |h| &mut h.on_lost_focus, (), "on_lost_focus");
            }
        }
    }

    pub fn key_down(&mut self, key: &str) {
        for scene in focus_scenes(&self.world) {
            self.world
                .fire_scene(scene, |h| &mut h.on_key_down, key.to_string(), "on_key_down");
        }
    }

    pub fn key_up(&mut self, key: &str) {
        for scene in focus_scenes(&self.world) {
            self.world
                .fire_scene(scene, |h| &mut h.on_key_up, key.to_string(), "on_key_up");
        }
    }

    /// Starts dragging the nearest virtual-canvas ancestor of `actor` (itself included).
    fn start_canvas_drag(&mut self, actor: ActorId) {
        let mut cur = Some(actor);
        while let Some(id) = cur {
            let Some(a) = self.world.actor_mut(id) else {
                return;
            };
            if let Some(vc) = a.virtual_canvas.as_mut() {
                vc.dragging = true;
                vc.scroll_vx = 0.0;
                vc.scroll_vy = 0.0;
                self.input.drag_canvas = Some(id);
                return;
            }
            cur = a.parent();
        }
    }
}

fn non_zero(v: f64) -> f64 {
    if v.abs() > f64::EPSILON { v } else { 1.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/app/input.rs"]
mod tests;
