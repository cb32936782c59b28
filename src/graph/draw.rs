use smallvec::SmallVec;

use crate::{
    foundation::core::{ActorId, Affine, Margins, Point, Rect, SceneId, Size},
    graph::{
        actor::Actor,
        kind::{ActorKind, local_bounds},
        world::World,
    },
    render::surface::Surface,
};

impl World {
    /// Maps the scene space of `scene` (camera and scene offset applied) onto canvas pixels.
    pub fn scene_transform(&self, scene: SceneId) -> Affine {
        let base = self.display.transform();
        match self.scenes.get(scene) {
            Some(s) => base * Affine::translate((s.x - s.camera.x, s.y - s.camera.y)),
            None => base,
        }
    }

    /// Converts a canvas pixel position into the scene space of `scene`.
    pub fn canvas_to_scene(&self, scene: SceneId, p: Point) -> Point {
        self.scene_transform(scene).inverse() * p
    }

    /// Draws every visible scene in layer order.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let scenes: SmallVec<[SceneId; 4]> = self.scene_order.iter().copied().collect();
        for scene in scenes {
            self.draw_scene(scene, surface);
        }
    }

    pub fn draw_scene(&mut self, id: SceneId, surface: &mut dyn Surface) {
        let roots: SmallVec<[ActorId; 32]> = match self.scenes.get(id) {
            Some(s) if s.visible => s.actors.iter().copied().collect(),
            _ => return,
        };
        let scene_xf = self.scene_transform(id);
        for root in roots {
            self.draw_actor(root, surface, scene_xf, 1.0);
        }
    }

    /// Re-renders the offscreen cache of `id` on its next draw.
    pub fn invalidate_cache(&mut self, id: ActorId) {
        if let Some(actor) = self.actors.get_mut(id) {
            actor.cache_capture = actor.cache;
        }
    }

    fn draw_actor(
        &mut self,
        id: ActorId,
        surface: &mut dyn Surface,
        scene_xf: Affine,
        parent_opacity: f64,
    ) {
        match self.actors.get(id) {
            Some(a) if a.visible && a.in_view => {}
            _ => return,
        }
        self.update_transform(id);
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        let opacity = if actor.use_parent_opacity {
            parent_opacity * actor.opacity
        } else {
            actor.opacity
        };
        actor.accum_opacity = opacity;
        if actor.cache && actor.cache_id.is_none() {
            actor.cache_id = Some(surface.create_cache(Size::new(actor.w, actor.h)));
            actor.cache_capture = true;
        }
        if actor.cache_capture {
            actor.cache_capture = false;
            if let Some(cache) = actor.cache_id {
                surface.begin_cache(cache);
                surface.set_transform(Affine::translate((actor.w * 0.5, actor.h * 0.5)));
                self.draw_shape(id, surface);
                surface.end_cache();
            }
        }
        self.stats.actors_drawn += 1;

        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let full = scene_xf * actor.transform;
        let clip_children = actor.clip_children && !actor.children.is_empty();
        let (behind, front): (SmallVec<[ActorId; 8]>, SmallVec<[ActorId; 16]>) = {
            let layer_of = |c: &ActorId| self.actors.get(*c).map(|a| a.layer).unwrap_or(0);
            (
                actor
                    .children
                    .iter()
                    .copied()
                    .filter(|c| layer_of(c) < 0)
                    .collect(),
                actor
                    .children
                    .iter()
                    .copied()
                    .filter(|c| layer_of(c) >= 0)
                    .collect(),
            )
        };

        if clip_children {
            surface.save();
            surface.set_transform(full);
            clip_to_shape(actor, actor.clip_margin, surface);
        }
        for child in behind {
            self.draw_actor(child, surface, scene_xf, opacity);
        }
        self.draw_self(id, surface, full, opacity);
        for child in front {
            self.draw_actor(child, surface, scene_xf, opacity);
        }
        if clip_children {
            surface.restore();
        }
    }

    /// Own visual with paint state scoped to a save/restore pair.
    fn draw_self(&self, id: ActorId, surface: &mut dyn Surface, full: Affine, opacity: f64) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        surface.save();
        surface.set_transform(full);
        surface.set_global_alpha(opacity);
        if let Some(shadow) = &actor.shadow {
            surface.set_shadow(shadow);
        }
        if let Some(op) = actor.composite_op {
            surface.set_composite_op(op);
        }
        if actor.self_clip {
            clip_to_shape(actor, Margins::default(), surface);
        }
        match actor.cache_id {
            Some(cache) if actor.cache => {
                surface.draw_cache(cache, local_bounds(actor.w, actor.h));
            }
            _ => self.draw_shape(id, surface),
        }
        surface.restore();
    }

    /// Shape-specific drawing in local space. Particles draw nothing themselves.
    fn draw_shape(&self, id: ActorId, surface: &mut dyn Surface) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        let bounds = local_bounds(actor.w, actor.h);
        match &actor.kind {
            ActorKind::Sprite => {
                let Some(sprite) = &actor.sprite else {
                    return;
                };
                if let Some(frame) = self.current_atlas_frame(id) {
                    let atlas = sprite
                        .atlas
                        .as_deref()
                        .and_then(|name| self.resources.atlas(name));
                    if let Some(atlas) = atlas {
                        surface.draw_image(&atlas.image, Some(frame.rect), bounds);
                    }
                } else if let Some(image) = &sprite.image {
                    if self.debug && self.resources.get(image).is_none() {
                        tracing::warn!(actor = %actor.name, image = %image, "unknown bitmap");
                    }
                    surface.draw_image(image, None, bounds);
                }
            }
            ActorKind::Rect { corner_radius } => {
                if *corner_radius > 0.0 {
                    surface.draw_round_rect(bounds, *corner_radius, &actor.paint);
                } else {
                    surface.draw_rect(bounds, &actor.paint);
                }
            }
            ActorKind::Arc {
                radius,
                start_angle,
                end_angle,
            } => {
                let r = ActorKind::arc_radius(*radius, actor.w);
                surface.draw_arc(Point::ZERO, r, *start_angle, *end_angle, &actor.paint);
            }
            ActorKind::Polygon { points } => surface.draw_polygon(points, &actor.paint),
            ActorKind::Label { text, style } => {
                surface.draw_text_wrap(text, bounds, style, &actor.paint);
            }
            ActorKind::Particles(_) => {}
        }
    }
}

/// Clips to the actor's shape in local space, inset by `margin` for rectangular shapes.
fn clip_to_shape(actor: &Actor, margin: Margins, surface: &mut dyn Surface) {
    match &actor.kind {
        ActorKind::Arc {
            radius,
            start_angle,
            end_angle,
        } => {
            let r = ActorKind::arc_radius(*radius, actor.w) - margin.left;
            surface.clip_arc(Point::ZERO, r.max(0.0), *start_angle, *end_angle);
        }
        ActorKind::Polygon { points } if points.len() >= 3 => surface.clip_polygon(points),
        _ => {
            let b = local_bounds(actor.w, actor.h);
            surface.clip_rect(Rect::new(
                b.x0 + margin.left,
                b.y0 + margin.top,
                b.x1 - margin.right,
                b.y1 - margin.bottom,
            ));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/draw.rs"]
mod tests;
