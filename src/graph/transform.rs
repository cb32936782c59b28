use smallvec::SmallVec;

use crate::{
    foundation::core::{ActorId, Affine},
    graph::world::World,
};

impl World {
    /// Marks `id` and every descendant as needing a transform recomputation.
    pub fn dirty(&mut self, id: ActorId) {
        let mut stack: SmallVec<[ActorId; 16]> = SmallVec::new();
        stack.push(id);
        while let Some(cur) = stack.pop() {
            if let Some(actor) = self.actors.get_mut(cur) {
                actor.transform_dirty = true;
                stack.extend(actor.children.iter().copied());
            }
        }
    }

    /// Marks the descendants of `id` but not `id` itself.
    pub fn dirty_children(&mut self, id: ActorId) {
        let children: SmallVec<[ActorId; 16]> = self
            .actors
            .get(id)
            .map(|a| a.children.iter().copied().collect())
            .unwrap_or_default();
        for child in children {
            self.dirty(child);
        }
    }

    /// Brings the world transform of `id` up to date, ancestors first.
    ///
    /// Returns true if the transform of `id` itself was recomputed.
    pub fn update_transform(&mut self, id: ActorId) -> bool {
        let mut chain: SmallVec<[ActorId; 8]> = SmallVec::new();
        let mut cur = Some(id);
        while let Some(c) = cur {
            let Some(actor) = self.actors.get(c) else {
                break;
            };
            chain.push(c);
            cur = if actor.orphaned { None } else { actor.parent };
        }
        let mut recomputed = false;
        for &c in chain.iter().rev() {
            recomputed = self.compute_transform(c);
        }
        recomputed
    }

    /// Recomputes a single actor's transform from its already up-to-date parent if dirty.
    pub(crate) fn compute_transform(&mut self, id: ActorId) -> bool {
        let Some(actor) = self.actors.get(id) else {
            return false;
        };
        if !actor.transform_dirty {
            return false;
        }

        let parent = if actor.orphaned { None } else { actor.parent };
        let (parent_xf, parent_sx, parent_sy) = match parent.and_then(|p| self.actors.get(p)) {
            Some(p) => {
                let mut xf = p.transform;
                if let Some(vc) = &p.virtual_canvas {
                    xf = xf * Affine::translate((vc.scroll_pos_x, vc.scroll_pos_y));
                }
                (xf, p.accum_scale_x, p.accum_scale_y)
            }
            None => {
                let s = actor
                    .scene
                    .and_then(|s| self.scenes.get(s))
                    .map(|s| s.scale)
                    .unwrap_or(1.0);
                (Affine::scale(s), s, s)
            }
        };

        let fit = self.display.fit_scale(actor.scale_method);
        let mut sx = actor.scale_x * fit;
        let mut sy = actor.scale_y * fit;
        let mut x = actor.x + actor.x2;
        let mut y = actor.y + actor.y2;
        let depth_active = actor.depth_active();
        if depth_active {
            x /= actor.depth;
            y /= actor.depth;
            sx /= actor.depth;
            sy /= actor.depth;
        }

        let ox = if actor.ox.abs() <= 1.0 {
            actor.ox * actor.w
        } else {
            actor.ox
        };
        let oy = if actor.oy.abs() <= 1.0 {
            actor.oy * actor.h
        } else {
            actor.oy
        };
        let frame = self.frame_offset(id);

        let local = Affine::translate((x, y))
            * Affine::rotate(actor.rotation)
            * Affine::scale_non_uniform(sx, sy)
            * Affine::translate((frame.x - ox, frame.y - oy));

        let Some(actor) = self.actors.get_mut(id) else {
            return false;
        };
        actor.transform = parent_xf * local;
        actor.accum_scale_x = sx * parent_sx;
        actor.accum_scale_y = sy * parent_sy;
        actor.transform_dirty = depth_active;
        self.stats.transforms_computed += 1;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/transform.rs"]
mod tests;
