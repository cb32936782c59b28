use smallvec::SmallVec;

use crate::{
    foundation::core::{ActorId, Margins, Rect, Size},
    foundation::math::{clamp_hit, damp},
    graph::world::World,
};

/// Horizontal docking edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockX {
    #[default]
    None,
    Left,
    Right,
    Center,
}

/// Vertical docking edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockY {
    #[default]
    None,
    Top,
    Bottom,
    Center,
}

/// How a virtual canvas places its children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stacking {
    /// Children keep their positions, docking against the canvas bounds.
    #[default]
    Free,
    Horizontal,
    Vertical,
}

/// Allowed scroll positions. Positive content offsets scroll towards the start.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRange {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Scroll/stack container state for an actor.
///
/// Scrolling right moves the content left, so it decreases `scroll_pos_x`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VirtualCanvas {
    pub scroll_pos_x: f64,
    pub scroll_pos_y: f64,
    pub scroll_vx: f64,
    pub scroll_vy: f64,
    /// Per-frame momentum multiplier.
    pub damping: f64,
    pub range: ScrollRange,
    pub stacking: Stacking,
    /// Freeze and hide children whose bounds leave the viewport.
    pub cull_offscreen: bool,
    /// Derive `range` from the laid-out content every frame.
    pub auto_range: bool,
    #[serde(skip)]
    pub(crate) dragging: bool,
}

impl Default for VirtualCanvas {
    fn default() -> Self {
        Self {
            scroll_pos_x: 0.0,
            scroll_pos_y: 0.0,
            scroll_vx: 0.0,
            scroll_vy: 0.0,
            damping: 0.9,
            range: ScrollRange::default(),
            stacking: Stacking::Free,
            cull_offscreen: true,
            auto_range: false,
            dragging: false,
        }
    }
}

impl VirtualCanvas {
    pub fn stacked(stacking: Stacking) -> Self {
        Self {
            stacking,
            auto_range: true,
            ..Self::default()
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn clamp_scroll(&mut self) {
        let (x, hit_x) = clamp_hit(self.scroll_pos_x, self.range.min_x, self.range.max_x);
        let (y, hit_y) = clamp_hit(self.scroll_pos_y, self.range.min_y, self.range.max_y);
        self.scroll_pos_x = x;
        self.scroll_pos_y = y;
        if hit_x {
            self.scroll_vx = 0.0;
        }
        if hit_y {
            self.scroll_vy = 0.0;
        }
    }
}

/// Position along one axis that puts an extent of `size` flush with a reference of `span`
/// centred on zero.
fn dock_start(span: f64, size: f64, margin: f64) -> f64 {
    -span * 0.5 + size * 0.5 + margin
}

fn dock_end(span: f64, size: f64, margin: f64) -> f64 {
    span * 0.5 - size * 0.5 - margin
}

fn dock_axis_x(dock: DockX, span: f64, size: f64, m: &Margins) -> Option<f64> {
    match dock {
        DockX::None => None,
        DockX::Left => Some(dock_start(span, size, m.left)),
        DockX::Right => Some(dock_end(span, size, m.right)),
        DockX::Center => Some(m.left - m.right),
    }
}

fn dock_axis_y(dock: DockY, span: f64, size: f64, m: &Margins) -> Option<f64> {
    match dock {
        DockY::None => None,
        DockY::Top => Some(dock_start(span, size, m.top)),
        DockY::Bottom => Some(dock_end(span, size, m.bottom)),
        DockY::Center => Some(m.top - m.bottom),
    }
}

impl World {
    /// Places a docked actor against its parent, its scene, or the visible screen.
    pub(crate) fn dock(&mut self, id: ActorId) {
        let Some(actor) = self.actors.get(id) else {
            return;
        };
        if actor.dock_x == DockX::None && actor.dock_y == DockY::None {
            return;
        }
        let fit = self.display.fit_scale(actor.scale_method);
        let size = Size::new(actor.w * actor.scale_x * fit, actor.h * actor.scale_y * fit);
        let (reference, cx, cy) = if actor.dock_screen {
            let scene = actor.scene.and_then(|s| self.scenes.get(s));
            let scene_scale = scene.map(|s| s.scale).filter(|s| *s > 0.0).unwrap_or(1.0);
            let visible = self.display.visible_size();
            let (cam_x, cam_y) = scene.map(|s| (s.camera.x, s.camera.y)).unwrap_or((0.0, 0.0));
            (
                Size::new(visible.width / scene_scale, visible.height / scene_scale),
                cam_x,
                cam_y,
            )
        } else if let Some(parent) = actor.parent.and_then(|p| self.actors.get(p)) {
            (Size::new(parent.w, parent.h), 0.0, 0.0)
        } else {
            let scene = actor.scene.and_then(|s| self.scenes.get(s));
            (
                scene.map(|s| Size::new(s.w, s.h)).unwrap_or(Size::ZERO),
                0.0,
                0.0,
            )
        };
        let x = dock_axis_x(actor.dock_x, reference.width, size.width, &actor.margin);
        let y = dock_axis_y(actor.dock_y, reference.height, size.height, &actor.margin);
        if let Some(actor) = self.actors.get_mut(id) {
            if let Some(x) = x {
                actor.x = x + cx;
            }
            if let Some(y) = y {
                actor.y = y + cy;
            }
        }
    }

    /// Scrolls a virtual canvas by a content offset, clamped to its range.
    pub fn scroll_by(&mut self, id: ActorId, dx: f64, dy: f64) {
        let Some(vc) = self.actors.get_mut(id).and_then(|a| a.virtual_canvas.as_mut()) else {
            return;
        };
        vc.scroll_pos_x += dx;
        vc.scroll_pos_y += dy;
        vc.clamp_scroll();
        self.dirty_children(id);
    }

    /// Momentum scrolling, child stacking/docking and viewport culling for a virtual canvas.
    pub(crate) fn update_virtual(&mut self, id: ActorId, dt: f64) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        let (w, h) = (actor.w, actor.h);
        let Some(vc) = actor.virtual_canvas.as_mut() else {
            return;
        };
        let before = (vc.scroll_pos_x, vc.scroll_pos_y);
        if !vc.dragging {
            vc.scroll_pos_x += vc.scroll_vx * dt;
            vc.scroll_pos_y += vc.scroll_vy * dt;
            vc.scroll_vx = damp(vc.scroll_vx, vc.damping, 0.01);
            vc.scroll_vy = damp(vc.scroll_vy, vc.damping, 0.01);
        }
        vc.clamp_scroll();
        let stacking = vc.stacking;
        let children: SmallVec<[ActorId; 16]> = actor.children.iter().copied().collect();

        let content = self.layout_children(&children, stacking, w, h);

        let Some(vc) = self.actors.get_mut(id).and_then(|a| a.virtual_canvas.as_mut()) else {
            return;
        };
        if vc.auto_range {
            let content = content.unwrap_or(Rect::ZERO);
            vc.range = ScrollRange {
                min_x: (w * 0.5 - content.x1).min(0.0),
                max_x: (-w * 0.5 - content.x0).max(0.0),
                min_y: (h * 0.5 - content.y1).min(0.0),
                max_y: (-h * 0.5 - content.y0).max(0.0),
            };
            vc.clamp_scroll();
        }
        let (sx, sy, cull) = (vc.scroll_pos_x, vc.scroll_pos_y, vc.cull_offscreen);
        if before != (sx, sy) {
            self.dirty_children(id);
        }

        for child in children {
            let Some(c) = self.actors.get_mut(child) else {
                continue;
            };
            if !cull {
                c.in_view = true;
                continue;
            }
            let (hw, hh) = (c.w * c.scale_x.abs() * 0.5, c.h * c.scale_y.abs() * 0.5);
            let (cx, cy) = (c.x + c.x2 + sx, c.y + c.y2 + sy);
            c.in_view = cx + hw >= -w * 0.5
                && cx - hw <= w * 0.5
                && cy + hh >= -h * 0.5
                && cy - hh <= h * 0.5;
        }
    }

    /// Positions the children of a virtual canvas and returns the bounds of the laid-out
    /// content in canvas space.
    fn layout_children(
        &mut self,
        children: &[ActorId],
        stacking: Stacking,
        w: f64,
        h: f64,
    ) -> Option<Rect> {
        let mut cursor = match stacking {
            Stacking::Horizontal => -w * 0.5,
            Stacking::Vertical => -h * 0.5,
            Stacking::Free => 0.0,
        };
        let mut bounds: Option<Rect> = None;
        for &child in children {
            let Some(c) = self.actors.get(child) else {
                continue;
            };
            let cw = c.w * c.scale_x.abs();
            let ch = c.h * c.scale_y.abs();
            let (old_x, old_y) = (c.x, c.y);
            let (mut x, mut y) = (c.x, c.y);
            let m = c.margin;
            match stacking {
                Stacking::Horizontal => {
                    cursor += m.left;
                    x = cursor + cw * 0.5;
                    cursor += cw + m.right;
                    if let Some(dy) = dock_axis_y(c.dock_y, h, ch, &m) {
                        y = dy;
                    }
                }
                Stacking::Vertical => {
                    cursor += m.top;
                    y = cursor + ch * 0.5;
                    cursor += ch + m.bottom;
                    if let Some(dx) = dock_axis_x(c.dock_x, w, cw, &m) {
                        x = dx;
                    }
                }
                Stacking::Free => {
                    if let Some(dx) = dock_axis_x(c.dock_x, w, cw, &m) {
                        x = dx;
                    }
                    if let Some(dy) = dock_axis_y(c.dock_y, h, ch, &m) {
                        y = dy;
                    }
                }
            }
            let rect = Rect::new(x - cw * 0.5, y - ch * 0.5, x + cw * 0.5, y + ch * 0.5);
            bounds = Some(bounds.map_or(rect, |b| b.union(rect)));
            if (x, y) != (old_x, old_y) {
                if let Some(c) = self.actors.get_mut(child) {
                    c.x = x;
                    c.y = y;
                }
                self.dirty(child);
            }
        }
        bounds
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/layout.rs"]
mod tests;
