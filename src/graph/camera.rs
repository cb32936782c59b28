use crate::foundation::{
    core::{ActorId, Rect, Size},
    math::clamp_hit,
};

/// Scene camera. `(x, y)` is the scene point shown at the centre of the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Per-frame velocity multipliers.
    pub damping_x: f64,
    pub damping_y: f64,
    pub target_x: Option<ActorId>,
    pub target_y: Option<ActorId>,
    /// `0` snaps to the target; otherwise the approach gain per frame.
    pub follow_speed_x: f64,
    pub follow_speed_y: f64,
    /// Area the camera may roam, as `[left, top, left + w, top + h]`.
    ///
    /// The clamp keeps the visible area (canvas size over canvas and scene scale) inside the
    /// extents, not the design viewport. Axes where the visible area is at least as large as the
    /// extents are left free.
    pub extents: Option<Rect>,
    pub(crate) panning: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            damping_x: 0.9,
            damping_y: 0.9,
            target_x: None,
            target_y: None,
            follow_speed_x: 0.0,
            follow_speed_y: 0.0,
            extents: None,
            panning: false,
        }
    }
}

impl Camera {
    /// Follows `target` on both axes.
    pub fn follow(&mut self, target: Option<ActorId>, speed: f64) {
        self.target_x = target;
        self.target_y = target;
        self.follow_speed_x = speed;
        self.follow_speed_y = speed;
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Advances the camera given the resolved follow-target position per axis and the
    /// visible viewport size in scene units.
    pub(crate) fn step(&mut self, dt: f64, target: (Option<f64>, Option<f64>), view: Size) {
        if let Some(tx) = target.0 {
            if self.follow_speed_x == 0.0 {
                self.x = tx;
            } else {
                self.vx += (tx - self.x) * self.follow_speed_x;
            }
        }
        if let Some(ty) = target.1 {
            if self.follow_speed_y == 0.0 {
                self.y = ty;
            } else {
                self.vy += (ty - self.y) * self.follow_speed_y;
            }
        }

        if !self.panning {
            self.x += self.vx * dt;
            self.y += self.vy * dt;
            self.vx *= self.damping_x;
            self.vy *= self.damping_y;
        }

        let Some(ext) = self.extents else {
            return;
        };
        if view.width < ext.width() {
            let half = view.width * 0.5;
            let (x, hit) = clamp_hit(self.x, ext.x0 + half, ext.x1 - half);
            self.x = x;
            if hit {
                self.vx = 0.0;
            }
        }
        if view.height < ext.height() {
            let half = view.height * 0.5;
            let (y, hit) = clamp_hit(self.y, ext.y0 + half, ext.y1 - half);
            self.y = y;
            if hit {
                self.vy = 0.0;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/camera.rs"]
mod tests;
