use kurbo::Shape;

use crate::{
    foundation::core::{BezPath, Point, Rect},
    graph::particles::ParticleEmitter,
    render::surface::TextStyle,
};

/// Closed set of actor shapes; each variant brings its own draw, clip and hit strategy.
#[derive(Debug, Default)]
pub enum ActorKind {
    /// Bitmap or atlas frame; with neither set the actor is a plain container.
    #[default]
    Sprite,
    Rect {
        corner_radius: f64,
    },
    /// Angles in radians. A zero radius uses half the actor width.
    Arc {
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    /// Points in local space, relative to the actor centre.
    Polygon {
        points: Vec<Point>,
    },
    Label {
        text: String,
        style: TextStyle,
    },
    Particles(ParticleEmitter),
}

impl ActorKind {
    pub fn rect() -> Self {
        Self::Rect { corner_radius: 0.0 }
    }

    pub fn circle(radius: f64) -> Self {
        Self::Arc {
            radius,
            start_angle: 0.0,
            end_angle: std::f64::consts::TAU,
        }
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self::Polygon { points }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::Label {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sprite => "sprite",
            Self::Rect { .. } => "rect",
            Self::Arc { .. } => "arc",
            Self::Polygon { .. } => "polygon",
            Self::Label { .. } => "label",
            Self::Particles(_) => "particles",
        }
    }

    pub(crate) fn arc_radius(radius: f64, w: f64) -> f64 {
        if radius > 0.0 { radius } else { w * 0.5 }
    }

    /// Whether `p`, already in the actor's local space, lies inside the shape.
    pub fn contains(&self, w: f64, h: f64, p: Point) -> bool {
        match self {
            Self::Arc { radius, .. } => {
                let r = Self::arc_radius(*radius, w);
                p.to_vec2().hypot2() <= r * r
            }
            Self::Polygon { points } if points.len() >= 3 => polygon_path(points).contains(p),
            _ => {
                let (hw, hh) = (w * 0.5, h * 0.5);
                p.x >= -hw && p.x <= hw && p.y >= -hh && p.y <= hh
            }
        }
    }
}

/// Axis-aligned local bounds, centred on the actor origin.
pub fn local_bounds(w: f64, h: f64) -> Rect {
    Rect::new(-w * 0.5, -h * 0.5, w * 0.5, h * 0.5)
}

pub(crate) fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/graph/kind.rs"]
mod tests;
