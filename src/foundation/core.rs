pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

slotmap::new_key_type! {
    /// Stable handle to an actor stored in a [`crate::World`].
    pub struct ActorId;
    /// Stable handle to a scene stored in a [`crate::World`].
    pub struct SceneId;
}

/// The object that owns a manager (timelines, action lists, tasks).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    App,
    Scene(SceneId),
    Actor(ActorId),
}

/// Margins in pixels, in `[left, right, top, bottom]` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Margins {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
}

impl Margins {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

impl From<[f64; 4]> for Margins {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }
}

/// Policy used to fit design-space content onto the real canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMethod {
    #[default]
    None,
    FitX,
    FitY,
    /// Smaller of the two axis factors; the whole design stays visible.
    FitBest,
    /// Larger of the two axis factors; the canvas is always covered.
    FitWorst,
    FitAverage,
    /// Factor of the axis along which the canvas is largest.
    FitGreatest,
    /// Factor of the axis along which the canvas is smallest.
    FitSmallest,
    /// Best fit rounded down to a whole multiple (never below 1).
    PixelPerfect,
}

/// Design and canvas dimensions plus the canvas fitting policy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Display {
    pub design_width: f64,
    pub design_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub scale_method: ScaleMethod,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            design_width: 1024.0,
            design_height: 768.0,
            canvas_width: 1024.0,
            canvas_height: 768.0,
            scale_method: ScaleMethod::None,
        }
    }
}

impl Display {
    /// Uniform scale factor that maps design units to canvas pixels under `method`.
    pub fn fit_scale(&self, method: ScaleMethod) -> f64 {
        if self.design_width <= 0.0 || self.design_height <= 0.0 {
            return 1.0;
        }
        let sx = self.canvas_width / self.design_width;
        let sy = self.canvas_height / self.design_height;
        match method {
            ScaleMethod::None => 1.0,
            ScaleMethod::FitX => sx,
            ScaleMethod::FitY => sy,
            ScaleMethod::FitBest => sx.min(sy),
            ScaleMethod::FitWorst => sx.max(sy),
            ScaleMethod::FitAverage => (sx + sy) * 0.5,
            ScaleMethod::FitGreatest => {
                if self.canvas_width >= self.canvas_height {
                    sx
                } else {
                    sy
                }
            }
            ScaleMethod::FitSmallest => {
                if self.canvas_width <= self.canvas_height {
                    sx
                } else {
                    sy
                }
            }
            ScaleMethod::PixelPerfect => sx.min(sy).floor().max(1.0),
        }
    }

    /// Canvas scale for the display's own fitting policy.
    pub fn canvas_scale(&self) -> f64 {
        self.fit_scale(self.scale_method)
    }

    /// Visible size in scene units once the canvas scale is applied.
    pub fn visible_size(&self) -> Size {
        let s = self.canvas_scale();
        Size::new(self.canvas_width / s, self.canvas_height / s)
    }

    /// Maps scene space (origin at canvas centre) onto canvas pixels.
    pub fn transform(&self) -> Affine {
        Affine::translate((self.canvas_width * 0.5, self.canvas_height * 0.5))
            * Affine::scale(self.canvas_scale())
    }
}

/// Name-addressed manager operation recorded while the manager is busy or detached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NamedOp {
    Remove(String),
    Play(String),
    Pause(String),
    Restart(String),
}

impl NamedOp {
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Remove(n) | Self::Play(n) | Self::Pause(n) | Self::Restart(n) => n,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
