use crate::foundation::core::{Affine, Color, Point, Rect, Size};

/// Handle to an offscreen cache created by a [`Surface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CacheId(pub u32);

/// Fill and stroke state for shape drawing. `None` skips that pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            stroke_width: width,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Canvas-style compositing operators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeOp {
    #[default]
    SourceOver,
    SourceAtop,
    SourceIn,
    SourceOut,
    DestinationOver,
    DestinationAtop,
    DestinationIn,
    DestinationOut,
    Lighter,
    Copy,
    Xor,
    Multiply,
    Screen,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    pub font: String,
    pub size: f64,
    pub line_height: f64,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: "sans-serif".to_string(),
            size: 16.0,
            line_height: 1.2,
            align: TextAlign::Center,
        }
    }
}

/// The 2D drawing surface the scene graph renders into.
///
/// Every call is declarative; the graph never touches pixels. `save`/`restore` scope the
/// transform, alpha, shadow, composite and clip state.
pub trait Surface {
    fn set_transform(&mut self, xf: Affine);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_shadow(&mut self, shadow: &Shadow);
    fn clear_shadow(&mut self);
    fn set_composite_op(&mut self, op: CompositeOp);
    fn save(&mut self);
    fn restore(&mut self);

    fn clip_rect(&mut self, rect: Rect);
    fn clip_arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    fn clip_polygon(&mut self, points: &[Point]);

    /// Draws `src` of the named bitmap (whole bitmap if `None`) into `dest`.
    fn draw_image(&mut self, image: &str, src: Option<Rect>, dest: Rect);
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);
    fn draw_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint);
    fn draw_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, paint: &Paint);
    fn draw_polygon(&mut self, points: &[Point], paint: &Paint);
    fn draw_text_wrap(&mut self, text: &str, bounds: Rect, style: &TextStyle, paint: &Paint);

    /// Creates an offscreen target of `size` pixels.
    fn create_cache(&mut self, size: Size) -> CacheId;
    /// Redirects drawing into `cache` until [`Surface::end_cache`].
    fn begin_cache(&mut self, cache: CacheId);
    fn end_cache(&mut self);
    fn draw_cache(&mut self, cache: CacheId, dest: Rect);
}
