use crate::{
    foundation::core::{Affine, Point, Rect, Size},
    render::surface::{CacheId, CompositeOp, Paint, Shadow, Surface, TextStyle},
};

/// One recorded surface call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    SetTransform {
        xf: Affine,
    },
    SetGlobalAlpha {
        alpha: f64,
    },
    SetShadow {
        shadow: Shadow,
    },
    ClearShadow,
    SetCompositeOp {
        #[serde(rename = "composite_op")]
        op: CompositeOp,
    },
    Save,
    Restore,
    ClipRect {
        rect: Rect,
    },
    ClipArc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    ClipPolygon {
        points: Vec<Point>,
    },
    DrawImage {
        image: String,
        src: Option<Rect>,
        dest: Rect,
    },
    DrawRect {
        rect: Rect,
        paint: Paint,
    },
    DrawRoundRect {
        rect: Rect,
        radius: f64,
        paint: Paint,
    },
    DrawArc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        paint: Paint,
    },
    DrawPolygon {
        points: Vec<Point>,
        paint: Paint,
    },
    DrawText {
        text: String,
        bounds: Rect,
        style: TextStyle,
        paint: Paint,
    },
    CreateCache {
        cache: CacheId,
        size: Size,
    },
    BeginCache {
        cache: CacheId,
    },
    EndCache,
    DrawCache {
        cache: CacheId,
        dest: Rect,
    },
}

impl DrawCommand {
    /// Whether the command puts something on the target (as opposed to changing state).
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            Self::DrawImage { .. }
                | Self::DrawRect { .. }
                | Self::DrawRoundRect { .. }
                | Self::DrawArc { .. }
                | Self::DrawPolygon { .. }
                | Self::DrawText { .. }
                | Self::DrawCache { .. }
        )
    }
}

/// A [`Surface`] that records every call, for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    next_cache: u32,
    save_depth: usize,
    max_save_depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_draw()).count()
    }

    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Unbalanced `save` calls outstanding.
    pub fn save_depth(&self) -> usize {
        self.save_depth
    }

    pub fn max_save_depth(&self) -> usize {
        self.max_save_depth
    }

    fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

impl Surface for RecordingSurface {
    fn set_transform(&mut self, xf: Affine) {
        self.push(DrawCommand::SetTransform { xf });
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawCommand::SetGlobalAlpha { alpha });
    }

    fn set_shadow(&mut self, shadow: &Shadow) {
        self.push(DrawCommand::SetShadow { shadow: *shadow });
    }

    fn clear_shadow(&mut self) {
        self.push(DrawCommand::ClearShadow);
    }

    fn set_composite_op(&mut self, op: CompositeOp) {
        self.push(DrawCommand::SetCompositeOp { op });
    }

    fn save(&mut self) {
        self.save_depth += 1;
        self.max_save_depth = self.max_save_depth.max(self.save_depth);
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.save_depth = self.save_depth.saturating_sub(1);
        self.push(DrawCommand::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.push(DrawCommand::ClipRect { rect });
    }

    fn clip_arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.push(DrawCommand::ClipArc {
            center,
            radius,
            start,
            end,
        });
    }

    fn clip_polygon(&mut self, points: &[Point]) {
        self.push(DrawCommand::ClipPolygon {
            points: points.to_vec(),
        });
    }

    fn draw_image(&mut self, image: &str, src: Option<Rect>, dest: Rect) {
        self.push(DrawCommand::DrawImage {
            image: image.to_string(),
            src,
            dest,
        });
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.push(DrawCommand::DrawRect {
            rect,
            paint: *paint,
        });
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: f64, paint: &Paint) {
        self.push(DrawCommand::DrawRoundRect {
            rect,
            radius,
            paint: *paint,
        });
    }

    fn draw_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, paint: &Paint) {
        self.push(DrawCommand::DrawArc {
            center,
            radius,
            start,
            end,
            paint: *paint,
        });
    }

    fn draw_polygon(&mut self, points: &[Point], paint: &Paint) {
        self.push(DrawCommand::DrawPolygon {
            points: points.to_vec(),
            paint: *paint,
        });
    }

    fn draw_text_wrap(&mut self, text: &str, bounds: Rect, style: &TextStyle, paint: &Paint) {
        self.push(DrawCommand::DrawText {
            text: text.to_string(),
            bounds,
            style: style.clone(),
            paint: *paint,
        });
    }

    fn create_cache(&mut self, size: Size) -> CacheId {
        let cache = CacheId(self.next_cache);
        self.next_cache += 1;
        self.push(DrawCommand::CreateCache { cache, size });
        cache
    }

    fn begin_cache(&mut self, cache: CacheId) {
        self.push(DrawCommand::BeginCache { cache });
    }

    fn end_cache(&mut self) {
        self.push(DrawCommand::EndCache);
    }

    fn draw_cache(&mut self, cache: CacheId, dest: Rect) {
        self.push(DrawCommand::DrawCache { cache, dest });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
