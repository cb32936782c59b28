use std::collections::HashMap;

use crate::{
    foundation::core::{ActorId, Rect, Vec2},
    foundation::error::{SceneryError, SceneryResult},
    graph::world::World,
};

/// One sub-image of an atlas bitmap with its intrinsic draw offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AtlasFrame {
    pub rect: Rect,
    pub ox: f64,
    pub oy: f64,
}

/// A bitmap sliced into frames, plus named frame sequences.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageAtlas {
    pub name: String,
    pub image: String,
    frames: Vec<AtlasFrame>,
    anims: HashMap<String, Vec<usize>>,
}

impl ImageAtlas {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            frames: Vec::new(),
            anims: HashMap::new(),
        }
    }

    /// Slices a uniform grid, row-major.
    pub fn grid(
        name: impl Into<String>,
        image: impl Into<String>,
        cols: u32,
        rows: u32,
        frame_w: f64,
        frame_h: f64,
    ) -> Self {
        let mut atlas = Self::new(name, image);
        for row in 0..rows {
            for col in 0..cols {
                let x0 = f64::from(col) * frame_w;
                let y0 = f64::from(row) * frame_h;
                atlas.add_frame(Rect::new(x0, y0, x0 + frame_w, y0 + frame_h), 0.0, 0.0);
            }
        }
        atlas
    }

    pub fn add_frame(&mut self, rect: Rect, ox: f64, oy: f64) -> usize {
        self.frames.push(AtlasFrame { rect, ox, oy });
        self.frames.len() - 1
    }

    pub fn add_anim(&mut self, name: impl Into<String>, frames: Vec<usize>) -> SceneryResult<()> {
        let name = name.into();
        if let Some(bad) = frames.iter().find(|&&f| f >= self.frames.len()) {
            return Err(SceneryError::invalid_argument(format!(
                "animation \"{name}\" references frame {bad} but atlas \"{}\" has {} frames",
                self.name,
                self.frames.len()
            )));
        }
        self.anims.insert(name, frames);
        Ok(())
    }

    pub fn frame(&self, index: usize) -> Option<&AtlasFrame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn anim(&self, name: &str) -> Option<&[usize]> {
        self.anims.get(name).map(Vec::as_slice)
    }
}

/// Bitmap and atlas playback state of a sprite actor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpriteState {
    /// Plain bitmap drawn when no atlas is set.
    pub image: Option<String>,
    pub atlas: Option<String>,
    /// Frames per second; negative plays backwards.
    pub frame_speed: f64,
    /// Wrap at either end instead of stopping on the last frame.
    pub frames_repeat: bool,
    pub current_frame: f64,
    /// Active named sequence; empty walks every atlas frame.
    frames: Vec<usize>,
    anim: Option<String>,
}

impl SpriteState {
    pub fn image(name: impl Into<String>) -> Self {
        Self {
            image: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn atlas(name: impl Into<String>, frame_speed: f64) -> Self {
        Self {
            atlas: Some(name.into()),
            frame_speed,
            frames_repeat: true,
            ..Self::default()
        }
    }

    pub fn anim(&self) -> Option<&str> {
        self.anim.as_deref()
    }

    /// Atlas frame index currently shown.
    pub fn frame_index(&self) -> usize {
        let cursor = self.current_frame.max(0.0) as usize;
        if self.frames.is_empty() {
            cursor
        } else {
            self.frames[cursor.min(self.frames.len() - 1)]
        }
    }

    fn sequence_len(&self, atlas_frames: usize) -> usize {
        if self.frames.is_empty() {
            atlas_frames
        } else {
            self.frames.len()
        }
    }

    /// Steps the frame cursor. Returns true when a non-repeating sequence runs off its end.
    pub(crate) fn advance(&mut self, dt: f64, atlas_frames: usize) -> bool {
        let len = self.sequence_len(atlas_frames);
        if self.frame_speed == 0.0 || len == 0 {
            return false;
        }
        let count = len as f64;
        self.current_frame += self.frame_speed * dt;
        if self.current_frame >= count {
            if self.frames_repeat {
                self.current_frame = self.current_frame.rem_euclid(count);
            } else {
                self.current_frame = count - 1.0;
                self.frame_speed = 0.0;
                return true;
            }
        } else if self.current_frame < 0.0 {
            if self.frames_repeat {
                self.current_frame = self.current_frame.rem_euclid(count);
            } else {
                self.current_frame = 0.0;
                self.frame_speed = 0.0;
                return true;
            }
        }
        false
    }
}

impl World {
    /// Switches `id` to the named atlas sequence. Unknown names are a no-op.
    pub fn play_anim(&mut self, id: ActorId, name: &str) -> bool {
        let debug = self.debug;
        let Some(actor) = self.actors.get(id) else {
            return false;
        };
        let Some(atlas_name) = actor.sprite.as_ref().and_then(|s| s.atlas.clone()) else {
            if debug {
                tracing::warn!(actor = %actor.name, anim = name, "play_anim on an actor without an atlas");
            }
            return false;
        };
        let Some(frames) = self
            .resources
            .atlas(&atlas_name)
            .and_then(|a| a.anim(name))
            .map(<[usize]>::to_vec)
        else {
            if debug {
                tracing::warn!(atlas = %atlas_name, anim = name, "unknown atlas animation");
            }
            return false;
        };
        if let Some(sprite) = self.actors.get_mut(id).and_then(|a| a.sprite.as_mut()) {
            sprite.frames = frames;
            sprite.anim = Some(name.to_string());
            sprite.current_frame = 0.0;
        }
        self.dirty(id);
        true
    }

    /// Intrinsic offset of the atlas frame `id` currently shows.
    pub(crate) fn frame_offset(&self, id: ActorId) -> Vec2 {
        self.current_atlas_frame(id)
            .map(|f| Vec2::new(f.ox, f.oy))
            .unwrap_or(Vec2::ZERO)
    }

    pub(crate) fn current_atlas_frame(&self, id: ActorId) -> Option<AtlasFrame> {
        let sprite = self.actors.get(id)?.sprite.as_ref()?;
        let atlas = self.resources.atlas(sprite.atlas.as_deref()?)?;
        atlas.frame(sprite.frame_index()).copied()
    }

    /// Advances atlas playback during update; fires the animation-ended handler on exhaustion.
    pub(crate) fn advance_sprite(&mut self, id: ActorId, dt: f64) {
        let atlas_frames = match self
            .actors
            .get(id)
            .and_then(|a| a.sprite.as_ref())
            .and_then(|s| s.atlas.as_deref())
            .and_then(|name| self.resources.atlas(name))
        {
            Some(atlas) => atlas.frame_count(),
            None => return,
        };
        let Some(sprite) = self.actors.get_mut(id).and_then(|a| a.sprite.as_mut()) else {
            return;
        };
        let before = sprite.frame_index();
        let ended = sprite.advance(dt, atlas_frames);
        if sprite.frame_index() != before {
            self.dirty(id);
        }
        if ended {
            self.fire_actor(id, |h| &mut h.on_anim_end, (), "on_anim_end");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/atlas.rs"]
mod tests;
