use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use smallvec::SmallVec;

use crate::{
    animation::{
        ease::Ease,
        keyframe::{AnimStatus, KeyframeAnimation},
        property::{Property, Target},
    },
    foundation::core::NamedOp,
    foundation::error::SceneryResult,
    graph::world::World,
};

/// Handle to a timeline inside one [`TimelineManager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(pub u64);

/// Result of updating a timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineStatus {
    Playing,
    Idle,
    /// Holds no animations; the owning manager drops it.
    Empty,
}

/// An ordered group of keyframe animations sharing play/pause/restart.
#[derive(Default)]
pub struct Timeline {
    pub name: String,
    anims: Vec<KeyframeAnimation>,
    playing: bool,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("name", &self.name)
            .field("anims", &self.anims.len())
            .field("playing", &self.playing)
            .finish()
    }
}

impl Timeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anims: Vec::new(),
            playing: false,
        }
    }

    pub fn add(&mut self, anim: KeyframeAnimation) -> &mut KeyframeAnimation {
        self.anims.push(anim);
        let idx = self.anims.len() - 1;
        &mut self.anims[idx]
    }

    /// Builds and adds a single-pass animation in one call.
    pub fn add_keyframes(
        &mut self,
        target: impl Into<Target>,
        property: Property,
        frames: Vec<f64>,
        times: Vec<f64>,
        easing: Option<Vec<Ease>>,
    ) -> SceneryResult<&mut KeyframeAnimation> {
        let mut anim = KeyframeAnimation::new(target, property, frames, times)?;
        if let Some(easing) = easing {
            anim = anim.with_easing(easing)?;
        }
        Ok(self.add(anim))
    }

    pub fn len(&self) -> usize {
        self.anims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anims.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn anims(&self) -> &[KeyframeAnimation] {
        &self.anims
    }

    pub fn anim_mut(&mut self, index: usize) -> Option<&mut KeyframeAnimation> {
        self.anims.get_mut(index)
    }

    pub fn find(&mut self, target: Target, property: &Property) -> Option<&mut KeyframeAnimation> {
        self.anims
            .iter_mut()
            .find(|a| a.target() == target && a.property() == property)
    }

    pub fn remove(&mut self, index: usize) -> Option<KeyframeAnimation> {
        (index < self.anims.len()).then(|| self.anims.remove(index))
    }

    /// Drops every animation that writes to `target`.
    pub fn remove_target(&mut self, target: Target) {
        self.anims.retain(|a| a.target() != target);
    }

    pub fn pause(&mut self) {
        self.anims.iter_mut().for_each(KeyframeAnimation::pause);
    }

    pub fn play(&mut self) {
        self.anims.iter_mut().for_each(KeyframeAnimation::play);
    }

    pub fn restart(&mut self) {
        self.anims.iter_mut().for_each(KeyframeAnimation::restart);
    }

    pub fn set_delay(&mut self, delay: f64) {
        for anim in &mut self.anims {
            anim.set_delay(delay);
        }
    }

    pub fn set_repeats(&mut self, repeat: u32) {
        for anim in &mut self.anims {
            anim.set_repeat(repeat);
        }
    }

    pub fn set_time_scale(&mut self, time_scale: f64) {
        for anim in &mut self.anims {
            anim.time_scale = time_scale;
        }
    }

    /// Updates animations newest-first so a finishing animation can drop out mid-pass.
    pub fn update(&mut self, dt: f64, world: &mut World) -> TimelineStatus {
        if self.anims.is_empty() {
            self.playing = false;
            return TimelineStatus::Empty;
        }
        let mut playing = false;
        for idx in (0..self.anims.len()).rev() {
            match self.anims[idx].update(dt, world) {
                AnimStatus::Active => playing = true,
                AnimStatus::Inactive => {}
                AnimStatus::Finished => {
                    self.anims.remove(idx);
                }
            }
        }
        self.playing = playing;
        if playing {
            TimelineStatus::Playing
        } else {
            TimelineStatus::Idle
        }
    }
}

static NEXT_TIMELINE_ID: AtomicU64 = AtomicU64::new(1);

/// Owns the timelines of one app, scene or actor.
///
/// While its owner updates it, the owner holds a detached placeholder instead; anything added to
/// or requested from the placeholder is merged back once the update finishes.
#[derive(Default)]
pub struct TimelineManager {
    timelines: Vec<(TimelineId, Timeline)>,
    pending: SmallVec<[NamedOp; 2]>,
    pending_ids: SmallVec<[TimelineId; 2]>,
    detached: bool,
    cleared: bool,
}

impl fmt::Debug for TimelineManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.timelines.iter().map(|(id, t)| (id, &t.name)))
            .finish()
    }
}

impl TimelineManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }

    pub fn add(&mut self, timeline: Timeline) -> TimelineId {
        let id = TimelineId(NEXT_TIMELINE_ID.fetch_add(1, Ordering::Relaxed));
        self.timelines.push((id, timeline));
        id
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn get(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.iter().find(|(i, _)| *i == id).map(|(_, t)| t)
    }

    pub fn get_mut(&mut self, id: TimelineId) -> Option<&mut Timeline> {
        self.timelines
            .iter_mut()
            .find(|(i, _)| *i == id)
            .map(|(_, t)| t)
    }

    pub fn find(&self, name: &str) -> Option<&Timeline> {
        self.timelines
            .iter()
            .find(|(_, t)| t.name == name)
            .map(|(_, t)| t)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Timeline> {
        self.timelines
            .iter_mut()
            .find(|(_, t)| t.name == name)
            .map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.iter().map(|(_, t)| t)
    }

    /// Removes by identity.
    pub fn remove(&mut self, id: TimelineId) -> Option<Timeline> {
        match self.timelines.iter().position(|(i, _)| *i == id) {
            Some(pos) => Some(self.timelines.remove(pos).1),
            None => {
                if self.detached {
                    self.pending_ids.push(id);
                }
                None
            }
        }
    }

    pub fn remove_named(&mut self, name: &str) {
        self.named_op(NamedOp::Remove(name.to_string()));
    }

    /// Removes every timeline.
    pub fn clear(&mut self) {
        self.timelines.clear();
        self.pending.clear();
        self.pending_ids.clear();
        if self.detached {
            self.cleared = true;
        }
    }

    pub fn play_named(&mut self, name: &str) {
        self.named_op(NamedOp::Play(name.to_string()));
    }

    pub fn pause_named(&mut self, name: &str) {
        self.named_op(NamedOp::Pause(name.to_string()));
    }

    pub fn restart_named(&mut self, name: &str) {
        self.named_op(NamedOp::Restart(name.to_string()));
    }

    pub fn pause(&mut self) {
        self.timelines.iter_mut().for_each(|(_, t)| t.pause());
    }

    pub fn play(&mut self) {
        self.timelines.iter_mut().for_each(|(_, t)| t.play());
    }

    pub fn restart(&mut self) {
        self.timelines.iter_mut().for_each(|(_, t)| t.restart());
    }

    pub fn set_repeats(&mut self, repeat: u32) {
        self.timelines
            .iter_mut()
            .for_each(|(_, t)| t.set_repeats(repeat));
    }

    /// Updates every timeline and drops the ones left without animations.
    pub fn update(&mut self, dt: f64, world: &mut World) {
        for idx in (0..self.timelines.len()).rev() {
            if self.timelines[idx].1.update(dt, world) == TimelineStatus::Empty {
                self.timelines.remove(idx);
            }
        }
    }

    /// Merges what was added to or requested from a detached placeholder.
    pub(crate) fn absorb(&mut self, mut other: TimelineManager) {
        if other.cleared {
            self.clear();
        }
        for id in other.pending_ids.drain(..) {
            self.remove(id);
        }
        self.timelines.append(&mut other.timelines);
        for op in other.pending.drain(..) {
            self.named_op(op);
        }
    }

    fn named_op(&mut self, op: NamedOp) {
        if self.detached && self.find(op.name()).is_none() {
            self.pending.push(op);
            return;
        }
        match op {
            NamedOp::Remove(name) => self.timelines.retain(|(_, t)| t.name != name),
            NamedOp::Play(name) => {
                if let Some(t) = self.find_mut(&name) {
                    t.play();
                }
            }
            NamedOp::Pause(name) => {
                if let Some(t) = self.find_mut(&name) {
                    t.pause();
                }
            }
            NamedOp::Restart(name) => {
                if let Some(t) = self.find_mut(&name) {
                    t.restart();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
