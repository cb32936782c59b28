use std::fmt;

use crate::{
    animation::{
        ease::Ease,
        property::{Property, Target},
    },
    foundation::error::{SceneryError, SceneryResult},
    foundation::math::lerp,
    graph::world::World,
};

/// Callback fired by an animation (keyframe reached, repeat, end).
pub type AnimCallback = Box<dyn FnMut(&mut World) -> SceneryResult<()>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    #[default]
    Playing,
    Paused,
}

/// Outcome of a single animation update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimStatus {
    Active,
    Inactive,
    /// Playback ended and the animation asked its timeline to drop it.
    Finished,
}

/// Tweens one property of one target across an ordered list of keyframes.
pub struct KeyframeAnimation {
    target: Target,
    property: Property,
    frames: Vec<f64>,
    times: Vec<f64>,
    easing: Option<Vec<Ease>>,
    repeat: u32,
    forever: bool,
    pub time_scale: f64,
    delay: f64,
    pub tween: bool,
    pub destroy: bool,
    pub deactivate: bool,
    time: f64,
    index: Option<usize>,
    repeats_left: u32,
    state: PlayState,
    relative: bool,
    initial_value: f64,
    actions: Vec<Option<AnimCallback>>,
    on_end: Option<AnimCallback>,
    on_repeat: Option<AnimCallback>,
}

impl fmt::Debug for KeyframeAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyframeAnimation")
            .field("target", &self.target)
            .field("property", &self.property)
            .field("frames", &self.frames)
            .field("times", &self.times)
            .field("time", &self.time)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl KeyframeAnimation {
    /// Creates a playing, tweening animation that runs once.
    pub fn new(
        target: impl Into<Target>,
        property: Property,
        frames: Vec<f64>,
        times: Vec<f64>,
    ) -> SceneryResult<Self> {
        if frames.is_empty() {
            return Err(SceneryError::animation("animation needs at least one keyframe"));
        }
        if frames.len() != times.len() {
            return Err(SceneryError::animation(format!(
                "keyframe count {} does not match time count {}",
                frames.len(),
                times.len()
            )));
        }
        if !times.windows(2).all(|w| w[0] <= w[1]) {
            return Err(SceneryError::animation("keyframe times must be non-decreasing"));
        }
        let count = frames.len();
        Ok(Self {
            target: target.into(),
            property,
            frames,
            times,
            easing: None,
            repeat: 0,
            forever: false,
            time_scale: 1.0,
            delay: 0.0,
            tween: true,
            destroy: false,
            deactivate: false,
            time: 0.0,
            index: None,
            repeats_left: 0,
            state: PlayState::Playing,
            relative: false,
            initial_value: 0.0,
            actions: (0..count).map(|_| None).collect(),
            on_end: None,
            on_repeat: None,
        })
    }

    /// One easing curve per segment (`frames.len() - 1` entries).
    pub fn with_easing(mut self, easing: Vec<Ease>) -> SceneryResult<Self> {
        if easing.len() + 1 != self.frames.len() {
            return Err(SceneryError::animation(format!(
                "expected {} easing entries, got {}",
                self.frames.len().saturating_sub(1),
                easing.len()
            )));
        }
        self.easing = Some(easing);
        Ok(self)
    }

    /// Extra passes after the first one; `0` repeats forever.
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.set_repeat(repeat);
        self
    }

    /// Seconds to wait before the first keyframe starts.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self.time = -self.delay;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_tween(mut self, tween: bool) -> Self {
        self.tween = tween;
        self
    }

    pub fn with_destroy(mut self, destroy: bool) -> Self {
        self.destroy = destroy;
        self
    }

    pub fn with_deactivate(mut self, deactivate: bool) -> Self {
        self.deactivate = deactivate;
        self
    }

    pub fn on_end(mut self, f: impl FnMut(&mut World) -> SceneryResult<()> + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    pub fn on_repeat(mut self, f: impl FnMut(&mut World) -> SceneryResult<()> + 'static) -> Self {
        self.on_repeat = Some(Box::new(f));
        self
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn repeats_forever(&self) -> bool {
        self.forever
    }

    pub fn repeats_left(&self) -> u32 {
        self.repeats_left
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Length of one pass in seconds, excluding the delay.
    pub fn duration(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    pub fn play(&mut self) {
        self.state = PlayState::Playing;
    }

    pub fn set_repeat(&mut self, repeat: u32) {
        self.repeat = repeat;
        self.forever = repeat == 0;
        self.repeats_left = repeat;
    }

    pub fn set_delay(&mut self, delay: f64) {
        self.delay = delay.max(0.0);
    }

    pub fn restart(&mut self) {
        self.time = -self.delay;
        self.index = None;
        self.repeats_left = self.repeat;
        self.state = PlayState::Playing;
    }

    /// Registers a callback fired whenever keyframe `index` is reached during forward playback.
    pub fn set_action(
        &mut self,
        index: usize,
        f: impl FnMut(&mut World) -> SceneryResult<()> + 'static,
    ) -> SceneryResult<()> {
        let slot = self.actions.get_mut(index).ok_or_else(|| {
            SceneryError::invalid_argument(format!("keyframe index {index} out of range"))
        })?;
        *slot = Some(Box::new(f));
        Ok(())
    }

    /// In relative mode the current value of the property is captured and added to every write.
    pub fn set_relative(&mut self, relative: bool, world: &World) {
        if relative && !self.relative {
            self.initial_value = world
                .get_property(self.target, &self.property)
                .unwrap_or(0.0);
        }
        self.relative = relative;
    }

    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Seeks to `time` and applies the resulting value without firing keyframe actions.
    pub fn set_time(&mut self, time: f64, world: &mut World) -> AnimStatus {
        self.time = time;
        self.index = None;
        self.advance(world, false)
    }

    pub fn update(&mut self, dt: f64, world: &mut World) -> AnimStatus {
        if self.state != PlayState::Playing {
            return AnimStatus::Inactive;
        }
        self.time += dt * self.time_scale;
        self.advance(world, true)
    }

    fn advance(&mut self, world: &mut World, fire_actions: bool) -> AnimStatus {
        let time = self.time;
        if time < 0.0 {
            self.write(world, self.frames[0]);
            return AnimStatus::Active;
        }
        let count = self.times.len();
        if count == 1 {
            return AnimStatus::Inactive;
        }
        if time < self.times[0] {
            self.write(world, self.frames[0]);
            return AnimStatus::Active;
        }

        let start = match self.index {
            Some(i) if i < count && self.times[i - 1] <= time => i,
            _ => 1,
        };
        if let Some(t) = (start..count).find(|&t| self.times[t] > time) {
            if self.index != Some(t) {
                self.index = Some(t);
                if fire_actions {
                    self.fire_action(t - 1, world);
                }
            }
            let value = self.segment_value(t, time);
            self.write(world, value);
            return AnimStatus::Active;
        }

        let last = count - 1;
        if fire_actions && self.index != Some(count) {
            self.index = Some(count);
            self.fire_action(last, world);
        }
        let duration = self.times[last];
        if self.forever || self.repeats_left > 0 {
            if !self.forever {
                self.repeats_left -= 1;
            }
            self.time = if duration > 0.0 { time % duration } else { 0.0 };
            self.index = None;
            fire(&mut self.on_repeat, world, "on_repeat");
            self.write(world, self.frames[0]);
            return AnimStatus::Active;
        }

        self.write(world, self.frames[last]);
        self.repeats_left = 0;
        self.state = PlayState::Paused;
        fire(&mut self.on_end, world, "on_end");
        if self.deactivate {
            world.deactivate(self.target);
        }
        if self.destroy {
            AnimStatus::Finished
        } else {
            AnimStatus::Inactive
        }
    }

    fn segment_value(&self, t: usize, time: f64) -> f64 {
        let (v0, v1) = (self.frames[t - 1], self.frames[t]);
        if !self.tween {
            return v0;
        }
        let (t0, t1) = (self.times[t - 1], self.times[t]);
        let span = t1 - t0;
        let p = if span > 0.0 { (time - t0) / span } else { 1.0 };
        let eased = match &self.easing {
            Some(easing) => easing[t - 1].apply(p),
            None => p,
        };
        lerp(v0, v1, eased)
    }

    fn write(&self, world: &mut World, value: f64) {
        let value = if self.relative {
            value + self.initial_value
        } else {
            value
        };
        world.set_property(self.target, &self.property, value);
    }

    fn fire_action(&mut self, index: usize, world: &mut World) {
        if let Some(slot) = self.actions.get_mut(index) {
            fire(slot, world, "keyframe action");
        }
    }
}

fn fire(slot: &mut Option<AnimCallback>, world: &mut World, what: &str) {
    let Some(cb) = slot.as_mut() else {
        return;
    };
    if let Err(err) = cb(world) {
        tracing::warn!(callback = what, %err, "animation callback failed");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
