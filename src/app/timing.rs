use std::time::{Duration, Instant};

/// Weight of the newest frame in the running fps average.
const FPS_SMOOTHING: f64 = 0.1;

/// Produces the delta of every frame and tracks the average frame rate.
#[derive(Clone, Debug)]
pub struct FrameClock {
    /// Fixed frames per second; `0` measures wall-clock time.
    pub target_frame_rate: f64,
    pub max_dt: f64,
    last: Option<Instant>,
    avg_fps: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(target_frame_rate: f64, max_dt: f64) -> Self {
        Self {
            target_frame_rate,
            max_dt,
            last: None,
            avg_fps: if target_frame_rate > 0.0 {
                target_frame_rate
            } else {
                60.0
            },
            frames: 0,
        }
    }

    pub fn avg_fps(&self) -> f64 {
        self.avg_fps
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Delta for the frame starting now.
    pub fn next_dt(&mut self) -> f64 {
        let now = Instant::now();
        let measured = self.last.map(|last| now.saturating_duration_since(last));
        self.last = Some(now);
        self.advance(measured)
    }

    /// Delta for a frame, given the wall-clock time since the previous one (`None` on the
    /// first frame).
    pub fn advance(&mut self, measured: Option<Duration>) -> f64 {
        self.frames += 1;
        if let Some(elapsed) = measured {
            let secs = elapsed.as_secs_f64();
            if secs > 0.0 {
                self.avg_fps += (1.0 / secs - self.avg_fps) * FPS_SMOOTHING;
            }
        }
        if self.target_frame_rate > 0.0 {
            return 1.0 / self.target_frame_rate;
        }
        measured
            .map(|d| d.as_secs_f64().min(self.max_dt))
            .unwrap_or(0.0)
    }

    /// Physics sub-steps for this frame: more when running below target, at most 3.
    pub fn physics_steps(&self, adaptive: bool) -> u32 {
        if !adaptive || self.target_frame_rate <= 0.0 || self.avg_fps <= 0.0 {
            return 1;
        }
        (self.target_frame_rate / self.avg_fps).round().clamp(1.0, 3.0) as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/timing.rs"]
mod tests;
