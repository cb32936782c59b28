use std::fmt;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::core::{ActorId, Color},
    graph::{actor::Actor, kind::ActorKind, world::World},
    render::surface::Paint,
};

/// Builds the actor for one particle.
pub type ParticleFactory = Box<dyn FnMut(&mut StdRng) -> Actor>;

#[derive(Clone, Copy, Debug)]
struct Particle {
    id: ActorId,
    age: f64,
}

/// Spawns short-lived child actors in bursts and ages them out.
///
/// Ranges are `(min, max)` pairs sampled uniformly per particle.
pub struct ParticleEmitter {
    /// Particles per burst.
    pub count: u32,
    /// Seconds between bursts.
    pub spawn_delay: f64,
    pub lifespan: f64,
    /// Half-extent of the spawn area around the emitter origin.
    pub spread_x: f64,
    pub spread_y: f64,
    pub velocity_x: (f64, f64),
    pub velocity_y: (f64, f64),
    pub velocity_r: (f64, f64),
    /// Per-second change of each particle's scale.
    pub scale_velocity: f64,
    /// Per-second change of each particle's opacity.
    pub opacity_velocity: f64,
    pub gravity_x: f64,
    pub gravity_y: f64,
    /// Number of bursts; `0` emits forever.
    pub repeat: u32,
    factory: ParticleFactory,
    rng: StdRng,
    particles: Vec<Particle>,
    timer: f64,
    bursts: u32,
    ended: bool,
}

impl fmt::Debug for ParticleEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParticleEmitter")
            .field("count", &self.count)
            .field("repeat", &self.repeat)
            .field("bursts", &self.bursts)
            .field("live", &self.particles.len())
            .finish_non_exhaustive()
    }
}

impl ParticleEmitter {
    pub fn new(seed: u64, factory: impl FnMut(&mut StdRng) -> Actor + 'static) -> Self {
        Self {
            count: 10,
            spawn_delay: 0.1,
            lifespan: 1.0,
            spread_x: 0.0,
            spread_y: 0.0,
            velocity_x: (-50.0, 50.0),
            velocity_y: (-50.0, 50.0),
            velocity_r: (0.0, 0.0),
            scale_velocity: 0.0,
            opacity_velocity: 0.0,
            gravity_x: 0.0,
            gravity_y: 0.0,
            repeat: 1,
            factory: Box::new(factory),
            rng: StdRng::seed_from_u64(seed),
            particles: Vec::new(),
            timer: 0.0,
            bursts: 0,
            ended: false,
        }
    }

    /// One radial burst that shrinks and fades.
    pub fn explosion(seed: u64, color: Color) -> Self {
        Self {
            count: 40,
            lifespan: 1.0,
            velocity_x: (-200.0, 200.0),
            velocity_y: (-200.0, 200.0),
            velocity_r: (-6.0, 6.0),
            scale_velocity: -0.8,
            opacity_velocity: -1.0,
            repeat: 1,
            ..Self::new(seed, move |_| square_particle(8.0, color))
        }
    }

    /// Continuous rising smoke.
    pub fn plume(seed: u64, color: Color) -> Self {
        Self {
            count: 4,
            spawn_delay: 0.05,
            lifespan: 1.5,
            spread_x: 6.0,
            velocity_x: (-20.0, 20.0),
            velocity_y: (-120.0, -60.0),
            scale_velocity: 0.6,
            opacity_velocity: -0.6,
            gravity_y: -20.0,
            repeat: 0,
            ..Self::new(seed, move |_| {
                Actor::new(ActorKind::circle(6.0))
                    .with_size(12.0, 12.0)
                    .with_paint(Paint::fill(color))
            })
        }
    }

    /// Continuous falling streaks across `width`.
    pub fn rain(seed: u64, color: Color, width: f64) -> Self {
        Self {
            count: 3,
            spawn_delay: 0.02,
            lifespan: 2.0,
            spread_x: width * 0.5,
            velocity_x: (-10.0, 10.0),
            velocity_y: (300.0, 400.0),
            repeat: 0,
            ..Self::new(seed, move |_| {
                Actor::new(ActorKind::rect())
                    .with_size(2.0, 12.0)
                    .with_paint(Paint::fill(color))
            })
        }
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn bursts(&self) -> u32 {
        self.bursts
    }

    pub fn is_exhausted(&self) -> bool {
        self.repeat != 0 && self.bursts >= self.repeat
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Emits again from scratch.
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.bursts = 0;
        self.ended = false;
    }
}

fn square_particle(size: f64, color: Color) -> Actor {
    Actor::new(ActorKind::rect())
        .with_size(size, size)
        .with_paint(Paint::fill(color))
}

fn sample(rng: &mut StdRng, (min, max): (f64, f64)) -> f64 {
    if min < max { rng.gen_range(min..=max) } else { min }
}

impl World {
    /// Spawns due bursts, ages live particles and reports exhaustion for a particles actor.
    pub(crate) fn update_emitter(&mut self, id: ActorId, dt: f64) {
        let Some(actor) = self.actors.get_mut(id) else {
            return;
        };
        let mut emitter = match std::mem::take(&mut actor.kind) {
            ActorKind::Particles(emitter) => emitter,
            other => {
                actor.kind = other;
                return;
            }
        };

        emitter.timer += dt;
        if !emitter.is_exhausted() && (emitter.bursts == 0 || emitter.spawn_delay <= 0.0) {
            emitter.timer = 0.0;
            self.burst(id, &mut emitter);
        }
        while !emitter.is_exhausted()
            && emitter.spawn_delay > 0.0
            && emitter.timer >= emitter.spawn_delay
        {
            emitter.timer -= emitter.spawn_delay;
            self.burst(id, &mut emitter);
        }

        let lifespan = emitter.lifespan;
        let (gx, gy) = (emitter.gravity_x * dt, emitter.gravity_y * dt);
        let ds = emitter.scale_velocity * dt;
        let dop = emitter.opacity_velocity * dt;
        let mut expired = Vec::new();
        emitter.particles.retain_mut(|p| {
            p.age += dt;
            if p.age >= lifespan {
                expired.push(p.id);
                return false;
            }
            true
        });
        for p in &emitter.particles {
            if let Some(a) = self.actors.get_mut(p.id) {
                a.vx += gx;
                a.vy += gy;
                a.scale_x = (a.scale_x + ds).max(0.0);
                a.scale_y = (a.scale_y + ds).max(0.0);
                a.opacity = (a.opacity + dop).clamp(0.0, 1.0);
                if ds != 0.0 {
                    a.transform_dirty = true;
                }
            }
        }
        for pid in expired {
            self.remove_actor(pid);
        }

        let just_ended = !emitter.ended && emitter.is_exhausted() && emitter.particles.is_empty();
        if just_ended {
            emitter.ended = true;
        }
        if let Some(actor) = self.actors.get_mut(id) {
            actor.kind = ActorKind::Particles(emitter);
        }
        if just_ended {
            self.fire_actor(id, |h| &mut h.on_particles_end, (), "on_particles_end");
        }
    }

    fn burst(&mut self, emitter_id: ActorId, emitter: &mut ParticleEmitter) {
        emitter.bursts += 1;
        for _ in 0..emitter.count {
            self.spawn_particle(emitter_id, emitter);
        }
    }

    fn spawn_particle(&mut self, emitter_id: ActorId, emitter: &mut ParticleEmitter) {
        let mut particle = (emitter.factory)(&mut emitter.rng);
        let rng = &mut emitter.rng;
        particle.x = sample(rng, (-emitter.spread_x, emitter.spread_x));
        particle.y = sample(rng, (-emitter.spread_y, emitter.spread_y));
        particle.vx = sample(rng, emitter.velocity_x);
        particle.vy = sample(rng, emitter.velocity_y);
        particle.vr = sample(rng, emitter.velocity_r);
        if let Ok(pid) = self.add_child(emitter_id, particle) {
            emitter.particles.push(Particle { id: pid, age: 0.0 });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/particles.rs"]
mod tests;
