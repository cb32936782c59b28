//! # Scenery guide (v0.1.0)
//!
//! A walkthrough of the runtime model: what lives where, what runs when, and which parts are
//! pluggable. For the binary, start with `scenery --help`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`World`](crate::World): arena of scenes and actors plus app-wide state (display, resources,
//!   variables, focus, the app's own managers)
//! - [`Scene`](crate::Scene): a layer of root actors with a [`Camera`](crate::Camera)
//! - [`Actor`](crate::Actor): a scene-graph node; its [`ActorKind`](crate::ActorKind) picks the
//!   draw and hit-test strategy (sprite, rect, arc, polygon, label, particles)
//! - [`App`](crate::App): frame driver owning the world, the [`FrameClock`](crate::FrameClock) and
//!   input focus
//! - [`Surface`](crate::Surface): the only way pixels are produced
//!
//! Actors, scenes and the app each own three managers:
//!
//! 1. [`TimelineManager`](crate::TimelineManager): named groups of
//!    [`KeyframeAnimation`](crate::KeyframeAnimation)s
//! 2. [`ActionListManager`](crate::ActionListManager): sequences of [`Action`](crate::Action)s run
//!    one at a time
//! 3. [`TaskManager`](crate::TaskManager): timed callbacks ([`Task`](crate::Task)) and strict
//!    sequences of them ([`TaskQueue`](crate::TaskQueue))
//!
//! They always run in that order.
//!
//! ---
//!
//! ## Handles, not pointers
//!
//! Scenes and actors are addressed by [`SceneId`](crate::SceneId) and [`ActorId`](crate::ActorId).
//! Parent links, camera targets and touch focus are plain handles. Once an actor is released its
//! handle simply stops resolving: `world.actor(id)` returns `None` and every operation taking the
//! handle becomes a no-op.
//!
//! Removal is deferred. [`World::remove_actor`](crate::World::remove_actor) marks the actor and
//! queues it on its parent (or scene); the queue is flushed right after that parent's children
//! were updated. Scenes removed during a frame go away after every scene was updated. Managers
//! behave the same way for their own entries.
//!
//! ---
//!
//! ## One frame
//!
//! [`App::update`](crate::App::update) runs:
//!
//! 1. the app's managers
//! 2. the shared physics world, if any (sub-stepped when running below the target frame rate and
//!    `adaptive_physics` is on)
//! 3. every scene in layer order: tick handler, managers, scene physics, camera, root actors
//! 4. the deferred scene removals, then a stable re-sort of scenes by layer
//!
//! Each actor update runs the tick handler, the actor's managers, virtual-canvas scrolling, sprite
//! frames, particles, motion (velocities or the physics body), wrapping, docking, then its
//! children, then its removal queue and a layer re-sort.
//!
//! [`App::draw`](crate::App::draw) walks visible scenes and actors back to front. Negative-layer
//! children are drawn behind their parent. Transforms are cached per actor and only recomputed
//! when something that feeds them changed; see [`FrameStats`](crate::FrameStats).
//!
//! ```rust,no_run
//! use std::f64::consts::PI;
//!
//! use scenery::{
//!     ActionList, Actor, ActorKind, App, AppConfig, Ease, MoveTo, Owner, Property,
//!     RecordingSurface, Wait,
//! };
//!
//! # fn main() -> scenery::SceneryResult<()> {
//! let mut app = App::new(AppConfig::default())?;
//! let scene = app.world.create_scene("main");
//! let hero = app.world.add_actor(
//!     scene,
//!     Actor::new(ActorKind::rect()).with_size(40.0, 40.0),
//! )?;
//!
//! app.world.tween_to(hero, Property::Rotation, PI, 2.0, Ease::InOutQuad)?;
//! if let Some(lists) = app.world.action_lists(Owner::Actor(hero)) {
//!     lists.add(
//!         ActionList::new("patrol")
//!             .with_repeat(0)
//!             .then(MoveTo::new(200.0, 0.0, 1.0, Ease::Linear))
//!             .then(Wait::new(0.5))
//!             .then(MoveTo::new(0.0, 0.0, 1.0, Ease::Linear)),
//!     );
//! }
//!
//! let mut surface = RecordingSurface::new();
//! for _ in 0..60 {
//!     app.frame(&mut surface)?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ---
//!
//! ## Errors
//!
//! Construction and configuration return [`SceneryError`](crate::SceneryError). The frame loop
//! does not: handlers, keyframe actions, action hooks and task callbacks return
//! `SceneryResult<()>`, and a failure is logged with `tracing::warn!` and contained to its owner.
//! The one exception is the physics provider. An error from
//! [`PhysicsWorld::step`](crate::PhysicsWorld::step) comes back out of `App::update`.
//!
//! ---
//!
//! ## Coordinates
//!
//! Content is authored at the design size. The canvas scale method
//! ([`ScaleMethod`](crate::ScaleMethod)) maps it onto the real canvas, centred. Scene space has
//! its origin at the canvas centre, shifted by the scene offset and the camera. Actor positions
//! are relative to the parent; origins with magnitude up to 1 are proportional to the size.
//!
//! Docking pins an actor to an edge of its parent, its scene or the visible screen. A
//! [`VirtualCanvas`](crate::VirtualCanvas) scrolls and optionally stacks its children, with
//! momentum after a drag and culling of children outside the viewport.
//!
//! ---
//!
//! ## Plugging in
//!
//! - Rendering: implement [`Surface`](crate::Surface). [`RecordingSurface`](crate::RecordingSurface)
//!   records serialisable [`DrawCommand`](crate::DrawCommand)s.
//! - Physics: implement [`PhysicsWorld`](crate::PhysicsWorld), then install it per scene or as the
//!   shared world.
//! - Resources: implement [`ResourceLoader`](crate::ResourceLoader). The runtime tracks load state,
//!   retries up to [`MAX_LOAD_ATTEMPTS`](crate::MAX_LOAD_ATTEMPTS) times and counts failures.
//! - Input: feed pointer and key events to [`App::touch_begin`](crate::App::touch_begin),
//!   [`App::touch_move`](crate::App::touch_move), [`App::touch_end`](crate::App::touch_end),
//!   [`App::key_down`](crate::App::key_down) and [`App::key_up`](crate::App::key_up).
