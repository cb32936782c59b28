//! Scenery is a 2D scene-graph runtime for interactive applications.
//!
//! A [`World`] owns scenes and hierarchical actors. Every frame the [`App`] driver runs the
//! timelines, action lists and tasks attached to the app, each scene and each actor, updates
//! actor motion and layout, then draws everything through a [`Surface`].
//!
//! See [`guide`] for a walkthrough.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod actions;
pub(crate) mod animation;
pub(crate) mod app;
pub(crate) mod graph;
/// Narrative guide to the runtime model.
pub mod guide;
pub(crate) mod physics;
pub(crate) mod render;
pub(crate) mod resources;
pub(crate) mod tasks;

pub use crate::foundation::core::{
    ActorId, Affine, BezPath, Color, Display, Margins, Owner, Point, Rect, ScaleMethod, SceneId,
    Size, Vec2,
};
pub use crate::foundation::error::{SceneryError, SceneryResult};

pub use crate::actions::camera::{CameraFollow, CameraMoveTo};
pub use crate::actions::general::{
    AddProps, Call, ChangeActions, DestroyActor, FocusScene, PlayAnim, PlayTimeline, Playback,
    SetProps, TweenProps, Wait,
};
pub use crate::actions::list::{Action, ActionCtx, ActionList, ActionListManager, FnAction};
pub use crate::actions::movement::{Attract, ChaseActor, MoveTo, MoveWithSpeed};
pub use crate::actions::physics::{ApplyForce, ApplyImpulse, SetVelocity};
pub use crate::animation::ease::Ease;
pub use crate::animation::keyframe::{AnimCallback, AnimStatus, KeyframeAnimation, PlayState};
pub use crate::animation::property::{Property, Target};
pub use crate::animation::timeline::{Timeline, TimelineId, TimelineManager, TimelineStatus};
pub use crate::app::config::AppConfig;
pub use crate::app::driver::App;
pub use crate::app::input::TouchInfo;
pub use crate::app::timing::FrameClock;
pub use crate::graph::actor::{Actor, ActorHandler, ActorHandlers};
pub use crate::graph::atlas::{AtlasFrame, ImageAtlas, SpriteState};
pub use crate::graph::camera::Camera;
pub use crate::graph::kind::{ActorKind, local_bounds};
pub use crate::graph::layout::{DockX, DockY, ScrollRange, Stacking, VirtualCanvas};
pub use crate::graph::particles::{ParticleEmitter, ParticleFactory};
pub use crate::graph::scene::{Scene, SceneHandler, SceneHandlers};
pub use crate::graph::world::{FrameStats, Managers, World};
pub use crate::physics::{
    BodyDef, BodyHandle, BodyKind, ContactEvent, ContactPhase, FixtureDef, JointDef, JointHandle,
    JointKind, PhysicsSettings, PhysicsWorld, ShapeDef,
};
pub use crate::render::recording::{DrawCommand, RecordingSurface};
pub use crate::render::surface::{
    CacheId, CompositeOp, Paint, Shadow, Surface, TextAlign, TextStyle,
};
pub use crate::resources::{
    LoadState, MAX_LOAD_ATTEMPTS, Resource, ResourceKind, ResourceLoader, ResourcePayload,
    Resources,
};
pub use crate::tasks::manager::TaskManager;
pub use crate::tasks::queue::TaskQueue;
pub use crate::tasks::task::{Task, TaskCtx, TaskFn, TaskState, TaskTick};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
