use std::collections::HashMap;

use crate::{
    app::input::TouchInfo,
    foundation::core::{ActorId, Rect, SceneId},
    foundation::error::SceneryResult,
    graph::{
        camera::Camera,
        world::{Managers, World},
    },
    physics::PhysicsWorld,
};

/// User callback attached to a scene event.
pub type SceneHandler<A> = Box<dyn FnMut(&mut World, SceneId, A) -> SceneryResult<()>>;

#[derive(Default)]
pub struct SceneHandlers {
    pub on_tick: Option<SceneHandler<f64>>,
    pub on_touch_begin: Option<SceneHandler<TouchInfo>>,
    pub on_touch_move: Option<SceneHandler<TouchInfo>>,
    pub on_touch_end: Option<SceneHandler<TouchInfo>>,
    pub on_key_down: Option<SceneHandler<String>>,
    pub on_key_up: Option<SceneHandler<String>>,
}

impl std::fmt::Debug for SceneHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneHandlers").finish_non_exhaustive()
    }
}

/// Top-level container of root actors with a camera and its own managers.
pub struct Scene {
    pub name: String,
    /// Screen-space offset of the scene origin.
    pub x: f64,
    pub y: f64,
    /// Global scale folded into every root actor.
    pub scale: f64,
    /// Docking reference size for root actors.
    pub w: f64,
    pub h: f64,
    pub layer: i32,
    pub visible: bool,
    pub active: bool,
    /// Dragging on empty space pans the camera.
    pub touch_pan: bool,
    /// Area actors with `wrap_position` wrap into.
    pub extents: Option<Rect>,
    pub camera: Camera,
    pub vars: HashMap<String, f64>,
    pub managers: Managers,
    pub handlers: SceneHandlers,
    /// Scene-local simulation; ignored while the world has a shared one.
    pub physics: Option<Box<dyn PhysicsWorld>>,

    pub(crate) actors: Vec<ActorId>,
    pub(crate) removals: Vec<ActorId>,
    pub(crate) order_changed: bool,
    pub(crate) pending_removal: bool,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("layer", &self.layer)
            .field("actors", &self.actors.len())
            .field("camera", &self.camera)
            .field("physics", &self.physics.is_some())
            .finish_non_exhaustive()
    }
}

impl Scene {
    pub fn new(name: impl Into<String>, w: f64, h: f64) -> Self {
        Self {
            name: name.into(),
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            w,
            h,
            layer: 0,
            visible: true,
            active: true,
            touch_pan: false,
            extents: None,
            camera: Camera::default(),
            vars: HashMap::new(),
            managers: Managers::default(),
            handlers: SceneHandlers::default(),
            physics: None,
            actors: Vec::new(),
            removals: Vec::new(),
            order_changed: false,
            pending_removal: false,
        }
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_physics(mut self, physics: Box<dyn PhysicsWorld>) -> Self {
        self.physics = Some(physics);
        self
    }

    /// Root actors in draw order.
    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    pub fn is_removal_pending(&self) -> bool {
        self.pending_removal
    }
}
