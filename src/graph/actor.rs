use std::collections::HashMap;

use crate::{
    app::input::TouchInfo,
    foundation::core::{ActorId, Affine, Margins, ScaleMethod, SceneId},
    foundation::error::SceneryResult,
    graph::{
        atlas::SpriteState,
        kind::ActorKind,
        layout::{DockX, DockY, VirtualCanvas},
        world::{Managers, World},
    },
    physics::{BodyHandle, JointHandle},
    render::surface::{CacheId, CompositeOp, Paint, Shadow},
};

/// User callback attached to an actor event.
pub type ActorHandler<A> = Box<dyn FnMut(&mut World, ActorId, A) -> SceneryResult<()>>;

/// Optional per-actor event callbacks. Absent handlers are simply skipped.
#[derive(Default)]
pub struct ActorHandlers {
    /// Runs first in the actor's update, with the frame delta.
    pub on_tick: Option<ActorHandler<f64>>,
    pub on_touch_begin: Option<ActorHandler<TouchInfo>>,
    pub on_touch_move: Option<ActorHandler<TouchInfo>>,
    pub on_touch_end: Option<ActorHandler<TouchInfo>>,
    /// Touch began on this actor but was released elsewhere.
    pub on_lost_focus: Option<ActorHandler<()>>,
    /// Pointer entered (`true`) or left (`false`) the actor without a touch in progress.
    pub on_hover: Option<ActorHandler<bool>>,
    pub on_collision_begin: Option<ActorHandler<ActorId>>,
    pub on_collision_end: Option<ActorHandler<ActorId>>,
    /// A non-repeating atlas sequence reached its end.
    pub on_anim_end: Option<ActorHandler<()>>,
    /// A particle emitter used up its bursts and its last particle died.
    pub on_particles_end: Option<ActorHandler<()>>,
}

impl std::fmt::Debug for ActorHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorHandlers").finish_non_exhaustive()
    }
}

/// A scene-graph node: transform inputs, visual state, hierarchy links and its own managers.
///
/// Fields are public for construction and inspection. Once the actor lives in a [`World`],
/// change transform inputs through [`World::set_property`] (or call [`World::dirty`] after a
/// direct edit) so that cached transforms of the whole subtree are invalidated.
#[derive(Debug)]
pub struct Actor {
    pub name: String,
    pub tag: String,
    pub kind: ActorKind,

    pub x: f64,
    pub y: f64,
    /// Extra translation on top of `x`/`y`, left alone by docking.
    pub x2: f64,
    pub y2: f64,
    /// Pivot; values inside `[-1, 1]` are a proportion of the size, otherwise pixels.
    pub ox: f64,
    pub oy: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Pseudo-3D divisor; `0` and `1` disable projection.
    pub depth: f64,
    pub w: f64,
    pub h: f64,
    pub scale_method: ScaleMethod,

    pub vx: f64,
    pub vy: f64,
    pub vr: f64,
    pub vd: f64,
    /// Per-frame velocity multipliers.
    pub vx_damping: f64,
    pub vy_damping: f64,
    pub vr_damping: f64,
    pub vd_damping: f64,

    pub visible: bool,
    pub active: bool,
    pub touchable: bool,
    /// Take part in hit testing.
    pub hit: bool,
    /// Skip parent transforms while staying in the tree.
    pub orphaned: bool,
    /// Wrap the position into the scene extents.
    pub wrap_position: bool,
    pub layer: i32,
    pub opacity: f64,
    pub use_parent_opacity: bool,

    pub paint: Paint,
    pub shadow: Option<Shadow>,
    pub composite_op: Option<CompositeOp>,
    pub self_clip: bool,
    pub clip_children: bool,
    pub clip_margin: Margins,
    /// Render once into an offscreen cache and reuse it.
    pub cache: bool,

    pub dock_x: DockX,
    pub dock_y: DockY,
    pub margin: Margins,
    /// Dock against the visible screen instead of the parent or scene.
    pub dock_screen: bool,
    pub sprite: Option<SpriteState>,
    pub virtual_canvas: Option<VirtualCanvas>,

    pub vars: HashMap<String, f64>,
    pub managers: Managers,
    pub handlers: ActorHandlers,

    pub(crate) transform: Affine,
    pub(crate) accum_scale_x: f64,
    pub(crate) accum_scale_y: f64,
    pub(crate) accum_opacity: f64,
    pub(crate) transform_dirty: bool,
    /// Cleared by a culling virtual-canvas parent while outside its viewport.
    pub(crate) in_view: bool,

    pub(crate) parent: Option<ActorId>,
    pub(crate) scene: Option<SceneId>,
    pub(crate) children: Vec<ActorId>,
    pub(crate) removals: Vec<ActorId>,
    pub(crate) order_changed: bool,
    pub(crate) pending_removal: bool,

    pub(crate) body: Option<BodyHandle>,
    pub(crate) joints: Vec<JointHandle>,
    pub(crate) cache_id: Option<CacheId>,
    pub(crate) cache_capture: bool,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(ActorKind::Sprite)
    }
}

impl Actor {
    pub fn new(kind: ActorKind) -> Self {
        Self {
            name: String::new(),
            tag: String::new(),
            kind,
            x: 0.0,
            y: 0.0,
            x2: 0.0,
            y2: 0.0,
            ox: 0.0,
            oy: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            depth: 0.0,
            w: 0.0,
            h: 0.0,
            scale_method: ScaleMethod::None,
            vx: 0.0,
            vy: 0.0,
            vr: 0.0,
            vd: 0.0,
            vx_damping: 1.0,
            vy_damping: 1.0,
            vr_damping: 1.0,
            vd_damping: 1.0,
            visible: true,
            active: true,
            touchable: false,
            hit: true,
            orphaned: false,
            wrap_position: false,
            layer: 0,
            opacity: 1.0,
            use_parent_opacity: true,
            paint: Paint::default(),
            shadow: None,
            composite_op: None,
            self_clip: false,
            clip_children: false,
            clip_margin: Margins::default(),
            cache: false,
            dock_x: DockX::None,
            dock_y: DockY::None,
            margin: Margins::default(),
            dock_screen: false,
            sprite: None,
            virtual_canvas: None,
            vars: HashMap::new(),
            managers: Managers::default(),
            handlers: ActorHandlers::default(),
            transform: Affine::IDENTITY,
            accum_scale_x: 1.0,
            accum_scale_y: 1.0,
            accum_opacity: 1.0,
            transform_dirty: true,
            in_view: true,
            parent: None,
            scene: None,
            children: Vec::new(),
            removals: Vec::new(),
            order_changed: false,
            pending_removal: false,
            body: None,
            joints: Vec::new(),
            cache_id: None,
            cache_capture: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_size(mut self, w: f64, h: f64) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    pub fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale_x = sx;
        self.scale_y = sy;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_origin(mut self, ox: f64, oy: f64) -> Self {
        self.ox = ox;
        self.oy = oy;
        self
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }

    pub fn with_paint(mut self, paint: Paint) -> Self {
        self.paint = paint;
        self
    }

    pub fn with_touchable(mut self, touchable: bool) -> Self {
        self.touchable = touchable;
        self
    }

    pub fn with_dock(mut self, dock_x: DockX, dock_y: DockY, margin: impl Into<Margins>) -> Self {
        self.dock_x = dock_x;
        self.dock_y = dock_y;
        self.margin = margin.into();
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteState) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_virtual_canvas(mut self, canvas: VirtualCanvas) -> Self {
        self.virtual_canvas = Some(canvas);
        self
    }

    pub fn with_cache(mut self) -> Self {
        self.cache = true;
        self
    }

    pub fn on_tick(
        mut self,
        f: impl FnMut(&mut World, ActorId, f64) -> SceneryResult<()> + 'static,
    ) -> Self {
        self.handlers.on_tick = Some(Box::new(f));
        self
    }

    pub fn parent(&self) -> Option<ActorId> {
        self.parent
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub fn children(&self) -> &[ActorId] {
        &self.children
    }

    /// World-space transform as of the last recomputation.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn accum_scale(&self) -> (f64, f64) {
        (self.accum_scale_x, self.accum_scale_y)
    }

    pub fn accum_opacity(&self) -> f64 {
        self.accum_opacity
    }

    pub fn is_transform_dirty(&self) -> bool {
        self.transform_dirty
    }

    /// False while a culling virtual-canvas parent has it outside its viewport.
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn joints(&self) -> &[JointHandle] {
        &self.joints
    }

    /// `0` and exactly `1` both mean "no projection".
    pub fn depth_active(&self) -> bool {
        self.depth != 0.0 && self.depth != 1.0
    }

    pub fn is_removal_pending(&self) -> bool {
        self.pending_removal
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/actor.rs"]
mod tests;
