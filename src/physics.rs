//! Physics provider interface.
//!
//! The runtime never links a physics engine. Bodies, fixtures and joints are created through
//! [`PhysicsWorld`], which an embedding application implements on top of whatever engine it uses.
//! Positions crossing this boundary are in physics units; the world scale converts them to pixels.

use crate::foundation::{
    core::{ActorId, Point, Vec2},
    error::SceneryResult,
};

/// Opaque body handle issued by a [`PhysicsWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BodyHandle(pub u64);

/// Opaque joint handle issued by a [`PhysicsWorld`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct JointHandle(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Static,
    Kinematic,
    #[default]
    Dynamic,
}

/// Everything needed to create a body for an actor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BodyDef {
    #[serde(skip)]
    pub owner: Option<ActorId>,
    pub kind: BodyKind,
    /// Physics units.
    pub position: Point,
    pub angle: f64,
    pub fixed_rotation: bool,
    pub bullet: bool,
    pub linear_damping: f64,
    pub angular_damping: f64,
    pub gravity_scale: f64,
    pub awake: bool,
    pub active: bool,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            owner: None,
            kind: BodyKind::Dynamic,
            position: Point::ZERO,
            angle: 0.0,
            fixed_rotation: false,
            bullet: false,
            linear_damping: 0.0,
            angular_damping: 0.0,
            gravity_scale: 1.0,
            awake: true,
            active: true,
        }
    }
}

/// Fixture geometry in physics units, relative to the body origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeDef {
    Box { half_width: f64, half_height: f64 },
    Circle { radius: f64 },
    Polygon { points: Vec<Point> },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FixtureDef {
    pub shape: ShapeDef,
    pub density: f64,
    pub friction: f64,
    pub restitution: f64,
    pub sensor: bool,
    pub category: u16,
    pub mask: u16,
    pub group: i16,
}

impl FixtureDef {
    pub fn new(shape: ShapeDef) -> Self {
        Self {
            shape,
            density: 1.0,
            friction: 0.1,
            restitution: 0.1,
            sensor: false,
            category: 1,
            mask: 0xffff,
            group: 0,
        }
    }
}

/// Joint kinds with their kind-specific parameters. Anchors are in physics units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JointKind {
    Weld {
        anchor: Point,
        frequency: f64,
        damping: f64,
    },
    Distance {
        anchor_a: Point,
        anchor_b: Point,
        frequency: f64,
        damping: f64,
    },
    Revolute {
        anchor: Point,
        limits: Option<(f64, f64)>,
        motor: Option<(f64, f64)>,
    },
    Prismatic {
        anchor: Point,
        axis: Vec2,
        limits: Option<(f64, f64)>,
        motor: Option<(f64, f64)>,
    },
    Pulley {
        ground_a: Point,
        ground_b: Point,
        anchor_a: Point,
        anchor_b: Point,
        ratio: f64,
    },
    Wheel {
        anchor: Point,
        axis: Vec2,
        frequency: f64,
        damping: f64,
        motor: Option<(f64, f64)>,
    },
    Mouse {
        target: Point,
        max_force: f64,
        frequency: f64,
        damping: f64,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JointDef {
    pub kind: JointKind,
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub collide_connected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Begin,
    End,
}

/// Contact reported by the provider between the bodies of two actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactEvent {
    pub phase: ContactPhase,
    pub a: ActorId,
    pub b: ActorId,
}

/// Minimal body/fixture/joint provider consumed by actors and actions.
pub trait PhysicsWorld {
    fn create_body(&mut self, def: &BodyDef) -> SceneryResult<BodyHandle>;
    fn destroy_body(&mut self, body: BodyHandle);
    fn add_fixture(&mut self, body: BodyHandle, def: &FixtureDef) -> SceneryResult<()>;
    fn create_joint(&mut self, def: &JointDef) -> SceneryResult<JointHandle>;
    fn destroy_joint(&mut self, joint: JointHandle);

    fn position(&self, body: BodyHandle) -> Option<Point>;
    fn set_position(&mut self, body: BodyHandle, pos: Point);
    fn angle(&self, body: BodyHandle) -> Option<f64>;
    fn set_angle(&mut self, body: BodyHandle, angle: f64);
    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec2>;
    fn set_linear_velocity(&mut self, body: BodyHandle, v: Vec2);
    fn angular_velocity(&self, body: BodyHandle) -> Option<f64>;
    fn set_angular_velocity(&mut self, body: BodyHandle, w: f64);
    fn is_awake(&self, body: BodyHandle) -> bool;
    fn set_awake(&mut self, body: BodyHandle, awake: bool);
    fn is_active(&self, body: BodyHandle) -> bool;
    fn set_active(&mut self, body: BodyHandle, active: bool);

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2, point: Option<Point>);
    fn apply_force(&mut self, body: BodyHandle, force: Vec2, point: Option<Point>);
    fn apply_torque(&mut self, body: BodyHandle, torque: f64);

    /// Advances the simulation. Errors propagate to the frame driver.
    fn step(&mut self, dt: f64, velocity_iterations: u32, position_iterations: u32)
    -> SceneryResult<()>;

    /// Contacts that began or ended since the previous drain.
    fn drain_contacts(&mut self) -> Vec<ContactEvent>;
}

/// Where the physics simulation for a scene lives and how it maps to pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Pixels per physics unit.
    pub world_scale: f64,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            world_scale: 20.0,
            velocity_iterations: 8,
            position_iterations: 3,
        }
    }
}
