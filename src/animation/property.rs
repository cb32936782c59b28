use std::{fmt, str::FromStr};

use crate::foundation::core::{ActorId, SceneId};

/// A numeric property that timelines, actions and tweens can read and write.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    X2,
    Y2,
    OriginX,
    OriginY,
    Rotation,
    ScaleX,
    ScaleY,
    Depth,
    Opacity,
    Width,
    Height,
    Vx,
    Vy,
    Vr,
    Vd,
    FrameSpeed,
    CurrentFrame,
    ScrollX,
    ScrollY,
    CameraX,
    CameraY,
    /// User variable stored on the target.
    Var(String),
}

impl Property {
    /// Whether writing this property invalidates cached transforms.
    pub fn affects_transform(&self) -> bool {
        matches!(
            self,
            Self::X
                | Self::Y
                | Self::X2
                | Self::Y2
                | Self::OriginX
                | Self::OriginY
                | Self::Rotation
                | Self::ScaleX
                | Self::ScaleY
                | Self::Depth
                | Self::Width
                | Self::Height
                | Self::CurrentFrame
        )
    }

    pub fn name(&self) -> &str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::X2 => "x2",
            Self::Y2 => "y2",
            Self::OriginX => "ox",
            Self::OriginY => "oy",
            Self::Rotation => "rotation",
            Self::ScaleX => "scale_x",
            Self::ScaleY => "scale_y",
            Self::Depth => "depth",
            Self::Opacity => "opacity",
            Self::Width => "w",
            Self::Height => "h",
            Self::Vx => "vx",
            Self::Vy => "vy",
            Self::Vr => "vr",
            Self::Vd => "vd",
            Self::FrameSpeed => "frame_speed",
            Self::CurrentFrame => "current_frame",
            Self::ScrollX => "scroll_pos_x",
            Self::ScrollY => "scroll_pos_y",
            Self::CameraX => "camera_x",
            Self::CameraY => "camera_y",
            Self::Var(name) => name,
        }
    }
}

impl FromStr for Property {
    type Err = std::convert::Infallible;

    /// Unknown names become user variables.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "x" => Self::X,
            "y" => Self::Y,
            "x2" => Self::X2,
            "y2" => Self::Y2,
            "ox" => Self::OriginX,
            "oy" => Self::OriginY,
            "rotation" => Self::Rotation,
            "scale_x" => Self::ScaleX,
            "scale_y" => Self::ScaleY,
            "depth" => Self::Depth,
            "opacity" => Self::Opacity,
            "w" => Self::Width,
            "h" => Self::Height,
            "vx" => Self::Vx,
            "vy" => Self::Vy,
            "vr" => Self::Vr,
            "vd" => Self::Vd,
            "frame_speed" => Self::FrameSpeed,
            "current_frame" => Self::CurrentFrame,
            "scroll_pos_x" => Self::ScrollX,
            "scroll_pos_y" => Self::ScrollY,
            "camera_x" => Self::CameraX,
            "camera_y" => Self::CameraY,
            other => Self::Var(other.to_string()),
        })
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Non-owning reference to the object whose property is animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Actor(ActorId),
    Scene(SceneId),
}

impl From<ActorId> for Target {
    fn from(id: ActorId) -> Self {
        Self::Actor(id)
    }
}

impl From<SceneId> for Target {
    fn from(id: SceneId) -> Self {
        Self::Scene(id)
    }
}
