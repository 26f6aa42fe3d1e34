use serde::{Deserialize, Serialize};

use crate::foundation::error::{ProjectorError, ProjectorResult};

pub use kurbo::{Point, Vec2};

/// Three-component vector used for node socket values and object transforms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// All components zero.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All components one.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Construct from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from a 2-D vector and an explicit third component.
    pub fn from_xy(v: Vec2, z: f64) -> Self {
        Self::new(v.x, v.y, z)
    }
}

impl<'de> Deserialize<'de> for Vec3 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 3]),
            Obj { x: f64, y: f64, z: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y, z]) => Ok(Self { x, y, z }),
            Repr::Obj { x, y, z } => Ok(Self { x, y, z }),
        }
    }
}

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Construct from channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }

    /// Reject non-finite channels or channels outside `[0, 1]`.
    pub fn validate(self) -> ProjectorResult<()> {
        for (name, c) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            if !c.is_finite() || !(0.0..=1.0).contains(&c) {
                return Err(ProjectorError::validation(format!(
                    "color channel {name} must be finite and in [0, 1], got {c}"
                )));
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 3]),
            Obj { r: f64, g: f64, b: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([r, g, b]) => Ok(Self { r, g, b }),
            Repr::Obj { r, g, b } => Ok(Self { r, g, b }),
        }
    }
}

/// Straight-alpha RGBA color as carried by color sockets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel.
    pub a: f64,
}

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Mid grey, the default second input of an RGB mix.
    pub const MID_GREY: Self = Self::new(0.5, 0.5, 0.5, 1.0);

    /// Construct from channels.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Location, Euler rotation (radians) and scale of a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3 {
    /// World-space location.
    pub location: Vec3,
    /// XYZ Euler rotation in radians.
    pub rotation_euler: Vec3,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform3 {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3 {
    /// Identity transform with a uniform scale.
    pub fn uniform_scale(s: f64) -> Self {
        Self {
            scale: Vec3::new(s, s, s),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
