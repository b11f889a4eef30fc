//! Draw instructions handed to the rendering collaborator

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::collision::Aabb;
use super::state::GamePhase;

/// 24-bit RGB color, serialized as a CSS hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const PLAYER: Color = Color(0x00f3ff);
    pub const HAZARD: Color = Color(0xff0055);
    pub const PICKUP: Color = Color(0x00ff88);

    /// CSS hex form, e.g. `#00f3ff`
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0xff_ffff)
    }

    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color {:?}", hex)))
    }
}

/// Outline to fill inside a command's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Triangle ship pointing up with a notched tail
    Ship,
    Rect,
    /// Circle inscribed in the bounds
    Circle,
}

/// One draw instruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub shape: Shape,
    pub bounds: Aabb,
    pub color: Color,
    /// Soft glow around the shape
    pub glow: bool,
}

/// Score display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub frames: u64,
    pub phase: GamePhase,
    /// Milliseconds since the session started
    pub elapsed_ms: f64,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Player first, then hazards, then pickups
    pub commands: Vec<DrawCommand>,
    pub hud: Hud,
}
