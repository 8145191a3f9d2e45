//! Pointer interaction

use glam::Vec2;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMode {
    #[default]
    Off,
    /// Push particles away from the cursor
    Repel,
    /// Pull particles toward the cursor
    Attract,
}

/// Falloff-weighted nudge applied to particles near the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerForce {
    pub mode: PointerMode,
    pub radius: f32,
    pub strength: f32,
}

impl PointerForce {
    pub fn new(mode: PointerMode, radius: f32, strength: f32) -> Self {
        Self {
            mode,
            radius,
            strength,
        }
    }

    /// Displacement for a particle at `particle` this frame
    ///
    /// Magnitude is `strength * (radius - d) / radius`, zero at or beyond the
    /// radius. Attraction never moves a particle past the pointer.
    pub fn displacement(&self, particle: Vec2, pointer: Vec2) -> Vec2 {
        if self.mode == PointerMode::Off || self.radius <= 0.0 {
            return Vec2::ZERO;
        }

        let offset = particle - pointer;
        let distance = offset.length();
        if distance >= self.radius || distance <= f32::EPSILON {
            return Vec2::ZERO;
        }

        let direction = offset / distance;
        let magnitude = self.strength * (self.radius - distance) / self.radius;

        match self.mode {
            PointerMode::Repel => direction * magnitude,
            PointerMode::Attract => -direction * magnitude.min(distance),
            PointerMode::Off => Vec2::ZERO,
        }
    }
}
