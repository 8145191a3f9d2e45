//! Particle state and spawning

use glam::Vec2;
use rand::Rng;

use crate::params::FieldParams;

/// A drifting point mass, drawn as a disc
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in viewport pixels
    pub position: Vec2,
    /// Displacement per frame
    pub velocity: Vec2,
    /// Disc radius for rendering
    pub radius: f32,
    /// Fill opacity in (0, 1]
    pub alpha: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Spawn a particle anywhere inside `[0, bounds.x) × [0, bounds.y)`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Vec2, params: &FieldParams) -> Self {
        let position = Vec2::new(
            sample(rng, 0.0, bounds.x),
            sample(rng, 0.0, bounds.y),
        );
        let velocity = Vec2::new(
            sample(rng, -params.speed, params.speed),
            sample(rng, -params.speed, params.speed),
        );
        let radius = sample(rng, params.radius[0], params.radius[1]);
        let alpha = sample(rng, params.alpha[0], params.alpha[1]);

        Self::new(position, velocity, radius).with_alpha(alpha)
    }

    /// Move by one frame's worth of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    pub fn is_inside(&self, bounds: Vec2) -> bool {
        (0.0..=bounds.x).contains(&self.position.x) && (0.0..=bounds.y).contains(&self.position.y)
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty or its
/// width overflows
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo && (hi - lo).is_finite() {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
