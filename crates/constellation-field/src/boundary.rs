//! What happens when a particle drifts off the viewport

use glam::Vec2;
use serde::Deserialize;

use crate::particle::Particle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Bounce: negate the offending velocity component and clamp back inside
    #[default]
    Reflect,
    /// Recycle: the particle is replaced by a freshly spawned one
    Respawn,
    /// Re-enter from the opposite edge
    Wrap,
}

/// Result of applying a boundary to one particle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryOutcome {
    Inside,
    /// Position (and possibly velocity) was adjusted in place
    Adjusted,
    /// The caller must replace the particle
    Escaped,
}

impl Boundary {
    pub fn apply(self, particle: &mut Particle, bounds: Vec2) -> BoundaryOutcome {
        if particle.is_inside(bounds) {
            return BoundaryOutcome::Inside;
        }

        match self {
            Boundary::Reflect => {
                let pos = &mut particle.position;
                let vel = &mut particle.velocity;
                if pos.x < 0.0 || pos.x > bounds.x {
                    vel.x = -vel.x;
                    pos.x = pos.x.clamp(0.0, bounds.x);
                }
                if pos.y < 0.0 || pos.y > bounds.y {
                    vel.y = -vel.y;
                    pos.y = pos.y.clamp(0.0, bounds.y);
                }
                BoundaryOutcome::Adjusted
            }
            Boundary::Respawn => BoundaryOutcome::Escaped,
            Boundary::Wrap => {
                let pos = &mut particle.position;
                if pos.x < 0.0 || pos.x > bounds.x {
                    pos.x = wrap(pos.x, bounds.x);
                }
                if pos.y < 0.0 || pos.y > bounds.y {
                    pos.y = wrap(pos.y, bounds.y);
                }
                BoundaryOutcome::Adjusted
            }
        }
    }
}

fn wrap(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        0.0
    } else {
        value.rem_euclid(extent)
    }
}
