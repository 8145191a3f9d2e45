//! Default tuning for the constellation background
//!
//! Values are in CSS pixels per frame, assuming a ~60 Hz repaint.

/// Particles spawned when the count is fixed
pub const DEFAULT_PARTICLE_COUNT: usize = 80;

/// Velocity components are drawn from `[-MAX_SPEED, MAX_SPEED)`
pub const MAX_SPEED: f32 = 0.25;

/// Smallest particle radius (inclusive)
pub const MIN_RADIUS: f32 = 1.0;

/// Largest particle radius (exclusive)
pub const MAX_RADIUS: f32 = 3.0;

/// Pairs closer than this are linked
pub const LINK_DISTANCE: f32 = 150.0;

/// Stroke width of a link
pub const LINK_WIDTH: f32 = 0.5;

/// Pointer influence radius
pub const POINTER_RADIUS: f32 = 120.0;

/// Maximum pointer nudge per frame, reached at the pointer itself
pub const POINTER_STRENGTH: f32 = 3.0;

/// Horizontal pixels per particle when the count scales with width
pub const WIDTH_STRIDE: f32 = 10.0;

/// Upper bound on the width-scaled count
pub const WIDTH_CAP: usize = 120;
