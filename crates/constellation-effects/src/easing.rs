//! Timing curves for reveal animations

/// Maps linear progress in [0, 1] onto an eased progress in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    #[default]
    CubicOut,
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuadInOut if t < 0.5 => 2.0 * t.powi(2),
            Easing::QuadInOut => 1.0 - 2.0 * (1.0 - t).powi(2),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut if t < 0.5 => 4.0 * t.powi(3),
            Easing::CubicInOut => 1.0 - 4.0 * (1.0 - t).powi(3),
        }
    }
}

#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
