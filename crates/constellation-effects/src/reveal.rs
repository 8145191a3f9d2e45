//! Scroll-triggered visibility and fade-in

use std::time::Duration;

use constellation_field::Rect;

use crate::easing::{lerp, Easing};

/// Visible fraction at which stat counters start
pub const COUNTER_THRESHOLD: f32 = 0.5;

/// Visible fraction of `element` inside `viewport`, in [0, 1]
pub fn intersection_ratio(element: &Rect, viewport: &Rect) -> f32 {
    let area = element.area();
    if area <= 0.0 {
        return 0.0;
    }
    element
        .intersection(viewport)
        .map_or(0.0, |overlap| (overlap.area() / area).min(1.0))
}

/// Fires once, the first time an element is at least `threshold` visible
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTrigger {
    threshold: f32,
    fired: bool,
}

impl VisibilityTrigger {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            fired: false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Report the element's current placement; true only on the firing call
    pub fn observe(&mut self, element: &Rect, viewport: &Rect) -> bool {
        if self.fired {
            return false;
        }
        let ratio = intersection_ratio(element, viewport);
        if ratio > 0.0 && ratio >= self.threshold {
            self.fired = true;
        }
        self.fired
    }
}

/// Opacity and vertical offset of a revealing element at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    pub opacity: f32,
    pub offset: f32,
}

/// Fade in while sliding up by `distance` pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reveal {
    pub duration: Duration,
    pub distance: f32,
    pub easing: Easing,
    started_at: Option<Duration>,
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new(Duration::from_millis(600), 30.0, Easing::CubicOut)
    }
}

impl Reveal {
    pub fn new(duration: Duration, distance: f32, easing: Easing) -> Self {
        Self {
            duration,
            distance,
            easing,
            started_at: None,
        }
    }

    /// Begin the animation; later calls keep the first start
    pub fn start(&mut self, now: Duration) {
        self.started_at.get_or_insert(now);
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.started_at
            .is_some_and(|start| now.saturating_sub(start) >= self.duration)
    }

    pub fn sample(&self, now: Duration) -> RevealFrame {
        let Some(start) = self.started_at else {
            return RevealFrame {
                opacity: 0.0,
                offset: self.distance,
            };
        };

        let t = if self.duration.is_zero() {
            1.0
        } else {
            (now.saturating_sub(start).as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        let eased = self.easing.apply(t);

        RevealFrame {
            opacity: eased,
            offset: lerp(self.distance, 0.0, eased),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn rect(y: f32, height: f32) -> Rect {
        Rect::new(Vec2::new(0.0, y), Vec2::new(100.0, y + height))
    }

    #[test]
    fn test_intersection_ratio() {
        let viewport = rect(0.0, 800.0);
        assert_eq!(intersection_ratio(&rect(100.0, 200.0), &viewport), 1.0);
        assert_eq!(intersection_ratio(&rect(700.0, 200.0), &viewport), 0.5);
        assert_eq!(intersection_ratio(&rect(900.0, 200.0), &viewport), 0.0);
        assert_eq!(intersection_ratio(&rect(0.0, 0.0), &viewport), 0.0);
    }

    #[test]
    fn test_trigger_fires_once_at_threshold() {
        let viewport = rect(0.0, 800.0);
        let mut trigger = VisibilityTrigger::new(COUNTER_THRESHOLD);

        assert!(!trigger.observe(&rect(750.0, 200.0), &viewport));
        assert!(trigger.observe(&rect(700.0, 200.0), &viewport));
        assert!(!trigger.observe(&rect(100.0, 200.0), &viewport));
        assert!(trigger.has_fired());
    }

    #[test]
    fn test_reveal_progresses_from_hidden_to_settled() {
        let mut reveal = Reveal::new(Duration::from_millis(400), 40.0, Easing::Linear);
        let hidden = reveal.sample(Duration::ZERO);
        assert_eq!(hidden, RevealFrame { opacity: 0.0, offset: 40.0 });

        reveal.start(Duration::from_millis(1000));
        reveal.start(Duration::from_millis(1100));
        let mid = reveal.sample(Duration::from_millis(1200));
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!((mid.offset - 20.0).abs() < 1e-4);

        assert!(reveal.is_finished(Duration::from_millis(1400)));
        assert_eq!(
            reveal.sample(Duration::from_millis(5000)),
            RevealFrame { opacity: 1.0, offset: 0.0 }
        );
    }
}
