//! Count-up statistic shown once its section scrolls into view

use std::time::Duration;

/// Delay between counter increments
pub const COUNTER_INTERVAL: Duration = Duration::from_millis(20);

/// Increments needed to reach the target
pub const COUNTER_STEPS: u32 = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct Counter {
    target: u32,
    value: u32,
}

impl Counter {
    pub fn new(target: u32) -> Self {
        Self { target, value: 0 }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_complete(&self) -> bool {
        self.value >= self.target
    }

    /// Step toward the target; `None` once it has been reached
    pub fn tick(&mut self) -> Option<Duration> {
        if self.is_complete() {
            return None;
        }
        let step = self.target as f64 / COUNTER_STEPS as f64;
        let next = (self.value as f64 + step).ceil() as u32;
        self.value = next.max(self.value + 1).min(self.target);
        Some(COUNTER_INTERVAL)
    }

    /// Text to display: the running value, then `"{target}+"` when done
    pub fn label(&self) -> String {
        if self.is_complete() {
            format!("{}+", self.target)
        } else {
            self.value.to_string()
        }
    }
}
