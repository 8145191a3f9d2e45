//! # constellation-effects
//!
//! The small page effects that sit around the particle background. Every
//! effect is a plain state record advanced by `tick`, which returns the delay
//! until it wants to run again; [`TimerQueue`] turns those delays into
//! cancellable alarms.

pub mod contact;
pub mod counter;
pub mod easing;
pub mod error;
pub mod modal;
pub mod reveal;
pub mod timer;
pub mod typewriter;

pub use contact::*;
pub use counter::*;
pub use easing::Easing;
pub use error::*;
pub use modal::*;
pub use reveal::*;
pub use timer::*;
pub use typewriter::*;
