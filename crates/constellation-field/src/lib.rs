//! # Constellation Field
//!
//! Backend-agnostic particle field: bounded 2-D point masses that drift, bounce
//! and link up with their neighbours. Drawing goes through [`RenderSurface`] and
//! frame pacing through [`FrameScheduler`], so any canvas or GPU backend can host it.

pub mod boundary;
pub mod color;
pub mod config;
pub mod constants;
pub mod field;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod scheduler;
pub mod surface;

pub use boundary::*;
pub use color::*;
pub use config::*;
pub use field::*;
pub use params::*;
pub use particle::*;
pub use pointer::*;
pub use scheduler::*;
pub use surface::*;
