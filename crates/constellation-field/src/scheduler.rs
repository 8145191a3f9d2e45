//! Frame pacing
//!
//! The host supplies a "run once before the next repaint" primitive; the loop
//! calls it once to bootstrap and once at the end of every frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use crate::field::{FrameStats, ParticleField};
use crate::surface::RenderSurface;

pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl<F: FnMut()> FrameScheduler for F {
    fn request_frame(&mut self) {
        self()
    }
}

/// Shared flag that tears an [`AnimationLoop`] down
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Self-rescheduling driver around a [`ParticleField`]
pub struct AnimationLoop<R: Rng = StdRng> {
    field: ParticleField<R>,
    stop: StopHandle,
    frames: u64,
}

impl<R: Rng> AnimationLoop<R> {
    pub fn new(field: ParticleField<R>) -> Self {
        Self {
            field,
            stop: StopHandle::default(),
            frames: 0,
        }
    }

    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField<R> {
        &mut self.field
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    /// Frames actually rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Queue the first frame
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.is_running() {
            scheduler.request_frame();
        }
    }

    /// Run one frame, then ask for the next unless stopped
    ///
    /// A missing surface skips the frame's work but keeps the loop alive.
    pub fn frame<T, S>(&mut self, surface: Option<&mut T>, scheduler: &mut S) -> Option<FrameStats>
    where
        T: RenderSurface + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if !self.is_running() {
            return None;
        }

        let stats = match surface {
            Some(surface) => {
                self.frames += 1;
                Some(self.field.frame(surface))
            }
            None => {
                log::trace!("no surface yet, skipping frame");
                None
            }
        };

        if self.is_running() {
            scheduler.request_frame();
        }
        stats
    }
}
