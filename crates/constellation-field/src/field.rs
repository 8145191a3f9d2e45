//! The particle field: spawn, step, draw, link

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boundary::BoundaryOutcome;
use crate::params::{Background, FieldParams};
use crate::particle::Particle;
use crate::pointer::PointerForce;
use crate::surface::{Rect, RenderSurface};

/// An edge between two particles closer than the link distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
}

/// Stroke opacity of a link, `None` when the pair is too far apart
///
/// The threshold is exclusive: a pair exactly `threshold` apart is not linked.
#[inline]
pub fn link_opacity(distance: f32, threshold: f32) -> Option<f32> {
    (threshold > 0.0 && distance < threshold).then(|| 1.0 - distance / threshold)
}

/// Counts from one rendered frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub links: usize,
}

/// Owns the viewport, pointer and every particle
pub struct ParticleField<R: Rng = StdRng> {
    params: FieldParams,
    size: Vec2,
    pointer: Option<Vec2>,
    particles: Vec<Particle>,
    rng: R,
}

impl ParticleField<StdRng> {
    pub fn new(width: f32, height: f32, params: FieldParams) -> Self {
        Self::with_rng(width, height, params, StdRng::from_os_rng())
    }
}

impl<R: Rng> ParticleField<R> {
    pub fn with_rng(width: f32, height: f32, params: FieldParams, rng: R) -> Self {
        let mut field = Self {
            params,
            size: Vec2::new(width, height),
            pointer: None,
            particles: Vec::new(),
            rng,
        };
        field.reinitialize();
        field
    }

    /// Replace every particle with a freshly spawned set for the current viewport
    pub fn reinitialize(&mut self) {
        self.particles.clear();

        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            log::debug!("Viewport {}x{} has no area, field left empty", self.size.x, self.size.y);
            return;
        }

        let count = self.params.count.resolve(self.size.x);
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::random(&mut self.rng, self.size, &self.params);
            self.particles.push(particle);
        }

        log::info!(
            "✓ Spawned {} particles in {}x{}",
            count,
            self.size.x,
            self.size.y
        );
    }

    /// Adopt new viewport bounds and respawn the whole set
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.reinitialize();
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some(Vec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Live parameter access; a changed `count` applies on the next resize
    /// or [`reinitialize`](Self::reinitialize)
    pub fn params_mut(&mut self) -> &mut FieldParams {
        &mut self.params
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Advance every particle by one frame: move, apply the boundary, then the pointer
    pub fn step(&mut self) {
        let bounds = self.size;
        let boundary = self.params.boundary;
        let force = PointerForce::new(
            self.params.pointer,
            self.params.pointer_radius,
            self.params.pointer_strength,
        );

        for i in 0..self.particles.len() {
            let particle = &mut self.particles[i];
            particle.advance();

            if boundary.apply(particle, bounds) == BoundaryOutcome::Escaped {
                *particle = Particle::random(&mut self.rng, bounds, &self.params);
            }

            if let Some(pointer) = self.pointer {
                let particle = &mut self.particles[i];
                let nudge = force.displacement(particle.position, pointer);
                if nudge != Vec2::ZERO {
                    particle.position = (particle.position + nudge).clamp(Vec2::ZERO, bounds);
                }
            }
        }
    }

    /// Visit every linked pair `i < j` of the current positions
    pub fn for_each_link(&self, mut visit: impl FnMut(Link)) {
        let threshold = self.params.link_distance;
        for (a, p) in self.particles.iter().enumerate() {
            for (offset, q) in self.particles[a + 1..].iter().enumerate() {
                let distance = p.position.distance(q.position);
                if let Some(opacity) = link_opacity(distance, threshold) {
                    visit(Link {
                        a,
                        b: a + 1 + offset,
                        distance,
                        opacity,
                    });
                }
            }
        }
    }

    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        self.for_each_link(|link| links.push(link));
        links
    }

    /// Paint the current state without advancing it
    pub fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> FrameStats {
        let viewport = Rect::from_size(self.size.x, self.size.y);
        surface.clear_rect(viewport);

        match self.params.background {
            Background::None => {}
            Background::Solid(color) => surface.fill_gradient(viewport, color, color),
            Background::Gradient { top, bottom } => surface.fill_gradient(viewport, top, bottom),
        }

        for p in &self.particles {
            surface.fill_disc(
                p.position,
                p.radius,
                self.params.particle_color.with_alpha(p.alpha),
            );
        }

        let width = self.params.link_width;
        let color = self.params.link_color;
        let mut links = 0;
        self.for_each_link(|link| {
            surface.stroke_line(
                self.particles[link.a].position,
                self.particles[link.b].position,
                width,
                color.with_alpha(link.opacity),
            );
            links += 1;
        });

        FrameStats {
            particles: self.particles.len(),
            links,
        }
    }

    /// One animation tick: every update lands before any draw
    pub fn frame<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStats {
        self.step();
        let stats = self.draw(surface);
        log::trace!("frame: {} particles, {} links", stats.particles, stats.links);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Boundary;
    use crate::color::Color;
    use crate::params::ParticleCount;
    use crate::pointer::PointerMode;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn seeded(width: f32, height: f32, params: FieldParams) -> ParticleField<StdRng> {
        ParticleField::with_rng(width, height, params, StdRng::seed_from_u64(42))
    }

    fn place(field: &mut ParticleField<StdRng>, points: &[(f32, f32)]) {
        let particles: Vec<Particle> = points
            .iter()
            .map(|&(x, y)| Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0))
            .collect();
        field.particles = particles;
    }

    #[test]
    fn test_opacity_fades_with_distance() {
        let near = link_opacity(30.0, 150.0).unwrap();
        let far = link_opacity(120.0, 150.0).unwrap();
        assert!(near > far);
        assert!((link_opacity(0.0, 150.0).unwrap() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(link_opacity(150.0, 150.0).is_none());
        assert!(link_opacity(150.5, 150.0).is_none());
        assert!(link_opacity(149.99, 150.0).is_some());
        assert!(link_opacity(1.0, 0.0).is_none());
    }

    #[test]
    fn test_zero_area_viewport_is_empty() {
        let mut field = seeded(0.0, 600.0, FieldParams::default());
        assert!(field.particles().is_empty());
        field.step();
        let mut surface = RecordingSurface::new();
        assert_eq!(field.frame(&mut surface).particles, 0);
    }

    #[test]
    fn test_links_only_unordered_pairs_under_threshold() {
        let mut field = seeded(500.0, 500.0, FieldParams::default());
        place(&mut field, &[(0.0, 0.0), (100.0, 0.0), (250.0, 0.0)]);

        let links = field.links();
        assert_eq!(links.len(), 2);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert_eq!((links[1].a, links[1].b), (1, 2));
        assert!(links.iter().all(|l| l.a < l.b));
    }

    #[test]
    fn test_draw_order_and_colors() {
        let params = FieldParams {
            background: crate::params::Background::Solid(Color::rgb(0.0, 0.0, 0.0)),
            ..Default::default()
        };
        let mut field = seeded(300.0, 300.0, params);
        place(&mut field, &[(10.0, 10.0), (10.0, 85.0)]);

        let mut surface = RecordingSurface::new();
        let stats = field.draw(&mut surface);
        assert_eq!(stats, FrameStats { particles: 2, links: 1 });

        assert!(matches!(surface.commands[0], DrawCommand::Clear(_)));
        assert!(matches!(surface.commands[1], DrawCommand::Gradient { .. }));
        assert_eq!(surface.discs().count(), 2);
        match surface.lines().next() {
            Some(DrawCommand::Line { width, color, .. }) => {
                assert_eq!(*width, 0.5);
                assert!((color.a - 0.5).abs() < 1e-6);
            }
            other => panic!("expected a line, got {other:?}"),
        };
    }

    #[test]
    fn test_respawn_replaces_escaped_particles() {
        let params = FieldParams {
            boundary: Boundary::Respawn,
            ..Default::default()
        };
        let mut field = seeded(200.0, 200.0, params);
        field.particles = vec![Particle::new(
            Vec2::new(199.5, 100.0),
            Vec2::new(5.0, 0.0),
            2.0,
        )];

        field.step();
        let p = field.particles()[0];
        assert!(p.is_inside(field.size()));
        assert!(p.velocity.x.abs() < 0.25);
    }

    #[test]
    fn test_repel_pushes_particle_away_and_stays_in_bounds() {
        let params = FieldParams {
            pointer: PointerMode::Repel,
            ..Default::default()
        };
        let mut field = seeded(400.0, 400.0, params);
        place(&mut field, &[(210.0, 200.0), (1.0, 200.0)]);
        field.set_pointer(200.0, 200.0);
        field.step();
        assert!(field.particles()[0].position.x > 210.0);

        field.set_pointer(2.0, 200.0);
        for _ in 0..10 {
            field.step();
        }
        assert!(field.particles()[1].position.x >= 0.0);

        field.clear_pointer();
        assert!(field.pointer().is_none());
    }

    #[test]
    fn test_per_width_count_respawns_on_resize() {
        let params = FieldParams {
            count: ParticleCount::PerWidth { stride: 10.0, cap: 120 },
            ..Default::default()
        };
        let mut field = seeded(500.0, 400.0, params);
        assert_eq!(field.particles().len(), 50);
        field.resize(2000.0, 400.0);
        assert_eq!(field.particles().len(), 120);
    }
}
