use constellation_field::*;
use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn any_boundary() -> impl Strategy<Value = Boundary> {
    prop_oneof![
        Just(Boundary::Reflect),
        Just(Boundary::Respawn),
        Just(Boundary::Wrap),
    ]
}

fn any_pointer_mode() -> impl Strategy<Value = PointerMode> {
    prop_oneof![
        Just(PointerMode::Off),
        Just(PointerMode::Repel),
        Just(PointerMode::Attract),
    ]
}

fn field(width: f32, height: f32, params: FieldParams, seed: u64) -> ParticleField<StdRng> {
    ParticleField::with_rng(width, height, params, StdRng::seed_from_u64(seed))
}

#[test]
fn still_particles_link_exactly_the_close_pairs() {
    let params = FieldParams {
        count: ParticleCount::Fixed(80),
        link_distance: 150.0,
        ..Default::default()
    };
    let mut field = field(800.0, 600.0, params, 11);
    for p in field.particles_mut() {
        p.velocity = Vec2::ZERO;
    }
    let before: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();

    let mut surface = RecordingSurface::new();
    let stats = field.frame(&mut surface);

    let after: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);

    let mut expected = 0;
    for i in 0..before.len() {
        for j in i + 1..before.len() {
            if before[i].distance(before[j]) < 150.0 {
                expected += 1;
            }
        }
    }
    assert_eq!(stats.particles, 80);
    assert_eq!(stats.links, expected);
    assert_eq!(surface.lines().count(), expected);
}

#[test]
fn reflect_flips_velocity_at_the_left_edge() {
    let mut field = field(800.0, 600.0, FieldParams::default(), 5);
    field.particles_mut()[0] = Particle::new(Vec2::new(5.0, 5.0), Vec2::new(-1.0, -1.0), 2.0);
    let track = |f: &ParticleField<StdRng>| f.particles()[0];

    field.step();
    assert_eq!(track(&field).position, Vec2::new(4.0, 4.0));
    assert_eq!(track(&field).velocity, Vec2::new(-1.0, -1.0));

    for _ in 0..4 {
        field.step();
    }
    assert_eq!(track(&field).position, Vec2::new(0.0, 0.0));
    assert_eq!(track(&field).velocity, Vec2::new(-1.0, -1.0));

    field.step();
    let p = track(&field);
    assert_eq!(p.velocity, Vec2::new(1.0, 1.0));
    assert!(p.position.x >= 0.0 && p.position.y >= 0.0);
}

#[test]
fn resizing_twice_to_the_same_size_matches_once() {
    let mut field = field(1024.0, 768.0, FieldParams::default(), 2);
    for _ in 0..2 {
        field.resize(640.0, 480.0);
        assert_eq!(field.particles().len(), 80);
        assert_eq!(field.size(), Vec2::new(640.0, 480.0));
        assert!(field.particles().iter().all(|p| p.is_inside(field.size())));
    }
}

#[test]
fn opacity_is_strictly_decreasing_below_threshold() {
    let d = 160.0;
    let mut last = f32::INFINITY;
    for step in 0..160 {
        let opacity = link_opacity(step as f32, d).unwrap();
        assert!(opacity < last);
        last = opacity;
    }
    assert!(link_opacity(d, d).is_none());
}

proptest! {
    #[test]
    fn reflect_keeps_every_particle_in_bounds(
        width in 1.0f32..2000.0,
        height in 1.0f32..2000.0,
        speed in 0.0f32..40.0,
        frames in 1usize..120,
        seed in any::<u64>(),
    ) {
        let params = FieldParams {
            count: ParticleCount::Fixed(25),
            speed,
            ..Default::default()
        };
        let mut field = field(width, height, params, seed);
        for _ in 0..frames {
            field.step();
            for p in field.particles() {
                prop_assert!(p.position.x >= 0.0 && p.position.x <= width);
                prop_assert!(p.position.y >= 0.0 && p.position.y <= height);
            }
        }
    }

    #[test]
    fn every_policy_keeps_particles_in_bounds(
        width in 1.0f32..1500.0,
        height in 1.0f32..1500.0,
        speed in 0.0f32..40.0,
        boundary in any_boundary(),
        pointer in any_pointer_mode(),
        strength in 0.0f32..40.0,
        pointer_at in (-500.0f32..2000.0, -500.0f32..2000.0),
        frames in 1usize..60,
        seed in any::<u64>(),
    ) {
        let params = FieldParams {
            count: ParticleCount::Fixed(20),
            speed,
            boundary,
            pointer,
            pointer_radius: 200.0,
            pointer_strength: strength,
            ..Default::default()
        };
        let mut field = field(width, height, params, seed);
        field.set_pointer(pointer_at.0, pointer_at.1);
        for _ in 0..frames {
            field.step();
            for p in field.particles() {
                prop_assert!(
                    p.is_inside(field.size()),
                    "{:?} escaped {}x{} under {:?}/{:?}",
                    p.position, width, height, boundary, pointer
                );
            }
        }
    }

    #[test]
    fn no_link_reaches_the_threshold(
        seed in any::<u64>(),
        threshold in 1.0f32..300.0,
    ) {
        let params = FieldParams {
            count: ParticleCount::Fixed(40),
            link_distance: threshold,
            ..Default::default()
        };
        let field = field(400.0, 300.0, params, seed);
        for link in field.links() {
            prop_assert!(link.distance < threshold);
            prop_assert!(link.opacity > 0.0 && link.opacity <= 1.0);
        }
    }
}
