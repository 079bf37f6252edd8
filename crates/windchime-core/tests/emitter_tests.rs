use glam::Vec3;
use windchime_core::emitter::Emitter;
use windchime_core::pool::ParticlePool;
use windchime_core::{Color, Cylinder, EmissionSource, Error, PruningBounds, Target, WindConfig};

fn config(rate: f32) -> WindConfig {
    WindConfig {
        particles_per_second: rate,
        source_position: Vec3::new(0.0, 5.0, -40.0),
        rng_seed: Some(7),
        ..WindConfig::default()
    }
}

fn chime() -> Vec<Target> {
    (0..3)
        .map(|i| {
            let x = i as f32 * 1.5 - 1.5;
            Target::Cylinder(Cylinder::new(
                Vec3::new(x, 10.0, 0.0),
                Vec3::new(x, 2.0, 0.0),
                0.3,
            ))
        })
        .collect()
}

#[test]
fn test_cadence_first_tick_fires() {
    let mut emitter = Emitter::new(&config(10.0));
    assert_eq!(emitter.due(0.016), 1, "first tick should emit");
    assert_eq!(emitter.due(0.016), 0, "next tick is inside the period");
}

#[test]
fn test_cadence_rate() {
    let mut emitter = Emitter::new(&config(10.0));
    let bursts: u32 = (0..1000).map(|_| emitter.due(0.01)).sum();
    // 10 s at one burst per 0.1 s, counting the burst at t = 0
    assert!((100..=101).contains(&bursts), "unexpected burst count {}", bursts);
}

#[test]
fn test_cadence_carries_remainder() {
    // 25 ms ticks against a 1/30 s period
    let mut emitter = Emitter::new(&config(30.0));
    let bursts: u32 = (0..400).map(|_| emitter.due(0.025)).sum();
    assert!((300..=301).contains(&bursts), "unexpected burst count {}", bursts);

    let mut emitter = Emitter::new(&config(7.0));
    let bursts: u32 = (0..500).map(|_| emitter.due(0.03)).sum();
    // 15 s at 7 per second
    assert!((105..=106).contains(&bursts), "unexpected burst count {}", bursts);
}

#[test]
fn test_cadence_long_tick_fires_several_bursts() {
    let mut emitter = Emitter::new(&config(10.0));
    assert_eq!(emitter.due(0.35), 4, "bursts at 0, 0.1, 0.2 and 0.3 s");
    assert_eq!(emitter.due(0.04), 0, "next burst is at 0.4 s");
    assert_eq!(emitter.due(0.02), 1);
    assert_eq!(emitter.due(0.05), 0);

    let mut emitter = Emitter::new(&config(100.0));
    let bursts: u32 = (0..40).map(|_| emitter.due(0.25)).sum();
    assert!((1000..=1001).contains(&bursts), "unexpected burst count {}", bursts);
}

#[test]
fn test_zero_rate_never_fires() {
    let mut emitter = Emitter::new(&config(0.0));
    for _ in 0..100 {
        assert_eq!(emitter.due(1.0), 0);
    }
}

#[test]
fn test_targeted_burst_emits_per_target() {
    let targets = chime();
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut pool = ParticlePool::new(16, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&config(20.0));

    let tally = emitter.emit_periodic(0.016, &targets, &bounds, &mut pool);
    assert_eq!(tally.emitted, 3);
    assert_eq!(tally.dropped, 0);
    assert_eq!(pool.active_count(), 3);

    let plane = bounds.emission_plane(Vec3::new(0.0, 5.0, -40.0));
    for p in pool.active() {
        assert!((p.direction - plane.normal).length() < 1e-6, "direction {:?}", p.direction);
        assert!(plane.signed_distance(p.position).abs() < 1e-3, "{:?} not on plane", p.position);
        assert!((p.position - bounds.center).length() >= bounds.radius - 1e-3, "spawned inside the sphere");
        assert_eq!(p.color, Color::BLACK);
    }

    // not due again within the period
    let tally = emitter.emit_periodic(0.016, &targets, &bounds, &mut pool);
    assert_eq!(tally.emitted, 0);
}

#[test]
fn test_long_tick_emits_every_due_burst() {
    let targets = chime();
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut pool = ParticlePool::new(64, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&config(10.0));

    let tally = emitter.emit_periodic(0.35, &targets, &bounds, &mut pool);
    assert_eq!(tally.emitted, 12, "four bursts of three");
    assert_eq!(tally.dropped, 0);
    assert_eq!(pool.active_count(), 12);
}

#[test]
fn test_full_pool_drops_remaining_bursts() {
    let targets = chime();
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut pool = ParticlePool::new(5, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&config(10.0));

    let tally = emitter.emit_periodic(0.35, &targets, &bounds, &mut pool);
    assert_eq!(tally.emitted, 5);
    assert_eq!(tally.dropped, 7);
    assert_eq!(pool.active_count(), 5);
}

#[test]
fn test_targeted_emission_travels_into_its_target() {
    let targets = vec![Target::Cylinder(Cylinder::new(
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
        1.0,
    ))];
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut pool = ParticlePool::new(256, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&config(20.0));

    let mut hits = 0;
    for _ in 0..200 {
        emitter.emit_one(&targets, &bounds, &mut pool).unwrap();
    }
    for p in pool.active() {
        if targets[0]
            .intersect(p.position, p.direction, Default::default())
            .is_some()
        {
            hits += 1;
        }
    }
    // points near the ends of the shadow can fall off the caps; most hit
    assert!(hits > 150, "only {} of 200 emissions would hit", hits);
}

#[test]
fn test_fan_burst_emits_once() {
    let targets = chime();
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut pool = ParticlePool::new(16, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&WindConfig {
        emission: EmissionSource::Fan { radius: 0.5 },
        ..config(20.0)
    });

    let tally = emitter.emit_periodic(0.016, &targets, &bounds, &mut pool);
    assert_eq!(tally.emitted, 1);

    let p = pool.active()[0];
    let source = Vec3::new(0.0, 5.0, -40.0);
    assert!((p.position - source).length() <= 0.5 + 1e-5);
    assert!((p.direction - bounds.wind_direction(source)).length() < 1e-6);
}

#[test]
fn test_full_pool_counts_drops() {
    let targets = chime();
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut pool = ParticlePool::new(2, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&config(20.0));

    let tally = emitter.emit_periodic(0.016, &targets, &bounds, &mut pool);
    assert_eq!(tally.emitted, 2);
    assert_eq!(tally.dropped, 1);
    assert_eq!(pool.active_count(), 2);
}

#[test]
fn test_emit_one_without_targets() {
    let bounds = PruningBounds {
        center: Vec3::ZERO,
        radius: 1.0,
    };
    let mut pool = ParticlePool::new(2, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&config(0.0));
    assert_eq!(emitter.emit_one(&[], &bounds, &mut pool), Err(Error::NoTargets));
    assert_eq!(pool.active_count(), 0);
}

#[test]
fn test_random_colors() {
    let targets = chime();
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut pool = ParticlePool::new(8, 1.0, 0.001, false);
    let mut emitter = Emitter::new(&WindConfig {
        random_path_colors: true,
        ..config(20.0)
    });
    emitter.emit_periodic(0.016, &targets, &bounds, &mut pool);
    for p in pool.active() {
        assert_ne!(p.color, Color::BLACK, "saturated bright hue expected");
        assert_eq!(p.color.a, 1.0);
    }
}

#[test]
fn test_seeded_emitters_agree() {
    let targets = chime();
    let bounds = PruningBounds::from_targets(&targets, 2.0).unwrap();
    let mut a = ParticlePool::new(8, 1.0, 0.001, false);
    let mut b = ParticlePool::new(8, 1.0, 0.001, false);
    Emitter::new(&config(20.0)).emit_periodic(0.016, &targets, &bounds, &mut a);
    Emitter::new(&config(20.0)).emit_periodic(0.016, &targets, &bounds, &mut b);
    for (pa, pb) in a.active().iter().zip(b.active()) {
        assert_eq!(pa.position, pb.position);
    }
}
