use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use windchime_core::math::*;

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn test_reflect_head_on() {
    let r = reflect(Vec3::NEG_X, Vec3::X);
    assert!(close(r, Vec3::X), "head-on reflection should reverse: {:?}", r);
}

#[test]
fn test_reflect_preserves_tangent() {
    let r = reflect(Vec3::Y, Vec3::X);
    assert!(close(r, Vec3::Y), "tangent direction should be untouched: {:?}", r);

    let d = Vec3::new(-1.0, -1.0, 0.0).normalize();
    let r = reflect(d, Vec3::X);
    assert!(close(r, Vec3::new(1.0, -1.0, 0.0).normalize()));
    assert!((r.length() - 1.0).abs() < 1e-6, "reflection should stay unit length");
}

#[test]
fn test_energy_transfer_endpoints() {
    assert_eq!(energy_transfer(-1.0), 1.0);
    assert_eq!(energy_transfer(1.0), 0.0);
    assert!((energy_transfer(0.0) - 0.5).abs() < 1e-6);
}

#[test]
fn test_energy_transfer_monotonic_and_bounded() {
    let mut prev = f32::INFINITY;
    for i in 0..=200 {
        let incidence = -1.0 + i as f32 / 100.0;
        let e = energy_transfer(incidence);
        assert!((0.0..=1.0).contains(&e), "transfer {} out of range at {}", e, incidence);
        assert!(e <= prev, "transfer should fall as incidence grows");
        prev = e;
    }
    // slightly out-of-range inputs from rounding are clamped
    assert_eq!(energy_transfer(-1.000001), 1.0);
    assert_eq!(energy_transfer(1.000001), 0.0);
}

#[test]
fn test_plane_projection() {
    let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, -4.0), Vec3::new(0.0, 0.0, 2.0));
    assert!(close(plane.normal, Vec3::Z), "normal should be normalized");
    assert!((plane.signed_distance(Vec3::ZERO) - 4.0).abs() < 1e-6);
    assert!((plane.signed_distance(Vec3::new(3.0, 1.0, -6.0)) + 2.0).abs() < 1e-6);

    let p = plane.closest_point(Vec3::new(3.0, 7.0, 10.0));
    assert!(close(p, Vec3::new(3.0, 7.0, -4.0)), "projection wrong: {:?}", p);
    assert!(plane.signed_distance(p).abs() < 1e-6);
}

#[test]
fn test_random_in_disk_stays_in_disk() {
    let mut rng = StdRng::seed_from_u64(11);
    let normal = Vec3::new(1.0, 2.0, -0.5).normalize();
    for _ in 0..500 {
        let p = random_in_disk(&mut rng, normal, 0.75);
        assert!(p.length() <= 0.75 + 1e-5, "point {:?} outside disk", p);
        assert!(p.dot(normal).abs() < 1e-5, "point {:?} not in disk plane", p);
    }
}

#[test]
fn test_random_in_disk_zero_radius() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10 {
        assert_eq!(random_in_disk(&mut rng, Vec3::Z, 0.0), Vec3::ZERO);
    }
}

#[test]
fn test_hsv_primaries() {
    let (r, g, b) = hsv_to_rgb(0.0, 1.0, 1.0);
    assert!((r - 1.0).abs() < 1e-5 && g.abs() < 1e-5 && b.abs() < 1e-5);

    let (r, g, b) = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
    assert!(r.abs() < 1e-4 && (g - 1.0).abs() < 1e-4 && b.abs() < 1e-4);

    let (r, g, b) = hsv_to_rgb(0.5, 0.0, 0.25);
    assert!((r - 0.25).abs() < 1e-6 && (g - 0.25).abs() < 1e-6 && (b - 0.25).abs() < 1e-6);
}

#[test]
fn test_hsv_in_range() {
    for i in 0..100 {
        let (r, g, b) = hsv_to_rgb(i as f32 / 100.0, 0.95, 1.0);
        for c in [r, g, b] {
            assert!((0.0..=1.0 + 1e-6).contains(&c), "channel {} out of range at {}", c, i);
        }
    }
}
