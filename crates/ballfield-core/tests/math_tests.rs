use ballfield_core::math::*;
use glam::Vec3;

#[test]
fn test_hash11_range() {
    for i in 0..1000 {
        let h = hash11(i as f32 * 0.1);
        assert!(h >= 0.0 && h < 1.0, "hash11({}) = {} out of range", i as f32 * 0.1, h);
    }
}

#[test]
fn test_hash12_range() {
    for i in 0..100 {
        for j in 0..100 {
            let h = hash12(i as f32 * 0.1, j as f32 * 0.1);
            assert!(h >= 0.0 && h < 1.0, "hash12({},{}) = {} out of range", i, j, h);
        }
    }
}

#[test]
fn test_substitute_directions_are_unit_length() {
    for seed in 0..256 {
        let d = substitute_direction(seed);
        assert!((d.length() - 1.0).abs() < 1e-4, "seed {seed}: {d:?}");
        let p = substitute_direction_2d(seed);
        assert!((p.length() - 1.0).abs() < 1e-4, "seed {seed}: {p:?}");
    }
}

#[test]
fn test_substitute_direction_is_deterministic() {
    assert_eq!(substitute_direction(7), substitute_direction(7));
    assert_ne!(substitute_direction(7), substitute_direction(8));
}

#[test]
fn test_normalize_or_substitute_zero_vector() {
    let d = normalize_or_substitute(Vec3::ZERO, 3);
    assert!(d.is_finite());
    assert!((d.length() - 1.0).abs() < 1e-4);

    let n = normalize_or_substitute(Vec3::new(0.0, 2.0, 0.0), 3);
    assert!((n - Vec3::Y).length() < 1e-6);
}

#[test]
fn test_clamp01_handles_non_finite() {
    assert_eq!(clamp01(f32::NAN), 0.0);
    assert_eq!(clamp01(f32::INFINITY), 1.0);
    assert_eq!(clamp01(f32::NEG_INFINITY), 0.0);
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn test_cap_speed_preserves_direction() {
    let v = cap_speed(Vec3::new(3.0, 4.0, 0.0), 1.0);
    assert!((v.length() - 1.0).abs() < 1e-6);
    assert!((v.x - 0.6).abs() < 1e-6);
    assert_eq!(cap_speed(Vec3::X * 0.5, 1.0), Vec3::X * 0.5);
}

#[test]
fn test_drag_factor_is_frame_rate_independent() {
    // Two 1/120 s steps should damp as much as one 1/60 s step.
    let half = drag_factor(0.985, 1.0 / 120.0);
    let full = drag_factor(0.985, 1.0 / 60.0);
    assert!((half * half - full).abs() < 1e-6, "{} vs {}", half * half, full);
    assert!((full - 0.985).abs() < 1e-6);
}
