use super::*;

#[test]
fn fnv1a64_matches_reference_vector() {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"a");
    assert_eq!(h.finish(), 0xaf63_dc4c_8601_ec8c);
}

#[test]
fn unit_from_seed_is_deterministic_and_in_range() {
    for seed in 0..256 {
        let u = unit_from_seed(seed);
        assert!((0.0..1.0).contains(&u));
        assert_eq!(u, unit_from_seed(seed));
    }
    assert_ne!(unit_from_seed(1), unit_from_seed(2));
}

#[test]
fn hsv_primaries() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(hsv_to_rgb(0.5, 1.0, 1.0), Rgb::new(0.0, 1.0, 1.0));
    assert_eq!(hsv_to_rgb(0.5, 0.0, 0.25), Rgb::new(0.25, 0.25, 0.25));
}

#[test]
fn random_color_is_saturated() {
    for seed in 0..64 {
        let c = random_color(seed);
        assert!(c.validate().is_ok());
        let max = c.r.max(c.g).max(c.b);
        let min = c.r.min(c.g).min(c.b);
        assert!((max - 1.0).abs() < 1e-12, "value must be 1: {c:?}");
        assert!(min.abs() < 1e-12, "saturation must be 1: {c:?}");
    }
}
