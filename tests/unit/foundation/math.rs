use super::*;

#[test]
fn lerp_hits_endpoints_and_midpoint() {
    assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    assert_eq!(lerp(0.0, 100.0, 0.5), 50.0);
}

#[test]
fn wrap_into_keeps_inside_values() {
    assert_eq!(wrap_into(5.0, 0.0, 10.0), 5.0);
    assert_eq!(wrap_into(12.0, 0.0, 10.0), 2.0);
    assert_eq!(wrap_into(-3.0, 0.0, 10.0), 7.0);
    assert_eq!(wrap_into(-3.0, 0.0, 0.0), -3.0);
}

#[test]
fn damp_snaps_small_speeds() {
    assert_eq!(damp(10.0, 0.5, 0.01), 5.0);
    assert_eq!(damp(0.01, 0.5, 0.01), 0.0);
}

#[test]
fn clamp_hit_reports_bounds() {
    assert_eq!(clamp_hit(5.0, 0.0, 10.0), (5.0, false));
    assert_eq!(clamp_hit(-1.0, 0.0, 10.0), (0.0, true));
    assert_eq!(clamp_hit(11.0, 0.0, 10.0), (10.0, true));
}
