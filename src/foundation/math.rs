pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Wraps `v` into `[min, min + span)` when it leaves that range; spans of zero leave `v` alone.
pub(crate) fn wrap_into(v: f64, min: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return v;
    }
    if v < min || v >= min + span {
        min + (v - min).rem_euclid(span)
    } else {
        v
    }
}

/// Exponential velocity decay; speeds that fall under `epsilon` snap to zero.
pub(crate) fn damp(v: f64, factor: f64, epsilon: f64) -> f64 {
    let out = v * factor;
    if out.abs() < epsilon { 0.0 } else { out }
}

/// Clamps `v` into `[min, max]`, reporting whether it was clamped.
pub(crate) fn clamp_hit(v: f64, min: f64, max: f64) -> (f64, bool) {
    if v < min {
        (min, true)
    } else if v > max {
        (max, true)
    } else {
        (v, false)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
