use crate::bounds::Bounds;

/// Generate a random `f64` in the range `[low, high)`.
#[inline]
pub(crate) fn f64_range(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Draw one point uniformly from the box described by `bounds`.
pub(crate) fn uniform_point(rng: &mut fastrand::Rng, bounds: &Bounds) -> Vec<f64> {
    bounds
        .iter()
        .map(|b| f64_range(rng, b.low, b.high))
        .collect()
}
