//! Angle utilities shared by every classifier and the search engine.
//!
//! All angles are in degrees. Nothing here touches the ephemeris.

/// Normalize an angle to [0, 360) degrees.
///
/// NaN propagates; callers guard against it where it matters.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    let r = if r < 0.0 { r + 360.0 } else { r };
    // -1e-18 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 { 0.0 } else { r }
}

/// Signed shortest-path difference `to - from`, in (-180, 180].
pub fn angular_delta(from: f64, to: f64) -> f64 {
    let d = normalize_360(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Midpoint of the shorter arc between two angles, in [0, 360).
pub fn angular_midpoint(a: f64, b: f64) -> f64 {
    normalize_360(a + angular_delta(a, b) / 2.0)
}

/// Bucket index of `deg` for equal segments of `span` degrees.
///
/// Clamps to `count - 1` so a value that rounds to exactly 360 stays in range.
pub(crate) fn segment_index(deg: f64, span: f64, count: u16) -> u16 {
    let idx = (normalize_360(deg) / span).floor() as u16;
    idx.min(count - 1)
}
