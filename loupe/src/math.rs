// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure zoom math: scale clamping, proxy placement and backdrop opacity.

use kurbo::Point;
use peniko::Color;

/// Smallest scale a zoomed proxy may have.
pub const MIN_SCALE: f64 = 1.0;

/// Largest scale a zoomed proxy may have.
pub const MAX_SCALE: f64 = 5.0;

/// Normalized scale at which the backdrop opacity ramp stops growing.
pub const OBSCURE_CEILING: f64 = 0.75;

/// Applies a scale delta to `current` and clamps into [`MIN_SCALE`]..=[`MAX_SCALE`].
///
/// Negative or zero deltas collapse to [`MIN_SCALE`]. A non-finite delta
/// leaves `current` (clamped) unchanged.
///
/// ```
/// use loupe::math::clamp_scale;
///
/// assert_eq!(clamp_scale(2.0, 2.0), 4.0);
/// assert_eq!(clamp_scale(4.0, 10.0), 5.0);
/// assert_eq!(clamp_scale(2.0, -3.0), 1.0);
/// ```
#[must_use]
pub fn clamp_scale(current: f64, delta: f64) -> f64 {
    let next = current * delta;
    if next.is_finite() {
        next.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        current.clamp(MIN_SCALE, MAX_SCALE)
    }
}

/// Position of the proxy given the target's frozen origin and pinch drift.
///
/// The proxy follows the centroid of the pinch exactly, independent of scale:
/// `origin + (current_midpoint - initial_midpoint)`.
#[must_use]
pub fn proxy_position(origin: Point, initial_midpoint: Point, current_midpoint: Point) -> Point {
    origin + (current_midpoint - initial_midpoint)
}

/// Backdrop alpha channel for a given scale.
///
/// The normalized scale `(scale - 1) / 4` is capped at [`OBSCURE_CEILING`]
/// and doubled, so the ramp would overshoot to `1.5`; the result is clamped to
/// the channel range. Full black is reached at scale `3.0` and held.
///
/// ```
/// use loupe::math::backdrop_alpha;
///
/// assert_eq!(backdrop_alpha(1.0), 0);
/// assert_eq!(backdrop_alpha(2.0), 128);
/// assert_eq!(backdrop_alpha(5.0), 255);
/// ```
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "alpha is clamped into 0..=255 and integral"
)]
pub fn backdrop_alpha(scale: f64) -> u8 {
    if scale.is_nan() {
        return 0;
    }
    let normalized = (scale - MIN_SCALE) / (MAX_SCALE - MIN_SCALE);
    let ramp = normalized.min(OBSCURE_CEILING) * 2.0;
    (ramp * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Black backdrop fill at [`backdrop_alpha`] opacity.
#[must_use]
pub fn backdrop_color(scale: f64) -> Color {
    Color::from_rgba8(0, 0, 0, backdrop_alpha(scale))
}
