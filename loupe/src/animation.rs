// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closing-animation contract between the zoom handler and the host.
//!
//! When a zoom ends with animation enabled, the handler hands the host an
//! [`AnimationRequest`]: tween the proxy from its current [`ProxyTransform`]
//! back to the target's resting transform using an [`Easing`] curve. The
//! host runs it on its own frame scheduler and reports completion by passing
//! the request's [`AnimationToken`] back to the handler.
//!
//! Hosts without an animation engine of their own can step a [`Tween`]:
//!
//! ```
//! use kurbo::Point;
//! use loupe::animation::{Easing, ProxyTransform, Tween};
//!
//! let tween = Tween {
//!     from: ProxyTransform::new(Point::new(70.0, 80.0), 2.0),
//!     to: ProxyTransform::new(Point::new(50.0, 50.0), 1.0),
//!     duration_ms: 300,
//!     easing: Easing::Linear,
//! };
//!
//! assert_eq!(tween.sample(150).scale, 1.5);
//! assert_eq!(tween.sample(300), tween.to);
//! assert!(tween.is_finished(300));
//! ```

use core::f64::consts::PI;

use kurbo::Point;

/// Easing curve applied to animation progress.
///
/// The default is [`Easing::AccelerateDecelerate`], a cosine ease-in/ease-out.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    /// Constant rate.
    Linear,
    /// Starts slow, ends fast.
    Accelerate,
    /// Starts fast, ends slow.
    Decelerate,
    /// Slow at both ends, fastest in the middle.
    #[default]
    AccelerateDecelerate,
    /// Caller-supplied curve mapping `[0, 1]` progress to eased progress.
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Maps linear progress `t` (clamped to `[0, 1]`) through the curve.
    #[must_use]
    pub fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Accelerate => t * t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
            Self::Custom(curve) => curve(t),
        }
    }
}

/// Position and uniform scale of the proxy element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProxyTransform {
    /// Top-left position in the overlay surface.
    pub position: Point,
    /// Uniform scale on both axes.
    pub scale: f64,
}

impl ProxyTransform {
    /// Creates a transform.
    #[must_use]
    pub const fn new(position: Point, scale: f64) -> Self {
        Self { position, scale }
    }

    /// Interpolates towards `other` by `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

/// Identifies one closing animation.
///
/// Tokens are unique per handler; completion reported with a stale token is
/// ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationToken(pub u64);

/// A closing animation the host is asked to run.
#[derive(Clone, Debug)]
pub struct AnimationRequest<E> {
    /// Hand this back to the handler when the animation completes.
    pub token: AnimationToken,
    /// The proxy element to animate.
    pub element: E,
    /// Transform at the start of the animation.
    pub from: ProxyTransform,
    /// Transform to land on.
    pub to: ProxyTransform,
    /// Easing applied to x, y and both scale axes together.
    pub easing: Easing,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

impl<E> AnimationRequest<E> {
    /// A [`Tween`] covering this request.
    #[must_use]
    pub fn tween(&self) -> Tween {
        Tween {
            from: self.from,
            to: self.to,
            duration_ms: self.duration_ms,
            easing: self.easing,
        }
    }
}

/// A steppable proxy animation.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    /// Start transform.
    pub from: ProxyTransform,
    /// End transform.
    pub to: ProxyTransform,
    /// Duration in milliseconds; zero finishes immediately.
    pub duration_ms: u64,
    /// Easing curve.
    pub easing: Easing,
}

impl Tween {
    /// Transform at `elapsed_ms` since the start.
    #[must_use]
    pub fn sample(&self, elapsed_ms: u64) -> ProxyTransform {
        if self.is_finished(elapsed_ms) {
            return self.to;
        }
        let t = elapsed_ms as f64 / self.duration_ms as f64;
        self.from.lerp(self.to, self.easing.ease(t))
    }

    /// Returns `true` once `elapsed_ms` reaches the duration.
    #[must_use]
    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn builtin_curves_pin_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Accelerate,
            Easing::Decelerate,
            Easing::AccelerateDecelerate,
        ] {
            assert!(close(easing.ease(0.0), 0.0), "{easing:?} at 0");
            assert!(close(easing.ease(1.0), 1.0), "{easing:?} at 1");
        }
    }

    #[test]
    fn accelerate_decelerate_is_symmetric_about_midpoint() {
        let e = Easing::AccelerateDecelerate;
        assert!(close(e.ease(0.5), 0.5));
        assert!(close(e.ease(0.25) + e.ease(0.75), 1.0));
        assert!(e.ease(0.1) < 0.1);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Easing::Linear.ease(-1.0), 0.0);
        assert_eq!(Easing::Linear.ease(2.0), 1.0);
    }

    #[test]
    fn custom_curve_is_used() {
        fn step(t: f64) -> f64 {
            if t < 0.5 { 0.0 } else { 1.0 }
        }
        let e = Easing::Custom(step);
        assert_eq!(e.ease(0.4), 0.0);
        assert_eq!(e.ease(0.6), 1.0);
    }

    #[test]
    fn zero_duration_tween_is_finished_at_start() {
        let tween = Tween {
            from: ProxyTransform::new(Point::new(10.0, 10.0), 3.0),
            to: ProxyTransform::new(Point::ZERO, 1.0),
            duration_ms: 0,
            easing: Easing::default(),
        };
        assert!(tween.is_finished(0));
        assert_eq!(tween.sample(0), tween.to);
    }

    #[test]
    fn request_tween_mirrors_request() {
        let req = AnimationRequest {
            token: AnimationToken(3),
            element: "proxy",
            from: ProxyTransform::new(Point::new(70.0, 80.0), 2.0),
            to: ProxyTransform::new(Point::new(50.0, 50.0), 1.0),
            easing: Easing::Linear,
            duration_ms: 100,
        };
        let mid = req.tween().sample(50);
        assert_eq!(mid.position, Point::new(60.0, 65.0));
        assert_eq!(mid.scale, 1.5);
    }
}
