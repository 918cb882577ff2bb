// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch-scale detector: turn two-pointer span changes into scale deltas.
//!
//! The detector measures the *span* of the active pointers (the diameter of
//! their average deviation from the focal point) and reports the ratio between
//! consecutive spans to a [`ScaleListener`]:
//!
//! - [`ScaleListener::on_scale_begin`] once the span has drifted by more than
//!   [`ScaleConfig::span_slop`]. Returning `false` declines the gesture; the
//!   detector asks again on the next move.
//! - [`ScaleListener::on_scale`] on every move while in progress. Returning
//!   `false` means "not handled": the previous span is kept, so the factor
//!   reported next time accumulates the unhandled change.
//! - [`ScaleListener::on_scale_end`] when the pointer configuration changes or
//!   the stream ends.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use loupe_gesture::event::{PointerAction, PointerEvent};
//! use loupe_gesture::scale::{ScaleDetector, ScaleListener, ScaleUpdate};
//!
//! #[derive(Default)]
//! struct Zoom(f64);
//!
//! impl ScaleListener for Zoom {
//!     fn on_scale_begin(&mut self, _: &ScaleUpdate) -> bool { true }
//!     fn on_scale(&mut self, update: &ScaleUpdate) -> bool {
//!         self.0 *= update.factor();
//!         true
//!     }
//!     fn on_scale_end(&mut self, _: &ScaleUpdate) {}
//! }
//!
//! let mut detector = ScaleDetector::default();
//! let mut zoom = Zoom(1.0);
//! let pinch = |action, time, dx: f64| PointerEvent::from_positions(
//!     action,
//!     time,
//!     &[Point::new(100.0 - dx, 100.0), Point::new(100.0 + dx, 100.0)],
//! );
//!
//! detector.on_event(&PointerEvent::from_positions(PointerAction::Down, 0, &[Point::new(80.0, 100.0)]), &mut zoom);
//! detector.on_event(&pinch(PointerAction::PointerDown, 5, 20.0), &mut zoom);
//! detector.on_event(&pinch(PointerAction::Move, 10, 40.0), &mut zoom); // begins
//! detector.on_event(&pinch(PointerAction::Move, 15, 80.0), &mut zoom); // span 80 -> 160
//! assert_eq!(zoom.0, 2.0);
//! ```

use kurbo::{Point, Vec2};

use crate::event::{PointerAction, PointerEvent};

/// Tolerances for [`ScaleDetector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleConfig {
    /// Span drift required before a scale gesture begins.
    pub span_slop: f64,
    /// Smallest span at which a scale gesture may be in progress.
    pub min_span: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            span_slop: 16.0,
            min_span: 0.0,
        }
    }
}

/// Snapshot handed to a [`ScaleListener`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleUpdate {
    /// Average position of the active pointers.
    pub focus: Point,
    /// Current span.
    pub span: f64,
    /// Span at the last handled update.
    pub previous_span: f64,
}

impl ScaleUpdate {
    /// Scale delta since the last handled update; `1.0` when undefined.
    #[must_use]
    pub fn factor(&self) -> f64 {
        if self.previous_span > 0.0 {
            self.span / self.previous_span
        } else {
            1.0
        }
    }
}

/// Receives scale gesture callbacks from [`ScaleDetector`].
pub trait ScaleListener {
    /// A scale gesture is about to begin. Return `false` to decline it.
    fn on_scale_begin(&mut self, update: &ScaleUpdate) -> bool;

    /// The span changed. Return `false` if the delta was not handled.
    fn on_scale(&mut self, update: &ScaleUpdate) -> bool;

    /// The scale gesture ended.
    fn on_scale_end(&mut self, update: &ScaleUpdate);
}

/// Stateful pinch-scale detection.
#[derive(Clone, Debug, Default)]
pub struct ScaleDetector {
    config: ScaleConfig,
    in_progress: bool,
    initial_span: f64,
    previous_span: f64,
    current_span: f64,
    focus: Point,
}

impl ScaleDetector {
    /// Creates a detector with the given tolerances.
    #[must_use]
    pub fn new(config: ScaleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns `true` while a listener-accepted scale gesture is running.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Processes one pointer event, calling into `listener` as needed.
    pub fn on_event<L: ScaleListener + ?Sized>(&mut self, event: &PointerEvent, listener: &mut L) {
        let action = event.action;
        let stream_complete = event.ends_stream();

        if action == PointerAction::Down || stream_complete {
            if self.in_progress {
                listener.on_scale_end(&self.update());
                self.in_progress = false;
                self.initial_span = 0.0;
            }
            if stream_complete {
                return;
            }
        }

        let config_changed = matches!(
            action,
            PointerAction::Down | PointerAction::PointerDown | PointerAction::PointerUp
        );
        let skip = (action == PointerAction::PointerUp).then_some(event.action_index);
        let (focus, span, count) = measure(event, skip);
        let can_scale = count >= 2 && span >= self.config.min_span;
        let was_in_progress = self.in_progress;
        self.focus = focus;

        if self.in_progress && (!can_scale || config_changed) {
            listener.on_scale_end(&self.update());
            self.in_progress = false;
            self.initial_span = span;
        }
        if config_changed {
            self.initial_span = span;
            self.previous_span = span;
            self.current_span = span;
        }

        if !self.in_progress
            && can_scale
            && (was_in_progress || (span - self.initial_span).abs() > self.config.span_slop)
        {
            self.previous_span = span;
            self.current_span = span;
            self.in_progress = listener.on_scale_begin(&self.update());
        }

        if action == PointerAction::Move {
            self.current_span = span;
            let handled = !self.in_progress || listener.on_scale(&self.update());
            if handled {
                self.previous_span = self.current_span;
            }
        }
    }

    fn update(&self) -> ScaleUpdate {
        ScaleUpdate {
            focus: self.focus,
            span: self.current_span,
            previous_span: self.previous_span,
        }
    }
}

/// Focal point, span and contributing pointer count, ignoring `skip`.
fn measure(event: &PointerEvent, skip: Option<usize>) -> (Point, f64, usize) {
    let contributing = || {
        event
            .pointers
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != skip)
            .map(|(_, p)| p.position.to_vec2())
    };

    let count = contributing().count();
    if count == 0 {
        return (Point::ZERO, 0.0, 0);
    }
    let div = count as f64;

    let sum = contributing().fold(Vec2::ZERO, |acc, p| acc + p);
    let focus = sum / div;
    let deviation = contributing().fold(Vec2::ZERO, |acc, p| {
        acc + Vec2::new((p.x - focus.x).abs(), (p.y - focus.y).abs())
    }) / div;
    let span = (deviation * 2.0).hypot();

    (focus.to_point(), span, count)
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Begin,
        Scale(f64),
        End,
    }

    struct Recorder {
        accept_begin: bool,
        handle_scale: bool,
        calls: Vec<Call>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                accept_begin: true,
                handle_scale: true,
                calls: Vec::new(),
            }
        }
    }

    impl ScaleListener for Recorder {
        fn on_scale_begin(&mut self, _: &ScaleUpdate) -> bool {
            self.calls.push(Call::Begin);
            self.accept_begin
        }

        fn on_scale(&mut self, update: &ScaleUpdate) -> bool {
            self.calls.push(Call::Scale(update.factor()));
            self.handle_scale
        }

        fn on_scale_end(&mut self, _: &ScaleUpdate) {
            self.calls.push(Call::End);
        }
    }

    fn pinch(action: PointerAction, half_width: f64) -> PointerEvent {
        PointerEvent::from_positions(
            action,
            0,
            &[
                Point::new(100.0 - half_width, 100.0),
                Point::new(100.0 + half_width, 100.0),
            ],
        )
    }

    fn start(detector: &mut ScaleDetector, rec: &mut Recorder) {
        detector.on_event(
            &PointerEvent::from_positions(PointerAction::Down, 0, &[Point::new(90.0, 100.0)]),
            rec,
        );
        detector.on_event(&pinch(PointerAction::PointerDown, 10.0), rec);
    }

    #[test]
    fn span_of_two_pointers_is_their_distance() {
        let (focus, span, count) = measure(
            &PointerEvent::from_positions(
                PointerAction::Move,
                0,
                &[Point::new(0.0, 0.0), Point::new(30.0, 40.0)],
            ),
            None,
        );
        assert_eq!(focus, Point::new(15.0, 20.0));
        assert_eq!(span, 50.0);
        assert_eq!(count, 2);
    }

    #[test]
    fn begins_only_after_span_slop() {
        let mut detector = ScaleDetector::default();
        let mut rec = Recorder::new();
        start(&mut detector, &mut rec);

        detector.on_event(&pinch(PointerAction::Move, 15.0), &mut rec);
        assert!(rec.calls.is_empty());
        assert!(!detector.is_in_progress());

        detector.on_event(&pinch(PointerAction::Move, 20.0), &mut rec);
        assert_eq!(rec.calls, [Call::Begin, Call::Scale(1.0)]);
        assert!(detector.is_in_progress());
    }

    #[test]
    fn reports_ratio_between_handled_spans() {
        let mut detector = ScaleDetector::default();
        let mut rec = Recorder::new();
        start(&mut detector, &mut rec);
        detector.on_event(&pinch(PointerAction::Move, 20.0), &mut rec);
        rec.calls.clear();

        detector.on_event(&pinch(PointerAction::Move, 40.0), &mut rec);
        detector.on_event(&pinch(PointerAction::Move, 20.0), &mut rec);
        assert_eq!(rec.calls, [Call::Scale(2.0), Call::Scale(0.5)]);
    }

    #[test]
    fn unhandled_scale_accumulates() {
        let mut detector = ScaleDetector::default();
        let mut rec = Recorder::new();
        start(&mut detector, &mut rec);
        detector.on_event(&pinch(PointerAction::Move, 20.0), &mut rec);
        rec.calls.clear();
        rec.handle_scale = false;

        detector.on_event(&pinch(PointerAction::Move, 40.0), &mut rec);
        detector.on_event(&pinch(PointerAction::Move, 80.0), &mut rec);
        assert_eq!(rec.calls, [Call::Scale(2.0), Call::Scale(4.0)]);
    }

    #[test]
    fn declined_begin_is_retried() {
        let mut detector = ScaleDetector::default();
        let mut rec = Recorder::new();
        rec.accept_begin = false;
        start(&mut detector, &mut rec);

        detector.on_event(&pinch(PointerAction::Move, 20.0), &mut rec);
        detector.on_event(&pinch(PointerAction::Move, 30.0), &mut rec);
        assert_eq!(rec.calls, [Call::Begin, Call::Begin]);
        assert!(!detector.is_in_progress());
    }

    #[test]
    fn lifting_a_pointer_ends_the_gesture() {
        let mut detector = ScaleDetector::default();
        let mut rec = Recorder::new();
        start(&mut detector, &mut rec);
        detector.on_event(&pinch(PointerAction::Move, 20.0), &mut rec);
        rec.calls.clear();

        detector.on_event(&pinch(PointerAction::PointerUp, 20.0), &mut rec);
        assert_eq!(rec.calls, [Call::End]);
        assert!(!detector.is_in_progress());
    }

    #[test]
    fn stream_end_closes_an_in_progress_gesture() {
        let mut detector = ScaleDetector::default();
        let mut rec = Recorder::new();
        start(&mut detector, &mut rec);
        detector.on_event(&pinch(PointerAction::Move, 20.0), &mut rec);
        rec.calls.clear();

        detector.on_event(&pinch(PointerAction::Cancel, 20.0), &mut rec);
        assert_eq!(rec.calls, [Call::End]);
    }

    #[test]
    fn single_pointer_never_scales() {
        let mut detector = ScaleDetector::default();
        let mut rec = Recorder::new();
        detector.on_event(
            &PointerEvent::from_positions(PointerAction::Down, 0, &[Point::ZERO]),
            &mut rec,
        );
        detector.on_event(
            &PointerEvent::from_positions(PointerAction::Move, 0, &[Point::new(500.0, 0.0)]),
            &mut rec,
        );
        assert!(rec.calls.is_empty());
    }
}
