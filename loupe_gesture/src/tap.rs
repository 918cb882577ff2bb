// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap recognizer: confirmed single taps, long presses and double taps.
//!
//! ## Usage
//!
//! 1) Feed every [`PointerEvent`] for the element to [`TapRecognizer::on_event`].
//! 2) Call [`TapRecognizer::advance`] from the host's frame or timer callback so
//!    that time-based outcomes (long press, confirmed tap) fire even when no
//!    input arrives.
//! 3) Both return the [`TapGesture`]s recognized during the call, in order.
//!
//! A single tap is only *confirmed* once the double-tap window has elapsed
//! without a second tap, so a double tap never reports a single tap first.
//! A second pointer going down cancels any pending tap or long press, which
//! matches the heuristics of common touch toolkits.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use loupe_gesture::event::{PointerAction, PointerEvent};
//! use loupe_gesture::tap::{TapGesture, TapRecognizer};
//!
//! let mut taps = TapRecognizer::default();
//! let at = Point::new(10.0, 10.0);
//!
//! assert!(taps.on_event(&PointerEvent::from_positions(PointerAction::Down, 0, &[at])).is_empty());
//! assert!(taps.on_event(&PointerEvent::from_positions(PointerAction::Up, 60, &[at])).is_empty());
//!
//! // Nothing else arrives before the double-tap window closes.
//! assert_eq!(taps.advance(400).as_slice(), &[TapGesture::Tap]);
//! ```

use kurbo::Point;
use smallvec::SmallVec;

use crate::event::{PointerAction, PointerEvent};

/// Timing and distance tolerances for [`TapRecognizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TapConfig {
    /// Maximum travel, in element units, for a press to still count as a tap.
    pub touch_slop: f64,
    /// Maximum distance between the two downs of a double tap.
    pub double_tap_slop: f64,
    /// Window after the first lift in which a second down forms a double tap.
    pub double_tap_timeout: u64,
    /// Minimum gap between the first lift and second down; faster is a bounce.
    pub double_tap_min_time: u64,
    /// Hold duration after which a press becomes a long press.
    pub long_press_timeout: u64,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_slop: 100.0,
            double_tap_timeout: 300,
            double_tap_min_time: 40,
            long_press_timeout: 500,
        }
    }
}

/// A gesture recognized by [`TapRecognizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapGesture {
    /// A single tap that was not followed by a second tap in time.
    Tap,
    /// A press held past the long-press timeout without moving.
    LongPress,
    /// The second down of a double tap.
    DoubleTap,
}

/// Output of one recognizer call; rarely holds more than one gesture.
pub type TapGestures = SmallVec<[TapGesture; 2]>;

/// Stateful tap, long-press and double-tap recognition.
#[derive(Clone, Debug, Default)]
pub struct TapRecognizer {
    config: TapConfig,
    still_down: bool,
    in_long_press: bool,
    is_double_tapping: bool,
    defer_confirm: bool,
    always_in_tap_region: bool,
    always_in_bigger_tap_region: bool,
    /// Bigger-region flag of the previous completed tap.
    previous_in_bigger_tap_region: bool,
    current_down: Option<Point>,
    previous_up: Option<u64>,
    long_press_deadline: Option<u64>,
    confirm_deadline: Option<u64>,
}

impl TapRecognizer {
    /// Creates a recognizer with the given tolerances.
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the active tolerances.
    #[must_use]
    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Returns `true` while a long press or tap confirmation is pending.
    #[must_use]
    pub fn has_pending_deadline(&self) -> bool {
        self.long_press_deadline.is_some() || self.confirm_deadline.is_some()
    }

    /// Fires every deadline that has expired by `now`.
    pub fn advance(&mut self, now: u64) -> TapGestures {
        let mut out = TapGestures::new();
        self.fire_expired(now, &mut out);
        out
    }

    /// Processes one pointer event.
    ///
    /// Deadlines that expired before `event.time` fire first, so late ticks
    /// never reorder outcomes.
    pub fn on_event(&mut self, event: &PointerEvent) -> TapGestures {
        let mut out = TapGestures::new();
        self.fire_expired(event.time, &mut out);

        match event.action {
            PointerAction::Down => self.on_down(event, &mut out),
            PointerAction::PointerDown => self.cancel_taps(),
            PointerAction::Move => self.on_move(event),
            PointerAction::PointerUp => {}
            PointerAction::Up => self.on_up(event, &mut out),
            PointerAction::Cancel => self.cancel(),
        }
        out
    }

    /// Drops all in-flight state, as if the stream had been cancelled.
    pub fn cancel(&mut self) {
        self.long_press_deadline = None;
        self.confirm_deadline = None;
        self.still_down = false;
        self.in_long_press = false;
        self.is_double_tapping = false;
        self.defer_confirm = false;
        self.always_in_tap_region = false;
        self.always_in_bigger_tap_region = false;
    }

    fn cancel_taps(&mut self) {
        self.long_press_deadline = None;
        self.confirm_deadline = None;
        self.in_long_press = false;
        self.is_double_tapping = false;
        self.defer_confirm = false;
        self.always_in_tap_region = false;
        self.always_in_bigger_tap_region = false;
    }

    fn on_down(&mut self, event: &PointerEvent, out: &mut TapGestures) {
        let Some(pos) = event.primary_position() else {
            return;
        };
        let had_pending_tap = self.confirm_deadline.take().is_some();
        if had_pending_tap && self.is_considered_double_tap(pos, event.time) {
            self.is_double_tapping = true;
            out.push(TapGesture::DoubleTap);
        } else {
            self.confirm_deadline = Some(event.time + self.config.double_tap_timeout);
        }

        self.current_down = Some(pos);
        self.still_down = true;
        self.in_long_press = false;
        self.defer_confirm = false;
        self.always_in_tap_region = true;
        self.always_in_bigger_tap_region = true;
        self.long_press_deadline = Some(event.time + self.config.long_press_timeout);
    }

    fn is_considered_double_tap(&self, second_down: Point, time: u64) -> bool {
        if !self.previous_in_bigger_tap_region {
            return false;
        }
        let (Some(first_down), Some(first_up)) = (self.current_down, self.previous_up) else {
            return false;
        };
        let gap = time.saturating_sub(first_up);
        if gap < self.config.double_tap_min_time || gap > self.config.double_tap_timeout {
            return false;
        }
        let slop = self.config.double_tap_slop;
        (second_down - first_down).hypot2() < slop * slop
    }

    fn on_move(&mut self, event: &PointerEvent) {
        if self.in_long_press || !self.still_down {
            return;
        }
        let (Some(pos), Some(down)) = (event.primary_position(), self.current_down) else {
            return;
        };
        let travel = (pos - down).hypot2();
        if self.always_in_tap_region && travel > self.config.touch_slop * self.config.touch_slop {
            self.always_in_tap_region = false;
            self.confirm_deadline = None;
            self.long_press_deadline = None;
        }
        if travel > self.config.double_tap_slop * self.config.double_tap_slop {
            self.always_in_bigger_tap_region = false;
        }
    }

    fn on_up(&mut self, event: &PointerEvent, out: &mut TapGestures) {
        self.still_down = false;
        if self.is_double_tapping {
            // The double tap was reported on the second down.
        } else if self.in_long_press {
            self.confirm_deadline = None;
        } else if self.always_in_tap_region && self.defer_confirm {
            out.push(TapGesture::Tap);
        }

        self.previous_up = Some(event.time);
        self.previous_in_bigger_tap_region = self.always_in_bigger_tap_region;
        self.in_long_press = false;
        self.is_double_tapping = false;
        self.defer_confirm = false;
        self.long_press_deadline = None;
    }

    fn fire_expired(&mut self, now: u64, out: &mut TapGestures) {
        loop {
            let confirm = self.confirm_deadline.filter(|d| *d <= now);
            let long_press = self.long_press_deadline.filter(|d| *d <= now);
            match (confirm, long_press) {
                (Some(c), Some(l)) if l < c => self.fire_long_press(out),
                (Some(_), _) => self.fire_confirm(out),
                (None, Some(_)) => self.fire_long_press(out),
                (None, None) => break,
            }
        }
    }

    fn fire_confirm(&mut self, out: &mut TapGestures) {
        self.confirm_deadline = None;
        if self.still_down {
            self.defer_confirm = true;
        } else {
            out.push(TapGesture::Tap);
        }
    }

    fn fire_long_press(&mut self, out: &mut TapGestures) {
        self.long_press_deadline = None;
        self.confirm_deadline = None;
        self.defer_confirm = false;
        self.in_long_press = true;
        out.push(TapGesture::LongPress);
    }
}
