// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event model shared by the recognizers.
//!
//! A [`PointerEvent`] is a snapshot of every active pointer at the moment one
//! of them changed, in the same shape touch toolkits deliver them: the action
//! names what happened, `action_index` names which pointer it happened to, and
//! `pointers` lists all pointers still touching (including the one being
//! lifted on [`PointerAction::PointerUp`] / [`PointerAction::Up`]).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use loupe_gesture::event::{PointerAction, PointerEvent};
//!
//! let ev = PointerEvent::new(PointerAction::PointerDown, 16)
//!     .with_pointer(0, Point::new(80.0, 100.0))
//!     .with_pointer(1, Point::new(120.0, 100.0))
//!     .with_action_index(1);
//!
//! assert_eq!(ev.pointer_count(), 2);
//! assert_eq!(ev.midpoint(), Some(Point::new(100.0, 100.0)));
//! assert!(ev.is_down());
//! ```

use kurbo::Point;
use smallvec::SmallVec;

/// What happened to the pointer named by [`PointerEvent::action_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The first pointer touched down; a new stream begins.
    Down,
    /// An additional pointer touched down while others are active.
    PointerDown,
    /// One or more active pointers moved.
    Move,
    /// A non-final pointer lifted; others remain active.
    PointerUp,
    /// The final pointer lifted; the stream ends.
    Up,
    /// The host aborted the stream (for example, an ancestor stole it).
    Cancel,
}

/// A single active pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Host-assigned identifier, stable for as long as the pointer is down.
    pub id: u32,
    /// Position in the coordinate space of the element receiving events.
    pub position: Point,
}

/// One input event carrying all active pointers.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub action: PointerAction,
    /// Index into `pointers` of the pointer the action applies to.
    pub action_index: usize,
    /// Every active pointer, in host order.
    pub pointers: SmallVec<[Pointer; 2]>,
    /// Event timestamp in milliseconds on a monotonic host clock.
    pub time: u64,
}

impl PointerEvent {
    /// Creates an event with no pointers yet.
    #[must_use]
    pub fn new(action: PointerAction, time: u64) -> Self {
        Self {
            action,
            action_index: 0,
            pointers: SmallVec::new(),
            time,
        }
    }

    /// Creates an event from bare positions, assigning ids by index.
    ///
    /// The action applies to the last position, which is how a freshly added
    /// or about-to-lift pointer is usually reported in scripted input.
    #[must_use]
    pub fn from_positions(action: PointerAction, time: u64, positions: &[Point]) -> Self {
        let mut ev = Self::new(action, time);
        for (id, position) in (0_u32..).zip(positions) {
            ev.pointers.push(Pointer {
                id,
                position: *position,
            });
        }
        ev.action_index = positions.len().saturating_sub(1);
        ev
    }

    /// Appends an active pointer.
    #[must_use]
    pub fn with_pointer(mut self, id: u32, position: Point) -> Self {
        self.pointers.push(Pointer { id, position });
        self
    }

    /// Sets which pointer the action applies to.
    #[must_use]
    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = index;
        self
    }

    /// Number of active pointers carried by this event.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Position of the primary (first) pointer, if any.
    #[must_use]
    pub fn primary_position(&self) -> Option<Point> {
        self.pointers.first().map(|p| p.position)
    }

    /// Midpoint of the two active pointers.
    ///
    /// Only defined for events carrying exactly two pointers.
    #[must_use]
    pub fn midpoint(&self) -> Option<Point> {
        match self.pointers.as_slice() {
            [a, b] => Some(a.position.midpoint(b.position)),
            _ => None,
        }
    }

    /// Returns `true` for [`PointerAction::Down`] and [`PointerAction::PointerDown`].
    #[must_use]
    pub fn is_down(&self) -> bool {
        matches!(self.action, PointerAction::Down | PointerAction::PointerDown)
    }

    /// Returns `true` for any lift or cancel.
    #[must_use]
    pub fn is_release(&self) -> bool {
        matches!(
            self.action,
            PointerAction::PointerUp | PointerAction::Up | PointerAction::Cancel
        )
    }

    /// Returns `true` when this event ends the pointer stream.
    #[must_use]
    pub fn ends_stream(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::Cancel)
    }
}
