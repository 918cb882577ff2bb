// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live state of one zoom interaction.

use kurbo::Point;

use crate::math::MIN_SCALE;

/// Where the gesture state machine is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZoomState {
    /// No pointer is down.
    #[default]
    Idle,
    /// One pointer is down; a second one starts zooming.
    PointerDown,
    /// Two pointers are down and the proxy is in the overlay.
    Zooming,
}

/// The state of one zoom interaction.
///
/// One session lives per registered target. Ending a zoom resets it to
/// [`GestureSession::default`] rather than dropping it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    /// Gesture state.
    pub state: ZoomState,
    /// Current proxy scale, kept within [`MIN_SCALE`]..=[`MAX_SCALE`](crate::math::MAX_SCALE).
    pub scale_factor: f64,
    /// Midpoint of the two pointers when zooming started.
    pub initial_pinch_midpoint: Point,
    /// Midpoint of the two pointers at the latest move.
    pub current_movement_midpoint: Point,
    /// Target's window position captured when zooming started.
    pub origin_element_position: Point,
    /// `true` while the closing animation runs; input is ignored meanwhile.
    pub animating_end: bool,
}

impl Default for GestureSession {
    fn default() -> Self {
        Self {
            state: ZoomState::Idle,
            scale_factor: MIN_SCALE,
            initial_pinch_midpoint: Point::ZERO,
            current_movement_midpoint: Point::ZERO,
            origin_element_position: Point::ZERO,
            animating_end: false,
        }
    }
}

impl GestureSession {
    /// Returns `true` while an overlay exists: zooming or animating out.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state == ZoomState::Zooming || self.animating_end
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
