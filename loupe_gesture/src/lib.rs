// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Gesture: host-agnostic pointer events and touch gesture recognizers.
//!
//! This crate provides small, focused recognizers for the touch interactions a
//! zoomable element needs, each fed the same stream of [`event::PointerEvent`]s:
//!
//! - [`event`]: The multi-pointer event model (down, pointer-down, move, up, cancel)
//! - [`tap`]: Confirmed single taps, long presses and double taps
//! - [`scale`]: Pinch-scale detection producing per-move scale deltas
//!
//! ## Design Philosophy
//!
//! Each recognizer is:
//!
//! - **Headless**: No timers, threads or windowing; time arrives with each event
//!   or through an explicit `advance(now)` call from the host's frame loop
//! - **Independent**: Recognizers share no state, so several can watch the same
//!   stream without coordinating
//! - **Allocation-free**: Outputs are returned inline via `SmallVec`
//!
//! The crate does not decide what a gesture *means*. Callers receive
//! [`tap::TapGesture`] values or [`scale::ScaleListener`] callbacks and act on
//! them; the `loupe` crate builds its zoom-to-overlay interaction this way.
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use loupe_gesture::event::{PointerAction, PointerEvent};
//! use loupe_gesture::tap::{TapGesture, TapRecognizer};
//!
//! let mut taps = TapRecognizer::default();
//! let at = Point::new(40.0, 40.0);
//!
//! taps.on_event(&PointerEvent::from_positions(PointerAction::Down, 0, &[at]));
//!
//! // Held past the long-press timeout.
//! assert_eq!(taps.advance(600).as_slice(), &[TapGesture::LongPress]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): Build Kurbo with the standard library
//! - `libm`: Build Kurbo's float math on `libm` for `no_std` targets
//!
//! This crate is `no_std` compatible.

#![no_std]

pub mod event;
pub mod scale;
pub mod tap;
