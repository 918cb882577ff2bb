// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe: pinch to lift an element into an overlay, pan and scale it, and let go.
//!
//! On a two-finger pinch, the registered target element is hidden and an
//! enlarged snapshot of it (the *proxy*) is promoted into the window's
//! top-level surface above a dimming *backdrop*. The proxy follows the pinch
//! centroid and scales with it; the backdrop darkens as the scale grows. On
//! release the proxy animates back onto the target, the overlay is removed
//! and the target reappears exactly where it was.
//!
//! The crate is headless. It computes positions, scales and fills and asks the
//! host toolkit to apply them through the traits in [`host`]:
//!
//! - Drawing, bitmap capture and the overlay surface belong to the host.
//! - The closing animation runs on the host's frame scheduler; completion
//!   comes back as an [`animation::AnimationToken`].
//! - Everything happens on the UI thread; the only concurrency hazard is input
//!   arriving during the closing animation, which is ignored.
//!
//! ## Pieces
//!
//! - [`ZoomableTouchHandler`]: the gesture state machine and overlay coordinator
//!   for one element.
//! - [`ZoomRegistry`] / [`Registration`]: attach and detach handlers per element.
//! - [`ZoomConfig`], [`Listeners`], [`animation::Easing`]: per-registration options.
//! - [`math`]: the pure scale, placement and backdrop functions.
//!
//! ## Example
//!
//! A host wires pointer events for an element into the registry:
//!
//! ```rust,ignore
//! registry.register(
//!     Registration::new(TargetContainer::Window(window), image_view)
//!         .listeners(Listeners::new().on_view_started_zooming(|v| log_zoom(v))),
//! )?;
//!
//! // In the element's touch callback:
//! registry.handle_pointer(&mut host, &image_view, &event);
//!
//! // In the frame loop:
//! registry.advance(now_ms);
//!
//! // When the host's animation engine finishes a closing animation:
//! registry.animation_finished(&mut host, &image_view, token);
//! ```
//!
//! See the `loupe_demos` crate for a complete headless host.
//!
//! ## Logging
//!
//! State transitions are reported through [`tracing`] at `debug` level and
//! per-event detail at `trace` level. Install any subscriber to see them.

pub mod animation;
mod config;
mod handler;
pub mod host;
mod listener;
pub mod math;
mod registry;
mod session;

pub use config::ZoomConfig;
pub use handler::ZoomableTouchHandler;
pub use listener::Listeners;
pub use registry::{Registration, RegistryError, ZoomRegistry};
pub use session::{GestureSession, ZoomState};

pub use loupe_gesture;
