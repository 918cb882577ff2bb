// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The zoom gesture state machine and overlay coordinator.
//!
//! [`ZoomableTouchHandler`] consumes the pointer stream of one target element
//! and drives the overlay lifecycle:
//!
//! ```text
//!   Idle ──down──▶ PointerDown ──second down──▶ Zooming ──release──▶ (closing animation) ──▶ Idle
//!     ▲                │                                                                     │
//!     └─────release────┘                                                                     │
//!     └──────────────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - Entering `Zooming` snapshots the target into a proxy element placed at
//!   the target's window position, adds a transparent backdrop and then the
//!   proxy to the decor surface, disables ancestor interception, hides the
//!   target and (optionally) system chrome.
//! - While zooming, moves translate the proxy by the drift of the pinch
//!   midpoint, and scale deltas scale it (clamped to `1.0..=5.0`) while the
//!   backdrop darkens.
//! - Releasing either tears down synchronously or asks the host to animate the
//!   proxy home; the host then hands the [`AnimationToken`] back through
//!   [`ZoomableTouchHandler::animation_finished`]. Input is ignored until then.
//!
//! Every event also feeds the tap and scale recognizers. Tap, long-press and
//! double-tap callbacks are not suppressed by zoom state.

use core::fmt;

use kurbo::Point;
use loupe_gesture::event::PointerEvent;
use loupe_gesture::scale::{ScaleDetector, ScaleListener, ScaleUpdate};
use loupe_gesture::tap::{TapGesture, TapRecognizer};
use peniko::Color;

use crate::animation::{AnimationRequest, AnimationToken, Easing, ProxyTransform};
use crate::config::ZoomConfig;
use crate::host::{ElementHost, HostWindow, ZoomHost};
use crate::listener::Listeners;
use crate::math::{MIN_SCALE, backdrop_color, clamp_scale, proxy_position};
use crate::session::{GestureSession, ZoomState};

/// Overlay elements owned for the duration of one zoom.
#[derive(Clone, Debug)]
struct Overlay<E> {
    proxy: E,
    backdrop: E,
    position: Point,
}

/// Touch handler implementing pinch-to-zoom-into-overlay for one element.
///
/// `E` is the host's element handle and `C` the [`HostWindow`] the target
/// lives in. Every entry point takes the host by `&mut`; the handler keeps no
/// reference to it between calls.
#[derive(Debug)]
pub struct ZoomableTouchHandler<E, C> {
    target: E,
    container: C,
    config: ZoomConfig,
    easing: Easing,
    listeners: Listeners<E>,
    session: GestureSession,
    overlay: Option<Overlay<E>>,
    taps: TapRecognizer,
    scale: ScaleDetector,
    pending_animation: Option<AnimationToken>,
    next_token: u64,
}

impl<E, C> ZoomableTouchHandler<E, C>
where
    E: Clone + fmt::Debug,
    C: HostWindow,
{
    /// Creates an idle handler for `target`.
    #[must_use]
    pub fn new(
        container: C,
        target: E,
        config: ZoomConfig,
        easing: Easing,
        listeners: Listeners<E>,
    ) -> Self {
        Self {
            target,
            container,
            taps: TapRecognizer::new(config.tap),
            scale: ScaleDetector::new(config.scale),
            config,
            easing,
            listeners,
            session: GestureSession::default(),
            overlay: None,
            pending_animation: None,
            next_token: 0,
        }
    }

    /// The element this handler zooms.
    pub fn target(&self) -> &E {
        &self.target
    }

    /// The window the target lives in.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Options captured at construction.
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// The closing animation curve.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// The live session.
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Current gesture state.
    pub fn state(&self) -> ZoomState {
        self.session.state
    }

    /// Returns `true` while the proxy is in the overlay, including while it
    /// animates out.
    pub fn is_zooming(&self) -> bool {
        self.overlay.is_some()
    }

    /// The proxy element, while one exists.
    pub fn proxy(&self) -> Option<&E> {
        self.overlay.as_ref().map(|o| &o.proxy)
    }

    /// The backdrop element, while one exists.
    pub fn backdrop(&self) -> Option<&E> {
        self.overlay.as_ref().map(|o| &o.backdrop)
    }

    /// Token of the closing animation the handler is waiting on.
    pub fn pending_animation(&self) -> Option<AnimationToken> {
        self.pending_animation
    }

    /// Handles one pointer event and returns whether it was consumed.
    ///
    /// Always returns `true`: events with more than two pointers, and every
    /// event while the closing animation runs, are swallowed without effect.
    pub fn handle_pointer<H>(&mut self, host: &mut H, event: &PointerEvent) -> bool
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        if self.session.animating_end || event.pointer_count() > 2 {
            tracing::trace!(
                animating_end = self.session.animating_end,
                pointers = event.pointer_count(),
                "pointer event ignored"
            );
            return true;
        }

        let mut sink = ScaleSink {
            session: &mut self.session,
            overlay: self.overlay.as_ref(),
            host: &mut *host,
        };
        self.scale.on_event(event, &mut sink);

        let recognized = self.taps.on_event(event);
        self.dispatch_taps(&recognized);

        if event.is_down() {
            self.on_pointer_down(host, event);
        } else if event.is_release() {
            self.on_release(host);
        } else {
            self.on_move(host, event);
        }
        true
    }

    /// Fires tap recognizer deadlines (confirmed tap, long press) due by `now`.
    ///
    /// Call from the host's frame or timer loop; pointer events flush
    /// deadlines on their own.
    pub fn advance(&mut self, now: u64) {
        let recognized = self.taps.advance(now);
        self.dispatch_taps(&recognized);
    }

    /// Applies a scale delta to the proxy.
    ///
    /// Returns `false` ("not handled") when no proxy exists, for example when
    /// a late scale update outlives teardown, or when `delta` is not finite.
    pub fn on_scale<H>(&mut self, host: &mut H, delta: f64) -> bool
    where
        H: ElementHost<Element = E>,
    {
        apply_scale(&mut self.session, self.overlay.as_ref(), host, delta)
    }

    /// Reports completion of the closing animation identified by `token`.
    ///
    /// Runs teardown and returns `true` if `token` is the animation this
    /// handler is waiting on; stale or repeated tokens are ignored.
    pub fn animation_finished<H>(&mut self, host: &mut H, token: AnimationToken) -> bool
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        if self.pending_animation != Some(token) {
            tracing::debug!(?token, "ignoring stale animation completion");
            return false;
        }
        self.pending_animation = None;
        self.teardown(host)
    }

    fn dispatch_taps(&mut self, recognized: &[TapGesture]) {
        for gesture in recognized {
            match gesture {
                TapGesture::Tap => self.listeners.tap(&self.target),
                TapGesture::LongPress => self.listeners.long_press(&self.target),
                TapGesture::DoubleTap => self.listeners.double_tap(&self.target),
            }
        }
    }

    fn on_pointer_down<H>(&mut self, host: &mut H, event: &PointerEvent)
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        match self.session.state {
            ZoomState::Idle => self.session.state = ZoomState::PointerDown,
            ZoomState::PointerDown => {
                let Some(midpoint) = event.midpoint() else {
                    return;
                };
                self.session.state = ZoomState::Zooming;
                self.session.initial_pinch_midpoint = midpoint;
                self.session.current_movement_midpoint = midpoint;
                self.start_zooming(host);
            }
            ZoomState::Zooming => {}
        }
    }

    fn on_move<H>(&mut self, host: &mut H, event: &PointerEvent)
    where
        H: ElementHost<Element = E>,
    {
        if self.session.state != ZoomState::Zooming {
            return;
        }
        if let Some(midpoint) = event.midpoint() {
            self.session.current_movement_midpoint = midpoint;
        }
        let position = proxy_position(
            self.session.origin_element_position,
            self.session.initial_pinch_midpoint,
            self.session.current_movement_midpoint,
        );
        if let Some(overlay) = &mut self.overlay {
            overlay.position = position;
            host.set_element_position(&overlay.proxy, position);
        }
    }

    fn on_release<H>(&mut self, host: &mut H)
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        match self.session.state {
            ZoomState::Idle => {}
            ZoomState::PointerDown => self.session.state = ZoomState::Idle,
            ZoomState::Zooming => self.end_zooming(host),
        }
    }

    fn start_zooming<H>(&mut self, host: &mut H)
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        let bitmap = host.capture_bitmap(&self.target);
        let size = host.element_size(&self.target);
        let proxy = host.create_proxy(bitmap, size);

        let origin = host.element_window_position(&self.target).round();
        self.session.origin_element_position = origin;
        host.set_element_position(&proxy, origin);

        let backdrop = host.create_backdrop();
        host.set_element_fill(&backdrop, Color::TRANSPARENT);

        let surface = self.container.decor_surface();
        match &surface {
            Some(surface) => {
                host.add_overlay_element(surface, &backdrop);
                host.add_overlay_element(surface, &proxy);
            }
            None => tracing::debug!("no decor surface; overlay not attached"),
        }

        host.disallow_ancestor_interception(&self.target);
        host.set_element_visible(&self.target, false);

        if self.config.immersive_mode_enabled
            && let Some(surface) = &surface
        {
            host.hide_system_chrome(surface);
        }

        self.overlay = Some(Overlay {
            proxy,
            backdrop,
            position: origin,
        });
        tracing::debug!(element = ?self.target, ?origin, ?size, "zoom started");
        self.listeners.started_zooming(&self.target);
    }

    fn end_zooming<H>(&mut self, host: &mut H)
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        if self.config.zoom_animation_enabled
            && let Some(overlay) = &self.overlay
        {
            let token = AnimationToken(self.next_token);
            self.next_token += 1;
            self.session.animating_end = true;
            self.pending_animation = Some(token);
            tracing::debug!(?token, scale = self.session.scale_factor, "zoom ending, animating");
            host.animate(AnimationRequest {
                token,
                element: overlay.proxy.clone(),
                from: ProxyTransform::new(overlay.position, self.session.scale_factor),
                to: ProxyTransform::new(self.session.origin_element_position, MIN_SCALE),
                easing: self.easing,
                duration_ms: self.config.closing_animation_ms,
            });
            return;
        }
        self.teardown(host);
    }

    /// Removes the overlay, restores the target and resets the session.
    ///
    /// Runs at most once per zoom; returns `false` when there was nothing to
    /// tear down.
    fn teardown<H>(&mut self, host: &mut H) -> bool
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        let Some(overlay) = self.overlay.take() else {
            self.session.reset();
            return false;
        };

        let surface = self.container.decor_surface();
        match &surface {
            Some(surface) => {
                host.remove_overlay_element(surface, &overlay.backdrop);
                host.remove_overlay_element(surface, &overlay.proxy);
            }
            None => tracing::debug!("decor surface gone; skipping overlay removal"),
        }
        host.set_element_visible(&self.target, true);

        self.session.reset();
        self.pending_animation = None;
        tracing::debug!(element = ?self.target, "zoom ended");
        self.listeners.ended_zooming(&self.target);

        if self.config.immersive_mode_enabled
            && let Some(surface) = &surface
        {
            host.show_system_chrome(surface);
        }
        true
    }
}

/// Routes scale detector callbacks to the live overlay.
struct ScaleSink<'a, H: ElementHost> {
    session: &'a mut GestureSession,
    overlay: Option<&'a Overlay<H::Element>>,
    host: &'a mut H,
}

impl<H: ElementHost> ScaleListener for ScaleSink<'_, H> {
    fn on_scale_begin(&mut self, update: &ScaleUpdate) -> bool {
        tracing::trace!(focus = ?update.focus, span = update.span, "scale begin");
        self.overlay.is_some()
    }

    fn on_scale(&mut self, update: &ScaleUpdate) -> bool {
        apply_scale(self.session, self.overlay, self.host, update.factor())
    }

    fn on_scale_end(&mut self, _: &ScaleUpdate) {}
}

fn apply_scale<H: ElementHost>(
    session: &mut GestureSession,
    overlay: Option<&Overlay<H::Element>>,
    host: &mut H,
    delta: f64,
) -> bool {
    let Some(overlay) = overlay else {
        return false;
    };
    if !delta.is_finite() {
        return false;
    }
    let scale = clamp_scale(session.scale_factor, delta);
    session.scale_factor = scale;
    host.set_element_scale(&overlay.proxy, scale);
    host.set_element_fill(&overlay.backdrop, backdrop_color(scale));
    tracing::trace!(delta, scale, "proxy scaled");
    true
}
