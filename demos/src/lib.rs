// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless host for driving `loupe` without a UI toolkit.
//!
//! [`HeadlessHost`] keeps a flat list of rectangular elements, an overlay
//! layer and a clock. Set the clock with [`HeadlessHost::set_time`] before
//! routing each pointer event so animations requested by that event start at
//! the right moment. Closing animations are stepped by [`HeadlessHost::step`],
//! which returns the tokens of every animation that finished so the caller can
//! report them back. Elements removed from the overlay are released.

use std::fmt;

use kurbo::{Point, Size};
use loupe::animation::{AnimationRequest, AnimationToken};
use loupe::host::{
    Animator, ElementHost, HostWindow, OverlaySurface, Snapshot, SystemChrome, TouchInterception,
};
use peniko::Color;

/// Index of an element in a [`HeadlessHost`].
pub type ElementId = usize;

/// The one decor surface a [`HeadlessHost`] has.
pub const DECOR: u8 = 0;

/// A rectangle in window coordinates.
#[derive(Clone, Debug)]
pub struct Element {
    pub name: String,
    pub position: Point,
    pub size: Size,
    pub scale: f64,
    pub visible: bool,
    pub fill: Color,
}

#[derive(Clone, Debug)]
struct Running {
    request: AnimationRequest<ElementId>,
    started: u64,
}

/// In-memory scene implementing every `loupe` host trait.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    elements: Vec<Option<Element>>,
    overlay: Vec<ElementId>,
    chrome_hidden: bool,
    running: Vec<Running>,
    clock: u64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a visible element to the scene.
    pub fn add_element(&mut self, name: impl Into<String>, position: Point, size: Size) -> ElementId {
        self.elements.push(Some(Element {
            name: name.into(),
            position,
            size,
            scale: 1.0,
            visible: true,
            fill: Color::TRANSPARENT,
        }));
        self.elements.len() - 1
    }

    /// The element with `id`, unless it was never created or has been released.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id).and_then(Option::as_ref)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id).and_then(Option::as_mut)
    }

    /// Number of live elements.
    pub fn element_count(&self) -> usize {
        self.elements.iter().flatten().count()
    }

    /// The current time in milliseconds.
    pub fn time(&self) -> u64 {
        self.clock
    }

    /// Moves the clock to `now` without stepping animations.
    pub fn set_time(&mut self, now: u64) {
        self.clock = now;
    }

    /// Elements in the overlay layer, bottom to top.
    pub fn overlay(&self) -> &[ElementId] {
        &self.overlay
    }

    pub fn chrome_hidden(&self) -> bool {
        self.chrome_hidden
    }

    pub fn is_animating(&self) -> bool {
        !self.running.is_empty()
    }

    /// Advances the clock to `now`, applies every running animation and
    /// returns the tokens of those that completed.
    pub fn step(&mut self, now: u64) -> Vec<AnimationToken> {
        self.clock = now;
        let mut finished = Vec::new();
        let mut still_running = Vec::new();
        for running in std::mem::take(&mut self.running) {
            let tween = running.request.tween();
            let elapsed = now.saturating_sub(running.started);
            let transform = tween.sample(elapsed);
            if let Some(element) = self.element_mut(running.request.element) {
                element.position = transform.position;
                element.scale = transform.scale;
            }
            if tween.is_finished(elapsed) {
                finished.push(running.request.token);
            } else {
                still_running.push(running);
            }
        }
        self.running = still_running;
        finished
    }
}

impl fmt::Display for HeadlessHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let live = self
            .elements
            .iter()
            .enumerate()
            .filter_map(|(id, e)| Some((id, e.as_ref()?)));
        for (id, e) in live {
            let layer = if self.overlay.contains(&id) { "overlay" } else { "content" };
            writeln!(
                f,
                "  #{id} {:<10} {layer:<8} at ({:.1}, {:.1}) x{:.2} visible={} alpha={:.2}",
                e.name,
                e.position.x,
                e.position.y,
                e.scale,
                e.visible,
                e.fill.components[3],
            )?;
        }
        write!(f, "  chrome hidden: {}", self.chrome_hidden)
    }
}

impl ElementHost for HeadlessHost {
    type Element = ElementId;

    fn element_size(&self, element: &ElementId) -> Size {
        self.element(*element).map_or(Size::ZERO, |e| e.size)
    }

    fn element_window_position(&self, element: &ElementId) -> Point {
        self.element(*element).map_or(Point::ZERO, |e| e.position)
    }

    fn set_element_visible(&mut self, element: &ElementId, visible: bool) {
        if let Some(e) = self.element_mut(*element) {
            e.visible = visible;
        }
    }

    fn set_element_position(&mut self, element: &ElementId, position: Point) {
        if let Some(e) = self.element_mut(*element) {
            e.position = position;
        }
    }

    fn set_element_scale(&mut self, element: &ElementId, scale: f64) {
        if let Some(e) = self.element_mut(*element) {
            e.scale = scale;
        }
    }

    fn set_element_fill(&mut self, element: &ElementId, color: Color) {
        if let Some(e) = self.element_mut(*element) {
            e.fill = color;
        }
    }
}

impl OverlaySurface for HeadlessHost {
    type Surface = u8;

    fn create_backdrop(&mut self) -> ElementId {
        self.add_element("backdrop", Point::ZERO, Size::new(f64::INFINITY, f64::INFINITY))
    }

    fn add_overlay_element(&mut self, _: &u8, element: &ElementId) {
        self.overlay.push(*element);
    }

    fn remove_overlay_element(&mut self, _: &u8, element: &ElementId) {
        self.overlay.retain(|e| e != element);
        if let Some(slot) = self.elements.get_mut(*element) {
            *slot = None;
        }
    }
}

impl SystemChrome for HeadlessHost {
    fn hide_system_chrome(&mut self, _: &u8) {
        self.chrome_hidden = true;
    }

    fn show_system_chrome(&mut self, _: &u8) {
        self.chrome_hidden = false;
    }
}

impl Snapshot for HeadlessHost {
    /// The source element; the proxy simply borrows its name.
    type Bitmap = ElementId;

    fn capture_bitmap(&mut self, element: &ElementId) -> ElementId {
        *element
    }

    fn create_proxy(&mut self, bitmap: ElementId, size: Size) -> ElementId {
        let name = self
            .element(bitmap)
            .map_or_else(|| "proxy".to_owned(), |e| format!("{}'", e.name));
        self.add_element(name, Point::ZERO, size)
    }
}

impl Animator for HeadlessHost {
    fn animate(&mut self, request: AnimationRequest<ElementId>) {
        tracing::debug!(token = ?request.token, duration_ms = request.duration_ms, "animation queued");
        self.running.push(Running {
            request,
            started: self.clock,
        });
    }
}

impl TouchInterception for HeadlessHost {
    fn disallow_ancestor_interception(&mut self, _: &ElementId) {}
}

/// The headless window: its decor surface exists until [`close`](Self::close).
#[derive(Clone, Copy, Debug)]
pub struct HeadlessWindow {
    open: bool,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self { open: true }
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl HostWindow for HeadlessWindow {
    type Surface = u8;

    fn decor_surface(&self) -> Option<u8> {
        self.open.then_some(DECOR)
    }
}
