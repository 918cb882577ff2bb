// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared recording host for the zoom integration tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test file uses every helper."
)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use kurbo::{Point, Size};
use loupe::animation::AnimationRequest;
use loupe::host::{
    Animator, ElementHost, HostWindow, OverlaySurface, Snapshot, SystemChrome, TargetContainer,
    TouchInterception,
};
use loupe::loupe_gesture::event::{PointerAction, PointerEvent};
use loupe::{Listeners, ZoomConfig, ZoomableTouchHandler};
use peniko::Color;

pub(crate) const TARGET: u32 = 1;
pub(crate) const SURFACE: u32 = 10;
pub(crate) const TARGET_POSITION: Point = Point::new(50.0, 50.0);
pub(crate) const TARGET_SIZE: Size = Size::new(200.0, 100.0);

/// Every host call, in order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Capture(u32),
    CreateProxy(u32, Size),
    CreateBackdrop(u32),
    Add(u32, u32),
    Remove(u32, u32),
    Visible(u32, bool),
    Position(u32, Point),
    Scale(u32, f64),
    Fill(u32, Color),
    HideChrome(u32),
    ShowChrome(u32),
    DisallowIntercept(u32),
    Animate(u64),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) ops: Vec<Op>,
    pub(crate) overlay: Vec<u32>,
    pub(crate) visible: HashMap<u32, bool>,
    pub(crate) positions: HashMap<u32, Point>,
    pub(crate) scales: HashMap<u32, f64>,
    pub(crate) fills: HashMap<u32, Color>,
    pub(crate) chrome_hidden: bool,
    pub(crate) animations: Vec<AnimationRequest<u32>>,
    next_element: u32,
}

impl RecordingHost {
    pub(crate) fn new() -> Self {
        Self {
            next_element: 100,
            ..Self::default()
        }
    }

    pub(crate) fn target_visible(&self) -> bool {
        self.visible.get(&TARGET).copied().unwrap_or(true)
    }

    pub(crate) fn last_animation(&self) -> &AnimationRequest<u32> {
        self.animations.last().expect("an animation was requested")
    }

    fn mint(&mut self) -> u32 {
        let id = self.next_element;
        self.next_element += 1;
        id
    }
}

impl ElementHost for RecordingHost {
    type Element = u32;

    fn element_size(&self, _: &u32) -> Size {
        TARGET_SIZE
    }

    fn element_window_position(&self, _: &u32) -> Point {
        TARGET_POSITION
    }

    fn set_element_visible(&mut self, element: &u32, visible: bool) {
        self.ops.push(Op::Visible(*element, visible));
        self.visible.insert(*element, visible);
    }

    fn set_element_position(&mut self, element: &u32, position: Point) {
        self.ops.push(Op::Position(*element, position));
        self.positions.insert(*element, position);
    }

    fn set_element_scale(&mut self, element: &u32, scale: f64) {
        self.ops.push(Op::Scale(*element, scale));
        self.scales.insert(*element, scale);
    }

    fn set_element_fill(&mut self, element: &u32, color: Color) {
        self.ops.push(Op::Fill(*element, color));
        self.fills.insert(*element, color);
    }
}

impl OverlaySurface for RecordingHost {
    type Surface = u32;

    fn create_backdrop(&mut self) -> u32 {
        let id = self.mint();
        self.ops.push(Op::CreateBackdrop(id));
        id
    }

    fn add_overlay_element(&mut self, surface: &u32, element: &u32) {
        self.ops.push(Op::Add(*surface, *element));
        self.overlay.push(*element);
    }

    fn remove_overlay_element(&mut self, surface: &u32, element: &u32) {
        self.ops.push(Op::Remove(*surface, *element));
        self.overlay.retain(|e| e != element);
    }
}

impl SystemChrome for RecordingHost {
    fn hide_system_chrome(&mut self, surface: &u32) {
        self.ops.push(Op::HideChrome(*surface));
        self.chrome_hidden = true;
    }

    fn show_system_chrome(&mut self, surface: &u32) {
        self.ops.push(Op::ShowChrome(*surface));
        self.chrome_hidden = false;
    }
}

impl Snapshot for RecordingHost {
    type Bitmap = u32;

    fn capture_bitmap(&mut self, element: &u32) -> u32 {
        self.ops.push(Op::Capture(*element));
        *element
    }

    fn create_proxy(&mut self, _bitmap: u32, size: Size) -> u32 {
        let id = self.mint();
        self.ops.push(Op::CreateProxy(id, size));
        id
    }
}

impl Animator for RecordingHost {
    fn animate(&mut self, request: AnimationRequest<u32>) {
        self.ops.push(Op::Animate(request.token.0));
        self.animations.push(request);
    }
}

impl TouchInterception for RecordingHost {
    fn disallow_ancestor_interception(&mut self, element: &u32) {
        self.ops.push(Op::DisallowIntercept(*element));
    }
}

/// A window whose decor surface can be torn down from the test.
#[derive(Clone, Debug)]
pub(crate) struct TestWindow {
    pub(crate) surface: Rc<Cell<Option<u32>>>,
}

impl TestWindow {
    pub(crate) fn open() -> Self {
        Self {
            surface: Rc::new(Cell::new(Some(SURFACE))),
        }
    }

    pub(crate) fn close(&self) {
        self.surface.set(None);
    }
}

impl HostWindow for TestWindow {
    type Surface = u32;

    fn decor_surface(&self) -> Option<u32> {
        self.surface.get()
    }
}

pub(crate) type Container = TargetContainer<TestWindow, TestWindow>;
pub(crate) type Handler = ZoomableTouchHandler<u32, Container>;
pub(crate) type Log = Rc<RefCell<Vec<&'static str>>>;

/// Listeners that append their name to a shared log.
pub(crate) fn recording_listeners() -> (Listeners<u32>, Log) {
    let log: Log = Rc::default();
    let push = |name: &'static str| {
        let log = Rc::clone(&log);
        move |_: &u32| log.borrow_mut().push(name)
    };
    let listeners = Listeners::new()
        .on_tap(push("tap"))
        .on_long_press(push("long_press"))
        .on_double_tap(push("double_tap"))
        .on_view_started_zooming(push("started"))
        .on_view_ended_zooming(push("ended"));
    (listeners, log)
}

/// A handler on an open window plus its window handle and listener log.
pub(crate) fn handler(config: ZoomConfig) -> (Handler, TestWindow, Log) {
    let window = TestWindow::open();
    let (listeners, log) = recording_listeners();
    let handler = ZoomableTouchHandler::new(
        TargetContainer::Window(window.clone()),
        TARGET,
        config,
        loupe::animation::Easing::default(),
        listeners,
    );
    (handler, window, log)
}

pub(crate) fn down(time: u64, p: Point) -> PointerEvent {
    PointerEvent::from_positions(PointerAction::Down, time, &[p])
}

pub(crate) fn up(time: u64, p: Point) -> PointerEvent {
    PointerEvent::from_positions(PointerAction::Up, time, &[p])
}

pub(crate) fn two(action: PointerAction, time: u64, a: Point, b: Point) -> PointerEvent {
    PointerEvent::from_positions(action, time, &[a, b])
}

/// Two pointers centred on `mid`, `span` apart horizontally.
pub(crate) fn pinch(action: PointerAction, time: u64, mid: Point, span: f64) -> PointerEvent {
    let half = span / 2.0;
    two(
        action,
        time,
        Point::new(mid.x - half, mid.y),
        Point::new(mid.x + half, mid.y),
    )
}

/// Down, then a second pointer down centred on `mid`: the handler ends up zooming.
pub(crate) fn start_pinch(handler: &mut Handler, host: &mut RecordingHost, mid: Point, span: f64) {
    let first = Point::new(mid.x - span / 2.0, mid.y);
    handler.handle_pointer(host, &down(0, first));
    handler.handle_pointer(host, &pinch(PointerAction::PointerDown, 10, mid, span));
}
