// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless pinch.
//!
//! Script a two-finger pinch over an image element, step the closing
//! animation frame by frame and print the scene as it changes.
//!
//! Run:
//! - `cargo run -p loupe_demos --example headless_pinch`

use kurbo::{Point, Size, Vec2};
use loupe::animation::Easing;
use loupe::loupe_gesture::event::{PointerAction, PointerEvent};
use loupe::{Listeners, Registration, ZoomConfig, ZoomRegistry};
use loupe_demos::{ElementId, HeadlessHost, HeadlessWindow};

const FRAME_MS: u64 = 16;

fn pinch(action: PointerAction, time: u64, mid: Point, span: f64) -> PointerEvent {
    let half = span / 2.0;
    PointerEvent::from_positions(
        action,
        time,
        &[
            Point::new(mid.x - half, mid.y),
            Point::new(mid.x + half, mid.y),
        ],
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut host = HeadlessHost::new();
    let photo = host.add_element("photo", Point::new(40.0, 120.0), Size::new(320.0, 240.0));

    let mut registry: ZoomRegistry<ElementId, HeadlessWindow> = ZoomRegistry::new();
    let registered = registry.register(
        Registration::new(HeadlessWindow::new(), photo)
            .config(ZoomConfig::default().with_closing_animation_ms(200))
            .easing(Easing::Decelerate)
            .listeners(
                Listeners::new()
                    .on_tap(|id| println!("tap on #{id}"))
                    .on_view_started_zooming(|id| println!("#{id} started zooming"))
                    .on_view_ended_zooming(|id| println!("#{id} ended zooming")),
            ),
    );
    if let Err(err) = registered {
        eprintln!("{err}");
        return;
    }

    let mid = Point::new(200.0, 240.0);
    let script = [
        PointerEvent::from_positions(PointerAction::Down, 0, &[Point::new(180.0, 240.0)]),
        pinch(PointerAction::PointerDown, 30, mid, 40.0),
        pinch(PointerAction::Move, 60, mid + Vec2::new(10.0, -20.0), 80.0),
        pinch(PointerAction::Move, 90, mid + Vec2::new(25.0, -40.0), 140.0),
        pinch(PointerAction::Move, 120, mid + Vec2::new(30.0, -50.0), 200.0),
        pinch(PointerAction::PointerUp, 150, mid + Vec2::new(30.0, -50.0), 200.0),
        PointerEvent::from_positions(PointerAction::Up, 160, &[Point::new(330.0, 190.0)]),
    ];

    for event in &script {
        host.set_time(event.time);
        registry.handle_pointer(&mut host, &photo, event);
        println!("t={} {:?}\n{host}", event.time, event.action);
    }

    let mut now = host.time();
    while host.is_animating() {
        now += FRAME_MS;
        registry.advance(now);
        for token in host.step(now) {
            registry.animation_finished(&mut host, &photo, token);
        }
        println!("t={now} frame\n{host}");
    }

    let state = registry.handler(&photo).map(|h| h.state());
    println!("final state: {state:?}");
}
