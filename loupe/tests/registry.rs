// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `ZoomRegistry`: attaching, detaching and routing.

mod common;

use common::{Container, RecordingHost, TARGET, TestWindow, down, pinch, recording_listeners};
use kurbo::Point;
use loupe::loupe_gesture::event::PointerAction;
use loupe::{Registration, RegistryError, ZoomConfig, ZoomRegistry, ZoomState};

const MID: Point = Point::new(100.0, 100.0);

fn registration(config: ZoomConfig) -> Registration<u32, Container> {
    Registration::new(Container::Window(TestWindow::open()), TARGET).config(config)
}

fn zoom(registry: &mut ZoomRegistry<u32, Container>, host: &mut RecordingHost) {
    registry.handle_pointer(host, &TARGET, &down(0, Point::new(80.0, 100.0)));
    registry.handle_pointer(host, &TARGET, &pinch(PointerAction::PointerDown, 10, MID, 40.0));
}

#[test]
fn register_and_unregister() {
    let mut registry = ZoomRegistry::new();
    assert!(registry.is_empty());

    registry
        .register(registration(ZoomConfig::default()))
        .expect("first registration succeeds");
    assert!(registry.is_registered(&TARGET));
    assert_eq!(registry.len(), 1);

    let handler = registry.unregister(&TARGET).expect("idle handler detaches");
    assert_eq!(*handler.target(), TARGET);
    assert!(registry.is_empty());
    assert_eq!(
        registry.unregister(&TARGET).err(),
        Some(RegistryError::NotRegistered(TARGET))
    );
}

#[test]
fn reregistering_an_idle_target_replaces_its_options() {
    let mut registry = ZoomRegistry::new();
    registry
        .register(registration(ZoomConfig::default()))
        .expect("registers");
    registry
        .register(registration(ZoomConfig::default().with_zoom_animation(false)))
        .expect("idle handler is replaced");

    assert_eq!(registry.len(), 1);
    let handler = registry.handler(&TARGET).expect("registered");
    assert!(!handler.config().zoom_animation_enabled);
}

#[test]
fn live_session_blocks_replace_and_detach() {
    let mut host = RecordingHost::new();
    let mut registry = ZoomRegistry::new();
    registry
        .register(registration(ZoomConfig::default()))
        .expect("registers");
    zoom(&mut registry, &mut host);

    assert_eq!(
        registry.register(registration(ZoomConfig::default())).err(),
        Some(RegistryError::SessionActive(TARGET))
    );
    assert_eq!(
        registry.unregister(&TARGET).err(),
        Some(RegistryError::SessionActive(TARGET))
    );

    // Animating out still counts as live.
    registry.handle_pointer(
        &mut host,
        &TARGET,
        &pinch(PointerAction::PointerUp, 20, MID, 40.0),
    );
    assert!(registry.unregister(&TARGET).is_err());

    let token = host.last_animation().token;
    assert!(registry.animation_finished(&mut host, &TARGET, token));
    assert!(registry.unregister(&TARGET).is_ok());
}

#[test]
fn events_for_unknown_elements_are_not_consumed() {
    let mut host = RecordingHost::new();
    let mut registry: ZoomRegistry<u32, Container> = ZoomRegistry::new();

    assert!(!registry.handle_pointer(&mut host, &99, &down(0, MID)));
    assert!(!registry.animation_finished(&mut host, &99, loupe::animation::AnimationToken(0)));
    assert!(host.ops.is_empty());
}

#[test]
fn routes_events_and_ticks_to_the_right_handler() {
    let mut host = RecordingHost::new();
    let mut registry = ZoomRegistry::new();
    let (listeners, log) = recording_listeners();
    registry
        .register(registration(ZoomConfig::default()).listeners(listeners))
        .expect("registers");
    registry
        .register(Registration::new(Container::Window(TestWindow::open()), 2))
        .expect("registers");

    assert!(registry.handle_pointer(&mut host, &TARGET, &down(0, MID)));
    assert_eq!(
        registry.handler(&TARGET).map(|h| h.state()),
        Some(ZoomState::PointerDown)
    );
    assert_eq!(registry.handler(&2).map(|h| h.state()), Some(ZoomState::Idle));

    registry.advance(600);
    assert_eq!(*log.borrow(), ["long_press"]);
}

#[test]
fn error_messages_name_the_element() {
    let err: RegistryError<u32> = RegistryError::SessionActive(7);
    assert_eq!(
        err.to_string(),
        "element 7 is zooming; its handler cannot be detached"
    );
    let err: RegistryError<u32> = RegistryError::NotRegistered(7);
    assert_eq!(err.to_string(), "element 7 has no zoom handler registered");
}
