// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Embedder callbacks.

use core::fmt;

type Callback<E> = Box<dyn FnMut(&E)>;

/// Optional callbacks invoked with the registered target element.
///
/// Tap, long-press and double-tap fire whenever their recognizer does,
/// regardless of zoom state.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use loupe::Listeners;
///
/// let taps = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&taps);
/// let mut listeners = Listeners::<u32>::new().on_tap(move |_| counter.set(counter.get() + 1));
///
/// listeners.tap(&7);
/// listeners.long_press(&7); // no callback installed: nothing happens
/// assert_eq!(taps.get(), 1);
/// ```
pub struct Listeners<E> {
    tap: Option<Callback<E>>,
    long_press: Option<Callback<E>>,
    double_tap: Option<Callback<E>>,
    started_zooming: Option<Callback<E>>,
    ended_zooming: Option<Callback<E>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            tap: None,
            long_press: None,
            double_tap: None,
            started_zooming: None,
            ended_zooming: None,
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("tap", &self.tap.is_some())
            .field("long_press", &self.long_press.is_some())
            .field("double_tap", &self.double_tap.is_some())
            .field("started_zooming", &self.started_zooming.is_some())
            .field("ended_zooming", &self.ended_zooming.is_some())
            .finish()
    }
}

impl<E> Listeners<E> {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on a confirmed single tap.
    #[must_use]
    pub fn on_tap(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.tap = Some(Box::new(f));
        self
    }

    /// Called when a press is held past the long-press timeout.
    #[must_use]
    pub fn on_long_press(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.long_press = Some(Box::new(f));
        self
    }

    /// Called on the second down of a double tap.
    #[must_use]
    pub fn on_double_tap(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.double_tap = Some(Box::new(f));
        self
    }

    /// Called once the overlay is up and the target hidden.
    #[must_use]
    pub fn on_view_started_zooming(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.started_zooming = Some(Box::new(f));
        self
    }

    /// Called once the overlay is gone and the target visible again.
    #[must_use]
    pub fn on_view_ended_zooming(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.ended_zooming = Some(Box::new(f));
        self
    }

    /// Invokes the tap callback, if any.
    pub fn tap(&mut self, target: &E) {
        fire(&mut self.tap, target);
    }

    /// Invokes the long-press callback, if any.
    pub fn long_press(&mut self, target: &E) {
        fire(&mut self.long_press, target);
    }

    /// Invokes the double-tap callback, if any.
    pub fn double_tap(&mut self, target: &E) {
        fire(&mut self.double_tap, target);
    }

    /// Invokes the zoom-started callback, if any.
    pub fn started_zooming(&mut self, target: &E) {
        fire(&mut self.started_zooming, target);
    }

    /// Invokes the zoom-ended callback, if any.
    pub fn ended_zooming(&mut self, target: &E) {
        fire(&mut self.ended_zooming, target);
    }
}

fn fire<E>(slot: &mut Option<Callback<E>>, target: &E) {
    if let Some(f) = slot {
        f(target);
    }
}
