// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registration façade: attach zoom handling to target elements.
//!
//! [`ZoomRegistry`] stands in for the toolkit's "set touch listener" hook. The
//! host routes each element's pointer events, tap-recognizer ticks and
//! animation completions through it, and the registry forwards them to the
//! element's [`ZoomableTouchHandler`].
//!
//! ## Minimal example
//!
//! ```
//! use loupe::{Listeners, Registration, ZoomConfig, ZoomRegistry};
//! use loupe::host::HostWindow;
//!
//! struct Window;
//! impl HostWindow for Window {
//!     type Surface = ();
//!     fn decor_surface(&self) -> Option<()> { Some(()) }
//! }
//!
//! let mut registry: ZoomRegistry<u32, Window> = ZoomRegistry::new();
//! registry
//!     .register(
//!         Registration::new(Window, 7)
//!             .config(ZoomConfig::default().with_immersive_mode(false))
//!             .listeners(Listeners::new().on_tap(|id| println!("tapped {id}"))),
//!     )
//!     .unwrap();
//!
//! assert!(registry.is_registered(&7));
//! assert!(registry.unregister(&7).is_ok());
//! assert!(registry.is_empty());
//! ```

use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use loupe_gesture::event::PointerEvent;

use crate::animation::{AnimationToken, Easing};
use crate::config::ZoomConfig;
use crate::handler::ZoomableTouchHandler;
use crate::host::{HostWindow, ZoomHost};
use crate::listener::Listeners;

/// Error returned by [`ZoomRegistry`] operations.
#[derive(Clone, PartialEq, Eq)]
pub enum RegistryError<E> {
    /// The element has no registered handler.
    NotRegistered(E),
    /// The element's handler is zooming or animating out and cannot be replaced or removed.
    SessionActive(E),
}

impl<E: fmt::Debug> fmt::Debug for RegistryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered(e) => write!(f, "NotRegistered({e:?})"),
            Self::SessionActive(e) => write!(f, "SessionActive({e:?})"),
        }
    }
}

impl<E: fmt::Debug> fmt::Display for RegistryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered(e) => write!(f, "element {e:?} has no zoom handler registered"),
            Self::SessionActive(e) => {
                write!(f, "element {e:?} is zooming; its handler cannot be detached")
            }
        }
    }
}

impl<E: fmt::Debug> core::error::Error for RegistryError<E> {}

/// Everything needed to attach zoom handling to one element.
#[derive(Debug)]
pub struct Registration<E, C> {
    container: C,
    target: E,
    config: ZoomConfig,
    easing: Easing,
    listeners: Listeners<E>,
}

impl<E, C> Registration<E, C> {
    /// Targets `target`, living in `container`, with default options.
    #[must_use]
    pub fn new(container: C, target: E) -> Self {
        Self {
            container,
            target,
            config: ZoomConfig::default(),
            easing: Easing::default(),
            listeners: Listeners::default(),
        }
    }

    /// Sets zoom options.
    #[must_use]
    pub fn config(mut self, config: ZoomConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the closing animation curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets embedder callbacks.
    #[must_use]
    pub fn listeners(mut self, listeners: Listeners<E>) -> Self {
        self.listeners = listeners;
        self
    }
}

/// Zoom handlers keyed by target element.
#[derive(Debug)]
pub struct ZoomRegistry<E, C> {
    handlers: HashMap<E, ZoomableTouchHandler<E, C>>,
}

impl<E, C> Default for ZoomRegistry<E, C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<E, C> ZoomRegistry<E, C>
where
    E: Clone + Eq + Hash + fmt::Debug,
    C: HostWindow,
{
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a handler for the registration's target.
    ///
    /// An idle handler already attached to the same target is replaced. A
    /// handler whose zoom is live is left alone and
    /// [`RegistryError::SessionActive`] is returned.
    pub fn register(&mut self, registration: Registration<E, C>) -> Result<(), RegistryError<E>> {
        let Registration {
            container,
            target,
            config,
            easing,
            listeners,
        } = registration;

        if self
            .handlers
            .get(&target)
            .is_some_and(|h| h.session().is_live())
        {
            return Err(RegistryError::SessionActive(target));
        }

        tracing::debug!(element = ?target, "zoom handler registered");
        let handler =
            ZoomableTouchHandler::new(container, target.clone(), config, easing, listeners);
        self.handlers.insert(target, handler);
        Ok(())
    }

    /// Detaches and returns the handler for `target`.
    ///
    /// Safe while the handler is idle or has a single pointer down. Detaching
    /// during a zoom would strand the overlay, so it is refused with
    /// [`RegistryError::SessionActive`].
    pub fn unregister(
        &mut self,
        target: &E,
    ) -> Result<ZoomableTouchHandler<E, C>, RegistryError<E>> {
        match self.handlers.get(target) {
            None => return Err(RegistryError::NotRegistered(target.clone())),
            Some(handler) if handler.session().is_live() => {
                return Err(RegistryError::SessionActive(target.clone()));
            }
            Some(_) => {}
        }
        tracing::debug!(element = ?target, "zoom handler unregistered");
        self.handlers
            .remove(target)
            .ok_or_else(|| RegistryError::NotRegistered(target.clone()))
    }

    /// Returns `true` if `target` has a handler.
    #[must_use]
    pub fn is_registered(&self, target: &E) -> bool {
        self.handlers.contains_key(target)
    }

    /// The handler for `target`, if any.
    #[must_use]
    pub fn handler(&self, target: &E) -> Option<&ZoomableTouchHandler<E, C>> {
        self.handlers.get(target)
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Routes a pointer event to `target`'s handler.
    ///
    /// Returns whether the event was consumed; events for unregistered
    /// elements are not.
    pub fn handle_pointer<H>(&mut self, host: &mut H, target: &E, event: &PointerEvent) -> bool
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        self.handlers
            .get_mut(target)
            .is_some_and(|handler| handler.handle_pointer(host, event))
    }

    /// Fires tap recognizer deadlines due by `now` on every handler.
    pub fn advance(&mut self, now: u64) {
        for handler in self.handlers.values_mut() {
            handler.advance(now);
        }
    }

    /// Routes a closing animation completion to `target`'s handler.
    ///
    /// Returns `true` if it triggered teardown.
    pub fn animation_finished<H>(&mut self, host: &mut H, target: &E, token: AnimationToken) -> bool
    where
        H: ZoomHost<Element = E, Surface = C::Surface>,
    {
        self.handlers
            .get_mut(target)
            .is_some_and(|handler| handler.animation_finished(host, token))
    }
}
