// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host collaborator contracts.
//!
//! The zoom handler never draws, animates or walks a view tree itself. It
//! asks the host toolkit through these traits, each covering one concern:
//!
//! - [`ElementHost`]: query and mutate visual elements (size, position, scale, fill, visibility).
//! - [`OverlaySurface`]: create the backdrop and add/remove elements on a top-level surface.
//! - [`SystemChrome`]: hide and restore status/navigation bars for immersive zooming.
//! - [`Snapshot`]: capture an element into a bitmap and wrap it in a proxy element.
//! - [`Animator`]: run closing animations on the host's frame scheduler.
//! - [`TouchInterception`]: stop ancestors from stealing the pointer stream.
//!
//! [`ZoomHost`] bundles them and is implemented automatically for any type
//! implementing all six.
//!
//! Which top-level surface receives the overlay is decided by a
//! [`HostWindow`], usually a [`TargetContainer`] naming the window or dialog
//! the target lives in. A window that has already been torn down reports no
//! surface, and every surface operation is then skipped.

use core::fmt::Debug;

use kurbo::{Point, Size};
use peniko::Color;

use crate::animation::AnimationRequest;

/// Element queries and mutations.
pub trait ElementHost {
    /// Handle to a visual element owned by the host.
    type Element: Clone + Debug;

    /// Current laid-out size of `element`.
    fn element_size(&self, element: &Self::Element) -> Size;

    /// Top-left of `element` in window coordinates, in whole pixels.
    fn element_window_position(&self, element: &Self::Element) -> Point;

    /// Shows or hides `element` without removing it from its layout.
    fn set_element_visible(&mut self, element: &Self::Element, visible: bool);

    /// Moves `element` to `position` in its surface's coordinates.
    fn set_element_position(&mut self, element: &Self::Element, position: Point);

    /// Applies a uniform scale to `element`.
    fn set_element_scale(&mut self, element: &Self::Element, scale: f64);

    /// Sets the solid background fill of `element`.
    fn set_element_fill(&mut self, element: &Self::Element, color: Color);
}

/// A top-level rendering surface for overlay elements.
pub trait OverlaySurface: ElementHost {
    /// Handle to a window's top-level (decor) surface.
    type Surface;

    /// Creates a full-surface dimming element with no fill.
    fn create_backdrop(&mut self) -> Self::Element;

    /// Inserts `element` at the top of `surface`'s rendering stack.
    fn add_overlay_element(&mut self, surface: &Self::Surface, element: &Self::Element);

    /// Removes `element` from `surface` and releases it.
    fn remove_overlay_element(&mut self, surface: &Self::Surface, element: &Self::Element);
}

/// System chrome (status and navigation bars) control.
pub trait SystemChrome: OverlaySurface {
    /// Hides system chrome for the window owning `surface`.
    fn hide_system_chrome(&mut self, surface: &Self::Surface);

    /// Restores system chrome for the window owning `surface`.
    fn show_system_chrome(&mut self, surface: &Self::Surface);
}

/// Bitmap snapshotting.
pub trait Snapshot: ElementHost {
    /// Pixel data captured from an element.
    type Bitmap;

    /// Renders `element` into a bitmap sized to its current bounds.
    fn capture_bitmap(&mut self, element: &Self::Element) -> Self::Bitmap;

    /// Creates a detached element of `size` displaying `bitmap`.
    fn create_proxy(&mut self, bitmap: Self::Bitmap, size: Size) -> Self::Element;
}

/// Animation engine.
pub trait Animator: ElementHost {
    /// Starts `request` on the host's frame scheduler.
    ///
    /// The host reports completion exactly once, on the UI thread, by
    /// passing `request.token` back to the handler that issued it.
    fn animate(&mut self, request: AnimationRequest<Self::Element>);
}

/// Touch-interception control.
pub trait TouchInterception: ElementHost {
    /// Walks from `element` to the root, telling every ancestor not to
    /// intercept the ongoing pointer stream.
    fn disallow_ancestor_interception(&mut self, element: &Self::Element);
}

/// Everything the zoom handler needs from its host.
pub trait ZoomHost: SystemChrome + Snapshot + Animator + TouchInterception {}

impl<T> ZoomHost for T where T: SystemChrome + Snapshot + Animator + TouchInterception {}

/// Resolves the top-level surface that overlay elements are added to.
pub trait HostWindow {
    /// The surface handle.
    type Surface;

    /// The window's decor surface, or `None` once the window is gone.
    fn decor_surface(&self) -> Option<Self::Surface>;
}

/// The kind of window a zoom target lives in.
///
/// Both variants resolve to the same [`HostWindow::decor_surface`]
/// capability; a dialog sits above its parent window, so its overlay must go
/// on the dialog's own surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetContainer<W, D> {
    /// An application window.
    Window(W),
    /// A dialog window.
    Dialog(D),
}

impl<W, D> HostWindow for TargetContainer<W, D>
where
    W: HostWindow,
    D: HostWindow<Surface = W::Surface>,
{
    type Surface = W::Surface;

    fn decor_surface(&self) -> Option<Self::Surface> {
        match self {
            Self::Window(window) => window.decor_surface(),
            Self::Dialog(dialog) => dialog.decor_surface(),
        }
    }
}
