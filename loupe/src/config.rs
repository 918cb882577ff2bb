// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-registration zoom options.

use loupe_gesture::scale::ScaleConfig;
use loupe_gesture::tap::TapConfig;

/// Options captured when a target is registered; immutable afterwards.
///
/// ```
/// use loupe::ZoomConfig;
///
/// let config = ZoomConfig::default()
///     .with_immersive_mode(false)
///     .with_closing_animation_ms(200);
///
/// assert!(config.zoom_animation_enabled);
/// assert!(!config.immersive_mode_enabled);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Animate the proxy back to the target on release. Default `true`.
    pub zoom_animation_enabled: bool,
    /// Hide system chrome while zooming. Default `true`.
    pub immersive_mode_enabled: bool,
    /// Closing animation duration in milliseconds. Default `300`.
    pub closing_animation_ms: u64,
    /// Tap, long-press and double-tap tolerances.
    pub tap: TapConfig,
    /// Pinch-scale tolerances.
    pub scale: ScaleConfig,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            zoom_animation_enabled: true,
            immersive_mode_enabled: true,
            closing_animation_ms: 300,
            tap: TapConfig::default(),
            scale: ScaleConfig::default(),
        }
    }
}

impl ZoomConfig {
    /// Sets whether the closing animation runs.
    #[must_use]
    pub fn with_zoom_animation(mut self, enabled: bool) -> Self {
        self.zoom_animation_enabled = enabled;
        self
    }

    /// Sets whether system chrome is hidden while zooming.
    #[must_use]
    pub fn with_immersive_mode(mut self, enabled: bool) -> Self {
        self.immersive_mode_enabled = enabled;
        self
    }

    /// Sets the closing animation duration.
    #[must_use]
    pub fn with_closing_animation_ms(mut self, ms: u64) -> Self {
        self.closing_animation_ms = ms;
        self
    }

    /// Sets tap recognition tolerances.
    #[must_use]
    pub fn with_tap(mut self, tap: TapConfig) -> Self {
        self.tap = tap;
        self
    }

    /// Sets pinch-scale tolerances.
    #[must_use]
    pub fn with_scale(mut self, scale: ScaleConfig) -> Self {
        self.scale = scale;
        self
    }
}
