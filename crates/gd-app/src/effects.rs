//! Background-effect applier.
//!
//! Issues the compositor call sequence for one `(effect, is_dark)` pair.
//! Failures never leave this module: a missing effect only costs the
//! window its translucency.

use std::sync::Arc;

use gd_core::ports::compositor::{DWMSBT_TRANSIENTWINDOW, DWMWA_SYSTEMBACKDROP_TYPE};
use gd_core::ports::{CaptionButton, CompositorError, CompositorPort, MicaVariant, Rgba, WindowPort};
use gd_core::{BackgroundEffectKind, EffectCapabilities};
use tracing::{debug, warn};

pub const ACRYLIC_TINT_DARK: Rgba = Rgba::new(0x00, 0x00, 0x00, 0x30);
pub const ACRYLIC_TINT_LIGHT: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0x30);

pub const DARK_BACKGROUND: Rgba = Rgba::new(32, 32, 32, 0xFF);
pub const LIGHT_BACKGROUND: Rgba = Rgba::new(243, 243, 243, 0xFF);
pub const TRANSPARENT_BACKGROUND: Rgba = Rgba::new(0, 0, 0, 0);

/// Colour painted behind the client area: opaque theme colour when no
/// effect is active, fully transparent otherwise.
pub fn normal_background_color(transparent: bool, is_dark: bool) -> Rgba {
    match (transparent, is_dark) {
        (true, _) => TRANSPARENT_BACKGROUND,
        (false, true) => DARK_BACKGROUND,
        (false, false) => LIGHT_BACKGROUND,
    }
}

pub struct BackgroundEffectApplier {
    compositor: Arc<dyn CompositorPort>,
    window: Arc<dyn WindowPort>,
    capabilities: EffectCapabilities,
}

impl BackgroundEffectApplier {
    pub fn new(
        compositor: Arc<dyn CompositorPort>,
        window: Arc<dyn WindowPort>,
        capabilities: EffectCapabilities,
    ) -> Self {
        Self {
            compositor,
            window,
            capabilities,
        }
    }

    pub fn capabilities(&self) -> &EffectCapabilities {
        &self.capabilities
    }

    /// Apply `requested` for the given appearance.
    ///
    /// Returns the effect that was actually rendered, after capability
    /// degradation. Returns `None` kind without touching anything on
    /// platforms without a compositor.
    pub fn apply(&self, requested: BackgroundEffectKind, is_dark: bool) -> BackgroundEffectKind {
        if !self.capabilities.effects_enabled() {
            return BackgroundEffectKind::None;
        }

        let effect = self.capabilities.effective(requested);
        if effect != requested {
            debug!(
                requested = %requested,
                os = ?self.capabilities.os(),
                "background effect unsupported, falling back to none"
            );
        }

        log_failure("remove_background_effect", self.compositor.remove_background_effect());
        self.window.set_transparent_background(effect.needs_transparent_background());

        match effect {
            BackgroundEffectKind::Acrylic => {
                let tint = if is_dark {
                    ACRYLIC_TINT_DARK
                } else {
                    ACRYLIC_TINT_LIGHT
                };
                log_failure("set_acrylic", self.compositor.set_acrylic(tint));
            }
            BackgroundEffectKind::Mica => {
                log_failure("set_mica", self.compositor.set_mica(is_dark, MicaVariant::Standard));
            }
            BackgroundEffectKind::MicaAlt => {
                log_failure("set_mica", self.compositor.set_mica(is_dark, MicaVariant::Alt));
            }
            BackgroundEffectKind::MicaBlur => {
                log_failure("set_mica", self.compositor.set_mica(is_dark, MicaVariant::Blur));
                log_failure(
                    "set_window_attribute",
                    self.compositor
                        .set_window_attribute(DWMWA_SYSTEMBACKDROP_TYPE, DWMSBT_TRANSIENTWINDOW),
                );
            }
            BackgroundEffectKind::Aero => {
                log_failure("set_aero", self.compositor.set_aero());
                if self.capabilities.hides_caption_buttons_for_aero() {
                    self.set_caption_buttons_visible(false);
                }
            }
            BackgroundEffectKind::None => {
                if self.capabilities.hides_caption_buttons_for_aero() {
                    self.set_caption_buttons_visible(true);
                }
            }
        }

        effect
    }

    fn set_caption_buttons_visible(&self, visible: bool) {
        for button in CaptionButton::ALL {
            self.window.set_caption_button_visible(button, visible);
        }
    }
}

fn log_failure(call: &'static str, result: Result<(), CompositorError>) {
    if let Err(e) = result {
        warn!(call, error = %e, "compositor call failed");
    }
}
