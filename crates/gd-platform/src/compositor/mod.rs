//! Compositor adapters.
//!
//! On Windows the real implementation drives DWM through `window-vibrancy`
//! and raw `dwmapi` calls. Everywhere else every call reports
//! [`CompositorError::Unsupported`]; the effect applier never reaches it
//! because the capability table disables effects off Windows.

use std::sync::Arc;

use gd_core::ports::{CompositorError, CompositorPort, MicaVariant, Rgba};

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use windows::DwmCompositor;

/// Compositor for platforms (and headless runs) without DWM.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCompositor;

impl CompositorPort for NoopCompositor {
    fn remove_background_effect(&self) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }

    fn set_acrylic(&self, _tint: Rgba) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }

    fn set_mica(&self, _is_dark: bool, _variant: MicaVariant) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }

    fn set_window_attribute(&self, _attribute: u32, _value: i32) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }

    fn set_aero(&self) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }

    fn enable_blur_behind(&self) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }

    fn add_window_animation(&self) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }

    fn add_shadow(&self) -> Result<(), CompositorError> {
        Err(CompositorError::Unsupported)
    }
}

/// Compositor for a native window owned by the GUI host.
#[cfg(windows)]
pub fn native_compositor<W>(window: W) -> Arc<dyn CompositorPort>
where
    W: raw_window_handle::HasWindowHandle + Send + Sync + 'static,
{
    Arc::new(DwmCompositor::new(window))
}

/// Compositor for a native window owned by the GUI host.
#[cfg(not(windows))]
pub fn native_compositor<W>(_window: W) -> Arc<dyn CompositorPort>
where
    W: Send + Sync + 'static,
{
    Arc::new(NoopCompositor)
}
