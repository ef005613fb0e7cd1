use std::mem;
use std::ptr;

use gd_core::ports::{CompositorError, CompositorPort, MicaVariant, Rgba};
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use tracing::debug;
use winapi::shared::minwindef::{DWORD, TRUE};
use winapi::shared::windef::HWND;
use winapi::shared::winerror::SUCCEEDED;
use winapi::um::dwmapi::{
    DwmEnableBlurBehindWindow, DwmExtendFrameIntoClientArea, DwmSetWindowAttribute, DWM_BB_ENABLE,
    DWM_BLURBEHIND,
};
use winapi::um::uxtheme::MARGINS;
use winapi::um::winuser::{
    GetWindowLongPtrW, SetWindowLongPtrW, CS_DBLCLKS, GWL_STYLE, WS_CAPTION, WS_MAXIMIZEBOX,
    WS_MINIMIZEBOX, WS_THICKFRAME,
};

/// DWM-backed compositor for one top-level window.
pub struct DwmCompositor<W> {
    window: W,
}

impl<W> DwmCompositor<W>
where
    W: HasWindowHandle + Send + Sync,
{
    pub fn new(window: W) -> Self {
        Self { window }
    }

    fn hwnd(&self) -> Result<HWND, CompositorError> {
        let handle = self
            .window
            .window_handle()
            .map_err(|_| CompositorError::NoWindowHandle)?;
        match handle.as_raw() {
            RawWindowHandle::Win32(h) => Ok(h.hwnd.get() as HWND),
            _ => Err(CompositorError::NoWindowHandle),
        }
    }
}

fn vibrancy(call: &'static str, result: Result<(), window_vibrancy::Error>) -> Result<(), CompositorError> {
    result.map_err(|e| CompositorError::CallFailed {
        call,
        message: e.to_string(),
    })
}

fn hresult(call: &'static str, hr: i32) -> Result<(), CompositorError> {
    if SUCCEEDED(hr) {
        Ok(())
    } else {
        Err(CompositorError::CallFailed {
            call,
            message: format!("HRESULT 0x{:08X}", hr as u32),
        })
    }
}

impl<W> CompositorPort for DwmCompositor<W>
where
    W: HasWindowHandle + Send + Sync,
{
    fn remove_background_effect(&self) -> Result<(), CompositorError> {
        // Only the accent-policy reset is mandatory; the backdrop clears
        // fail on builds that never had them.
        vibrancy("clear_blur", window_vibrancy::clear_blur(&self.window))?;
        for (call, result) in [
            ("clear_acrylic", window_vibrancy::clear_acrylic(&self.window)),
            ("clear_mica", window_vibrancy::clear_mica(&self.window)),
            ("clear_tabbed", window_vibrancy::clear_tabbed(&self.window)),
        ] {
            if let Err(e) = result {
                debug!(call, error = %e, "backdrop clear skipped");
            }
        }
        Ok(())
    }

    fn set_acrylic(&self, tint: Rgba) -> Result<(), CompositorError> {
        vibrancy(
            "apply_acrylic",
            window_vibrancy::apply_acrylic(&self.window, Some(tint.as_tuple())),
        )
    }

    fn set_mica(&self, is_dark: bool, variant: MicaVariant) -> Result<(), CompositorError> {
        match variant {
            MicaVariant::Alt => vibrancy(
                "apply_tabbed",
                window_vibrancy::apply_tabbed(&self.window, Some(is_dark)),
            ),
            MicaVariant::Standard | MicaVariant::Blur => vibrancy(
                "apply_mica",
                window_vibrancy::apply_mica(&self.window, Some(is_dark)),
            ),
        }
    }

    fn set_window_attribute(&self, attribute: u32, value: i32) -> Result<(), CompositorError> {
        let hwnd = self.hwnd()?;
        let hr = unsafe {
            DwmSetWindowAttribute(
                hwnd,
                attribute as DWORD,
                &value as *const i32 as *const _,
                mem::size_of::<i32>() as DWORD,
            )
        };
        hresult("DwmSetWindowAttribute", hr)
    }

    fn set_aero(&self) -> Result<(), CompositorError> {
        vibrancy("apply_blur", window_vibrancy::apply_blur(&self.window, None))
    }

    fn enable_blur_behind(&self) -> Result<(), CompositorError> {
        let hwnd = self.hwnd()?;
        let blur = DWM_BLURBEHIND {
            dwFlags: DWM_BB_ENABLE,
            fEnable: TRUE,
            hRgnBlur: ptr::null_mut(),
            fTransitionOnMaximized: 0,
        };
        let hr = unsafe { DwmEnableBlurBehindWindow(hwnd, &blur) };
        hresult("DwmEnableBlurBehindWindow", hr)
    }

    fn add_window_animation(&self) -> Result<(), CompositorError> {
        let hwnd = self.hwnd()?;
        let extra = (WS_MINIMIZEBOX | WS_MAXIMIZEBOX | WS_CAPTION | CS_DBLCLKS | WS_THICKFRAME) as isize;
        unsafe {
            let style = GetWindowLongPtrW(hwnd, GWL_STYLE);
            SetWindowLongPtrW(hwnd, GWL_STYLE, style | extra);
        }
        Ok(())
    }

    fn add_shadow(&self) -> Result<(), CompositorError> {
        let hwnd = self.hwnd()?;
        let margins = MARGINS {
            cxLeftWidth: -1,
            cxRightWidth: -1,
            cyTopHeight: -1,
            cyBottomHeight: -1,
        };
        let hr = unsafe { DwmExtendFrameIntoClientArea(hwnd, &margins) };
        hresult("DwmExtendFrameIntoClientArea", hr)
    }
}
