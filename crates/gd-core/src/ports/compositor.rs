use crate::ports::errors::CompositorError;

/// `DWMWA_SYSTEMBACKDROP_TYPE`
pub const DWMWA_SYSTEMBACKDROP_TYPE: u32 = 38;

/// `DWMSBT_TRANSIENTWINDOW`
pub const DWMSBT_TRANSIENTWINDOW: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `RRGGBBAA`, the notation used for acrylic tints.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    pub fn as_tuple(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MicaVariant {
    Standard,
    /// Mica with blur; paired with a system backdrop attribute.
    Blur,
    /// Alternate (tabbed) material.
    Alt,
}

/// Low-level compositor calls for the main window.
///
/// Calls are issued in the order the applier needs them; failures are
/// returned to the applier, which logs and swallows them.
pub trait CompositorPort: Send + Sync {
    fn remove_background_effect(&self) -> Result<(), CompositorError>;

    fn set_acrylic(&self, tint: Rgba) -> Result<(), CompositorError>;

    fn set_mica(&self, is_dark: bool, variant: MicaVariant) -> Result<(), CompositorError>;

    fn set_window_attribute(&self, attribute: u32, value: i32) -> Result<(), CompositorError>;

    fn set_aero(&self) -> Result<(), CompositorError>;

    fn enable_blur_behind(&self) -> Result<(), CompositorError>;

    fn add_window_animation(&self) -> Result<(), CompositorError>;

    fn add_shadow(&self) -> Result<(), CompositorError>;
}
