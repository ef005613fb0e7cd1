use crate::appearance::WidgetTheme;
use crate::geometry::Rect;
use crate::ports::compositor::Rgba;
use crate::ports::errors::WindowError;

/// Title-bar control buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionButton {
    Close,
    Minimize,
    Maximize,
}

impl CaptionButton {
    pub const ALL: [CaptionButton; 3] = [
        CaptionButton::Close,
        CaptionButton::Minimize,
        CaptionButton::Maximize,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowFlags {
    pub frameless: bool,
    pub stay_on_top: bool,
}

/// The main window as seen by the shell.
///
/// Only the shell runtime task calls these methods.
pub trait WindowPort: Send + Sync {
    fn show(&self);

    fn hide(&self);

    fn is_visible(&self) -> bool;

    /// Restore if minimized, raise and activate.
    fn bring_to_front(&self);

    fn is_maximized(&self) -> bool;

    fn is_full_screen(&self) -> bool;

    fn geometry(&self) -> Rect;

    /// Fails for rectangles the backend cannot place.
    fn set_geometry(&self, rect: Rect) -> Result<(), WindowError>;

    /// Available area of the primary screen.
    fn available_screen(&self) -> Rect;

    fn set_title(&self, title: &str);

    fn set_accept_drops(&self, accept: bool);

    fn set_caption_button_visible(&self, button: CaptionButton, visible: bool);

    fn set_transparent_background(&self, transparent: bool);

    fn is_transparent_background(&self) -> bool;

    /// Colour painted behind the client area.
    fn set_background_color(&self, color: Rgba);

    fn apply_widget_theme(&self, theme: WidgetTheme);

    fn flags(&self) -> WindowFlags;

    fn set_flags(&self, flags: WindowFlags);

    /// Leading title-bar spacing (macOS traffic lights).
    fn insert_title_bar_spacing(&self, width: u32);
}
