//! Windowless stand-in for the main window.
//!
//! Used by the probe binary and on hosts without a GUI toolkit: every call
//! is recorded in memory and traced, so the shell runtime can run end to
//! end without a display.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use gd_core::ports::{CaptionButton, Rgba, WindowError, WindowFlags, WindowPort};
use gd_core::{Rect, WidgetTheme};
use tracing::{debug, info};

const DEFAULT_SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

#[derive(Debug)]
struct State {
    visible: bool,
    maximized: bool,
    full_screen: bool,
    geometry: Rect,
    title: String,
    accept_drops: bool,
    hidden_buttons: HashSet<CaptionButton>,
    transparent: bool,
    background: Option<Rgba>,
    widget_theme: Option<WidgetTheme>,
    flags: WindowFlags,
    title_bar_spacing: Option<u32>,
}

pub struct HeadlessWindow {
    screen: Rect,
    state: Mutex<State>,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self::with_screen(DEFAULT_SCREEN)
    }

    pub fn with_screen(screen: Rect) -> Self {
        Self {
            screen,
            state: Mutex::new(State {
                visible: false,
                maximized: false,
                full_screen: false,
                geometry: Rect::new(0, 0, 0, 0),
                title: String::new(),
                accept_drops: false,
                hidden_buttons: HashSet::new(),
                transparent: false,
                background: None,
                widget_theme: None,
                flags: WindowFlags::default(),
                title_bar_spacing: None,
            }),
        }
    }

    pub fn title(&self) -> String {
        self.state().title.clone()
    }

    pub fn widget_theme(&self) -> Option<WidgetTheme> {
        self.state().widget_theme
    }

    pub fn background_color(&self) -> Option<Rgba> {
        self.state().background
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves plain data behind; keep going.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowPort for HeadlessWindow {
    fn show(&self) {
        self.state().visible = true;
        info!("window shown");
    }

    fn hide(&self) {
        self.state().visible = false;
        info!("window hidden");
    }

    fn is_visible(&self) -> bool {
        self.state().visible
    }

    fn bring_to_front(&self) {
        self.state().visible = true;
        debug!("window brought to front");
    }

    fn is_maximized(&self) -> bool {
        self.state().maximized
    }

    fn is_full_screen(&self) -> bool {
        self.state().full_screen
    }

    fn geometry(&self) -> Rect {
        self.state().geometry
    }

    fn set_geometry(&self, rect: Rect) -> Result<(), WindowError> {
        if rect.is_empty() {
            return Err(WindowError::InvalidGeometry(format!(
                "{}x{}",
                rect.width, rect.height
            )));
        }
        self.state().geometry = rect;
        debug!(?rect, "window geometry set");
        Ok(())
    }

    fn available_screen(&self) -> Rect {
        self.screen
    }

    fn set_title(&self, title: &str) {
        self.state().title = title.to_string();
    }

    fn set_accept_drops(&self, accept: bool) {
        self.state().accept_drops = accept;
    }

    fn set_caption_button_visible(&self, button: CaptionButton, visible: bool) {
        let mut state = self.state();
        if visible {
            state.hidden_buttons.remove(&button);
        } else {
            state.hidden_buttons.insert(button);
        }
    }

    fn set_transparent_background(&self, transparent: bool) {
        self.state().transparent = transparent;
    }

    fn is_transparent_background(&self) -> bool {
        self.state().transparent
    }

    fn set_background_color(&self, color: Rgba) {
        self.state().background = Some(color);
        debug!(color = %color.to_hex(), "window background color set");
    }

    fn apply_widget_theme(&self, theme: WidgetTheme) {
        self.state().widget_theme = Some(theme);
        info!(?theme, "widget theme applied");
    }

    fn flags(&self) -> WindowFlags {
        self.state().flags
    }

    fn set_flags(&self, flags: WindowFlags) {
        self.state().flags = flags;
    }

    fn insert_title_bar_spacing(&self, width: u32) {
        self.state().title_bar_spacing = Some(width);
    }
}
