use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Size used whenever no valid geometry is persisted.
pub const DEFAULT_WINDOW_WIDTH: u32 = 960;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 780;

/// Sentinel stored in settings instead of a rectangle.
pub const DEFAULT_GEOMETRY_SENTINEL: &str = "Default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// A `width` x `height` rectangle centered inside `self`.
    pub fn centered(&self, width: u32, height: u32) -> Rect {
        let x = self.x + half(self.width) - half(width);
        let y = self.y + half(self.height) - half(height);
        Rect::new(x, y, width, height)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        let right = |r: &Rect| i64::from(r.x) + i64::from(r.width);
        let bottom = |r: &Rect| i64::from(r.y) + i64::from(r.height);

        i64::from(self.x) < right(other)
            && i64::from(other.x) < right(self)
            && i64::from(self.y) < bottom(other)
            && i64::from(other.y) < bottom(self)
    }
}

fn half(value: u32) -> i32 {
    i32::try_from(value / 2).unwrap_or(i32::MAX)
}

/// Default window placement: 960x780 centered on the available screen area.
pub fn default_window_rect(screen: Rect) -> Rect {
    screen.centered(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
}

/// macOS traffic-light area, moved to the top-left corner of the title bar.
pub fn system_title_bar_rect(height: u32, full_screen: bool) -> Rect {
    Rect::new(0, if full_screen { 0 } else { 9 }, 75, height)
}

/// Persisted window geometry: a rectangle, or the `"Default"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeometrySetting {
    #[default]
    Default,
    Saved(Rect),
    /// A value that is neither the sentinel nor a rectangle. Kept verbatim so
    /// window restoration can report and replace it.
    Unrecognized(String),
}

impl GeometrySetting {
    pub fn is_default(&self) -> bool {
        matches!(self, GeometrySetting::Default)
    }
}

impl Serialize for GeometrySetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GeometrySetting::Default => serializer.serialize_str(DEFAULT_GEOMETRY_SENTINEL),
            GeometrySetting::Saved(rect) => rect.serialize(serializer),
            GeometrySetting::Unrecognized(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for GeometrySetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Rect(Rect),
            Text(String),
            Other(serde_json::Value),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Rect(rect) => GeometrySetting::Saved(rect),
            Repr::Text(text) if text == DEFAULT_GEOMETRY_SENTINEL => GeometrySetting::Default,
            Repr::Text(text) => GeometrySetting::Unrecognized(text),
            Repr::Other(value) => GeometrySetting::Unrecognized(value.to_string()),
        })
    }
}

impl fmt::Display for GeometrySetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometrySetting::Default => f.write_str(DEFAULT_GEOMETRY_SENTINEL),
            GeometrySetting::Saved(r) => write!(f, "{}x{}+{}+{}", r.width, r.height, r.x, r.y),
            GeometrySetting::Unrecognized(raw) => write!(f, "unrecognized({raw})"),
        }
    }
}
