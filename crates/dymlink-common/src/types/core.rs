use serde::{Deserialize, Serialize};
use std::fmt;

/// On-screen rectangle of the host trigger, in CSS pixels relative to the
/// viewport.
///
/// Serialized with the full `DOMRect` field set so the peer can read either
/// `x`/`y` or `top`/`left` style coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "DomRect", from = "DomRect")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Serialize, Deserialize)]
struct DomRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default, skip_deserializing)]
    top: f64,
    #[serde(default, skip_deserializing)]
    right: f64,
    #[serde(default, skip_deserializing)]
    bottom: f64,
    #[serde(default, skip_deserializing)]
    left: f64,
}

impl From<Rect> for DomRect {
    fn from(r: Rect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
            top: r.y,
            right: r.right(),
            bottom: r.bottom(),
            left: r.x,
        }
    }
}

impl From<DomRect> for Rect {
    fn from(d: DomRect) -> Self {
        Self::new(d.x, d.y, d.width, d.height)
    }
}

/// Horizontal alignment of the peer menu relative to the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MenuAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl fmt::Display for MenuAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MenuAlign::Left => "left",
            MenuAlign::Center => "center",
            MenuAlign::Right => "right",
        };
        f.write_str(s)
    }
}
