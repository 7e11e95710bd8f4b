//! Typed arguments for the box and blackening operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page box geometry: `x y width height` in PDF points
///
/// Serialized as a 4-element array, matching cpdf's `"<x> <y> <w> <h>"`
/// argument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct PageBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PageBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<[f64; 4]> for PageBox {
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<PageBox> for [f64; 4] {
    fn from(b: PageBox) -> Self {
        [b.x, b.y, b.width, b.height]
    }
}

impl fmt::Display for PageBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// Arguments for `-mediabox` / `-cropbox`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxOptions {
    pub new_box: PageBox,
    /// cpdf page range expression, e.g. `"1-3"` or `"even"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl BoxOptions {
    pub fn new(new_box: impl Into<PageBox>) -> Self {
        Self {
            new_box: new_box.into(),
            range: None,
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }
}

/// Arguments for `-blacktext` / `-blacklines` / `-blackfills`
///
/// Despite the names, cpdf paints with `color` when one is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackenOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BlackenOptions {
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
        }
    }
}
