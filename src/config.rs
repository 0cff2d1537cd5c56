//! Engine configuration.
//!
//! Every field has a default so a page can pass a partial JSON object
//! (or nothing at all) and get the stock 800x600 canvas with a control pad
//! in the lower right corner.

use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_PAD_SPACING: f64 = 64.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    /// CSS border applied to the canvas element.
    pub border: String,
    /// Fill colour painted under the control pad.
    pub background: String,
    /// Anchor of the control pad created with the game; `None` disables it.
    pub control_pad: Option<PadConfig>,
    /// Distance from the pad anchor to each arrow's centre, in pixels.
    pub pad_spacing: f64,
    pub pad_images: PadImages,
    /// Reject `0` as a missing coordinate when repositioning buttons.
    pub zero_coordinate_is_missing: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            border: "5px solid #000".to_string(),
            background: "#ccc".to_string(),
            control_pad: Some(PadConfig::default()),
            pad_spacing: DEFAULT_PAD_SPACING,
            pad_images: PadImages::default(),
            zero_coordinate_is_missing: false,
        }
    }
}

impl GameConfig {
    /// Config for a canvas of the given size; zero dimensions fall back to
    /// the defaults.
    pub fn with_size(width: u32, height: u32) -> Self {
        GameConfig {
            width,
            height,
            ..GameConfig::default()
        }
        .normalized()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.width == 0 {
            self.width = DEFAULT_WIDTH;
        }
        if self.height == 0 {
            self.height = DEFAULT_HEIGHT;
        }
        self
    }
}

/// Control pad anchor as fractions of the canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    pub x: f64,
    pub y: f64,
}

impl Default for PadConfig {
    fn default() -> Self {
        PadConfig { x: 0.88, y: 0.83 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PadImages {
    pub top: String,
    pub bottom: String,
    pub left: String,
    pub right: String,
}

impl Default for PadImages {
    fn default() -> Self {
        PadImages {
            top: "img/arw_top.svg".to_string(),
            bottom: "img/arw_bottom.svg".to_string(),
            left: "img/arw_left.svg".to_string(),
            right: "img/arw_right.svg".to_string(),
        }
    }
}
