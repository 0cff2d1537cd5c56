//! Screen-space GUI: image buttons and the directional control pad.

use std::fmt;

pub mod button;
pub mod control_pad;

pub use button::{Button, ClickHandler};
pub use control_pad::{ControlPad, Direction};

/// Engine-assigned handle of a registered GUI element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Carried by buttons that were never registered with a game.
    pub const UNREGISTERED: ElementId = ElementId(u32::MAX);
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A pointer-down that landed on a button, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub element: ElementId,
    pub id: String,
    pub x: f64,
    pub y: f64,
}
