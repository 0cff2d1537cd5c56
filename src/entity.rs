//! Scene entity placeholder.

use crate::error::{EngineError, Result};

/// Named scene object. Placeholder: holds a position and a sprite source,
/// nothing moves or draws it yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    position: (f64, f64),
    src: String,
}

impl Entity {
    pub(crate) fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(EngineError::MissingParameter("name"));
        }
        Ok(Entity {
            name: name.to_string(),
            position: (0.0, 0.0),
            src: String::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn src(&self) -> &str {
        &self.src
    }
}
