//! Minimal 2D canvas game engine: a canvas surface, image buttons with
//! pointer hit-testing, and a directional control pad.

pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod gui;
pub mod surface;

pub use config::GameConfig;
pub use error::{EngineError, Result};
pub use game::Game;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod canvas;
    mod web_game;

    pub use web_game::{WebEntity, WebGame};

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Debug)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        log::debug!("simple_canvas loaded");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{WebEntity, WebGame};
