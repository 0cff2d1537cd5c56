use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::canvas::CanvasSurface;
use crate::config::GameConfig;
use crate::entity::Entity;
use crate::error::EngineError;
use crate::game::Game;
use crate::gui::{Click, ClickHandler, ControlPad, Direction, ElementId};

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> JsValue {
        js_sys::Error::new(&err.to_string()).into()
    }
}

type Callbacks = Rc<RefCell<HashMap<ElementId, Function>>>;

/// Game bound to a fresh `<canvas>` on the page.
///
/// Page callbacks receive `(id, x, y)` and run after the engine has finished
/// routing the event, so they may call back into the game.
#[wasm_bindgen]
pub struct WebGame {
    game: Rc<RefCell<Game<CanvasSurface>>>,
    callbacks: Callbacks,
}

#[wasm_bindgen]
impl WebGame {
    /// Missing or zero dimensions default to 800x600.
    #[wasm_bindgen(constructor)]
    pub fn new(width: Option<u32>, height: Option<u32>) -> Result<WebGame, JsValue> {
        WebGame::build(GameConfig::with_size(
            width.unwrap_or(0),
            height.unwrap_or(0),
        ))
    }

    /// Build from a JSON config object; omitted fields take their defaults.
    pub fn with_config(json: &str) -> Result<WebGame, JsValue> {
        WebGame::build(GameConfig::from_json(json)?)
    }

    /// Returns the handle used by `reposition_button`.
    pub fn create_button(
        &self,
        id: &str,
        src: &str,
        x: f64,
        y: f64,
        on_click: Option<Function>,
    ) -> Result<u32, JsValue> {
        let handler = on_click.as_ref().map(|_| page_handler());
        let element = self.game.borrow_mut().create_button(id, src, x, y, handler)?;
        if let Some(f) = on_click {
            self.callbacks.borrow_mut().insert(element, f);
        }
        Ok(element.0)
    }

    pub fn reposition_button(&self, handle: u32, x: Option<f64>, y: Option<f64>) -> Result<(), JsValue> {
        self.game
            .borrow_mut()
            .reposition_button(ElementId(handle), x, y)?;
        Ok(())
    }

    /// Replace the control pad. `on_direction` receives the arrow id
    /// ("top", "bot", "left" or "right").
    pub fn install_control_pad(
        &self,
        frac_x: Option<f64>,
        frac_y: Option<f64>,
        on_direction: Option<Function>,
    ) -> Result<(), JsValue> {
        let mut game = self.game.borrow_mut();
        {
            let mut callbacks = self.callbacks.borrow_mut();
            for element in game.control_pad_elements() {
                callbacks.remove(element);
            }
        }

        let handler = on_direction.as_ref().map(|_| {
            Box::new(|d: Direction| log::debug!("pad {} pressed", d.id())) as Box<dyn FnMut(Direction)>
        });
        let pad = ControlPad::install(
            &mut *game,
            frac_x.unwrap_or(0.0),
            frac_y.unwrap_or(0.0),
            handler,
        )?;

        if let Some(f) = on_direction {
            let mut callbacks = self.callbacks.borrow_mut();
            for element in pad.elements() {
                callbacks.insert(element, f.clone());
            }
        }
        Ok(())
    }

    pub fn gui_len(&self) -> usize {
        self.game.borrow().gui().len()
    }

    pub fn create_entity(&self, name: &str) -> Result<WebEntity, JsValue> {
        Ok(WebEntity(self.game.borrow().create_entity(name)?))
    }
}

impl WebGame {
    fn build(config: GameConfig) -> Result<WebGame, JsValue> {
        let surface = CanvasSurface::create(&config)?;
        let host = surface.host();
        let game = Rc::new(RefCell::new(Game::new(surface, config)?));
        if host.set(Rc::downgrade(&game)).is_err() {
            return Err("canvas already bound to a game".into());
        }

        let web = WebGame {
            game,
            callbacks: Rc::new(RefCell::new(HashMap::new())),
        };
        web.listen_pointer_down()?;
        Ok(web)
    }

    // One listener per game, kept for the page's lifetime.
    fn listen_pointer_down(&self) -> Result<(), JsValue> {
        let canvas = self.game.borrow().surface().canvas().clone();
        let on_mouse_down = {
            let game = self.game.clone();
            let callbacks = self.callbacks.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let clicks = game
                    .borrow_mut()
                    .pointer_down(f64::from(event.page_x()), f64::from(event.page_y()));
                notify_page(&callbacks, &clicks)
            }) as Box<dyn FnMut(MouseEvent) -> Result<(), JsValue>>)
        };
        canvas.add_event_listener_with_callback("mousedown", on_mouse_down.as_ref().unchecked_ref())?;
        on_mouse_down.forget();
        Ok(())
    }
}

/// Engine-side handler for buttons whose click goes to a page callback.
fn page_handler() -> ClickHandler {
    Box::new(|click: &Click| log::debug!("button {} clicked", click.id))
}

/// Runs every page callback; the first exception is rethrown to the page
/// once all of them have run.
fn notify_page(callbacks: &Callbacks, clicks: &[Click]) -> Result<(), JsValue> {
    let mut first_err = None;
    for click in clicks {
        // Clone out so the callback can register new buttons.
        let Some(f) = callbacks.borrow().get(&click.element).cloned() else {
            continue;
        };
        let result = f.call3(
            &JsValue::NULL,
            &JsValue::from_str(&click.id),
            &JsValue::from_f64(click.x),
            &JsValue::from_f64(click.y),
        );
        if let Err(err) = result {
            log::debug!("click callback for {} threw", click.id);
            first_err.get_or_insert(err);
        }
    }
    first_err.map_or(Ok(()), Err)
}

#[wasm_bindgen]
pub struct WebEntity(Entity);

#[wasm_bindgen]
impl WebEntity {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.0.name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.0.position().0
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.0.position().1
    }
}
