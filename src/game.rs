//! The game: owns the surface, the GUI elements and the event emitter.
//!
//! All mutation goes through `&mut Game`. In the browser the game lives in
//! an `Rc<RefCell<_>>` shared by the DOM callbacks, which run one at a time
//! on the page's event loop.

use crate::config::GameConfig;
use crate::entity::Entity;
use crate::error::{EngineError, Result};
use crate::events::{EventEmitter, GameEvent};
use crate::gui::{Button, Click, ClickHandler, ControlPad, ElementId};
use crate::surface::{ImageId, Surface};

pub struct Game<S: Surface> {
    surface: S,
    config: GameConfig,
    gui: Vec<Button>,
    events: EventEmitter,
    next_element: u32,
    control_pad: Vec<ElementId>,
}

impl<S: Surface> Game<S> {
    /// Create a game on `surface`, installing the configured control pad.
    pub fn new(surface: S, config: GameConfig) -> Result<Self> {
        let pad = config.control_pad;
        let mut game = Game {
            surface,
            config,
            gui: Vec::new(),
            events: EventEmitter::new(),
            next_element: 0,
            control_pad: Vec::new(),
        };
        if let Some(pad) = pad {
            ControlPad::install(&mut game, pad.x, pad.y, None)?;
        }
        Ok(game)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn events_mut(&mut self) -> &mut EventEmitter {
        &mut self.events
    }

    /// Registered elements in hit-test order.
    pub fn gui(&self) -> &[Button] {
        &self.gui
    }

    pub fn button(&self, element: ElementId) -> Option<&Button> {
        self.gui.iter().find(|b| b.element() == element)
    }

    /// Elements of the currently installed control pad.
    pub fn control_pad_elements(&self) -> &[ElementId] {
        &self.control_pad
    }

    /// Append `button` to the GUI. Existing elements are never replaced.
    pub fn register_gui_element(&mut self, mut button: Button) -> ElementId {
        let element = ElementId(self.next_element);
        self.next_element += 1;
        button.set_element(element);
        log::debug!("registered button {:?} as {}", button.id(), element);
        self.gui.push(button);
        element
    }

    /// Load `src`, place a button centred on `(x, y)` and register it.
    pub fn create_button(
        &mut self,
        id: &str,
        src: &str,
        x: f64,
        y: f64,
        handler: Option<ClickHandler>,
    ) -> Result<ElementId> {
        if id.is_empty() {
            return Err(EngineError::MissingParameter("id"));
        }
        let (image, state) = self.surface.load_image(src);
        let button = Button::new(id, image, state, x, y, handler)?;
        button.draw(&mut self.surface)?;
        Ok(self.register_gui_element(button))
    }

    /// Move a button's top-left corner and redraw it.
    ///
    /// `None` and non-finite values are missing coordinates. When
    /// `zero_coordinate_is_missing` is set, `0` is rejected as well.
    pub fn reposition_button(
        &mut self,
        element: ElementId,
        x: Option<f64>,
        y: Option<f64>,
    ) -> Result<()> {
        let strict = self.config.zero_coordinate_is_missing;
        let x = require_coordinate("x", x, strict)?;
        let y = require_coordinate("y", y, strict)?;

        let button = self
            .gui
            .iter_mut()
            .find(|b| b.element() == element)
            .ok_or(EngineError::UnknownElement(element))?;
        button.set_position(x, y);
        button.draw(&mut self.surface)
    }

    /// Route a pointer-down given in page coordinates.
    ///
    /// Every element is tested, so overlapping buttons all fire. Coordinates
    /// are not clamped to the canvas.
    pub fn pointer_down(&mut self, page_x: f64, page_y: f64) -> Vec<Click> {
        let (left, top) = self.surface.page_offset();
        let (x, y) = (page_x - left, page_y - top);
        log::trace!("pointer down at ({x}, {y}), {} elements", self.gui.len());

        let clicks: Vec<Click> = self
            .gui
            .iter_mut()
            .filter_map(|button| button.hit_test(x, y))
            .collect();
        for click in &clicks {
            self.events.emit(&GameEvent::ButtonClicked(click.clone()));
        }
        clicks
    }

    /// Mark buttons showing `image` as ready and paint them where they
    /// currently are.
    pub fn image_loaded(&mut self, image: ImageId, width: f64, height: f64) {
        for button in self.gui.iter_mut().filter(|b| b.image() == image) {
            button.mark_loaded(width, height);
            if let Err(err) = button.draw(&mut self.surface) {
                log::warn!("failed to draw button {:?}: {err}", button.id());
            }
        }
        self.events.emit(&GameEvent::ImageLoaded { image });
    }

    pub fn image_failed(&mut self, image: ImageId) {
        for button in self.gui.iter_mut().filter(|b| b.image() == image) {
            log::warn!("image for button {:?} failed to load", button.id());
            button.mark_failed();
        }
        self.events.emit(&GameEvent::ImageFailed { image });
    }

    pub fn create_entity(&self, name: &str) -> Result<Entity> {
        Entity::new(name)
    }

    /// Paint every registered element again, in registration order.
    pub fn redraw_gui(&mut self) -> Result<()> {
        for button in &self.gui {
            button.draw(&mut self.surface)?;
        }
        Ok(())
    }

    pub(crate) fn remove_elements(&mut self, elements: &[ElementId]) {
        if !elements.is_empty() {
            self.gui.retain(|b| !elements.contains(&b.element()));
        }
    }

    pub(crate) fn remove_control_pad(&mut self) {
        let old = std::mem::take(&mut self.control_pad);
        if !old.is_empty() {
            self.remove_elements(&old);
            log::debug!("removed previous control pad");
        }
    }

    pub(crate) fn set_control_pad(&mut self, elements: Vec<ElementId>) {
        self.control_pad = elements;
    }
}

fn require_coordinate(
    name: &'static str,
    value: Option<f64>,
    zero_is_missing: bool,
) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() && !(zero_is_missing && v == 0.0) => Ok(v),
        _ => Err(EngineError::MissingParameter(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, HeadlessSurface};

    fn bare_game(surface: HeadlessSurface) -> Game<HeadlessSurface> {
        let config = GameConfig {
            control_pad: None,
            ..GameConfig::default()
        };
        Game::new(surface, config).unwrap()
    }

    #[test]
    fn default_config_installs_a_pad() {
        let game = Game::new(HeadlessSurface::new(800, 600), GameConfig::default()).unwrap();
        let ids: Vec<&str> = game.gui().iter().map(Button::id).collect();
        assert_eq!(ids, vec!["top", "bot", "right", "left"]);
        assert_eq!(game.control_pad_elements().len(), 4);
    }

    #[test]
    fn create_button_rejects_empty_id() {
        let mut game = bare_game(HeadlessSurface::new(800, 600));
        let err = game.create_button("", "a.png", 1.0, 1.0, None).unwrap_err();
        assert!(matches!(err, EngineError::MissingParameter("id")));
        assert!(game.gui().is_empty());
    }

    #[test]
    fn cached_image_is_centred_and_drawn_immediately() {
        let surface = HeadlessSurface::new(800, 600).with_cached_image("a.png", 40.0, 20.0);
        let mut game = bare_game(surface);
        let element = game.create_button("a", "a.png", 100.0, 100.0, None).unwrap();

        assert_eq!(game.button(element).unwrap().position(), (80.0, 90.0));
        assert_eq!(game.surface().ops().len(), 1);
    }

    #[test]
    fn reposition_validates_coordinates() {
        let mut game = bare_game(HeadlessSurface::new(800, 600));
        let element = game.create_button("a", "a.png", 10.0, 10.0, None).unwrap();

        assert!(matches!(
            game.reposition_button(element, None, Some(5.0)),
            Err(EngineError::MissingParameter("x"))
        ));
        assert!(matches!(
            game.reposition_button(element, Some(5.0), Some(f64::NAN)),
            Err(EngineError::MissingParameter("y"))
        ));
        game.reposition_button(element, Some(0.0), Some(0.0)).unwrap();
        assert_eq!(game.button(element).unwrap().position(), (0.0, 0.0));

        assert!(matches!(
            game.reposition_button(ElementId(99), Some(1.0), Some(1.0)),
            Err(EngineError::UnknownElement(ElementId(99)))
        ));
    }

    #[test]
    fn zero_is_missing_in_compatibility_mode() {
        let config = GameConfig {
            control_pad: None,
            zero_coordinate_is_missing: true,
            ..GameConfig::default()
        };
        let mut game = Game::new(HeadlessSurface::new(800, 600), config).unwrap();
        let element = game.create_button("a", "a.png", 10.0, 10.0, None).unwrap();

        assert!(matches!(
            game.reposition_button(element, Some(0.0), Some(3.0)),
            Err(EngineError::MissingParameter("x"))
        ));
        assert!(matches!(
            game.reposition_button(element, Some(3.0), Some(0.0)),
            Err(EngineError::MissingParameter("y"))
        ));
        game.reposition_button(element, Some(3.0), Some(3.0)).unwrap();
    }

    #[test]
    fn load_completion_draws_at_current_position() {
        let mut game = bare_game(HeadlessSurface::new(800, 600));
        let element = game.create_button("a", "a.png", 50.0, 50.0, None).unwrap();
        let image = game.button(element).unwrap().image();
        game.reposition_button(element, Some(5.0), Some(6.0)).unwrap();
        assert!(game.surface().ops().is_empty());

        game.image_loaded(image, 10.0, 12.0);
        assert_eq!(
            game.surface().ops(),
            &[DrawOp::Image {
                image,
                x: 5.0,
                y: 6.0,
                width: 10.0,
                height: 12.0,
            }]
        );
    }

    #[test]
    fn failed_image_is_never_hit() {
        let mut game = bare_game(HeadlessSurface::new(800, 600));
        let element = game.create_button("a", "a.png", 0.0, 0.0, None).unwrap();
        let image = game.button(element).unwrap().image();

        game.image_failed(image);
        assert!(game.pointer_down(1.0, 1.0).is_empty());
    }
}
