//! Image-backed clickable button.

use std::fmt;

use crate::error::{EngineError, Result};
use crate::gui::{Click, ElementId};
use crate::surface::{ImageId, ImageState, Surface};

pub type ClickHandler = Box<dyn FnMut(&Click)>;

/// Clickable image anchored on the canvas.
///
/// The position is the top-left corner. It is computed once, at
/// construction, by centring the image on the anchor with whatever size the
/// image has at that moment, so a button whose image is still loading sits
/// with its corner on the anchor until it is repositioned.
pub struct Button {
    element: ElementId,
    id: String,
    image: ImageId,
    state: ImageState,
    position: (f64, f64),
    handler: Option<ClickHandler>,
}

impl Button {
    pub fn new(
        id: impl Into<String>,
        image: ImageId,
        state: ImageState,
        anchor_x: f64,
        anchor_y: f64,
        handler: Option<ClickHandler>,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(EngineError::MissingParameter("id"));
        }

        let (width, height) = state.size();
        Ok(Button {
            element: ElementId::UNREGISTERED,
            id,
            image,
            state,
            position: (anchor_x - width / 2.0, anchor_y - height / 2.0),
            handler,
        })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub(crate) fn set_element(&mut self, element: ElementId) {
        self.element = element;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn image(&self) -> ImageId {
        self.image
    }

    pub fn image_state(&self) -> ImageState {
        self.state
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Current size; 0x0 until the image is ready.
    pub fn size(&self) -> (f64, f64) {
        self.state.size()
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }

    pub fn mark_loaded(&mut self, width: f64, height: f64) {
        self.state = ImageState::Ready { width, height };
    }

    pub fn mark_failed(&mut self) {
        self.state = ImageState::Failed;
    }

    /// Paint the image at its current position. Does nothing until the
    /// image is ready.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        let ImageState::Ready { width, height } = self.state else {
            log::trace!("button {:?} not ready, skipping draw", self.id);
            return Ok(());
        };
        let (x, y) = self.position;
        surface.draw_image(self.image, x, y, width, height)
    }

    /// Strict bounds test: points on the edge are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let ImageState::Ready { width, height } = self.state else {
            return false;
        };
        let (left, top) = self.position;
        x > left && x < left + width && y > top && y < top + height
    }

    /// Runs the click handler when `(x, y)` is inside the button.
    pub fn hit_test(&mut self, x: f64, y: f64) -> Option<Click> {
        if !self.contains(x, y) {
            return None;
        }

        let click = Click {
            element: self.element,
            id: self.id.clone(),
            x,
            y,
        };
        match self.handler.as_mut() {
            Some(handler) => handler(&click),
            None => log::info!("Button {} reporting a click!", self.id),
        }
        Some(click)
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("element", &self.element)
            .field("id", &self.id)
            .field("image", &self.image)
            .field("state", &self.state)
            .field("position", &self.position)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, HeadlessSurface};
    use std::cell::Cell;
    use std::rc::Rc;

    fn ready(width: f64, height: f64) -> ImageState {
        ImageState::Ready { width, height }
    }

    #[test]
    fn only_an_empty_id_is_missing() {
        let err = Button::new("", ImageId(0), ImageState::Loading, 10.0, 10.0, None).unwrap_err();
        assert!(matches!(err, EngineError::MissingParameter("id")));

        let blank = Button::new("   ", ImageId(0), ImageState::Loading, 10.0, 10.0, None).unwrap();
        assert_eq!(blank.id(), "   ");
    }

    #[test]
    fn centres_on_anchor_only_when_size_is_known() {
        let loaded = Button::new("a", ImageId(0), ready(48.0, 32.0), 100.0, 100.0, None).unwrap();
        assert_eq!(loaded.position(), (76.0, 84.0));

        let loading = Button::new("b", ImageId(1), ImageState::Loading, 100.0, 100.0, None).unwrap();
        assert_eq!(loading.position(), (100.0, 100.0));
    }

    #[test]
    fn bounds_are_exclusive() {
        let mut button = Button::new("a", ImageId(0), ready(48.0, 48.0), 0.0, 0.0, None).unwrap();
        button.set_position(10.0, 20.0);

        assert!(!button.contains(10.0, 20.0));
        assert!(button.contains(11.0, 21.0));
        assert!(button.contains(57.0, 67.0));
        assert!(!button.contains(58.0, 68.0));
        assert!(!button.contains(9.0, 19.0));
        assert!(!button.contains(30.0, 68.0));
    }

    #[test]
    fn never_hit_before_load_or_after_failure() {
        let mut button = Button::new("a", ImageId(0), ImageState::Loading, 0.0, 0.0, None).unwrap();
        assert!(button.hit_test(0.0, 0.0).is_none());

        button.mark_loaded(20.0, 20.0);
        assert!(button.hit_test(5.0, 5.0).is_some());

        button.mark_failed();
        assert!(button.hit_test(5.0, 5.0).is_none());
    }

    #[test]
    fn hit_runs_handler_once() {
        let count = Rc::new(Cell::new(0));
        let handler: ClickHandler = {
            let count = count.clone();
            Box::new(move |click: &Click| {
                assert_eq!(click.id, "fire");
                count.set(count.get() + 1);
            })
        };
        let mut button =
            Button::new("fire", ImageId(0), ready(10.0, 10.0), 5.0, 5.0, Some(handler)).unwrap();

        let click = button.hit_test(5.0, 5.0).unwrap();
        assert_eq!((click.x, click.y), (5.0, 5.0));
        assert!(button.hit_test(50.0, 50.0).is_none());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn draw_waits_for_image() {
        let mut surface = HeadlessSurface::new(100, 100);
        let mut button = Button::new("a", ImageId(7), ImageState::Loading, 30.0, 40.0, None).unwrap();

        button.draw(&mut surface).unwrap();
        assert!(surface.ops().is_empty());

        button.mark_loaded(16.0, 8.0);
        button.draw(&mut surface).unwrap();
        assert_eq!(
            surface.ops(),
            &[DrawOp::Image {
                image: ImageId(7),
                x: 30.0,
                y: 40.0,
                width: 16.0,
                height: 8.0,
            }]
        );
    }
}
