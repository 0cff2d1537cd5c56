//! Directional pad of four arrow buttons.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::events::GameEvent;
use crate::game::Game;
use crate::gui::{Click, ClickHandler, ElementId};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Registration order of the pad's buttons.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    /// Button id used for this arrow.
    pub fn id(self) -> &'static str {
        match self {
            Direction::Up => "top",
            Direction::Down => "bot",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Unit offset from the pad anchor, in canvas axes (y grows downwards).
    fn offset(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// Four arrow buttons around an anchor given as fractions of the canvas.
///
/// Installing a pad paints the background, then registers the arrows with
/// the game. Only one pad is live per game: installing another removes the
/// previous pad's arrows and leaves every other GUI element in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPad {
    anchor: (f64, f64),
    buttons: [(Direction, ElementId); 4],
}

impl ControlPad {
    pub fn install<S: Surface>(
        game: &mut Game<S>,
        frac_x: f64,
        frac_y: f64,
        on_direction: Option<Box<dyn FnMut(Direction)>>,
    ) -> Result<ControlPad> {
        let (width, height) = game.surface().size();
        let anchor = (width * or_zero(frac_x), height * or_zero(frac_y));
        let spacing = game.config().pad_spacing;

        game.remove_control_pad();

        let background = game.config().background.clone();
        game.surface_mut().fill_rect(&background, 0.0, 0.0, width, height);
        // The fill covers every element that survived the swap.
        game.redraw_gui()?;

        let shared = on_direction.map(|f| Rc::new(RefCell::new(f)));
        let mut buttons = [(Direction::Up, ElementId::UNREGISTERED); 4];
        let mut created = Vec::with_capacity(buttons.len());
        for (slot, direction) in buttons.iter_mut().zip(Direction::ALL) {
            let src = image_for(game, direction);
            let (dx, dy) = direction.offset();
            let handler = shared.clone().map(|f| {
                Box::new(move |_: &Click| (*f.borrow_mut())(direction)) as ClickHandler
            });
            let result = game.create_button(
                direction.id(),
                &src,
                anchor.0 + dx * spacing,
                anchor.1 + dy * spacing,
                handler,
            );
            match result {
                Ok(element) => {
                    created.push(element);
                    *slot = (direction, element);
                }
                Err(err) => {
                    // Leave no half-built pad behind.
                    game.remove_elements(&created);
                    return Err(err);
                }
            }
        }

        game.set_control_pad(created);
        game.events_mut()
            .emit(&GameEvent::ControlPadInstalled { anchor });
        log::debug!("control pad installed at ({}, {})", anchor.0, anchor.1);

        Ok(ControlPad { anchor, buttons })
    }

    pub fn anchor(&self) -> (f64, f64) {
        self.anchor
    }

    pub fn element(&self, direction: Direction) -> ElementId {
        self.buttons
            .iter()
            .find(|(d, _)| *d == direction)
            .map(|&(_, element)| element)
            .unwrap_or(ElementId::UNREGISTERED)
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.buttons.iter().map(|&(_, element)| element)
    }
}

fn or_zero(fraction: f64) -> f64 {
    if fraction.is_finite() {
        fraction
    } else {
        0.0
    }
}

fn image_for<S: Surface>(game: &Game<S>, direction: Direction) -> String {
    let images = &game.config().pad_images;
    match direction {
        Direction::Up => images.top.clone(),
        Direction::Down => images.bottom.clone(),
        Direction::Left => images.left.clone(),
        Direction::Right => images.right.clone(),
    }
}
