//! Engine event emitter.

use crate::gui::Click;
use crate::surface::ImageId;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ButtonClicked(Click),
    ImageLoaded { image: ImageId },
    ImageFailed { image: ImageId },
    ControlPadInstalled { anchor: (f64, f64) },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Listeners run synchronously, in subscription order.
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u32,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &GameEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_run_in_order_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::new();

        let first = {
            let seen = seen.clone();
            emitter.subscribe(move |_| seen.borrow_mut().push("first"))
        };
        {
            let seen = seen.clone();
            emitter.subscribe(move |_| seen.borrow_mut().push("second"));
        }

        let event = GameEvent::ImageLoaded { image: ImageId(3) };
        emitter.emit(&event);
        assert!(emitter.unsubscribe(first));
        assert!(!emitter.unsubscribe(first));
        emitter.emit(&event);

        assert_eq!(*seen.borrow(), vec!["first", "second", "second"]);
        assert_eq!(emitter.len(), 1);
    }
}
