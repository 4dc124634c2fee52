//! Slide deck state driven by gesture callbacks in the demo.

use std::collections::VecDeque;
use std::rc::Rc;
use yew::Reducible;

pub const LOG_LEN: usize = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeckState {
    pub slides: Rc<Vec<Slide>>,
    pub position: usize,
    /// Live horizontal offset of the strip while a finger drags it.
    pub drag_x: f64,
    pub events: VecDeque<String>,
}

pub enum DeckAction {
    Next,
    Prev,
    Drag { dx: f64 },
    SnapBack,
    Record(String),
}

impl DeckState {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self {
            slides: Rc::new(slides),
            position: 0,
            drag_x: 0.0,
            events: VecDeque::with_capacity(LOG_LEN),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.position > 0
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.slides.len()
    }
}

impl Reducible for DeckState {
    type Action = DeckAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use DeckAction::*;
        let mut new = (*self).clone();
        match action {
            Next => {
                if new.has_next() {
                    new.position += 1;
                }
                new.drag_x = 0.0;
            }
            Prev => {
                if new.has_prev() {
                    new.position -= 1;
                }
                new.drag_x = 0.0;
            }
            Drag { dx } => {
                // Nothing to reveal past either end.
                if (dx > 0.0 && !new.has_prev()) || (dx < 0.0 && !new.has_next()) {
                    return self;
                }
                new.drag_x = dx;
            }
            SnapBack => {
                if new.drag_x == 0.0 {
                    return self;
                }
                new.drag_x = 0.0;
            }
            Record(line) => {
                if new.events.len() == LOG_LEN {
                    new.events.pop_back();
                }
                new.events.push_front(line);
            }
        }
        Rc::new(new)
    }
}
