use super::{gesture_log::GestureLog, slide_deck::SlideDeck};
use crate::deck::{DeckState, Slide};
use yew::prelude::*;

fn slides() -> Vec<Slide> {
    vec![
        Slide {
            title: "Welcome",
            body: "Swipe left for the next slide, right to go back.",
        },
        Slide {
            title: "Drag",
            body: "The strip follows your finger until you let go.",
        },
        Slide {
            title: "Tap",
            body: "A short still touch fires a tap instead of a wipe.",
        },
        Slide {
            title: "Pinch",
            body: "Two-finger gestures are reported but never turn into wipes.",
        },
    ]
}

#[function_component(App)]
pub fn app() -> Html {
    let deck = use_reducer(|| DeckState::new(slides()));
    html! {
        <div style="width:100vw; min-height:100vh; color:#c9d1d9; background:#010409;">
            <SlideDeck deck={deck.clone()} />
            <GestureLog events={deck.events.clone()} />
        </div>
    }
}
