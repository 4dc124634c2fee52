use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

use touchstac::{register, unregister, DomInput, GestureConfig, Settings, WipeResult};

use crate::deck::{DeckAction, DeckState};

// Same thresholds the deck has always used: a bit stiffer than the defaults, taps on.
const DECK_SETTINGS: &str = r#"{"moveX": 50, "moveY": 50, "tapToClick": true}"#;

#[derive(Properties, PartialEq, Clone)]
pub struct SlideDeckProps {
    pub deck: UseReducerHandle<DeckState>,
}

fn describe(name: &str, r: &WipeResult) -> String {
    format!("{name} speed {} ({:.0}, {:.0})", r.speed, r.x, r.y)
}

type DeckDispatcher = UseReducerDispatcher<DeckState>;

fn deck_config(dispatcher: DeckDispatcher) -> GestureConfig<DomInput, DeckDispatcher> {
    let settings = Settings::from_json(DECK_SETTINGS).unwrap_or_else(|err| {
        log::warn!("bad deck settings, using defaults: {err}");
        Settings::default()
    });
    GestureConfig::new(dispatcher)
        .with_settings(settings)
        .on_wipe_move(|r, _, d| d.dispatch(DeckAction::Drag { dx: r.fingers.mean_dx().floor() }))
        .on_wipe_move_cancel(|_, _, d| {
            d.dispatch(DeckAction::SnapBack);
            d.dispatch(DeckAction::Record("cancel".into()));
        })
        .on_wipe_left(|r, _, d| {
            d.dispatch(DeckAction::Next);
            d.dispatch(DeckAction::Record(describe("left", r)));
        })
        .on_wipe_right(|r, _, d| {
            d.dispatch(DeckAction::Prev);
            d.dispatch(DeckAction::Record(describe("right", r)));
        })
        .on_wipe_up(|r, _, d| d.dispatch(DeckAction::Record(describe("up", r))))
        .on_wipe_down(|r, _, d| d.dispatch(DeckAction::Record(describe("down", r))))
        .on_wipe_move_end(|_, _, d| d.dispatch(DeckAction::SnapBack))
        .on_gesture_start(|r, _, d| {
            d.dispatch(DeckAction::Record(format!("pinch x{:.2} {:.0}°", r.scale, r.rotation)))
        })
}

#[function_component(SlideDeck)]
pub fn slide_deck(props: &SlideDeckProps) -> Html {
    let deck_ref = use_node_ref();

    {
        let deck_ref = deck_ref.clone();
        let dispatcher = props.deck.dispatcher();
        use_effect_with((), move |_| {
            let el = deck_ref.cast::<HtmlElement>();
            let binding = el.as_ref().and_then(|el| {
                match register(el, deck_config(dispatcher.clone())) {
                    Ok(b) => Some(b),
                    Err(err) => {
                        log::error!("touch binding failed: {err}");
                        None
                    }
                }
            });
            let tap_cb = {
                let dispatcher = dispatcher.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    dispatcher.dispatch(DeckAction::Record("tap".into()));
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(el) = &el {
                if let Err(err) = el.add_event_listener_with_callback(
                    touchstac::dom::TAP_EVENT,
                    tap_cb.as_ref().unchecked_ref(),
                ) {
                    log::error!("tap listener failed: {err:?}");
                }
            }
            // Cleanup
            move || {
                if let Some(b) = &binding {
                    unregister(b);
                }
                if let Some(el) = &el {
                    let _ = el.remove_event_listener_with_callback(
                        touchstac::dom::TAP_EVENT,
                        tap_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let deck = &props.deck;
    let offset = -(deck.position as f64) * 100.0;
    let strip_style = format!(
        "display:flex; height:100%; transform:translateX(calc({offset}% + {}px)); transition:{};",
        deck.drag_x,
        if deck.drag_x == 0.0 { "transform 0.25s ease-out" } else { "none" }
    );
    html! {
        <div ref={deck_ref} style="position:relative; width:100vw; height:70vh; overflow:hidden; touch-action:none; background:#0d1117;">
            <div style={strip_style}>
                { for deck.slides.iter().map(|s| html! {
                    <section style="flex:0 0 100%; box-sizing:border-box; padding:24px;">
                        <h2>{ s.title }</h2>
                        <p>{ s.body }</p>
                    </section>
                }) }
            </div>
            <div style="position:absolute; bottom:8px; width:100%; text-align:center; font-size:12px; color:#8b949e;">
                { format!("{} / {}", deck.position + 1, deck.slides.len()) }
            </div>
        </div>
    }
}
