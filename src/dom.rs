//! Binds a [`GestureTracker`] to a DOM target through `web_sys` listeners.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, CustomEvent, CustomEventInit, EventTarget, Node, TouchEvent,
};

use crate::config::GestureConfig;
use crate::model::Point;
use crate::tracker::{GestureTracker, InputEvent};

pub const TAP_EVENT: &str = "tap";

#[derive(Debug, Error)]
pub enum BindError {
    #[error("failed to attach `{event}` listener: {message}")]
    Attach { event: &'static str, message: String },
}

/// A DOM touch or gesture event as seen by the tracker.
#[derive(Debug, Clone)]
pub struct DomInput {
    event: web_sys::Event,
}

impl DomInput {
    pub fn new(event: web_sys::Event) -> Self {
        Self { event }
    }

    pub fn event(&self) -> &web_sys::Event {
        &self.event
    }

    fn number(&self, key: &str) -> Option<f64> {
        js_sys::Reflect::get(&self.event, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_f64())
    }
}

impl InputEvent for DomInput {
    type Target = Node;

    fn touches(&self) -> Vec<Point> {
        let Some(te) = self.event.dyn_ref::<TouchEvent>() else {
            return Vec::new();
        };
        let list = te.touches();
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|t| Point::new(t.page_x() as f64, t.page_y() as f64))
            .collect()
    }

    fn target(&self) -> Option<Node> {
        self.event.target().and_then(|t| t.dyn_into::<Node>().ok())
    }

    fn time_stamp(&self) -> f64 {
        self.event.time_stamp()
    }

    // GestureEvent is WebKit-only and absent from web-sys, so read it reflectively.
    fn scale(&self) -> Option<f64> {
        self.number("scale")
    }

    fn rotation(&self) -> Option<f64> {
        self.number("rotation")
    }

    fn prevent_default(&self) {
        self.event.prevent_default();
    }

    fn dispatch_tap(&self, target: &Node) {
        let node: EventTarget = match tap_target(target.node_type()) {
            TapTarget::Parent => match target.parent_element() {
                Some(el) => el.into(),
                None => return,
            },
            TapTarget::Itself => target.clone().into(),
        };
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        match CustomEvent::new_with_event_init_dict(TAP_EVENT, &init) {
            Ok(ev) => {
                if let Err(err) = node.dispatch_event(&ev) {
                    warn!("tap dispatch failed: {}", describe(&err));
                }
            }
            Err(err) => warn!("could not create tap event: {}", describe(&err)),
        }
    }
}

/// Handle for one registration. Stale handles (replaced or unregistered) are inert.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    id: u64,
    target: EventTarget,
    live: bool,
}

impl Binding {
    /// False when the platform has no touch support and nothing was attached.
    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn target(&self) -> &EventTarget {
        &self.target
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TapTarget {
    Itself,
    /// Text nodes cannot receive dispatched events usefully; use the owning element.
    Parent,
}

fn tap_target(node_type: u16) -> TapTarget {
    if node_type == Node::TEXT_NODE {
        TapTarget::Parent
    } else {
        TapTarget::Itself
    }
}

type Listener = (&'static str, Closure<dyn FnMut(web_sys::Event)>);

/// Outcome of [`Registry::bind`]: the new id, and whether anything was attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    id: u64,
    live: bool,
}

/// Live bindings keyed by target. At most one entry per key.
struct Registry<K, L> {
    next_id: u64,
    entries: Vec<(u64, K, L)>,
}

impl<K: PartialEq, L> Registry<K, L> {
    const fn new() -> Self {
        Self { next_id: 1, entries: Vec::new() }
    }

    /// Detaches any entry already bound to `key`, then attaches a new one unless
    /// `supported` is false, in which case the slot is inert and `attach` never runs.
    fn bind<Err>(
        &mut self,
        key: K,
        supported: bool,
        detach: impl FnOnce(&K, L),
        attach: impl FnOnce() -> Result<L, Err>,
    ) -> Result<Slot, Err> {
        let id = self.next_id;
        self.next_id += 1;
        if let Some(idx) = self.entries.iter().position(|(_, k, _)| *k == key) {
            let (old, k, listeners) = self.entries.swap_remove(idx);
            debug!("replacing touch binding {old}");
            detach(&k, listeners);
        }
        if !supported {
            return Ok(Slot { id, live: false });
        }
        let listeners = attach()?;
        self.entries.push((id, key, listeners));
        Ok(Slot { id, live: true })
    }

    /// Removes the entry for `id`. Stale ids (replaced or already removed) yield `None`.
    fn unbind(&mut self, id: u64) -> Option<(K, L)> {
        let idx = self.entries.iter().position(|(i, _, _)| *i == id)?;
        let (_, k, l) = self.entries.swap_remove(idx);
        Some((k, l))
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.iter().any(|(_, k, _)| k == key)
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry<EventTarget, Vec<Listener>>> =
        const { RefCell::new(Registry::new()) };
}

/// Whether the host advertises touch input (`ontouchstart` on the document element).
pub fn touch_supported() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|el| js_sys::Reflect::has(&el, &JsValue::from_str("ontouchstart")).ok())
        .unwrap_or(false)
}

/// Attaches a tracker to `target`, replacing any earlier registration there.
pub fn register<C: 'static>(
    target: &EventTarget,
    config: GestureConfig<DomInput, C>,
) -> Result<Binding, BindError> {
    let supported = touch_supported();
    let slot = REGISTRY.with(|r| {
        r.borrow_mut().bind(
            target.clone(),
            supported,
            |t, listeners| detach_all(t, &listeners),
            || attach(target, config),
        )
    })?;
    if slot.live {
        debug!("touch binding {} attached", slot.id);
    } else {
        debug!("no touch support; binding {} is inert", slot.id);
    }
    Ok(Binding { id: slot.id, target: target.clone(), live: slot.live })
}

fn attach<C: 'static>(
    target: &EventTarget,
    config: GestureConfig<DomInput, C>,
) -> Result<Vec<Listener>, BindError> {
    let tracker = Rc::new(RefCell::new(GestureTracker::new(config)));
    type Route<C> = (&'static str, fn(&mut GestureTracker<DomInput, C>, &DomInput));
    let routes: [Route<C>; 7] = [
        ("touchstart", GestureTracker::touch_start),
        ("touchmove", GestureTracker::touch_move),
        ("touchend", GestureTracker::touch_end),
        ("touchcancel", GestureTracker::touch_cancel),
        ("gesturestart", GestureTracker::gesture_start),
        ("gesturechange", GestureTracker::gesture_change),
        ("gestureend", GestureTracker::gesture_end),
    ];

    // Non-passive so preventDefault can stop scrolling.
    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);

    let mut listeners: Vec<Listener> = Vec::with_capacity(routes.len());
    for (name, route) in routes {
        let tracker = tracker.clone();
        let cb = Closure::wrap(Box::new(move |e: web_sys::Event| {
            let input = DomInput::new(e);
            match tracker.try_borrow_mut() {
                Ok(mut t) => route(&mut *t, &input),
                Err(_) => warn!("`{name}` arrived while the tracker was busy; dropped"),
            }
        }) as Box<dyn FnMut(_)>);
        let attached = target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            cb.as_ref().unchecked_ref(),
            &opts,
        );
        if let Err(err) = attached {
            detach_all(target, &listeners);
            return Err(BindError::Attach { event: name, message: describe(&err) });
        }
        listeners.push((name, cb));
    }
    Ok(listeners)
}

/// Detaches every listener of `binding`. Later input on the target is ignored.
pub fn unregister(binding: &Binding) {
    if let Some((target, listeners)) = REGISTRY.with(|r| r.borrow_mut().unbind(binding.id)) {
        debug!("touch binding {} detached", binding.id);
        detach_all(&target, &listeners);
    }
}

pub fn is_registered(target: &EventTarget) -> bool {
    REGISTRY.with(|r| r.borrow().contains(target))
}

fn detach_all(target: &EventTarget, listeners: &[Listener]) {
    for (name, cb) in listeners {
        let _ = target.remove_event_listener_with_callback(name, cb.as_ref().unchecked_ref());
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    type Reg = Registry<&'static str, Vec<&'static str>>;

    fn listeners() -> Result<Vec<&'static str>, String> {
        Ok(vec!["touchstart", "touchend"])
    }

    #[test]
    fn rebinding_same_target_detaches_previous() {
        let mut reg = Reg::new();
        let first = reg
            .bind("deck", true, |_, _| panic!("nothing to detach"), listeners)
            .unwrap();
        let mut detached = Vec::new();
        let second = reg
            .bind("deck", true, |k, l| detached.push((*k, l)), listeners)
            .unwrap();
        assert_ne!(first.id, second.id);
        assert!(second.live);
        assert_eq!(detached, vec![("deck", vec!["touchstart", "touchend"])]);
        assert_eq!(reg.entries.len(), 1);
        assert!(reg.contains(&"deck"));
    }

    #[test]
    fn stale_handle_unbind_is_a_no_op() {
        let mut reg = Reg::new();
        let first = reg.bind("deck", true, |_, _| {}, listeners).unwrap();
        let second = reg.bind("deck", true, |_, _| {}, listeners).unwrap();
        assert!(reg.unbind(first.id).is_none());
        assert!(reg.contains(&"deck"));
        assert!(reg.unbind(second.id).is_some());
        assert!(reg.unbind(second.id).is_none());
        assert!(!reg.contains(&"deck"));
    }

    #[test]
    fn unsupported_platform_yields_inert_slot() {
        let mut reg = Reg::new();
        reg.bind("deck", true, |_, _| {}, listeners).unwrap();
        let mut detached = 0;
        let slot = reg
            .bind(
                "deck",
                false,
                |_, _| detached += 1,
                || -> Result<Vec<&'static str>, String> { panic!("must not attach") },
            )
            .unwrap();
        assert!(!slot.live);
        assert_eq!(detached, 1);
        assert!(!reg.contains(&"deck"));
        assert!(reg.unbind(slot.id).is_none());
    }

    #[test]
    fn failed_attach_leaves_target_unbound() {
        let mut reg = Reg::new();
        let err = reg
            .bind("deck", true, |_, _| {}, || Err::<Vec<&'static str>, _>("boom".to_string()))
            .unwrap_err();
        assert_eq!(err, "boom");
        assert!(!reg.contains(&"deck"));
    }

    #[test]
    fn targets_are_independent() {
        let mut reg = Reg::new();
        let a = reg.bind("a", true, |_, _| panic!("a is new"), listeners).unwrap();
        reg.bind("b", true, |_, _| panic!("b is new"), listeners).unwrap();
        reg.unbind(a.id);
        assert!(!reg.contains(&"a"));
        assert!(reg.contains(&"b"));
    }

    #[test]
    fn tap_on_text_node_goes_to_parent() {
        assert_eq!(tap_target(Node::TEXT_NODE), TapTarget::Parent);
        assert_eq!(tap_target(Node::ELEMENT_NODE), TapTarget::Itself);
        assert_eq!(tap_target(Node::DOCUMENT_NODE), TapTarget::Itself);
    }

    #[test]
    fn bind_error_names_the_event() {
        let err = BindError::Attach { event: "touchmove", message: "denied".into() };
        assert_eq!(err.to_string(), "failed to attach `touchmove` listener: denied");
    }
}
