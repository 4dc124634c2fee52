//! Per-binding configuration: thresholds and flags, the callback table, and an opaque
//! context value handed back to every callback.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::{GestureResult, MoveResult, WipeDirection, WipeResult};

/// Callback signature shared by every slot: `(result, original_event, context)`.
pub type Handler<R, E, C> = Rc<dyn Fn(&R, &E, &C)>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Minimum horizontal travel in pixels for a wipe.
    pub move_x: f64,
    /// Minimum vertical travel in pixels for a wipe.
    pub move_y: f64,
    pub prevent_default: bool,
    pub allow_diagonal: bool,
    pub tap_to_click: bool,
    /// When false a native gesture aborts wipe tracking for the session.
    pub wipe_with_gesture: bool,
    /// Discard a session older than this on the next contact start. `None` keeps it forever.
    pub session_timeout_ms: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_x: 40.0,
            move_y: 40.0,
            prevent_default: true,
            allow_diagonal: false,
            tap_to_click: false,
            wipe_with_gesture: false,
            session_timeout_ms: None,
        }
    }
}

impl Settings {
    /// Parses a partial JSON object; missing keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

pub struct Handlers<E, C> {
    pub wipe_left: Option<Handler<WipeResult, E, C>>,
    pub wipe_right: Option<Handler<WipeResult, E, C>>,
    pub wipe_up: Option<Handler<WipeResult, E, C>>,
    pub wipe_down: Option<Handler<WipeResult, E, C>>,
    pub wipe_up_left: Option<Handler<WipeResult, E, C>>,
    pub wipe_up_right: Option<Handler<WipeResult, E, C>>,
    pub wipe_down_left: Option<Handler<WipeResult, E, C>>,
    pub wipe_down_right: Option<Handler<WipeResult, E, C>>,
    pub wipe_move: Option<Handler<MoveResult, E, C>>,
    pub wipe_move_cancel: Option<Handler<MoveResult, E, C>>,
    pub wipe_move_end: Option<Handler<WipeResult, E, C>>,
    pub gesture_start: Option<Handler<GestureResult, E, C>>,
    pub gesture_change: Option<Handler<GestureResult, E, C>>,
    pub gesture_end: Option<Handler<GestureResult, E, C>>,
    // Deprecated names for the diagonal slots.
    pub wipe_top_left: Option<Handler<WipeResult, E, C>>,
    pub wipe_top_right: Option<Handler<WipeResult, E, C>>,
    pub wipe_bottom_left: Option<Handler<WipeResult, E, C>>,
    pub wipe_bottom_right: Option<Handler<WipeResult, E, C>>,
}

// Derives would demand E: Default / E: Clone.
impl<E, C> Default for Handlers<E, C> {
    fn default() -> Self {
        Self {
            wipe_left: None,
            wipe_right: None,
            wipe_up: None,
            wipe_down: None,
            wipe_up_left: None,
            wipe_up_right: None,
            wipe_down_left: None,
            wipe_down_right: None,
            wipe_move: None,
            wipe_move_cancel: None,
            wipe_move_end: None,
            gesture_start: None,
            gesture_change: None,
            gesture_end: None,
            wipe_top_left: None,
            wipe_top_right: None,
            wipe_bottom_left: None,
            wipe_bottom_right: None,
        }
    }
}

impl<E, C> Clone for Handlers<E, C> {
    fn clone(&self) -> Self {
        Self {
            wipe_left: self.wipe_left.clone(),
            wipe_right: self.wipe_right.clone(),
            wipe_up: self.wipe_up.clone(),
            wipe_down: self.wipe_down.clone(),
            wipe_up_left: self.wipe_up_left.clone(),
            wipe_up_right: self.wipe_up_right.clone(),
            wipe_down_left: self.wipe_down_left.clone(),
            wipe_down_right: self.wipe_down_right.clone(),
            wipe_move: self.wipe_move.clone(),
            wipe_move_cancel: self.wipe_move_cancel.clone(),
            wipe_move_end: self.wipe_move_end.clone(),
            gesture_start: self.gesture_start.clone(),
            gesture_change: self.gesture_change.clone(),
            gesture_end: self.gesture_end.clone(),
            wipe_top_left: self.wipe_top_left.clone(),
            wipe_top_right: self.wipe_top_right.clone(),
            wipe_bottom_left: self.wipe_bottom_left.clone(),
            wipe_bottom_right: self.wipe_bottom_right.clone(),
        }
    }
}

impl<E, C> fmt::Debug for Handlers<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = |h: bool, name: &'static str| if h { Some(name) } else { None };
        let names: Vec<&str> = [
            set(self.wipe_left.is_some(), "wipeLeft"),
            set(self.wipe_right.is_some(), "wipeRight"),
            set(self.wipe_up.is_some(), "wipeUp"),
            set(self.wipe_down.is_some(), "wipeDown"),
            set(self.wipe_up_left.is_some(), "wipeUpLeft"),
            set(self.wipe_up_right.is_some(), "wipeUpRight"),
            set(self.wipe_down_left.is_some(), "wipeDownLeft"),
            set(self.wipe_down_right.is_some(), "wipeDownRight"),
            set(self.wipe_move.is_some(), "wipeMove"),
            set(self.wipe_move_cancel.is_some(), "wipeMoveCancel"),
            set(self.wipe_move_end.is_some(), "wipeMoveEnd"),
            set(self.gesture_start.is_some(), "gestureStart"),
            set(self.gesture_change.is_some(), "gestureChange"),
            set(self.gesture_end.is_some(), "gestureEnd"),
        ]
        .into_iter()
        .flatten()
        .collect();
        f.debug_struct("Handlers").field("set", &names).finish()
    }
}

impl<E, C> Handlers<E, C> {
    pub fn wipe(&self, dir: WipeDirection) -> Option<&Handler<WipeResult, E, C>> {
        match dir {
            WipeDirection::Left => self.wipe_left.as_ref(),
            WipeDirection::Right => self.wipe_right.as_ref(),
            WipeDirection::Up => self.wipe_up.as_ref(),
            WipeDirection::Down => self.wipe_down.as_ref(),
            WipeDirection::UpLeft => self.wipe_up_left.as_ref(),
            WipeDirection::UpRight => self.wipe_up_right.as_ref(),
            WipeDirection::DownLeft => self.wipe_down_left.as_ref(),
            WipeDirection::DownRight => self.wipe_down_right.as_ref(),
        }
    }

    /// Adopts a legacy diagonal callback where the modern slot is empty.
    /// Only applies when diagonals are enabled; repeated calls change nothing.
    pub fn resolve_legacy_aliases(&mut self, allow_diagonal: bool) {
        if !allow_diagonal {
            return;
        }
        adopt(&mut self.wipe_up_left, &self.wipe_top_left);
        adopt(&mut self.wipe_up_right, &self.wipe_top_right);
        adopt(&mut self.wipe_down_left, &self.wipe_bottom_left);
        adopt(&mut self.wipe_down_right, &self.wipe_bottom_right);
    }
}

fn adopt<H: Clone>(slot: &mut Option<H>, legacy: &Option<H>) {
    if slot.is_none() {
        slot.clone_from(legacy);
    }
}

/// Everything supplied at registration. Immutable once handed to a tracker.
pub struct GestureConfig<E, C> {
    pub settings: Settings,
    pub handlers: Handlers<E, C>,
    pub context: C,
}

impl<E, C: Default> Default for GestureConfig<E, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

macro_rules! handler_setters {
    ($($name:ident => $slot:ident : $res:ty),* $(,)?) => {
        $(
            pub fn $name(mut self, f: impl Fn(&$res, &E, &C) + 'static) -> Self {
                self.handlers.$slot = Some(Rc::new(f));
                self
            }
        )*
    };
}

impl<E, C> GestureConfig<E, C> {
    pub fn new(context: C) -> Self {
        Self {
            settings: Settings::default(),
            handlers: Handlers::default(),
            context,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    handler_setters! {
        on_wipe_left => wipe_left: WipeResult,
        on_wipe_right => wipe_right: WipeResult,
        on_wipe_up => wipe_up: WipeResult,
        on_wipe_down => wipe_down: WipeResult,
        on_wipe_up_left => wipe_up_left: WipeResult,
        on_wipe_up_right => wipe_up_right: WipeResult,
        on_wipe_down_left => wipe_down_left: WipeResult,
        on_wipe_down_right => wipe_down_right: WipeResult,
        on_wipe_move => wipe_move: MoveResult,
        on_wipe_move_cancel => wipe_move_cancel: MoveResult,
        on_wipe_move_end => wipe_move_end: WipeResult,
        on_gesture_start => gesture_start: GestureResult,
        on_gesture_change => gesture_change: GestureResult,
        on_gesture_end => gesture_end: GestureResult,
        on_wipe_top_left => wipe_top_left: WipeResult,
        on_wipe_top_right => wipe_top_right: WipeResult,
        on_wipe_bottom_left => wipe_bottom_left: WipeResult,
        on_wipe_bottom_right => wipe_bottom_right: WipeResult,
    }
}

impl<E, C: fmt::Debug> fmt::Debug for GestureConfig<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureConfig")
            .field("settings", &self.settings)
            .field("handlers", &self.handlers)
            .field("context", &self.context)
            .finish()
    }
}
