//! The gesture tracker state machine. One instance per bound target; it owns the
//! target's `TouchSession` and turns lifecycle inputs into callback emissions.

use log::{debug, trace};

use crate::classify::{self, Outcome};
use crate::config::{GestureConfig, Handler, Settings};
use crate::model::{GestureResult, MoveResult, Point, WipeResult};
use crate::state::TouchSession;

/// What the tracker needs from a platform input event.
pub trait InputEvent {
    /// Node the event originated on; kept for tap dispatch.
    type Target: Clone;

    /// Fingers currently on the surface, in platform order.
    fn touches(&self) -> Vec<Point>;
    fn target(&self) -> Option<Self::Target>;
    /// Milliseconds on a monotonic clock shared by all events of a session.
    fn time_stamp(&self) -> f64;
    fn scale(&self) -> Option<f64>;
    fn rotation(&self) -> Option<f64>;
    fn prevent_default(&self);
    /// Fires a synthetic `tap` at `target` (or its parent element for text nodes).
    fn dispatch_tap(&self, target: &Self::Target);
}

pub struct GestureTracker<E: InputEvent, C> {
    config: GestureConfig<E, C>,
    session: TouchSession<E::Target>,
    aliases_resolved: bool,
}

impl<E: InputEvent, C> GestureTracker<E, C> {
    pub fn new(config: GestureConfig<E, C>) -> Self {
        Self {
            config,
            session: TouchSession::default(),
            aliases_resolved: false,
        }
    }

    pub fn session(&self) -> &TouchSession<E::Target> {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.config.settings
    }

    pub fn context(&self) -> &C {
        &self.config.context
    }

    /// Floored mean position of the touching fingers, for live display.
    pub fn live_center(&self) -> Option<Point> {
        self.session.center
    }

    pub fn touch_start(&mut self, e: &E) {
        let touches = e.touches();
        if touches.is_empty() {
            return;
        }
        if !self.aliases_resolved {
            let allow = self.config.settings.allow_diagonal;
            self.config.handlers.resolve_legacy_aliases(allow);
            self.aliases_resolved = true;
        }
        let now = e.time_stamp();
        if self.is_stale(now) {
            debug!("discarding stale touch session");
            self.session.reset();
        }
        if self.session.begin(now, e.target()) {
            debug!("touch session started with {} finger(s)", touches.len());
        }
        self.session.add_fingers(&touches);
        if self.config.settings.prevent_default {
            e.prevent_default();
        }
    }

    pub fn touch_move(&mut self, e: &E) {
        if self.config.settings.prevent_default {
            e.prevent_default();
        }
        if !self.session.tracking {
            return;
        }
        let touches = e.touches();
        if touches.is_empty() {
            return;
        }
        self.session.apply_move(&touches);
        trace!("touch move, center {:?}", self.session.center);
        if !self.session.suppressed {
            let result = MoveResult { fingers: self.session.arrays(), scale: None };
            self.emit(&self.config.handlers.wipe_move, &result, e);
        }
    }

    pub fn touch_end(&mut self, e: &E) {
        self.session.touching = 0;
        if self.session.tracking && !self.session.suppressed {
            self.finish(e);
        }
        self.session.reset();
    }

    pub fn touch_cancel(&mut self, e: &E) {
        let result = MoveResult {
            fingers: self.session.arrays(),
            scale: e.scale(),
        };
        self.emit(&self.config.handlers.wipe_move_cancel, &result, e);
        self.session.reset();
    }

    pub fn gesture_start(&mut self, e: &E) {
        let result = self.gesture_result(e);
        self.emit(&self.config.handlers.gesture_start, &result, e);
        if !self.config.settings.wipe_with_gesture {
            debug!("native gesture preempts wipe tracking");
            // The cancel resets the session, clearing this flag again. What keeps the
            // gesture's own moves and end from classifying is `tracking == false`.
            self.session.suppressed = true;
            self.touch_cancel(e);
        }
    }

    pub fn gesture_change(&mut self, e: &E) {
        let result = self.gesture_result(e);
        self.emit(&self.config.handlers.gesture_change, &result, e);
    }

    pub fn gesture_end(&mut self, e: &E) {
        let result = self.gesture_result(e);
        self.emit(&self.config.handlers.gesture_end, &result, e);
    }

    fn finish(&mut self, e: &E) {
        let Some(mean) = self.session.mean_displacement() else {
            return;
        };
        let started = self.session.started_at.unwrap_or_else(|| e.time_stamp());
        let duration = e.time_stamp() - started;
        let outcome = classify::classify(
            &self.config.settings,
            mean,
            self.session.ever_seen,
            duration,
            self.session.arrays(),
        );
        match outcome {
            Outcome::Tap => {
                let target = self.session.last_target.clone();
                self.touch_cancel(e);
                debug!("tap after {:.0} ms", duration);
                if let Some(t) = target {
                    e.dispatch_tap(&t);
                }
            }
            Outcome::Wipe { directions, result } => {
                debug!(
                    "wipe {:?} speed {} ({:.0}, {:.0}) over {:.0} ms",
                    directions, result.speed, result.x, result.y, duration
                );
                for dir in directions {
                    if let Some(h) = self.config.handlers.wipe(dir) {
                        h(&result, e, &self.config.context);
                    }
                }
                self.emit(&self.config.handlers.wipe_move_end, &result, e);
                if self.config.settings.prevent_default {
                    e.prevent_default();
                }
            }
        }
    }

    fn is_stale(&self, now: f64) -> bool {
        match (self.config.settings.session_timeout_ms, self.session.started_at) {
            (Some(limit), Some(start)) => now - start > limit,
            _ => false,
        }
    }

    fn gesture_result(&self, e: &E) -> GestureResult {
        GestureResult {
            fingers: self.session.arrays(),
            scale: e.scale().unwrap_or(1.0),
            rotation: e.rotation().unwrap_or(0.0),
        }
    }

    fn emit<R>(&self, slot: &Option<Handler<R, E, C>>, result: &R, e: &E) {
        if let Some(h) = slot {
            h(result, e, &self.config.context);
        }
    }
}
